mod app;
mod tui;
mod ui;

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mediadeck_core::config::DEFAULT_SERVER_URL;
use mediadeck_core::{
    CancellationToken, ClientConfig, FolderListing, FolderTree, HttpMediaApi, ScanConfig,
    ScanMessage, Scanner, Session,
};
use ratatui::{Terminal, backend::CrosstermBackend, style::Style, widgets::Widget};
use tracing_subscriber::EnvFilter;

use app::{Action, AppMode, AppState};
use tui::{AppEvent, EventHandler, handle_key};
use ui::{
    ActionBar, AppLayout, ConfirmDeleteView, FolderListView, Footer, Header, HelpView, NoticeLine,
    ProgressView, Theme, ToolsView,
};

const LOG_FILTER_DEFAULT: &str = "info";

/// MEDIADECK - terminal client for a local media server
#[derive(Parser, Debug)]
#[command(name = "mediadeck")]
#[command(about = "Browse, select and delete media folders served by a local media server")]
#[command(version)]
struct Args {
    /// Media root to browse (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Base URL of the media server
    #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Cache job status poll interval in milliseconds
    #[arg(long, default_value_t = 2000)]
    poll_interval_ms: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Maximum depth to scan
    #[arg(short, long)]
    max_depth: Option<usize>,

    /// Follow symbolic links
    #[arg(short, long)]
    follow_symlinks: bool,

    /// Do not ping the server in the background
    #[arg(long)]
    no_heartbeat: bool,

    /// Log file (defaults to the user cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            server_url: self.server.clone(),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            request_timeout: Duration::from_secs(self.timeout_secs),
            heartbeat: !self.no_heartbeat,
            ..ClientConfig::default()
        }
    }

    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            follow_symlinks: self.follow_symlinks,
            max_depth: self.max_depth,
            ..ScanConfig::default()
        }
    }
}

/// Log to a file; the terminal belongs to the UI. Override the filter via `RUST_LOG`.
fn init_logging(log_file: Option<PathBuf>) -> Result<()> {
    let Some(path) = log_file.or_else(|| {
        dirs::cache_dir().map(|dir| dir.join("mediadeck").join("mediadeck.log"))
    }) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER_DEFAULT));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_file.clone())?;

    // Resolve path
    let path = args
        .path
        .clone()
        .canonicalize()
        .unwrap_or(args.path.clone());

    let config = args.client_config();
    let api = HttpMediaApi::new(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;

    // Validates the root before the terminal is taken over
    let cancel_token = CancellationToken::new();
    let scanner = Scanner::new(args.scan_config()).with_cancellation(cancel_token.clone());
    let (scan_rx, scan_handle) = scanner.scan(path.clone())?;
    tracing::info!(root = %path.display(), server = %config.server_url, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let scan = ScanState {
        rx: scan_rx,
        handle: Some(scan_handle),
        cancel: cancel_token,
    };
    let result = run_app(&mut terminal, path, scan, api, &runtime, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    // Pending requests are abandoned
    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}

struct ScanState {
    rx: crossbeam_channel::Receiver<ScanMessage>,
    handle: Option<JoinHandle<Vec<FolderListing>>>,
    cancel: CancellationToken,
}

/// Collect the listings of a finished scan. A panicked scanner thread is an error.
fn finish_scan(scan: &mut ScanState) -> Result<Option<Vec<FolderListing>>> {
    let Some(handle) = scan.handle.take() else {
        return Ok(None);
    };
    match handle.join() {
        Ok(listings) => Ok(Some(listings)),
        Err(_) => {
            tracing::error!("scanner thread panicked");
            Err(eyre!("Scan fehlgeschlagen: der Scanner wurde unerwartet beendet"))
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    path: PathBuf,
    mut scan: ScanState,
    api: HttpMediaApi,
    runtime: &tokio::runtime::Runtime,
    config: &ClientConfig,
) -> Result<()> {
    let theme = Theme::default();
    let mut state = AppState::new(path);
    let event_handler = EventHandler::new(50); // 50ms tick rate
    let mut api = Some(api);

    loop {
        // Scan progress/completion
        if state.session.is_none() {
            while let Ok(msg) = scan.rx.try_recv() {
                match msg {
                    ScanMessage::Progress(progress) => {
                        state.update_progress(progress);
                    }
                    ScanMessage::Completed => {
                        if let Some(listings) = finish_scan(&mut scan)?
                            && let Some(api) = api.take()
                        {
                            let tree = FolderTree::from_listings(listings);
                            tracing::info!(
                                folders = tree.len(),
                                files = tree.total_files(),
                                "scan finished"
                            );
                            let session =
                                Session::new(tree, Arc::new(api), runtime.handle().clone(), config);
                            state.set_session(session);
                        }
                        break;
                    }
                    ScanMessage::Cancelled => {
                        state.quit();
                    }
                }
            }
        }

        // Apply finished requests
        state.pump();

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();
            let action_bar_visible = state
                .session
                .as_ref()
                .is_some_and(Session::action_bar_visible);
            let layout = AppLayout::new(area, action_bar_visible);

            // Background
            frame
                .buffer_mut()
                .set_style(area, Style::default().bg(theme.bg));

            // Update visible height for scrolling
            state.visible_height = layout.list.height as usize;

            Header::new(&state, &theme).render(layout.header, frame.buffer_mut());

            match &state.session {
                None => {
                    ProgressView::new(&state.progress, state.spinner_frame, &theme)
                        .render(layout.list, frame.buffer_mut());
                }
                Some(session) => {
                    if action_bar_visible {
                        ActionBar::new(session.selection_counts(), &theme)
                            .render(layout.action_bar, frame.buffer_mut());
                    }

                    let rows = state.rows();
                    FolderListView::new(
                        session.tree(),
                        session.accordion(),
                        &rows,
                        state.selected_index,
                        state.scroll_offset,
                        &theme,
                    )
                    .render(layout.list, frame.buffer_mut());

                    NoticeLine::new(session.notice(), &theme)
                        .render(layout.status, frame.buffer_mut());

                    match state.mode {
                        AppMode::Help => {
                            HelpView::new(&theme).render(area, frame.buffer_mut());
                        }
                        AppMode::Tools => {
                            ToolsView::new(session.job(), session.cache_stats(), &theme)
                                .render(area, frame.buffer_mut());
                        }
                        AppMode::ConfirmDelete => {
                            if let Some(prompt) = state.delete_prompt() {
                                ConfirmDeleteView::new(&prompt, &theme)
                                    .render(area, frame.buffer_mut());
                            }
                        }
                        AppMode::Scanning | AppMode::Browsing => {}
                    }
                }
            }

            let deleting = state
                .session
                .as_ref()
                .is_some_and(Session::delete_in_progress);
            Footer::new(state.mode, &theme)
                .with_delete_in_progress(deleting)
                .render(layout.footer, frame.buffer_mut());
        })?;

        // Handle events
        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = handle_key(key, state.mode);
                if action != Action::Tick {
                    state.dismiss_notice();
                }
                handle_action(&mut state, action);
            }
            AppEvent::Resize => {
                // Terminal will redraw on next loop
            }
            AppEvent::Tick => {
                state.tick_spinner();
            }
        }

        if state.should_quit {
            scan.cancel.cancel();
            break;
        }
    }

    Ok(())
}

fn handle_action(state: &mut AppState, action: Action) {
    match action {
        Action::MoveUp => state.move_up(),
        Action::MoveDown => state.move_down(),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),
        Action::GoToFirst => state.go_to_first(),
        Action::GoToLast => state.go_to_last(),
        Action::Expand => state.expand_selected(),
        Action::Collapse => state.collapse_selected(),
        Action::ToggleExpand => state.toggle_expand(),
        Action::ToggleCheck => state.toggle_check(),
        Action::SelectAll => state.select_all(),
        Action::SelectNone => state.select_none(),
        Action::InvertSelection => state.invert_selection(),
        Action::Delete => state.request_delete(),
        Action::ConfirmDelete => state.confirm_delete(),
        Action::CancelDelete => state.cancel_delete(),
        Action::ShowHelp => state.show_help(),
        Action::HideHelp => state.hide_help(),
        Action::ShowTools => state.show_tools(),
        Action::HideTools => state.hide_tools(),
        Action::StartJob => state.start_job(),
        Action::StopJob => state.stop_job(),
        Action::RefreshStats => state.refresh_stats(),
        Action::Quit => state.quit(),
        Action::Tick => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_state(handle: JoinHandle<Vec<FolderListing>>) -> ScanState {
        let (_tx, rx) = crossbeam_channel::unbounded();
        ScanState {
            rx,
            handle: Some(handle),
            cancel: CancellationToken::new(),
        }
    }

    #[test]
    fn test_finish_scan_returns_listings_once() {
        let mut scan = scan_state(std::thread::spawn(|| {
            vec![FolderListing::new(".", vec!["a.jpg".to_string()])]
        }));
        let listings = finish_scan(&mut scan).unwrap().unwrap();
        assert_eq!(listings.len(), 1);
        assert!(finish_scan(&mut scan).unwrap().is_none());
    }

    #[test]
    fn test_finish_scan_reports_panicked_scanner() {
        let mut scan = scan_state(std::thread::spawn(|| -> Vec<FolderListing> {
            panic!("walker crashed")
        }));
        let err = finish_scan(&mut scan).unwrap_err();
        assert!(err.to_string().contains("Scan fehlgeschlagen"));
    }
}
