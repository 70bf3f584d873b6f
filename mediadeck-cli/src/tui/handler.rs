use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, AppMode};

/// Map key events to actions based on current mode
pub fn handle_key(key: KeyEvent, mode: AppMode) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    match mode {
        AppMode::Scanning => handle_key_scanning(key),
        AppMode::Browsing => handle_key_browsing(key),
        AppMode::Help => handle_key_help(key),
        AppMode::ConfirmDelete => handle_key_confirm(key),
        AppMode::Tools => handle_key_tools(key),
    }
}

fn handle_key_scanning(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        _ => Action::Tick,
    }
}

fn handle_key_help(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::HideHelp,
        _ => Action::Tick,
    }
}

fn handle_key_confirm(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::ConfirmDelete,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::CancelDelete,
        _ => Action::Tick,
    }
}

fn handle_key_tools(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('s') => Action::StartJob,
        KeyCode::Char('x') => Action::StopJob,
        KeyCode::Char('r') => Action::RefreshStats,
        KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('q') => Action::HideTools,
        _ => Action::Tick,
    }
}

fn handle_key_browsing(key: KeyEvent) -> Action {
    match key.code {
        // Quit
        KeyCode::Char('q') => Action::Quit,

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::GoToFirst,
        KeyCode::End | KeyCode::Char('G') => Action::GoToLast,

        // Accordion
        KeyCode::Right | KeyCode::Char('l') => Action::Expand,
        KeyCode::Left | KeyCode::Char('h') => Action::Collapse,
        KeyCode::Enter | KeyCode::Tab => Action::ToggleExpand,

        // Selection
        KeyCode::Char(' ') => Action::ToggleCheck,
        KeyCode::Char('a') => Action::SelectAll,
        KeyCode::Char('n') => Action::SelectNone,
        KeyCode::Char('i') => Action::InvertSelection,

        // Actions
        KeyCode::Char('d') | KeyCode::Delete => Action::Delete,
        KeyCode::Char('t') => Action::ShowTools,
        KeyCode::Char('?') => Action::ShowHelp,

        _ => Action::Tick,
    }
}
