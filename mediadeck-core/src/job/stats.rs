use crate::error::ClientResult;
use crate::remote::{CacheStatsData, Envelope};

/// Thumbnail cache statistics shown next to the job controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CacheStats {
    #[default]
    Unknown,
    Loading,
    Loaded(CacheStatsData),
    Failed(String),
}

impl CacheStats {
    pub fn apply(&mut self, result: ClientResult<Envelope<CacheStatsData>>) {
        *self = match result {
            Ok(Envelope {
                success: true,
                data: Some(data),
                ..
            }) => CacheStats::Loaded(data),
            Ok(envelope) => {
                CacheStats::Failed(envelope.error.unwrap_or_else(|| "Fehler".to_string()))
            }
            Err(err) => {
                tracing::warn!(error = %err, "cache statistics request failed");
                CacheStats::Failed(err.to_string())
            }
        };
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            CacheStats::Unknown => Vec::new(),
            CacheStats::Loading => vec!["⏳ Lade Statistiken...".to_string()],
            CacheStats::Loaded(data) => vec![
                format!("📁 .thumbs Ordner: {}", data.thumbs_directories),
                format!("🖼️ Thumbnail-Dateien: {}", data.thumbnail_files),
                format!("💾 Gesamtgröße: {}", data.total_size_formatted),
            ],
            CacheStats::Failed(message) => vec![format!("❌ {}", message)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_stats_lines() {
        let mut stats = CacheStats::Loading;
        stats.apply(Ok(Envelope::ok(CacheStatsData {
            thumbs_directories: 4,
            thumbnail_files: 120,
            total_size_formatted: "12.3 MB".to_string(),
        })));
        assert_eq!(
            stats.lines(),
            vec![
                "📁 .thumbs Ordner: 4",
                "🖼️ Thumbnail-Dateien: 120",
                "💾 Gesamtgröße: 12.3 MB",
            ]
        );

        stats.apply(Err(ClientError::Transport("connection refused".to_string())));
        assert_eq!(stats.lines(), vec!["❌ connection refused"]);

        stats.apply(Ok(Envelope::failed("no root")));
        assert_eq!(stats, CacheStats::Failed("no root".to_string()));
    }
}
