//! Server configuration

use labordash_core::{CoreResult, MetricsSnapshot};
use std::path::PathBuf;

/// Default listen address of the development server
pub const DEFAULT_BIND: &str = "127.0.0.1:8050";

/// Default directory holding the visualization artifacts
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Dashboard server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
    /// JSON file replacing the built-in metrics snapshot
    pub metrics: Option<PathBuf>,
}

impl ServerConfig {
    /// Load the snapshot this configuration points at
    ///
    /// # Errors
    ///
    /// Returns an I/O or parse error if the override file cannot be read
    pub fn load_snapshot(&self) -> CoreResult<MetricsSnapshot> {
        match &self.metrics {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading metrics override");
                MetricsSnapshot::from_json_file(path)
            }
            None => {
                tracing::info!("using built-in metrics snapshot");
                Ok(MetricsSnapshot::built_in())
            }
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            metrics: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:8050");
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert!(config.metrics.is_none());
    }

    #[test]
    fn test_built_in_snapshot_without_override() {
        let snapshot = ServerConfig::default().load_snapshot().unwrap();
        assert_eq!(snapshot, MetricsSnapshot::built_in());
    }

    #[test]
    fn test_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        std::fs::write(&path, r#"{"avg_monthly_shortage": 35}"#).unwrap();

        let config = ServerConfig {
            metrics: Some(path),
            ..ServerConfig::default()
        };
        let snapshot = config.load_snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("avg_monthly_shortage").unwrap().grouped(), "35");
    }
}
