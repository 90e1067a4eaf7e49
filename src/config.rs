//! Dashboard configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Env var naming the config file to read.
pub const CONFIG_ENV: &str = "OLYMPICS_DASHBOARD_CONFIG";
/// Env var overriding the dataset location.
pub const DATASET_ENV: &str = "OLYMPICS_DATASET";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "olympics_dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Deployment settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV file with the athlete-event records
    pub dataset_path: PathBuf,
    /// Cell values read as missing
    pub null_values: Vec<String>,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("athlete_events.csv"),
            null_values: vec!["NA".to_string()],
            log_filter: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Resolve config from the environment, the working directory, or defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::load_from(&path)?;
        if let Some(dataset) = std::env::var_os(DATASET_ENV) {
            config.dataset_path = PathBuf::from(dataset);
        }
        Ok(config)
    }

    /// Read one config file; a missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dash.json");
        std::fs::write(&path, r#"{ "dataset_path": "data/events.csv" }"#).unwrap();

        let config = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("data/events.csv"));
        assert_eq!(config.null_values, vec!["NA".to_string()]);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dash.json");
        std::fs::write(&path, "{ dataset_path: ").unwrap();
        assert!(matches!(
            DashboardConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dash.json");
        let config = DashboardConfig {
            dataset_path: PathBuf::from("/srv/athlete_events.csv"),
            null_values: vec!["NA".into(), "-".into()],
            log_filter: "olympics_dashboard=debug".into(),
        };
        config.save(&path).unwrap();
        assert_eq!(DashboardConfig::load_from(&path).unwrap(), config);
    }
}
