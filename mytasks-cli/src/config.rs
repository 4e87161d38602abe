//! User configuration, loaded through confy
//!
//! Lives at the platform config location for the `mytasks` app name.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

const APP_NAME: &str = "mytasks";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the store and the log file
    pub data_directory: String,
    /// Key-value store file inside `data_directory`
    pub store_filename: String,
    /// Log file inside `data_directory`
    pub log_filename: String,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory().to_string_lossy().into_owned(),
            store_filename: "store.json".to_string(),
            log_filename: "mytasks.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from the confy location, creating it with defaults on first run
    pub fn load() -> Result<Self> {
        let cfg: Config = confy::load(APP_NAME, None)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replace the data directory, e.g. from `--data-dir`
    pub fn with_data_directory(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.data_directory = dir.to_string_lossy().into_owned();
        }
        self
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_directory)
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir().join(&self.store_filename)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join(&self.log_filename)
    }

    fn validate(&self) -> Result<()> {
        if self.store_filename.trim().is_empty() {
            return Err(CliError::config("store_filename must not be empty"));
        }
        if self.log_filename.trim().is_empty() {
            return Err(CliError::config("log_filename must not be empty"));
        }
        Ok(())
    }
}

fn default_data_directory() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("", "", APP_NAME) {
        return dirs.data_dir().to_path_buf();
    }

    dirs::data_local_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.store_filename, "store.json");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.store_path().ends_with("store.json"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_data_dir_override() {
        let cfg = Config::default().with_data_directory(Some(PathBuf::from("/tmp/elsewhere")));
        assert_eq!(cfg.store_path(), PathBuf::from("/tmp/elsewhere/store.json"));
        assert_eq!(cfg.log_path(), PathBuf::from("/tmp/elsewhere/mytasks.log"));

        let cfg = Config::default().with_data_directory(None);
        assert_eq!(cfg.data_directory, Config::default().data_directory);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"log_level":"debug"}"#).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.store_filename, "store.json");
    }

    #[test]
    fn test_empty_filename_rejected() {
        let cfg = Config {
            store_filename: " ".to_string(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(CliError::Config { .. })));
    }
}
