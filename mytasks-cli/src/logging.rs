//! Tracing setup
//!
//! Logs go to a file in the data directory; stdout and stderr belong to the
//! terminal UI and command output.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{CliError, Result};

/// Install the global subscriber writing to `log_path`
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init(log_path: &Path, default_level: &str) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::io(format!("Failed to create {}", parent.display()), e))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| CliError::io(format!("Failed to open {}", log_path.display()), e))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mytasks={default_level},mytasks_core={default_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| CliError::config_with_source("Failed to install logger", e))
}
