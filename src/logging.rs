//! Log file setup. The terminal belongs to the UI while the app runs, so
//! tracing output goes to a file in the data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Install the global subscriber. Fails if the log file cannot be opened, the
/// filter directive is malformed, or a subscriber is already installed.
pub fn init(config: &AppConfig) -> Result<()> {
    let path = config.log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter '{}'", config.log_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}
