//! Application settings. There is no config file or command-line surface;
//! everything here is a compile-time default, with only the data directory
//! resolved at runtime from the user's home.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".digital-library";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "digital-library.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Start with the two demo records instead of an empty catalog.
    pub seed_demo_records: bool,
    /// `tracing_subscriber::EnvFilter` directive for the log file.
    pub log_filter: String,
    /// How long the UI waits for a key before redrawing.
    pub poll_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_demo_records: true,
            log_filter: "info".to_string(),
            poll_interval: Duration::from_millis(250),
        }
    }
}

impl AppConfig {
    /// Absolute path of the log file inside the user's home.
    pub fn log_path(&self) -> Result<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(base_dirs
            .home_dir()
            .join(DATA_DIR_NAME)
            .join(LOG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.seed_demo_records);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }
}
