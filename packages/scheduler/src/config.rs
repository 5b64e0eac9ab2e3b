use std::path::PathBuf;

use dory_algo::{DEFAULT_DESIRED_RETENTION, MAX_RETENTION, MIN_RETENTION};

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub desired_retention: f64,
    pub file_logs: bool,
    pub log_dir: PathBuf,
}

impl Config {
    /// Reads `.env` (if present) before the process environment.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let desired_retention = match lookup("DORY_DESIRED_RETENTION") {
            None => DEFAULT_DESIRED_RETENTION,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(value) if (MIN_RETENTION..=MAX_RETENTION).contains(&value) => value,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "DORY_DESIRED_RETENTION invalid, using default"
                    );
                    DEFAULT_DESIRED_RETENTION
                }
            },
        };

        let file_logs = lookup("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let log_dir = lookup("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./logs"));

        Self {
            log_level,
            desired_retention,
            file_logs,
            log_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
