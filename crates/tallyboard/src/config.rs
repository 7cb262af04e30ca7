//! Application configuration.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable that overrides the database path.
pub const DB_PATH_ENV: &str = "TALLYBOARD_DB";

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "tallyboard.toml";

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file holding player stats.
    #[serde(default = "default_db_path")]
    db_path: PathBuf,

    /// Number of games listed by the recent-games views.
    #[serde(default = "default_history_limit")]
    history_limit: u32,
}

#[instrument]
fn default_db_path() -> PathBuf {
    PathBuf::from("tictactoe_stats.db")
}

#[instrument]
fn default_history_limit() -> u32 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            history_limit: default_history_limit(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(db_path = %config.db_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the effective configuration.
    ///
    /// Later sources win: defaults, then the config file (`config_path`, or
    /// [`DEFAULT_CONFIG_FILE`] if present), then [`DB_PATH_ENV`], then
    /// `db_path_override`.
    #[instrument]
    pub fn resolve(
        config_path: Option<&Path>,
        db_path_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        if let Ok(path) = std::env::var(DB_PATH_ENV)
            && !path.trim().is_empty()
        {
            debug!(path = %path, "Database path from environment");
            config.db_path = PathBuf::from(path);
        }

        if let Some(path) = db_path_override {
            config.db_path = path;
        }

        if config.history_limit == 0 {
            return Err(ConfigError::new(format!(
                "history_limit must be at least 1, got {}",
                config.history_limit
            )));
        }

        Ok(config)
    }

    /// Database path as the string the store expects.
    pub fn db_path_str(&self) -> String {
        self.db_path.to_string_lossy().into_owned()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "db_path = \"league.db\"").unwrap();

        let config = AppConfig::from_file(file.path()).expect("valid config");
        assert_eq!(config.db_path(), &PathBuf::from("league.db"));
        assert_eq!(*config.history_limit(), 10);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "db_path = ").unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_override_wins_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "db_path = \"from_file.db\"").unwrap();

        let config = AppConfig::resolve(Some(file.path()), Some(PathBuf::from("flag.db")))
            .expect("resolves");
        assert_eq!(config.db_path(), &PathBuf::from("flag.db"));
    }

    #[test]
    fn test_zero_history_limit_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "history_limit = 0").unwrap();
        assert!(AppConfig::resolve(Some(file.path()), None).is_err());
    }
}
