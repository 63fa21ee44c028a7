//! Process-level configuration for catalog hosts.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Validate settings once, before any storage or logging is touched.
//!
//! # Invariants
//! - Logging is enabled only when a log directory is configured.
//! - A missing database path selects an in-memory catalog.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, LoggingConfig, LoggingError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "CATRECORD_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "CATRECORD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CATRECORD_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "invalid logging configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

/// Resolved host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: Option<PathBuf>,
    pub logging: Option<LoggingConfig>,
}

impl CoreConfig {
    /// Reads `CATRECORD_DB_PATH`, `CATRECORD_LOG_LEVEL` and `CATRECORD_LOG_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = read(ENV_DB_PATH).map(PathBuf::from);
        let logging = match read(ENV_LOG_DIR) {
            Some(dir) => {
                let level = read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());
                Some(LoggingConfig::new(&level, dir.trim())?)
            }
            None => None,
        };

        Ok(Self { db_path, logging })
    }

    /// Starts file logging when configured; a no-op otherwise.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        if let Some(logging) = &self.logging {
            init_logging(logging)?;
        }
        Ok(())
    }

    /// Opens the configured database, or an in-memory one when unset.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ConfigError, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn log_dir_enables_logging_with_default_level() {
        let dir = std::env::temp_dir();
        let dir_text = dir.to_str().expect("temp dir should be valid UTF-8");
        let config = CoreConfig::from_lookup(lookup(&[(ENV_LOG_DIR, dir_text)]))
            .expect("valid config");
        let logging = config.logging.expect("logging should be enabled");
        assert_eq!(logging.level(), crate::logging::default_log_level());
        assert_eq!(logging.log_dir(), dir.as_path());
    }

    #[test]
    fn level_without_dir_is_ignored() {
        let config = CoreConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "trace")]))
            .expect("valid config");
        assert!(config.logging.is_none());
    }

    #[test]
    fn invalid_level_is_rejected() {
        let dir = std::env::temp_dir();
        let dir_text = dir.to_str().expect("temp dir should be valid UTF-8");
        let err = CoreConfig::from_lookup(lookup(&[
            (ENV_LOG_DIR, dir_text),
            (ENV_LOG_LEVEL, "loud"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Logging(_)));
    }

    #[test]
    fn db_path_is_read_and_blank_is_unset() {
        let config = CoreConfig::from_lookup(lookup(&[(ENV_DB_PATH, "/tmp/cats.db")]))
            .expect("valid config");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/cats.db")));

        let blank = CoreConfig::from_lookup(lookup(&[(ENV_DB_PATH, "  ")])).expect("valid config");
        assert!(blank.db_path.is_none());
    }

    #[test]
    fn unset_db_path_opens_in_memory_catalog() {
        let conn = CoreConfig::default().open_db().expect("in-memory db should open");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM cats;", [], |row| row.get(0))
            .expect("cats table should exist");
        assert_eq!(count, 0);
    }
}
