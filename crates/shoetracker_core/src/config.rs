//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Resolve database path and logging settings from the environment.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, LogLevel};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "SHOETRACKER_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "SHOETRACKER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SHOETRACKER_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "shoetracker.sqlite3";

/// Configuration resolution error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{LOG_LEVEL_ENV}: {message}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(raw) => raw.parse::<LogLevel>().map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = match read(LOG_DIR_ENV).map(PathBuf::from) {
            Some(path) if !path.is_absolute() => return Err(ConfigError::RelativeLogDir(path)),
            other => other,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

/// Database location used when no path is configured.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{default_db_path, ConfigError, CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::{default_log_level, LogLevel};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = CoreConfig::from_lookup(lookup(&[(DB_PATH_ENV, "  ")])).unwrap();
        assert_eq!(config.db_path, default_db_path());
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_are_used() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/data/shoes.db"),
            (LOG_LEVEL_ENV, "WARN"),
            (LOG_DIR_ENV, "/var/log/shoetracker"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/shoes.db"));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/shoetracker")));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = CoreConfig::from_lookup(lookup(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));

        let err = CoreConfig::from_lookup(lookup(&[(LOG_DIR_ENV, "logs")])).unwrap_err();
        assert_eq!(err, ConfigError::RelativeLogDir(PathBuf::from("logs")));
    }
}
