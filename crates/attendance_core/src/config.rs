//! Runtime configuration for the attendance core.
//!
//! # Responsibility
//! - Describe where the database lives and how logging is set up.
//! - Resolve overrides from the process environment.
//!
//! # Invariants
//! - Missing values fall back to defaults; configuration never fails to load.
//! - Blank environment values are ignored.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DB_FILE_NAME: &str = "attendance_database.sqlite3";
pub const ENV_DB_PATH: &str = "ATTENDANCE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ATTENDANCE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ATTENDANCE_LOG_DIR";

/// Settings consumed by the composition root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling logs. `None` leaves logging off.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `ATTENDANCE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DEFAULT_DB_FILE_NAME, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
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
    fn missing_environment_keeps_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn environment_overrides_and_blank_values_are_ignored() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/data/school.sqlite3"),
            (ENV_LOG_LEVEL, "   "),
            (ENV_LOG_DIR, "/var/log/attendance"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/data/school.sqlite3"));
        assert_eq!(config.log_level, CoreConfig::default().log_level);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/attendance")));
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let config: CoreConfig = serde_json::from_str(r#"{"db_path":"school.db"}"#).unwrap();
        assert_eq!(config.db_path, PathBuf::from("school.db"));
        assert_eq!(config.log_level, CoreConfig::default().log_level);
    }
}
