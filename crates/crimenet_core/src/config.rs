//! Runtime configuration for embedders.
//!
//! Values come from the environment with built-in defaults; front ends layer
//! their own flags on top.
//!
//! # Environment Variables
//!
//! - `CRIMENET_DATA_DIR`: base directory for the database and logs
//! - `CRIMENET_LOG_LEVEL`: trace|debug|info|warn|error
//! - `CRIMENET_ADMIN_USER` / `CRIMENET_ADMIN_PASSWORD`: accepted login pair

use crate::logging::LogLevel;
use crate::session::gate::Credentials;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "CRIMENET_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "CRIMENET_LOG_LEVEL";
pub const ADMIN_USER_ENV: &str = "CRIMENET_ADMIN_USER";
pub const ADMIN_PASSWORD_ENV: &str = "CRIMENET_ADMIN_PASSWORD";

const DEFAULT_DATA_DIR: &str = ".crimenet";
const DB_FILE_NAME: &str = "crimenet.sqlite3";
const LOGS_SUBDIR: &str = "logs";

/// Resolved settings for opening a store.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub log_level: LogLevel,
    pub credentials: Credentials,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: LogLevel::build_default(),
            credentials: Credentials::default(),
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by any `CRIMENET_*` variables that are set.
    ///
    /// An unparsable log level keeps the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Self::from_env`] but reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(dir) = non_empty(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = non_empty(LOG_LEVEL_ENV).and_then(|value| value.parse().ok()) {
            config.log_level = level;
        }
        if let Some(username) = non_empty(ADMIN_USER_ENV) {
            config.credentials.username = username;
        }
        if let Some(password) = non_empty(ADMIN_PASSWORD_ENV) {
            config.credentials.password = password;
        }
        config
    }

    /// SQLite file holding the key-value entries.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOGS_SUBDIR)
    }
}

/// `~/.crimenet`, or `./.crimenet` when no home directory is known.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DATA_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ADMIN_PASSWORD_ENV, DATA_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::LogLevel;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_with(vars: &[(&str, &str)]) -> CoreConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CoreConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn overrides_apply_and_derive_paths() {
        let config = config_with(&[
            (DATA_DIR_ENV, "/srv/crimenet"),
            (LOG_LEVEL_ENV, "warn"),
            (ADMIN_PASSWORD_ENV, "hunter2"),
        ]);
        assert_eq!(config.db_path(), PathBuf::from("/srv/crimenet/crimenet.sqlite3"));
        assert_eq!(config.log_dir(), PathBuf::from("/srv/crimenet/logs"));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.credentials.username, "admin");
        assert_eq!(config.credentials.password, "hunter2");
    }

    #[test]
    fn blank_or_invalid_values_keep_defaults() {
        let config = config_with(&[(DATA_DIR_ENV, "  "), (LOG_LEVEL_ENV, "loud")]);
        let defaults = CoreConfig::default();
        assert_eq!(config.data_dir, defaults.data_dir);
        assert_eq!(config.log_level, defaults.log_level);
    }
}
