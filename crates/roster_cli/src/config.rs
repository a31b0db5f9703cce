//! CLI configuration loaded from environment variables.
//!
//! - `ROSTER_DB_PATH`: database file; unset uses an in-memory database.
//! - `ROSTER_LOG_LEVEL`: log level; defaults to the build-mode level.
//! - `ROSTER_LOG_DIR`: absolute log directory; unset disables file logging.

use roster_core::default_log_level;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            db_path: non_empty("ROSTER_DB_PATH").map(PathBuf::from),
            log_level: non_empty("ROSTER_LOG_LEVEL")
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: non_empty("ROSTER_LOG_DIR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliConfig;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = CliConfig::from_lookup(|_| None);
        assert_eq!(config.db_path, None);
        assert_eq!(config.log_level, roster_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn blank_values_are_treated_as_unset() {
        let vars = HashMap::from([
            ("ROSTER_DB_PATH", "  ".to_string()),
            ("ROSTER_LOG_LEVEL", "warn".to_string()),
            ("ROSTER_LOG_DIR", "/var/log/roster".to_string()),
        ]);
        let config = CliConfig::from_lookup(|key| vars.get(key).cloned());
        assert_eq!(config.db_path, None);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/roster"));
    }

    #[test]
    fn db_path_is_read_as_path() {
        let config = CliConfig::from_lookup(|key| {
            (key == "ROSTER_DB_PATH").then(|| "/tmp/roster.sqlite3".to_string())
        });
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/roster.sqlite3")));
    }
}
