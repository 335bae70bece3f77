//! Runtime configuration.
//!
//! Values come from `BIDBOARD_*` environment variables; anything unset falls
//! back to `CoreConfig::default()`. The same shape deserializes from JSON for
//! hosts that keep settings in a file.

use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "BIDBOARD_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "BIDBOARD_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "BIDBOARD_LOG_DIR";
pub const USER_VAR: &str = "BIDBOARD_USER";

/// User id used for likes when nobody is configured.
pub const DEFAULT_USER: &str = "user1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoreConfig {
    /// SQLite file; `None` keeps the session in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub current_user: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            current_user: DEFAULT_USER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
    EmptyValue(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(level) => write!(f, "unsupported log level `{level}`"),
            Self::RelativeLogDir(path) => {
                write!(f, "log directory must be absolute, got `{}`", path.display())
            }
            Self::EmptyValue(name) => write!(f, "{name} is set but empty"),
        }
    }
}

impl Error for ConfigError {}

impl CoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = non_empty(&lookup, DB_PATH_VAR)? {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = non_empty(&lookup, LOG_LEVEL_VAR)? {
            config.log_level = level;
        }
        if let Some(dir) = non_empty(&lookup, LOG_DIR_VAR)? {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(user) = non_empty(&lookup, USER_VAR)? {
            config.current_user = user;
        }
        config.validate()?;
        Ok(config)
    }

    /// Normalizes the log level in place and checks the log directory.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let level = normalize_level(&self.log_level)
            .ok_or_else(|| ConfigError::InvalidLogLevel(self.log_level.clone()))?;
        self.log_level = level.to_string();
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        if self.current_user.trim().is_empty() {
            return Err(ConfigError::EmptyValue(USER_VAR));
        }
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "db={} log_level={} log_dir={} user={}",
            self.db_path
                .as_ref()
                .map_or_else(|| "memory".to_string(), |path| path.display().to_string()),
            self.log_level,
            self.log_dir
                .as_ref()
                .map_or_else(|| "off".to_string(), |path| path.display().to_string()),
            self.current_user
        )
    }
}

/// Unset reads as `None`; set-but-blank is an error.
fn non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<String>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(name)),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn unset_environment_gives_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(
            config.summary(),
            format!(
                "db=memory log_level={} log_dir=off user=user1",
                default_log_level()
            )
        );
    }

    #[test]
    fn variables_override_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, "/var/lib/bidboard/board.db"),
            (LOG_LEVEL_VAR, "WARNING"),
            (LOG_DIR_VAR, "/var/log/bidboard"),
            (USER_VAR, " user3 "),
        ]))
        .unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/var/lib/bidboard/board.db")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/bidboard")));
        assert_eq!(config.current_user, "user3");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert_eq!(
            CoreConfig::from_lookup(lookup(&[(LOG_LEVEL_VAR, "chatty")])),
            Err(ConfigError::InvalidLogLevel("chatty".to_string()))
        );
        assert_eq!(
            CoreConfig::from_lookup(lookup(&[(LOG_DIR_VAR, "logs")])),
            Err(ConfigError::RelativeLogDir(PathBuf::from("logs")))
        );
        assert_eq!(
            CoreConfig::from_lookup(lookup(&[(USER_VAR, "  ")])),
            Err(ConfigError::EmptyValue(USER_VAR))
        );
    }

    #[test]
    fn deserializes_partial_json() {
        let mut config: CoreConfig =
            serde_json::from_str(r#"{"dbPath":"/tmp/board.db","logLevel":"ERROR"}"#).unwrap();
        config.validate().unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/board.db")));
        assert_eq!(config.log_level, "error");
        assert_eq!(config.current_user, DEFAULT_USER);
    }
}
