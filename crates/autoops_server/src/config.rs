//! Environment-driven server configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `AUTOOPS_HTTP_BIND` | `127.0.0.1:8080` |
//! | `AUTOOPS_DB_PATH` | `autoops.sqlite3` (`:memory:` for an in-memory DB) |
//! | `AUTOOPS_LOG_LEVEL` | `debug` in debug builds, `info` in release |
//! | `AUTOOPS_LOG_DIR` | `<temp dir>/autoops-logs` |

use autoops_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_ENV: &str = "AUTOOPS_HTTP_BIND";
pub const DB_PATH_ENV: &str = "AUTOOPS_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "AUTOOPS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "AUTOOPS_LOG_DIR";

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_DB_FILE_NAME: &str = "autoops.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "autoops-logs";
const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_location: DbLocation,
    pub log_level: String,
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBindAddress(String),
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBindAddress(value) => {
                write!(f, "{BIND_ENV} is not a socket address: `{value}`")
            }
            Self::RelativeLogDir(value) => {
                write!(f, "{LOG_DIR_ENV} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind = read(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddress(bind.clone()))?;

        let db_location = match read(DB_PATH_ENV) {
            Some(value) if value == IN_MEMORY_DB => DbLocation::Memory,
            Some(value) => DbLocation::File(PathBuf::from(value)),
            None => DbLocation::File(PathBuf::from(DEFAULT_DB_FILE_NAME)),
        };

        let log_level = read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());

        let log_dir = match read(LOG_DIR_ENV) {
            Some(value) => {
                let path = PathBuf::from(&value);
                if !path.is_absolute() {
                    return Err(ConfigError::RelativeLogDir(value));
                }
                path
            }
            None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        };

        Ok(Self {
            bind_addr,
            db_location,
            log_level,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DbLocation, ServerConfig};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = config_from(&[("AUTOOPS_HTTP_BIND", "  ")]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.db_location,
            DbLocation::File(PathBuf::from("autoops.sqlite3"))
        );
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with("autoops-logs"));
    }

    #[test]
    fn memory_marker_selects_in_memory_db() {
        let config = config_from(&[("AUTOOPS_DB_PATH", ":memory:")]).unwrap();
        assert_eq!(config.db_location, DbLocation::Memory);
    }

    #[test]
    fn explicit_values_are_used() {
        let log_dir = std::env::temp_dir().join("autoops-config-test");
        let log_dir_text = log_dir.to_string_lossy().into_owned();
        let config = config_from(&[
            ("AUTOOPS_HTTP_BIND", "0.0.0.0:9000"),
            ("AUTOOPS_LOG_LEVEL", "warn"),
            ("AUTOOPS_LOG_DIR", log_dir_text.as_str()),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, log_dir);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("AUTOOPS_HTTP_BIND", "localhost")]),
            Err(ConfigError::InvalidBindAddress(_))
        ));
        assert!(matches!(
            config_from(&[("AUTOOPS_LOG_DIR", "logs")]),
            Err(ConfigError::RelativeLogDir(_))
        ));
    }
}
