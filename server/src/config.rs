//! Server configuration.
//!
//! Read from environment variables (after `dotenvy` has loaded an optional
//! `.env`). Every setting has a default suitable for a local MongoDB.
//!
//! | Variable | Default |
//! |---|---|
//! | `TODO_HOST` | `0.0.0.0` |
//! | `TODO_PORT` | `8081` |
//! | `TODO_STORAGE` | `mongodb` (or `memory`) |
//! | `MONGODB_URI` | `mongodb://localhost:27017` |
//! | `MONGODB_DATABASE` | `demo` |
//! | `MONGODB_COLLECTION` | `todo` |
//! | `SHUTDOWN_GRACE_SECS` | `5` |
//! | `LOG_FORMAT` | `pretty` (or `json`) |

use std::{env, time::Duration};

use thiserror::Error;

use crate::telemetry::LogFormat;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, expected: &'static str, value: &str) -> Self {
        ConfigError::Invalid {
            name,
            expected,
            value: value.to_string(),
        }
    }
}

/// Connection settings for the MongoDB store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "demo".to_string(),
            collection: "todo".to_string(),
        }
    }
}

/// Which store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Mongo(MongoConfig),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    /// How long in-flight requests may run once shutdown is requested.
    pub shutdown_grace: Duration,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("TODO_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("TODO_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::invalid("TODO_PORT", "port number", &raw))?,
            None => DEFAULT_PORT,
        };

        let storage = match lookup("TODO_STORAGE").as_deref() {
            None | Some("mongodb") => {
                let defaults = MongoConfig::default();
                StorageConfig::Mongo(MongoConfig {
                    uri: lookup("MONGODB_URI").unwrap_or(defaults.uri),
                    database: lookup("MONGODB_DATABASE").unwrap_or(defaults.database),
                    collection: lookup("MONGODB_COLLECTION").unwrap_or(defaults.collection),
                })
            }
            Some("memory") => StorageConfig::Memory,
            Some(other) => {
                return Err(ConfigError::invalid(
                    "TODO_STORAGE",
                    "storage backend (mongodb, memory)",
                    other,
                ))
            }
        };

        let shutdown_grace = match lookup("SHUTDOWN_GRACE_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::invalid("SHUTDOWN_GRACE_SECS", "number of seconds", &raw))?,
            None => DEFAULT_SHUTDOWN_GRACE,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => LogFormat::parse(&raw)
                .ok_or_else(|| ConfigError::invalid("LOG_FORMAT", "log format (pretty, json)", &raw))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host,
            port,
            storage,
            shutdown_grace,
            log_format,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_target_local_mongodb() {
        let config = load(&[]).unwrap();
        assert_eq!(
            config,
            AppConfig {
                host: "0.0.0.0".to_string(),
                port: 8081,
                storage: StorageConfig::Mongo(MongoConfig::default()),
                shutdown_grace: Duration::from_secs(5),
                log_format: LogFormat::Pretty,
            }
        );
        assert_eq!(config.bind_addr(), "0.0.0.0:8081");
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            ("TODO_HOST", "127.0.0.1"),
            ("TODO_PORT", "3000"),
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MONGODB_DATABASE", "tasks"),
            ("MONGODB_COLLECTION", "items"),
            ("SHUTDOWN_GRACE_SECS", "10"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(
            config.storage,
            StorageConfig::Mongo(MongoConfig {
                uri: "mongodb://db:27017".to_string(),
                database: "tasks".to_string(),
                collection: "items".to_string(),
            })
        );
        assert_eq!(config.shutdown_grace, Duration::from_secs(10));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn memory_storage_ignores_mongodb_settings() {
        let config = load(&[("TODO_STORAGE", "memory"), ("MONGODB_URI", "unused")]).unwrap();
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[rstest]
    #[case("TODO_PORT", "eighty")]
    #[case("TODO_PORT", "70000")]
    #[case("TODO_STORAGE", "postgres")]
    #[case("SHUTDOWN_GRACE_SECS", "-1")]
    #[case("LOG_FORMAT", "xml")]
    fn invalid_values_are_rejected(#[case] name: &str, #[case] value: &str) {
        let err = load(&[(name, value)]).unwrap_err();
        let ConfigError::Invalid { name: got, value: got_value, .. } = err;
        assert_eq!(got, name);
        assert_eq!(got_value, value);
    }
}
