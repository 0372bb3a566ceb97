//! Process configuration loaded from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BIND_ADDR` | `0.0.0.0:8080` | HTTP listen address |
//! | `USE_PERSISTENT_STORES` | `false` | `true` selects Postgres, otherwise in-memory |
//! | `DATABASE_URL` | none | Postgres URL, required when persistent |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | pool size |

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} is required when USE_PERSISTENT_STORES=true")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Which record store backend the process runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let persistent = match lookup("USE_PERSISTENT_STORES") {
            None => false,
            Some(raw) => raw
                .trim()
                .to_ascii_lowercase()
                .parse::<bool>()
                .map_err(|_| ConfigError::Invalid {
                    var: "USE_PERSISTENT_STORES",
                    value: raw,
                })?,
        };

        let storage = if persistent {
            let database_url = lookup("DATABASE_URL")
                .filter(|url| !url.trim().is_empty())
                .ok_or(ConfigError::Missing {
                    var: "DATABASE_URL",
                })?;
            let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                None => DEFAULT_MAX_CONNECTIONS,
                Some(raw) => match raw.trim().parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        return Err(ConfigError::Invalid {
                            var: "DATABASE_MAX_CONNECTIONS",
                            value: raw,
                        });
                    }
                },
            };
            StorageBackend::Postgres {
                database_url,
                max_connections,
            }
        } else {
            StorageBackend::InMemory
        };

        Ok(Self { bind_addr, storage })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            storage: StorageBackend::InMemory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(load(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn persistent_stores_need_a_database_url() {
        let err = load(&[("USE_PERSISTENT_STORES", "true")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing { var: "DATABASE_URL" });
    }

    #[test]
    fn persistent_stores_read_pool_settings() {
        let cfg = load(&[
            ("USE_PERSISTENT_STORES", "TRUE"),
            ("DATABASE_URL", "postgres://localhost/salesdesk"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("BIND_ADDR", "127.0.0.1:3000"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(
            cfg.storage,
            StorageBackend::Postgres {
                database_url: "postgres://localhost/salesdesk".to_string(),
                max_connections: 12,
            }
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            load(&[("BIND_ADDR", "not-an-addr")]),
            Err(ConfigError::Invalid { var: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            load(&[("USE_PERSISTENT_STORES", "yes")]),
            Err(ConfigError::Invalid { var: "USE_PERSISTENT_STORES", .. })
        ));
        assert!(matches!(
            load(&[
                ("USE_PERSISTENT_STORES", "true"),
                ("DATABASE_URL", "postgres://x"),
                ("DATABASE_MAX_CONNECTIONS", "0"),
            ]),
            Err(ConfigError::Invalid { var: "DATABASE_MAX_CONNECTIONS", .. })
        ));
    }

    #[test]
    fn pool_settings_are_ignored_for_in_memory() {
        let cfg = load(&[("DATABASE_MAX_CONNECTIONS", "oops")]).unwrap();
        assert_eq!(cfg.storage, StorageBackend::InMemory);
    }
}
