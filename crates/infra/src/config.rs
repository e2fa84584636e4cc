//! Configuration loading and representation.
//!
//! All settings come from the process environment. Unset values fall back to
//! development defaults with a warning; malformed values are an error.

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://stockroom.db?mode=rwc";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Which `ItemStore` implementation backs the service.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}' (expected sqlite or memory)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub database_url: String,
}

impl ServiceConfig {
    /// Read `STOCKROOM_BIND_ADDR`, `STOCKROOM_STORE` and `DATABASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServiceConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = match lookup("STOCKROOM_BIND_ADDR") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
                var: "STOCKROOM_BIND_ADDR",
                message: e.to_string(),
            })?,
            None => parse_default_addr(),
        };

        let store = match lookup("STOCKROOM_STORE") {
            Some(raw) => raw.parse::<StoreBackend>().map_err(|message| ConfigError::Invalid {
                var: "STOCKROOM_STORE",
                message,
            })?,
            None => StoreBackend::Sqlite,
        };

        let database_url = match lookup("DATABASE_URL") {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                if store == StoreBackend::Sqlite {
                    tracing::warn!(
                        "DATABASE_URL not set; using {}",
                        DEFAULT_DATABASE_URL
                    );
                }
                DEFAULT_DATABASE_URL.to_string()
            }
        };

        Ok(Self {
            bind_addr,
            store,
            database_url,
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: parse_default_addr(),
            store: StoreBackend::Sqlite,
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

fn parse_default_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}
