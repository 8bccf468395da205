//! Runtime configuration from the environment (optionally seeded from `.env` by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";
pub const DEFAULT_PORT: u16 = 5555;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
    /// Insert demo campers and activities when the store is empty.
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `DATABASE_URL` wins over the legacy `DB_URI`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_URI"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        Ok(Self {
            database_url,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)))?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            body_limit_bytes: parse_or(&lookup, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?,
            seed_demo_data: match lookup("SEED_DEMO_DATA") {
                None => false,
                Some(v) => parse_flag("SEED_DEMO_DATA", &v)?,
            },
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn parse_flag(key: &'static str, v: &str) -> Result<bool, ConfigError> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: v.to_string(),
        }),
    }
}
