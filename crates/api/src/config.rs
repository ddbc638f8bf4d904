//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREDESK_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 5000)
//! - `JWT_SECRET` - Token signing secret (default: insecure development value)
//! - `TOKEN_TTL_HOURS` - Token lifetime in hours (default: 24)
//! - `STOREDESK_DATA_DIR` - Directory holding the JSON collections (default: ./data)
//! - `STOREDESK_SEED` - Seed demo data into an empty installation (default: true)
//! - `STOREDESK_SELF_REGISTER_ROLES` - Comma-separated roles open to public
//!   registration (default: user,store_owner)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use chrono::Duration;
use secrecy::SecretString;
use thiserror::Error;

use storedesk_auth::Role;

const DEV_JWT_SECRET: &str = "storedesk-dev-secret-change-me";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Implements `Debug` manually to redact the signing secret.
#[derive(Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub jwt_secret: SecretString,
    pub token_ttl: Duration,
    pub data_dir: PathBuf,
    pub seed: bool,
    pub self_register_roles: Vec<Role>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("data_dir", &self.data_dir)
            .field("seed", &self.seed)
            .field("self_register_roles", &self.self_register_roles)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv()` first so a local `.env` file is honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse(&get_or("STOREDESK_HOST", "0.0.0.0"), "STOREDESK_HOST")?;
        let port = parse(&get_or("PORT", "5000"), "PORT")?;

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.trim().is_empty()) {
            Some(secret) => SecretString::from(secret),
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                SecretString::from(DEV_JWT_SECRET.to_string())
            }
        };

        let ttl_hours: i64 = parse(&get_or("TOKEN_TTL_HOURS", "24"), "TOKEN_TTL_HOURS")?;
        if ttl_hours <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "TOKEN_TTL_HOURS".to_string(),
                "must be positive".to_string(),
            ));
        }

        let seed = parse_bool(&get_or("STOREDESK_SEED", "true"), "STOREDESK_SEED")?;
        let self_register_roles = parse_roles(&get_or(
            "STOREDESK_SELF_REGISTER_ROLES",
            "user,store_owner",
        ))?;

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_ttl: Duration::hours(ttl_hours),
            data_dir: PathBuf::from(get_or("STOREDESK_DATA_DIR", "./data")),
            seed,
            self_register_roles,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T>(value: &str, key: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_bool(value: &str, key: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

fn parse_roles(value: &str) -> Result<Vec<Role>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse::<Role>(s, "STOREDESK_SELF_REGISTER_ROLES"))
        .collect()
}
