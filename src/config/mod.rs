//! Process configuration read from the environment at startup
//!
//! Everything here is resolved once in the binary and handed to the router
//! through `AppState`; handlers never read environment variables themselves.

use std::env;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";
pub const DEFAULT_PORT: u16 = 8080;

/// Get the deployment environment (`sandbox` when unset)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Get the Redis connection URL
pub fn get_redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string())
}

/// Which backend holds the queue values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret gating `/enqueue`. `None` disables the check entirely.
    pub webhook_secret: Option<String>,
    pub store: StoreBackend,
    pub redis_url: String,
    pub port: u16,
    pub environment: String,
    /// Serialize read-modify-write per account inside this process.
    pub serialize_accounts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_secret: None,
            store: StoreBackend::Redis,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            port: DEFAULT_PORT,
            environment: "sandbox".to_string(),
            serialize_accounts: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let store = match env::var("RELAY_STORE") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::Redis,
        };

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| format!("PORT must be a valid port number, got '{}'", value))?,
            Err(_) => DEFAULT_PORT,
        };

        let serialize_accounts = env::var("RELAY_SERIALIZE_ACCOUNTS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            webhook_secret: normalize_secret(env::var("WEBHOOK_SECRET").ok()),
            store,
            redis_url: get_redis_url(),
            port,
            environment: get_environment(),
            serialize_accounts,
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

/// An empty secret is treated the same as no secret at all.
fn normalize_secret(secret: Option<String>) -> Option<String> {
    secret.filter(|s| !s.is_empty())
}
