//! Configuration module for the Valentine backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};

/// Secret used when `VALENTINE_ADMIN_SECRET` is not set.
pub const DEFAULT_ADMIN_SECRET: &str = "admin";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret required by mutating requests
    pub admin_secret: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Seed the content store at startup instead of on first access
    pub seed_on_start: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let admin_secret = env::var("VALENTINE_ADMIN_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_SECRET.to_string());

        let bind_addr = env::var("VALENTINE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let log_level = env::var("VALENTINE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let seed_on_start = env::var("VALENTINE_SEED_ON_START")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            admin_secret,
            bind_addr,
            log_level,
            seed_on_start,
        })
    }

    /// Whether the built-in secret is still in use.
    pub fn uses_default_secret(&self) -> bool {
        self.admin_secret == DEFAULT_ADMIN_SECRET
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
