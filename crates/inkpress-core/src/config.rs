//! Application configuration
//!
//! Environment-driven configuration with typed errors for invalid values.

use std::env;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {field}: '{value}' (expected {expected})")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

/// Runtime configuration for the inkpress server
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string
    pub database_url: String,
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Posts per listing page
    pub page_size: i64,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://inkpress.db?mode=rwc".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            page_size: 6,
            bcrypt_cost: 12,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let database_url =
            env::var("INKPRESS_DATABASE_URL").unwrap_or(defaults.database_url);
        let host = env::var("INKPRESS_HOST").unwrap_or(defaults.host);

        let port = parse_env("INKPRESS_PORT", defaults.port, "valid port number")?;
        let page_size = parse_env("INKPRESS_PAGE_SIZE", defaults.page_size, "positive integer")?;
        let bcrypt_cost = parse_env("INKPRESS_BCRYPT_COST", defaults.bcrypt_cost, "bcrypt cost (4-31)")?;

        if page_size < 1 {
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                value: page_size.to_string(),
                expected: "positive integer".to_string(),
            });
        }

        Ok(Self {
            database_url,
            host,
            port,
            page_size,
            bcrypt_cost,
        })
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T: std::str::FromStr>(
    var: &str,
    default: T,
    expected: &str,
) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
            field: var.to_string(),
            value: raw,
            expected: expected.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
