//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHEETS_SPREADSHEET_ID` - id of the shared register spreadsheet
//! - `SHEETS_API_TOKEN` - bearer token for the Sheets API (minted by the
//!   deployment's credential flow, not by this process)
//!
//! ## Optional
//! - `REGISTER_HOST` - bind address (default: 127.0.0.1)
//! - `REGISTER_PORT` - listen port (default: 3000)
//! - `SHEETS_API_BASE` - API endpoint (default: <https://sheets.googleapis.com>)
//! - `REFERENCE_TTL_SECS` - reference table cache lifetime (default: 604800,
//!   i.e. 7 days)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::reference::DEFAULT_TTL;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Register server configuration.
#[derive(Debug, Clone)]
pub struct RegisterConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Sheets API configuration.
    pub sheets: SheetsConfig,
    /// Reference table cache lifetime.
    pub reference_ttl: Duration,
}

/// Sheets API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct SheetsConfig {
    /// API endpoint base, without a trailing slash.
    pub api_base: String,
    /// Spreadsheet id of the shared register.
    pub spreadsheet_id: String,
    /// Bearer token for the values endpoints.
    pub api_token: SecretString,
}

impl std::fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("api_base", &self.api_base)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl RegisterConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("REGISTER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("REGISTER_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("REGISTER_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("REGISTER_PORT".to_owned(), e.to_string()))?;

        let reference_ttl = match std::env::var("REFERENCE_TTL_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("REFERENCE_TTL_SECS".to_owned(), e.to_string())
            })?),
            Err(_) => DEFAULT_TTL,
        };

        Ok(Self {
            host,
            port,
            sheets: SheetsConfig::from_env()?,
            reference_ttl,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SheetsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: get_env_or_default("SHEETS_API_BASE", "https://sheets.googleapis.com"),
            spreadsheet_id: get_required_env("SHEETS_SPREADSHEET_ID")?,
            api_token: SecretString::from(get_required_env("SHEETS_API_TOKEN")?),
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = RegisterConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            sheets: SheetsConfig {
                api_base: "https://sheets.googleapis.com".to_owned(),
                spreadsheet_id: "sheet-id".to_owned(),
                api_token: SecretString::from("token"),
            },
            reference_ttl: DEFAULT_TTL,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_sheets_config_debug_redacts_token() {
        let config = SheetsConfig {
            api_base: "https://sheets.googleapis.com".to_owned(),
            spreadsheet_id: "sheet-id".to_owned(),
            api_token: SecretString::from("super-secret-token"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("sheet-id"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-token"));
    }
}
