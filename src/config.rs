//! Service configuration
//!
//! Read once from the environment at start-up.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is unset
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000,\
http://localhost:49342,http://127.0.0.1:49342,\
https://flavour-verse.vercel.app,https://flavour-verse.netlify.app";

pub const DEFAULT_PORT: u16 = 8000;

/// Configuration error types
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Which surface the service exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// JSON over HTTP
    Http,
    /// MCP over stdin/stdout
    Stdio,
}

impl Transport {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "http" => Some(Transport::Http),
            "stdio" | "mcp" => Some(Transport::Stdio),
            _ => None,
        }
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub transport: Transport,
    /// JSON file replacing the bundled table
    pub table_path: Option<PathBuf>,
    /// Comma-separated origins, or "*"
    pub cors_allowed_origins: String,
}

impl Config {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("CALORIE_SERVICE_HOST") {
            Some(value) => value.trim().parse::<IpAddr>().map_err(|_| ConfigError::InvalidValue {
                var: "CALORIE_SERVICE_HOST",
                value,
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup("CALORIE_SERVICE_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: "CALORIE_SERVICE_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let transport = match lookup("CALORIE_SERVICE_TRANSPORT") {
            Some(value) => Transport::from_str(&value).ok_or(ConfigError::InvalidValue {
                var: "CALORIE_SERVICE_TRANSPORT",
                value,
            })?,
            None => Transport::Http,
        };

        let table_path = lookup("CALORIE_TABLE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string());

        Ok(Self {
            host,
            port,
            transport,
            table_path,
            cors_allowed_origins,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
