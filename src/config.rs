//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::constants::{DEFAULT_MODEL_PATH, DEFAULT_PORT};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the serialized model artifact
    pub model_path: PathBuf,

    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            environment: lookup("ENVIRONMENT")
                .unwrap_or(defaults.environment),
        }
    }

    /// Socket address to bind the listener on
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
