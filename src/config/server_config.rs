//! HTTP server configuration parsing from environment variables.

use crate::application::monitoring::DEFAULT_HISTORY_CAPACITY;
use std::env;

/// Server environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerEnvConfig {
    pub host: String,
    pub port: u16,
    pub history_capacity: usize,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl ServerEnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("SERVER_HOST").unwrap_or(defaults.host),
            port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            history_capacity: lookup("HISTORY_CAPACITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.history_capacity),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
