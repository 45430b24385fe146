//! Configuration module.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by domain: Server and Model.

mod model_config;
mod server_config;

pub use model_config::ModelEnvConfig;
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub model: ModelEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env();
        let model = ModelEnvConfig::from_env().context("Failed to load model config")?;

        Ok(Self { server, model })
    }
}
