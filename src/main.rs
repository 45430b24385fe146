//! Machine Health Server - predictive maintenance API
//!
//! Restores (or trains) the failure-risk model, then serves simulated sensor
//! readings and predictions over HTTP.
//!
//! # Usage
//! ```sh
//! SERVER_PORT=5000 MODEL_PATH=data/models/trained_model.json cargo run
//! ```
//!
//! # Environment Variables
//! - `SERVER_HOST` / `SERVER_PORT` - Bind address (default: 0.0.0.0:5000)
//! - `HISTORY_CAPACITY` - Buffered readings kept for `/api/historical-data` (default: 100)
//! - `MODEL_PATH` - Persisted model artifact (default: data/models/trained_model.json)
//! - `TRAINING_SAMPLES`, `TRAINING_SEED`, `SPLIT_SEED` - Synthetic training set
//! - `FOREST_TREES`, `FOREST_MAX_DEPTH`, `FOREST_MIN_SPLIT` - Forest hyperparameters

use anyhow::Result;
use machine_health::application::system::Application;
use machine_health::config::Config;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Machine Health Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Bind={}, Model={:?}, Trees={}",
        config.server.bind_address(),
        config.model.model_path,
        config.model.forest_trees
    );

    let app = Application::build(config).await?;
    info!("Model ready. Starting HTTP server...");

    app.serve().await?;
    Ok(())
}
