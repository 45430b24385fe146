use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::ml::{MaintenanceModel, RestoreOutcome};
use crate::application::monitoring::MonitoringService;
use crate::config::Config;
use crate::infrastructure::simulation::{RandomSensorSimulator, SensorSource};
use crate::interfaces::http::{AppState, router};

pub struct Application {
    pub config: Config,
    pub model: Arc<MaintenanceModel>,
    pub service: Arc<MonitoringService>,
}

impl Application {
    /// Brings the model to the ready state and wires the monitoring service
    /// with the random sensor simulator.
    pub async fn build(config: Config) -> Result<Self> {
        Self::build_with_sensor(config, Arc::new(RandomSensorSimulator::new())).await
    }

    pub async fn build_with_sensor(config: Config, sensor: Arc<dyn SensorSource>) -> Result<Self> {
        info!("Building application (model: {:?})...", config.model.model_path);

        let model = Arc::new(MaintenanceModel::new(config.model.training_config()));
        let path = config.model.model_path.clone();

        let loader = Arc::clone(&model);
        tokio::task::spawn_blocking(move || load_or_retrain(&loader, &path))
            .await
            .context("Model loading task panicked")??;

        let service = Arc::new(MonitoringService::new(
            model.clone(),
            sensor,
            config.server.history_capacity,
        ));

        Ok(Self {
            config,
            model,
            service,
        })
    }

    pub fn router(&self) -> axum::Router {
        router(AppState::new(self.service.clone()))
    }

    /// Serves the API until Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!("Listening on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received. Exiting...");
            })
            .await
            .context("HTTP server failed")
    }
}

/// Restores the persisted model. An unreadable artifact is replaced by a
/// freshly trained one so the service can always start.
fn load_or_retrain(model: &MaintenanceModel, path: &std::path::Path) -> Result<()> {
    match model.restore(path) {
        Ok(RestoreOutcome::Loaded) => Ok(()),
        Ok(RestoreOutcome::Trained(report)) => {
            info!(
                "Trained new model (test accuracy {:.3})",
                report.test_accuracy
            );
            Ok(())
        }
        Err(e) => {
            warn!("Error loading model: {}. Training new model...", e);
            model.train().context("Retraining after failed load")?;
            model
                .persist(path)
                .with_context(|| format!("Failed to save model to {:?}", path))
        }
    }
}
