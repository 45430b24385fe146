//! Lifecycle of the failure-risk model.
//!
//! A [`MaintenanceModel`] starts `Untrained` and becomes `Ready` through
//! [`MaintenanceModel::train`] or [`MaintenanceModel::restore`]. Inference
//! and persistence are rejected with [`ModelError::NotTrained`] until then.
//!
//! The ready state holds an `Arc<TrainedModel>`. Retraining builds a new
//! model off-lock and swaps the handle, so concurrent readers always see a
//! complete model.

use super::predictor::FailurePredictor;
use super::synthetic_data::{DEFAULT_SAMPLES, generate_synthetic_dataset, train_test_split};
use super::trained_model::{ForestParams, TrainedModel};
use crate::domain::errors::ModelError;
use crate::domain::health::{self, AlertLevel, MachineStatus};
use crate::domain::sensor::SensorReading;
use crate::infrastructure::model_store;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Settings for one training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub samples: usize,
    pub data_seed: u64,
    pub split_seed: u64,
    pub test_fraction: f64,
    pub forest: ForestParams,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            data_seed: 42,
            split_seed: 42,
            test_fraction: 0.2,
            forest: ForestParams::default(),
        }
    }
}

/// Diagnostics from [`MaintenanceModel::train`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub train_samples: usize,
    pub test_samples: usize,
}

/// How [`MaintenanceModel::restore`] reached the ready state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RestoreOutcome {
    Loaded,
    Trained(TrainingReport),
}

#[derive(Clone, Default)]
pub enum ModelState {
    #[default]
    Untrained,
    Ready(Arc<TrainedModel>),
}

pub struct MaintenanceModel {
    config: TrainingConfig,
    state: RwLock<ModelState>,
}

impl MaintenanceModel {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            state: RwLock::new(ModelState::Untrained),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read(), ModelState::Ready(_))
    }

    /// Fits a fresh scaler and forest on synthetic data and makes them current.
    pub fn train(&self) -> Result<TrainingReport, ModelError> {
        let data = generate_synthetic_dataset(self.config.samples, self.config.data_seed)?;
        let split = train_test_split(&data, self.config.test_fraction, self.config.split_seed);

        let model = TrainedModel::fit(&split.train, self.config.forest)?;
        let report = TrainingReport {
            train_accuracy: model.accuracy(&split.train)?,
            test_accuracy: model.accuracy(&split.test)?,
            train_samples: split.train.len(),
            test_samples: split.test.len(),
        };

        info!(
            "Training accuracy: {:.3} (n={})",
            report.train_accuracy, report.train_samples
        );
        info!(
            "Testing accuracy: {:.3} (n={})",
            report.test_accuracy, report.test_samples
        );

        self.install(model);
        Ok(report)
    }

    /// Failure probability in percent for one reading.
    pub fn predict_failure_probability(
        &self,
        temperature: f64,
        vibration: f64,
        pressure: f64,
    ) -> Result<f64, ModelError> {
        let reading = SensorReading::new(temperature, vibration, pressure);
        if !reading.is_finite() {
            return Err(ModelError::InvalidInput {
                reason: format!("sensor values must be finite ({})", reading),
            });
        }

        let model = self.current()?;
        Ok(model.probability(&reading)? * 100.0)
    }

    pub fn classify_status(probability: f64) -> MachineStatus {
        health::classify_status(probability)
    }

    pub fn classify_alert_level(probability: f64) -> AlertLevel {
        health::classify_alert_level(probability)
    }

    pub fn persist(&self, path: &Path) -> Result<(), ModelError> {
        let model = self.current()?;
        model_store::save(path, &model)
    }

    /// Loads the artifact at `path`, or trains and persists one when the
    /// file does not exist. A corrupt file leaves the current state as is.
    pub fn restore(&self, path: &Path) -> Result<RestoreOutcome, ModelError> {
        if path.exists() {
            let model = model_store::load(path)?;
            self.install(model);
            return Ok(RestoreOutcome::Loaded);
        }

        warn!("Model file {:?} not found. Training new model...", path);
        let report = self.train()?;
        self.persist(path)?;
        Ok(RestoreOutcome::Trained(report))
    }

    fn install(&self, model: TrainedModel) {
        *self.state.write() = ModelState::Ready(Arc::new(model));
    }

    fn current(&self) -> Result<Arc<TrainedModel>, ModelError> {
        match &*self.state.read() {
            ModelState::Ready(model) => Ok(Arc::clone(model)),
            ModelState::Untrained => Err(ModelError::NotTrained),
        }
    }
}

impl Default for MaintenanceModel {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

impl FailurePredictor for MaintenanceModel {
    fn failure_probability(&self, reading: &SensorReading) -> Result<f64, ModelError> {
        self.predict_failure_probability(reading.temperature, reading.vibration, reading.pressure)
    }

    fn is_ready(&self) -> bool {
        MaintenanceModel::is_ready(self)
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> TrainingConfig {
        TrainingConfig {
            samples: 300,
            forest: ForestParams {
                n_trees: 15,
                max_depth: 6,
                min_split: 2,
            },
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn test_starts_untrained() {
        let model = MaintenanceModel::new(fast_config());
        assert!(!model.is_ready());
        assert!(matches!(
            model.predict_failure_probability(85.0, 0.6, 12.0),
            Err(ModelError::NotTrained)
        ));
    }

    #[test]
    fn test_persist_requires_training() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let model = MaintenanceModel::new(fast_config());

        assert!(matches!(model.persist(&path), Err(ModelError::NotTrained)));
        assert!(!path.exists());
    }

    #[test]
    fn test_train_makes_ready() {
        let model = MaintenanceModel::new(fast_config());
        let report = model.train().unwrap();

        assert!(model.is_ready());
        assert_eq!(report.train_samples + report.test_samples, 300);
        assert_eq!(report.test_samples, 60);

        let p = model.predict_failure_probability(85.0, 0.6, 12.0).unwrap();
        assert!((0.0..=100.0).contains(&p));
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let model = MaintenanceModel::new(fast_config());
        model.train().unwrap();
        assert!(matches!(
            model.predict_failure_probability(f64::NAN, 0.6, 12.0),
            Err(ModelError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_retraining_is_deterministic() {
        let model = MaintenanceModel::new(fast_config());
        model.train().unwrap();
        let first = model.predict_failure_probability(80.0, 0.5, 10.0).unwrap();
        model.train().unwrap();
        let second = model.predict_failure_probability(80.0, 0.5, 10.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_classifiers_delegate_to_shared_bands() {
        assert_eq!(MaintenanceModel::classify_status(29.9), MachineStatus::Healthy);
        assert_eq!(MaintenanceModel::classify_alert_level(70.0), AlertLevel::Critical);
    }
}
