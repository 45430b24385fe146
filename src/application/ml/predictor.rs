use crate::domain::errors::ModelError;
use crate::domain::health::PredictionResult;
use crate::domain::sensor::SensorReading;

/// Interface for failure-risk models consumed by the monitoring service
pub trait FailurePredictor: Send + Sync {
    /// Failure probability in percent (0.0 to 100.0)
    fn failure_probability(&self, reading: &SensorReading) -> Result<f64, ModelError>;

    /// Probability plus its status and alert classification
    fn predict(&self, reading: &SensorReading) -> Result<PredictionResult, ModelError> {
        self.failure_probability(reading)
            .map(PredictionResult::from_probability)
    }

    /// Whether the model can serve predictions yet
    fn is_ready(&self) -> bool;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}
