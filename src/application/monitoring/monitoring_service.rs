use super::history::HistoryBuffer;
use crate::application::ml::FailurePredictor;
use crate::domain::errors::ModelError;
use crate::domain::monitoring::{MachineSummary, MonitoringRecord};
use crate::domain::sensor::SensorReading;
use crate::infrastructure::simulation::SensorSource;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Ties the predictor, the sensor feed and the reading history together.
/// HTTP handlers are thin wrappers over these methods.
pub struct MonitoringService {
    predictor: Arc<dyn FailurePredictor>,
    sensor: Arc<dyn SensorSource>,
    history: RwLock<HistoryBuffer>,
}

impl MonitoringService {
    pub fn new(
        predictor: Arc<dyn FailurePredictor>,
        sensor: Arc<dyn SensorSource>,
        history_capacity: usize,
    ) -> Self {
        Self {
            predictor,
            sensor,
            history: RwLock::new(HistoryBuffer::new(history_capacity)),
        }
    }

    pub fn predictor(&self) -> &dyn FailurePredictor {
        self.predictor.as_ref()
    }

    /// Scores a caller-supplied reading. Nothing is recorded.
    pub fn evaluate(&self, reading: SensorReading) -> Result<MonitoringRecord, ModelError> {
        let prediction = self.predictor.predict(&reading)?;
        Ok(MonitoringRecord::new(reading, prediction, now_seconds()))
    }

    /// Takes a reading from the sensor feed, scores it and appends it to history.
    pub async fn sample_current(&self) -> Result<MonitoringRecord, ModelError> {
        let record = self.evaluate(self.sensor.next_reading())?;
        debug!(
            "Sampled {} -> {:.1}% ({})",
            record.reading, record.failure_probability, record.machine_status
        );

        self.history.write().await.push(record.clone());
        Ok(record)
    }

    /// The last `limit` buffered records, oldest first.
    pub async fn history(&self, limit: usize) -> Vec<MonitoringRecord> {
        self.history.read().await.recent(limit)
    }

    pub async fn history_len(&self) -> usize {
        self.history.read().await.len()
    }

    pub async fn history_capacity(&self) -> usize {
        self.history.read().await.capacity()
    }

    /// Summary of the latest buffered record. With an empty history a fresh
    /// reading is scored but not recorded.
    pub async fn machine_summary(&self) -> Result<MachineSummary, ModelError> {
        if let Some(latest) = self.history.read().await.latest() {
            return Ok(MachineSummary::from(latest));
        }

        let record = self.evaluate(self.sensor.next_reading())?;
        Ok(MachineSummary::from(&record))
    }
}

fn now_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
