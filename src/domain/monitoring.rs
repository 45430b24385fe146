use crate::domain::health::{AlertLevel, MachineStatus, PredictionResult};
use crate::domain::sensor::SensorReading;
use serde::{Deserialize, Serialize};

pub const MACHINE_ID: &str = "MACHINE-001";
pub const MACHINE_NAME: &str = "Production Line A";

/// A reading together with its prediction, as served and buffered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringRecord {
    #[serde(flatten)]
    pub reading: SensorReading,
    /// Percent, rounded to one decimal place
    pub failure_probability: f64,
    pub machine_status: MachineStatus,
    pub alert_level: AlertLevel,
    /// Unix seconds
    pub timestamp: f64,
}

impl MonitoringRecord {
    pub fn new(reading: SensorReading, prediction: PredictionResult, timestamp: f64) -> Self {
        Self {
            reading,
            failure_probability: round_to(prediction.failure_probability, 1),
            machine_status: prediction.machine_status,
            alert_level: prediction.alert_level,
            timestamp,
        }
    }
}

/// Dashboard summary of the monitored machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineSummary {
    pub machine_id: &'static str,
    pub machine_name: &'static str,
    pub current_status: MachineStatus,
    pub alert_level: AlertLevel,
    pub failure_probability: f64,
    pub last_updated: f64,
    pub sensor_readings: SensorReading,
}

impl From<&MonitoringRecord> for MachineSummary {
    fn from(record: &MonitoringRecord) -> Self {
        Self {
            machine_id: MACHINE_ID,
            machine_name: MACHINE_NAME,
            current_status: record.machine_status,
            alert_level: record.alert_level,
            failure_probability: record.failure_probability,
            last_updated: record.timestamp,
            sensor_readings: record.reading,
        }
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rounds_probability() {
        let record = MonitoringRecord::new(
            SensorReading::new(85.0, 0.6, 12.0),
            PredictionResult::from_probability(73.456),
            1_700_000_000.0,
        );
        assert_eq!(record.failure_probability, 73.5);
        assert_eq!(record.machine_status, MachineStatus::Failure);
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = MonitoringRecord::new(
            SensorReading::new(70.0, 0.2, 15.0),
            PredictionResult::from_probability(4.0),
            1.5,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["temperature"], 70.0);
        assert_eq!(json["machine_status"], "Healthy");
        assert_eq!(json["alert_level"], "normal");
    }

    #[test]
    fn test_summary_from_record() {
        let record = MonitoringRecord::new(
            SensorReading::new(80.0, 0.4, 11.0),
            PredictionResult::from_probability(50.0),
            42.0,
        );
        let summary = MachineSummary::from(&record);
        assert_eq!(summary.machine_id, "MACHINE-001");
        assert_eq!(summary.current_status, MachineStatus::AtRisk);
        assert_eq!(summary.last_updated, 42.0);
        assert_eq!(summary.sensor_readings.pressure, 11.0);
    }
}
