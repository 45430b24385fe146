use serde::{Deserialize, Serialize};
use std::fmt;

/// One snapshot of the three monitored machine sensors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Degrees Celsius
    pub temperature: f64,
    /// m/s²
    pub vibration: f64,
    /// psi
    pub pressure: f64,
}

impl SensorReading {
    pub fn new(temperature: f64, vibration: f64, pressure: f64) -> Self {
        Self {
            temperature,
            vibration,
            pressure,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite() && self.vibration.is_finite() && self.pressure.is_finite()
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temp={}°C, Vibration={} m/s², Pressure={} psi",
            self.temperature, self.vibration, self.pressure
        )
    }
}

/// A labelled reading used while building and fitting the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    #[serde(flatten)]
    pub reading: SensorReading,
    pub failure: bool,
}

impl TrainingExample {
    pub fn label(&self) -> f64 {
        if self.failure { 1.0 } else { 0.0 }
    }
}
