use crate::domain::sensor::SensorReading;

pub const FEATURE_COUNT: usize = 3;

/// Ordered list of feature names.
/// The scaler and the forest are both fitted against this column order,
/// so reordering it invalidates every persisted model.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["temperature", "vibration", "pressure"];

pub type FeatureVector = [f64; FEATURE_COUNT];

pub fn reading_to_features(reading: &SensorReading) -> FeatureVector {
    [reading.temperature, reading.vibration, reading.pressure]
}
