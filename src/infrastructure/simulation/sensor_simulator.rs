use crate::domain::monitoring::round_to;
use crate::domain::sensor::SensorReading;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::ops::RangeInclusive;

/// Trait defining a source of live sensor readings.
pub trait SensorSource: Send + Sync {
    fn next_reading(&self) -> SensorReading;
}

/// Operating condition the simulator draws a reading from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedCondition {
    Normal,
    Warning,
    Critical,
}

impl SimulatedCondition {
    pub const ALL: [SimulatedCondition; 3] = [
        SimulatedCondition::Normal,
        SimulatedCondition::Warning,
        SimulatedCondition::Critical,
    ];

    /// Uniform ranges for (temperature, vibration, pressure).
    pub fn ranges(self) -> [RangeInclusive<f64>; 3] {
        match self {
            SimulatedCondition::Normal => [65.0..=75.0, 0.1..=0.3, 13.0..=17.0],
            SimulatedCondition::Warning => [75.0..=85.0, 0.3..=0.6, 10.0..=13.0],
            SimulatedCondition::Critical => [85.0..=95.0, 0.6..=1.0, 5.0..=10.0],
        }
    }
}

/// Picks a condition at random, then uniform readings inside its ranges.
/// Temperature and pressure are rounded to 0.1, vibration to 0.01.
#[derive(Debug, Clone, Default)]
pub struct RandomSensorSimulator;

impl RandomSensorSimulator {
    pub fn new() -> Self {
        Self
    }

    pub fn reading_for(&self, condition: SimulatedCondition) -> SensorReading {
        let mut rng = rand::rng();
        let [temperature, vibration, pressure] = condition.ranges();

        SensorReading::new(
            round_to(rng.random_range(temperature), 1),
            round_to(rng.random_range(vibration), 2),
            round_to(rng.random_range(pressure), 1),
        )
    }
}

impl SensorSource for RandomSensorSimulator {
    fn next_reading(&self) -> SensorReading {
        let mut rng = rand::rng();
        let condition = *SimulatedCondition::ALL
            .choose(&mut rng)
            .unwrap_or(&SimulatedCondition::Normal);
        self.reading_for(condition)
    }
}

/// Always returns the same reading. For tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedSensor(pub SensorReading);

impl SensorSource for FixedSensor {
    fn next_reading(&self) -> SensorReading {
        self.0
    }
}
