pub mod sensor_simulator;

pub use sensor_simulator::{FixedSensor, RandomSensorSimulator, SensorSource, SimulatedCondition};
