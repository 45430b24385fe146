// Sensor readings and training examples
pub mod sensor;

// Feature layout shared by training and inference
pub mod ml;

// Risk bands, machine status and alert levels
pub mod health;

// Served and buffered monitoring records
pub mod monitoring;

// Domain-specific error types
pub mod errors;
