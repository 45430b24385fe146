// Model lifecycle: synthetic data, training, inference, persistence
pub mod ml;

// Reading history and prediction service
pub mod monitoring;

// System orchestrator
pub mod system;
