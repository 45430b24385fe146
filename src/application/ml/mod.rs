pub mod maintenance_model;
pub mod predictor;
pub mod scaler;
pub mod synthetic_data;
pub mod trained_model;

pub use maintenance_model::{
    MaintenanceModel, ModelState, RestoreOutcome, TrainingConfig, TrainingReport,
};
pub use predictor::FailurePredictor;
pub use trained_model::{ForestParams, TrainedModel};
