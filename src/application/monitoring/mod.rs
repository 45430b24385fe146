// Reading history and the service that feeds it
pub mod history;
pub mod monitoring_service;

pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryBuffer};
pub use monitoring_service::MonitoringService;
