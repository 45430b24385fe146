//! JSON API over the monitoring service.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use handlers::AppState;
pub use routes::router;
