use super::handlers::{self, AppState};
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/sensor-data", get(handlers::sensor_data))
        .route("/api/predict", post(handlers::predict))
        .route("/api/historical-data", get(handlers::historical_data))
        .route("/api/machine-status", get(handlers::machine_status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
