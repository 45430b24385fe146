use crate::domain::errors::ModelError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub const MISSING_SENSOR_DATA: &str = "Missing required sensor data: temperature, vibration, pressure";

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required sensor data: temperature, vibration, pressure")]
    MissingSensorData,

    #[error("Invalid input data: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingSensorData
            | ApiError::InvalidInput(_)
            | ApiError::Model(ModelError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Model(ModelError::InvalidInput { reason }) => {
                format!("Invalid input data: {}", reason)
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = ErrorBody {
            success: false,
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
