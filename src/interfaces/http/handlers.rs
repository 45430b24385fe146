use super::error::ApiError;
use crate::application::monitoring::MonitoringService;
use crate::domain::monitoring::{MachineSummary, MonitoringRecord};
use crate::domain::sensor::SensorReading;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MonitoringService>,
}

impl AppState {
    pub fn new(service: Arc<MonitoringService>) -> Self {
        Self { service }
    }
}

/// Success envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            count: None,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    limit: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model: String,
    model_ready: bool,
    history_size: usize,
    history_capacity: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let predictor = state.service.predictor();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: format!("{} {}", predictor.name(), predictor.version()),
        model_ready: predictor.is_ready(),
        history_size: state.service.history_len().await,
        history_capacity: state.service.history_capacity().await,
    })
}

/// GET /api/sensor-data
pub async fn sensor_data(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MonitoringRecord>>, ApiError> {
    let record = state.service.sample_current().await?;
    Ok(ApiResponse::ok(record))
}

/// POST /api/predict
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<MonitoringRecord>>, ApiError> {
    let Json(body) = payload.map_err(|_| ApiError::MissingSensorData)?;
    let reading = parse_sensor_payload(&body)?;
    let record = state.service.evaluate(reading)?;
    Ok(ApiResponse::ok(record))
}

/// GET /api/historical-data?limit=N
pub async fn historical_data(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<ApiResponse<Vec<MonitoringRecord>>> {
    let limit = parse_limit(query.limit.as_deref());
    let records = state.service.history(limit).await;
    let count = records.len();

    Json(ApiResponse {
        success: true,
        data: records,
        count: Some(count),
    })
}

/// GET /api/machine-status
pub async fn machine_status(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MachineSummary>>, ApiError> {
    let summary = state.service.machine_summary().await?;
    Ok(ApiResponse::ok(summary))
}

/// Reads the three sensor fields from a JSON object. Numbers and numeric
/// strings are accepted; anything else, or a non-finite value, is rejected.
pub fn parse_sensor_payload(body: &Value) -> Result<SensorReading, ApiError> {
    let fields = body.as_object().ok_or(ApiError::MissingSensorData)?;
    if fields.is_empty() {
        return Err(ApiError::MissingSensorData);
    }

    let field = |name: &str| -> Result<f64, ApiError> {
        let value = fields.get(name).ok_or(ApiError::MissingSensorData)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(ApiError::InvalidInput(format!(
                "could not convert {} value {} to a finite float",
                name, value
            ))),
        }
    };

    let temperature = field("temperature")?;
    let vibration = field("vibration")?;
    let pressure = field("pressure")?;

    Ok(SensorReading::new(temperature, vibration, pressure))
}

/// Unparseable limits fall back to the default; negative limits return nothing.
fn parse_limit(raw: Option<&str>) -> usize {
    match raw.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(n)) => usize::try_from(n).unwrap_or(0),
        _ => DEFAULT_HISTORY_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_numeric_payload() {
        let reading =
            parse_sensor_payload(&json!({"temperature": 85, "vibration": 0.6, "pressure": 12.0}))
                .unwrap();
        assert_eq!(reading, SensorReading::new(85.0, 0.6, 12.0));
    }

    #[test]
    fn test_parse_accepts_numeric_strings() {
        let reading = parse_sensor_payload(
            &json!({"temperature": "85.5", "vibration": " 0.6 ", "pressure": 12}),
        )
        .unwrap();
        assert_eq!(reading.temperature, 85.5);
        assert_eq!(reading.vibration, 0.6);
    }

    #[test]
    fn test_parse_missing_field() {
        let err = parse_sensor_payload(&json!({"temperature": 85, "vibration": 0.6})).unwrap_err();
        assert!(matches!(err, ApiError::MissingSensorData));

        let err = parse_sensor_payload(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ApiError::MissingSensorData));
    }

    #[test]
    fn test_parse_invalid_values() {
        for bad in [json!("hot"), json!(null), json!(true), json!("NaN"), json!("inf")] {
            let body = json!({"temperature": bad, "vibration": 0.6, "pressure": 12});
            let err = parse_sensor_payload(&body).unwrap_err();
            assert!(matches!(err, ApiError::InvalidInput(_)), "{:?}", body);
        }
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None), 50);
        assert_eq!(parse_limit(Some("10")), 10);
        assert_eq!(parse_limit(Some("abc")), 50);
        assert_eq!(parse_limit(Some("-3")), 0);
    }
}
