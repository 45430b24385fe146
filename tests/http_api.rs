use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use machine_health::application::system::Application;
use machine_health::config::{Config, ModelEnvConfig, ServerEnvConfig};
use machine_health::domain::sensor::SensorReading;
use machine_health::infrastructure::simulation::FixedSensor;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        server: ServerEnvConfig {
            history_capacity: 5,
            ..ServerEnvConfig::default()
        },
        model: ModelEnvConfig {
            model_path: dir.path().join("trained_model.json"),
            forest_trees: 20,
            ..ModelEnvConfig::default()
        },
    };

    let sensor = Arc::new(FixedSensor(SensorReading::new(92.0, 0.9, 6.5)));
    let app = Application::build_with_sensor(config, sensor)
        .await
        .expect("application should build");
    (app.router(), dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_build_persists_model_on_first_start() {
    let (_app, dir) = test_app().await;
    assert!(dir.path().join("trained_model.json").exists());
}

#[tokio::test]
async fn test_predict_endpoint() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/predict",
            &json!({"temperature": 85, "vibration": 0.6, "pressure": 12}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["temperature"], 85.0);
    let probability = data["failure_probability"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&probability));
    assert!(data["machine_status"].is_string());
    assert!(data["alert_level"].is_string());
    assert!(data["timestamp"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_predict_missing_field() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(
        &app,
        post_json("/api/predict", &json!({"temperature": 85, "vibration": 0.6})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Missing required sensor data: temperature, vibration, pressure"
    );
}

#[tokio::test]
async fn test_predict_non_numeric_field() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/predict",
            &json!({"temperature": "hot", "vibration": 0.6, "pressure": 12}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input data"));
}

#[tokio::test]
async fn test_predict_malformed_body() {
    let (app, _dir) = test_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_sensor_data_fills_history() {
    let (app, _dir) = test_app().await;

    for _ in 0..7 {
        let (status, body) = send(&app, get("/api/sensor-data")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["temperature"], 92.0);
    }

    let (status, body) = send(&app, get("/api/historical-data")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 5);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let (_, body) = send(&app, get("/api/historical-data?limit=2")).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_historical_data_empty() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(&app, get("/api/historical-data?limit=10")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_machine_status_summary() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(&app, get("/api/machine-status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["machine_id"], "MACHINE-001");
    assert_eq!(body["data"]["machine_name"], "Production Line A");
    assert_eq!(body["data"]["sensor_readings"]["pressure"], 6.5);

    // Summary of an empty history is not buffered
    let (_, history) = send(&app, get("/api/historical-data")).await;
    assert_eq!(history["count"], 0);

    let (_, sampled) = send(&app, get("/api/sensor-data")).await;
    let (_, body) = send(&app, get("/api/machine-status")).await;
    assert_eq!(body["data"]["last_updated"], sampled["data"]["timestamp"]);
    assert_eq!(
        body["data"]["current_status"],
        sampled["data"]["machine_status"]
    );
}

#[tokio::test]
async fn test_health_reports_ready_model() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_ready"], true);
    assert_eq!(body["history_capacity"], 5);
    assert_eq!(body["history_size"], 0);

    send(&app, get("/api/sensor-data")).await;
    let (_, body) = send(&app, get("/health")).await;
    assert_eq!(body["history_size"], 1);
}

#[tokio::test]
async fn test_corrupt_artifact_is_replaced_on_build() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trained_model.json");
    std::fs::write(&path, "garbage").unwrap();

    let config = Config {
        server: ServerEnvConfig::default(),
        model: ModelEnvConfig {
            model_path: path.clone(),
            forest_trees: 10,
            ..ModelEnvConfig::default()
        },
    };
    let app = Application::build(config).await.unwrap();

    assert!(app.model.is_ready());
    assert_ne!(std::fs::read_to_string(&path).unwrap(), "garbage");
}
