use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use breach_cost_api::{
    create_router,
    model::{ArtifactError, ModelArtifact},
    AppState, BreachCostPredictor, Config,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::Path;
use tower::ServiceExt;

/// Linear model over identity-scaled features: cost = 100 + sum(features)
fn test_app() -> Router {
    let artifact = json!({
        "model": {"type": "linear", "coefficients": [1.0, 1.0, 1.0, 1.0, 1.0], "intercept": 100.0},
        "scaler": {"type": "standard", "mean": [0.0, 0.0, 0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0, 1.0, 1.0]},
        "features": ["Src IP", "Dst IP", "Protocol", "Flow Duration", "Total Fwd Packets"],
        "feature_stats": {"Protocol": {"mean": 6.0, "std": 2.0}}
    });
    let artifact = ModelArtifact::from_slice(artifact.to_string().as_bytes(), "test").unwrap();
    let predictor = BreachCostPredictor::from_artifact(artifact);

    create_router(AppState::new(predictor, Config::default()))
}

async fn send(app: Router, method: &str, uri: &str, body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn post_predict(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, "POST", "/predict", body).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn assert_static_fields(json: &Value) {
    assert_eq!(json["cost_category"], "MEDIUM");
    assert_eq!(json["anomalies_detected"], 0);
    assert_eq!(json["confidence"], 0.85);
}

#[tokio::test]
async fn test_index_is_live() {
    let (status, body) = send(test_app(), "GET", "/", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Breach Cost Prediction API is running.");
}

#[tokio::test]
async fn test_predict_full_flow_record() {
    let body = json!({
        "Src IP": "192.168.1.1",
        "Dst IP": "192.168.1.2",
        "Protocol": 6,
        "Flow Duration": 450000,
        "Total Fwd Packets": 2500
    });
    let (status, json) = post_predict(test_app(), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let expected = 100.0 + 3232235777.0 + 3232235778.0 + 6.0 + 450000.0 + 2500.0;
    assert_eq!(json["predicted_cost"].as_f64().unwrap(), expected);
    assert_static_fields(&json);
}

#[tokio::test]
async fn test_predict_missing_features_default_to_zero() {
    let (status, json) = post_predict(test_app(), r#"{"Protocol": 17, "Label": "BENIGN"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["predicted_cost"], 117.0);
    assert_static_fields(&json);
}

#[tokio::test]
async fn test_predict_is_deterministic() {
    let body = r#"{"Flow Duration": 99999999, "Total Fwd Packets": 1000000}"#;
    let (_, first) = post_predict(test_app(), body).await;
    let (_, second) = post_predict(test_app(), body).await;

    assert_eq!(first["predicted_cost"], second["predicted_cost"]);
}

#[tokio::test]
async fn test_predict_no_input() {
    for body in ["", "{}", "not json", "{\"Protocol\": ", "null", "[]", "0"] {
        let (status, json) = post_predict(test_app(), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(json, json!({"error": "No input data provided"}));
    }
}

#[tokio::test]
async fn test_predict_non_object_payload_uses_defaults() {
    let (status, json) = post_predict(test_app(), r#"[{"Protocol": 6}]"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["predicted_cost"], 100.0);
}

#[tokio::test]
async fn test_predict_non_numeric_feature_is_internal_error() {
    let (status, json) = post_predict(test_app(), r#"{"Src IP": "workstation-7"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({"error": "could not convert value to float for feature 'Src IP': \"workstation-7\""})
    );
}

#[tokio::test]
async fn test_predict_accepts_large_body() {
    let padding = "x".repeat(3 * 1024 * 1024);
    let body = json!({"Protocol": 6, "pad": padding}).to_string();
    let (status, json) = post_predict(test_app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["predicted_cost"], 106.0);
    assert_static_fields(&json);
}

#[tokio::test]
async fn test_predict_rejects_other_methods() {
    for method in ["GET", "PUT", "DELETE"] {
        let (status, body) = send(test_app(), method, "/predict", Body::empty()).await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json, json!({"error": "Only POST requests are allowed"}));
    }
}

#[tokio::test]
async fn test_health_reports_model() {
    let (status, body) = send(test_app(), "GET", "/health", Body::empty()).await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["environment"], "development");
    assert_eq!(json["model"]["model_type"], "LinearRegression");
    assert_eq!(json["model"]["scaler_type"], "StandardScaler");
    assert_eq!(json["model"]["feature_stats_count"], 1);
    assert_eq!(json["model"]["features"][4], "Total Fwd Packets");
    assert_eq!(json["model"]["checksum"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_bundled_artifact_serves_predictions() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("automated_breach_cost_model.json");
    let predictor = BreachCostPredictor::load_model(&path).unwrap();
    let app = create_router(AppState::new(predictor, Config::default()));

    let body = json!({
        "Src IP": "192.168.1.1",
        "Dst IP": "192.168.1.2",
        "Protocol": 6,
        "Flow Duration": 450000,
        "Total Fwd Packets": 2500
    });
    let (status, json) = post_predict(app, body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let cost = json["predicted_cost"].as_f64().unwrap();
    assert!(cost.is_finite() && cost > 0.0);
    assert_static_fields(&json);
}

#[test]
fn test_startup_fails_without_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let err = BreachCostPredictor::load_model(dir.path().join("automated_breach_cost_model.json"))
        .unwrap_err();

    assert!(matches!(err, ArtifactError::NotFound(_)));
}
