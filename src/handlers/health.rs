//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::constants::APP_VERSION;
use crate::predictor::ModelInfo;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    environment: String,
    model: ModelInfo,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: APP_VERSION,
        timestamp: chrono::Utc::now().timestamp(),
        environment: state.config.environment.clone(),
        model: state.predictor.info(),
    })
}
