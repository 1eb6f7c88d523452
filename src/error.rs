//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::model::PredictionError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    NoInputData,
    MethodNotAllowed,

    // Inference errors
    Prediction(PredictionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::NoInputData => (StatusCode::BAD_REQUEST, "No input data provided".to_string()),
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Only POST requests are allowed".to_string())
            }
            AppError::Prediction(err) => {
                tracing::error!("Prediction error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        AppError::Prediction(err)
    }
}
