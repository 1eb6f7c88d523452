//! Prediction handler

use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    Json,
};
use serde_json::{Map, Value};

use crate::{AppState, AppError, AppResult};
use crate::predictor::PredictionResult;

/// Predict breach cost from a JSON body.
///
/// Mounted for every method; anything but POST is rejected here.
pub async fn predict(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> AppResult<Json<PredictionResult>> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    // Content type is not checked; malformed JSON counts as no input.
    let input_data: Option<Value> = serde_json::from_slice(&body).ok();
    tracing::debug!("Received /predict request: {:?}", input_data);

    let input_data = input_data
        .filter(has_content)
        .ok_or(AppError::NoInputData)?;

    // A non-object payload carries none of the named features.
    let fields = match input_data {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let result = state.predictor.predict_breach_cost(&fields)?;
    tracing::debug!("Prediction result: {:?}", result);

    Ok(Json(result))
}

/// False for `null`, `false`, zero, and empty strings, arrays and objects.
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
