//! Feature Row - request payload to model input
//!
//! Values stay as the client sent them until they are converted into the
//! numeric matrix handed to the scaler.

use std::net::IpAddr;

use ndarray::Array2;
use serde_json::{Map, Value};

use crate::constants::MISSING_FEATURE_VALUE;
use super::error::PredictionError;

/// One request projected onto the model's feature order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<(String, Value)>,
}

impl FeatureRow {
    /// Pick `names` out of `input` in order, defaulting absent ones.
    /// Keys not in `names` are dropped.
    pub fn from_input<S: AsRef<str>>(names: &[S], input: &Map<String, Value>) -> Self {
        let columns = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let value = input
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| Value::from(MISSING_FEATURE_VALUE));
                (name.to_string(), value)
            })
            .collect();

        Self { columns }
    }

    /// Convert to a `(1, n)` numeric matrix
    pub fn to_matrix(&self) -> Result<Array2<f64>, PredictionError> {
        let numeric = self
            .columns
            .iter()
            .map(|(name, value)| to_float(name, value))
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(Array2::from_shape_vec((1, numeric.len()), numeric)?)
    }
}

/// Numeric coercion of a single raw value.
///
/// Numbers pass through, booleans map to 1/0, `null` becomes NaN.
/// Strings are parsed as floats first, then as IP addresses (taking the
/// integer address value).
fn to_float(feature: &str, value: &Value) -> Result<f64, PredictionError> {
    let not_numeric = || PredictionError::NotNumeric {
        feature: feature.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::Null => Ok(f64::NAN),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64().ok_or_else(not_numeric),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(v) = s.parse::<f64>() {
                return Ok(v);
            }
            match s.parse::<IpAddr>() {
                Ok(IpAddr::V4(ip)) => Ok(u32::from(ip) as f64),
                Ok(IpAddr::V6(ip)) => Ok(u128::from(ip) as f64),
                Err(_) => Err(not_numeric()),
            }
        }
        Value::Array(_) | Value::Object(_) => Err(not_numeric()),
    }
}
