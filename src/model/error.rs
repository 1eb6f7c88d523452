//! Model errors
//!
//! `ArtifactError` is fatal and only raised while loading at startup.
//! `PredictionError` is raised per request and reported to the caller.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model artifact is not a valid JSON object: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Missing key '{0}' in model artifact")]
    MissingKey(&'static str),

    #[error("Invalid '{key}' in model artifact: {source}")]
    InvalidComponent {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Inconsistent '{key}' in model artifact: {reason}")]
    Inconsistent { key: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("could not convert value to float for feature '{feature}': {value}")]
    NotNumeric { feature: String, value: String },

    #[error("input has {got} features, but {component} expects {expected} features")]
    FeatureMismatch {
        component: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Input X contains NaN")]
    ContainsNaN,

    #[error("Input X contains infinity")]
    ContainsInfinity,

    #[error("Model returned no prediction")]
    EmptyPrediction,

    #[error("Feature matrix error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
