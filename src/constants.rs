//! Central Configuration Constants
//!
//! Single source of truth for defaults and fixed response values.

/// Default artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "automated_breach_cost_model.json";

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Liveness text served on `GET /`
pub const INDEX_MESSAGE: &str = "Breach Cost Prediction API is running.";

/// Number of model input features
pub const FEATURE_COUNT: usize = 5;

/// Feature order the scaler was fitted with.
///
/// Used at runtime regardless of the list stored in the artifact.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Src IP",
    "Dst IP",
    "Protocol",
    "Flow Duration",
    "Total Fwd Packets",
];

/// Value used for any feature absent from the request
pub const MISSING_FEATURE_VALUE: f64 = 0.0;

// ============================================
// Placeholder response fields (not derived from the model)
// ============================================

pub const COST_CATEGORY: &str = "MEDIUM";
pub const ANOMALIES_DETECTED: u32 = 0;
pub const CONFIDENCE: f64 = 0.85;
