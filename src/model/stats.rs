//! Per-feature training statistics stored alongside the model.
//!
//! Held as exported; the layout (mean/std, variance, quantiles, ...) is
//! whatever the training pipeline wrote.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureStats(Value);

impl FeatureStats {
    /// Number of top-level entries (features for a keyed map)
    pub fn len(&self) -> usize {
        match &self.0 {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            Value::Null => 0,
            _ => 1,
        }
    }
}
