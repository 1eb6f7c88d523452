//! Feature Scalers
//!
//! Fitted transforms applied to the raw feature matrix before inference.
//! Parameters come straight from the training pipeline export.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::error::PredictionError;

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Fitted scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scaler {
    /// Standardization: `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },

    /// Min-max normalization into `feature_range`
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default = "default_feature_range")]
        feature_range: (f64, f64),
    },
}

/// Zero-width columns pass through unscaled.
fn nonzero(width: f64) -> f64 {
    if width == 0.0 { 1.0 } else { width }
}

impl Scaler {
    /// Display name used in errors and status output
    pub fn name(&self) -> &'static str {
        match self {
            Scaler::Standard { .. } => "StandardScaler",
            Scaler::MinMax { .. } => "MinMaxScaler",
        }
    }

    /// Number of features the scaler was fitted on
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { data_min, .. } => data_min.len(),
        }
    }

    /// Check the fitted parameters agree with each other
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Scaler::Standard { mean, scale } => {
                if mean.len() != scale.len() {
                    return Err(format!(
                        "mean has {} entries but scale has {}",
                        mean.len(),
                        scale.len()
                    ));
                }
            }
            Scaler::MinMax { data_min, data_max, feature_range } => {
                if data_min.len() != data_max.len() {
                    return Err(format!(
                        "data_min has {} entries but data_max has {}",
                        data_min.len(),
                        data_max.len()
                    ));
                }
                if feature_range.0 >= feature_range.1 {
                    return Err(format!(
                        "feature_range minimum {} must be below maximum {}",
                        feature_range.0, feature_range.1
                    ));
                }
            }
        }

        if self.n_features() == 0 {
            return Err("scaler has no features".to_string());
        }
        Ok(())
    }

    /// Transform a `(samples, features)` matrix
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, PredictionError> {
        if x.ncols() != self.n_features() {
            return Err(PredictionError::FeatureMismatch {
                component: self.name(),
                expected: self.n_features(),
                got: x.ncols(),
            });
        }

        let scaled = match self {
            Scaler::Standard { mean, scale } => {
                let mean = Array1::from_vec(mean.clone());
                let scale: Array1<f64> = scale.iter().copied().map(nonzero).collect();
                (x - &mean) / &scale
            }
            Scaler::MinMax { data_min, data_max, feature_range } => {
                let (lo, hi) = *feature_range;
                let factor: Array1<f64> = data_min
                    .iter()
                    .zip(data_max)
                    .map(|(min, max)| (hi - lo) / nonzero(max - min))
                    .collect();
                let offset: Array1<f64> = data_min
                    .iter()
                    .zip(factor.iter())
                    .map(|(min, f)| lo - min * f)
                    .collect();
                x * &factor + &offset
            }
        };

        Ok(scaled)
    }
}
