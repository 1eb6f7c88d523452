//! Breach Cost Predictor
//!
//! Combines model, scaler and feature schema to answer prediction requests.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{ANOMALIES_DETECTED, CONFIDENCE, COST_CATEGORY, FEATURE_NAMES};
use crate::model::{
    ArtifactError, ArtifactMetadata, FeatureRow, FeatureStats, ModelArtifact, PredictionError,
    Regressor, Scaler,
};

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_cost: f64,
    pub cost_category: String,
    pub anomalies_detected: u32,
    pub confidence: f64,
}

impl PredictionResult {
    /// Only the cost comes from the model; the rest are fixed values.
    pub fn new(predicted_cost: f64) -> Self {
        Self {
            predicted_cost,
            cost_category: COST_CATEGORY.to_string(),
            anomalies_detected: ANOMALIES_DETECTED,
            confidence: CONFIDENCE,
        }
    }
}

/// Model status for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_type: &'static str,
    pub scaler_type: &'static str,
    pub features: Vec<String>,
    pub feature_stats_count: usize,
    #[serde(flatten)]
    pub metadata: ArtifactMetadata,
}

#[derive(Debug)]
pub struct BreachCostPredictor {
    model: Regressor,
    scaler: Scaler,
    features: Vec<String>,
    feature_stats: FeatureStats,
    metadata: ArtifactMetadata,
}

impl BreachCostPredictor {
    /// Load a predictor from an artifact file
    pub fn load_model(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let artifact = ModelArtifact::load(path.as_ref())?;
        Ok(Self::from_artifact(artifact))
    }

    /// Build from a decoded artifact.
    ///
    /// The stored feature list is discarded in favour of [`FEATURE_NAMES`].
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        let features: Vec<String> = FEATURE_NAMES.iter().map(|f| f.to_string()).collect();

        let stored_matches = artifact
            .features
            .as_array()
            .map(|stored| stored.iter().map(Value::as_str).eq(FEATURE_NAMES.iter().map(|f| Some(*f))))
            .unwrap_or(false);
        if !stored_matches {
            tracing::warn!(
                stored = %artifact.features,
                "Artifact feature list differs from runtime features; using {:?}",
                FEATURE_NAMES
            );
        }

        Self {
            model: artifact.model,
            scaler: artifact.scaler,
            features,
            feature_stats: artifact.feature_stats,
            metadata: artifact.metadata,
        }
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            model_type: self.model.name(),
            scaler_type: self.scaler.name(),
            features: self.features.clone(),
            feature_stats_count: self.feature_stats.len(),
            metadata: self.metadata.clone(),
        }
    }

    /// Predict breach cost for one request payload.
    ///
    /// Keys outside the feature list are ignored and absent features are
    /// zero. Errors are returned as-is for the caller to report.
    pub fn predict_breach_cost(
        &self,
        input_data: &Map<String, Value>,
    ) -> Result<PredictionResult, PredictionError> {
        tracing::debug!("Input data: {:?}", input_data);

        let row = FeatureRow::from_input(&self.features, input_data);
        let x = row.to_matrix()?;
        let x_scaled = self.scaler.transform(&x)?;
        let predictions = self.model.predict(&x_scaled)?;

        let predicted_cost = predictions
            .first()
            .copied()
            .ok_or(PredictionError::EmptyPrediction)?;

        Ok(PredictionResult::new(predicted_cost))
    }
}
