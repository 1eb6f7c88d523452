//! Model Artifact - loading and validation
//!
//! The artifact is a JSON object with four required components:
//! `model`, `scaler`, `features` and `feature_stats`.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::error::ArtifactError;
use super::regressor::Regressor;
use super::scaler::Scaler;
use super::stats::FeatureStats;

/// Keys every artifact must carry, checked in this order
pub const REQUIRED_KEYS: [&str; 4] = ["model", "scaler", "features", "feature_stats"];

/// Where and when the artifact was loaded from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub source: String,
    pub checksum: String,
    pub size_bytes: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Decoded artifact
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    pub model: Regressor,
    pub scaler: Scaler,
    /// Feature list as stored by the training pipeline, kept verbatim
    pub features: Value,
    pub feature_stats: FeatureStats,
    pub metadata: ArtifactMetadata,
}

impl ModelArtifact {
    /// Read and decode an artifact file
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        tracing::info!("Loading model artifact from: {}", path.display());

        if !path.exists() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_slice(&bytes, &path.display().to_string())
    }

    /// Decode an artifact from raw bytes. `source` is recorded in metadata.
    pub fn from_slice(bytes: &[u8], source: &str) -> Result<Self, ArtifactError> {
        let mut root: Map<String, Value> = serde_json::from_slice(bytes)?;

        if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !root.contains_key(**key)) {
            return Err(ArtifactError::MissingKey(*missing));
        }

        let model: Regressor = take_component(&mut root, "model")?;
        model.validate().map_err(|reason| ArtifactError::Inconsistent { key: "model", reason })?;

        let scaler: Scaler = take_component(&mut root, "scaler")?;
        scaler.validate().map_err(|reason| ArtifactError::Inconsistent { key: "scaler", reason })?;

        let features: Value = take_component(&mut root, "features")?;
        let feature_stats: FeatureStats = take_component(&mut root, "feature_stats")?;

        let metadata = ArtifactMetadata {
            source: source.to_string(),
            checksum: hex::encode(Sha256::digest(bytes)),
            size_bytes: bytes.len(),
            loaded_at: Utc::now(),
        };

        tracing::info!(
            model = model.name(),
            scaler = scaler.name(),
            checksum = %metadata.checksum,
            "Model artifact loaded ({} bytes)",
            metadata.size_bytes
        );

        Ok(Self { model, scaler, features, feature_stats, metadata })
    }
}

fn take_component<T: DeserializeOwned>(
    root: &mut Map<String, Value>,
    key: &'static str,
) -> Result<T, ArtifactError> {
    let value = root.remove(key).ok_or(ArtifactError::MissingKey(key))?;
    serde_json::from_value(value).map_err(|source| ArtifactError::InvalidComponent { key, source })
}
