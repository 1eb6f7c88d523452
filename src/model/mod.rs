//! Model Module - artifact, preprocessing and inference
//!
//! Everything needed to turn a loaded artifact into predictions.
//! Nothing here is mutated after load.

pub mod artifact;
pub mod error;
pub mod features;
pub mod regressor;
pub mod scaler;
pub mod stats;

// Re-export common types
pub use artifact::{ArtifactMetadata, ModelArtifact, REQUIRED_KEYS};
pub use error::{ArtifactError, PredictionError};
pub use features::FeatureRow;
pub use regressor::{Aggregation, RegressionTree, Regressor, TreeEnsemble};
pub use scaler::Scaler;
pub use stats::FeatureStats;
