//! Regression Models
//!
//! Linear models and regression tree ensembles (random forest / gradient
//! boosting) exported from the training pipeline.

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::error::PredictionError;

/// sklearn marks leaves with this child index
const TREE_LEAF: i64 = -1;

fn default_learning_rate() -> f64 {
    1.0
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Fitted regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Regressor {
    Linear {
        coefficients: Vec<f64>,
        #[serde(default)]
        intercept: f64,
    },
    TreeEnsemble(TreeEnsemble),
}

/// How per-tree outputs are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of all trees (random forest)
    #[default]
    Mean,
    /// `base_value + learning_rate * sum` (gradient boosting)
    Sum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub n_features: usize,
    pub trees: Vec<RegressionTree>,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub base_value: f64,
}

/// Single tree in flat node-array form. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

// ============================================================================
// TREES
// ============================================================================

impl RegressionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err("tree node arrays differ in length".to_string());
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == TREE_LEAF && right == TREE_LEAF {
                continue;
            }
            // Children always follow their parent, so traversal terminates.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {} has invalid child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on unknown feature {}", node, feature));
            }
        }
        Ok(())
    }

    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == TREE_LEAF {
                return self.value[node];
            }
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

impl TreeEnsemble {
    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| tree.predict_row(row)).sum();
        match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => self.base_value + self.learning_rate * total,
        }
    }
}

// ============================================================================
// REGRESSOR
// ============================================================================

impl Regressor {
    pub fn name(&self) -> &'static str {
        match self {
            Regressor::Linear { .. } => "LinearRegression",
            Regressor::TreeEnsemble(ensemble) => match ensemble.aggregation {
                Aggregation::Mean => "RandomForestRegressor",
                Aggregation::Sum => "GradientBoostingRegressor",
            },
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            Regressor::Linear { coefficients, .. } => coefficients.len(),
            Regressor::TreeEnsemble(ensemble) => ensemble.n_features,
        }
    }

    /// Check the fitted parameters are usable
    pub fn validate(&self) -> Result<(), String> {
        if self.n_features() == 0 {
            return Err("model has no features".to_string());
        }
        if let Regressor::TreeEnsemble(ensemble) = self {
            if ensemble.trees.is_empty() {
                return Err("ensemble has no trees".to_string());
            }
            for (i, tree) in ensemble.trees.iter().enumerate() {
                tree.validate(ensemble.n_features)
                    .map_err(|reason| format!("tree {}: {}", i, reason))?;
            }
        }
        Ok(())
    }

    /// Predict one value per row of a `(samples, features)` matrix
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, PredictionError> {
        if x.iter().any(|v| v.is_nan()) {
            return Err(PredictionError::ContainsNaN);
        }
        if x.iter().any(|v| v.is_infinite()) {
            return Err(PredictionError::ContainsInfinity);
        }
        if x.ncols() != self.n_features() {
            return Err(PredictionError::FeatureMismatch {
                component: self.name(),
                expected: self.n_features(),
                got: x.ncols(),
            });
        }

        let predictions = match self {
            Regressor::Linear { coefficients, intercept } => {
                x.dot(&ArrayView1::from(coefficients.as_slice())) + *intercept
            }
            Regressor::TreeEnsemble(ensemble) => x
                .rows()
                .into_iter()
                .map(|row| ensemble.predict_row(row))
                .collect(),
        };

        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Depth-1 stump splitting feature `feature` at `threshold`
    fn stump(feature: i64, threshold: f64, left: f64, right: f64) -> RegressionTree {
        RegressionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![feature, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![0.0, left, right],
        }
    }

    #[test]
    fn test_linear_predict() {
        let model = Regressor::Linear {
            coefficients: vec![1.0, 2.0, 3.0],
            intercept: 10.0,
        };
        let out = model.predict(&array![[1.0, 1.0, 1.0], [0.0, 0.0, 2.0]]).unwrap();
        assert_eq!(out, array![16.0, 16.0]);
    }

    #[test]
    fn test_forest_averages_trees() {
        let model = Regressor::TreeEnsemble(TreeEnsemble {
            n_features: 2,
            trees: vec![stump(0, 0.5, 100.0, 200.0), stump(1, 0.0, 10.0, 20.0)],
            aggregation: Aggregation::Mean,
            learning_rate: 1.0,
            base_value: 0.0,
        });
        assert!(model.validate().is_ok());
        assert_eq!(model.name(), "RandomForestRegressor");

        let out = model.predict(&array![[0.5, 1.0], [1.0, -1.0]]).unwrap();
        // threshold comparison is inclusive on the left branch
        assert_eq!(out, array![(100.0 + 20.0) / 2.0, (200.0 + 10.0) / 2.0]);
    }

    #[test]
    fn test_boosting_sums_trees() {
        let model = Regressor::TreeEnsemble(TreeEnsemble {
            n_features: 1,
            trees: vec![stump(0, 0.0, -1.0, 1.0), stump(0, 5.0, -2.0, 2.0)],
            aggregation: Aggregation::Sum,
            learning_rate: 0.5,
            base_value: 1000.0,
        });
        let out = model.predict(&array![[3.0]]).unwrap();
        assert_eq!(out[0], 1000.0 + 0.5 * (1.0 - 2.0));
    }

    #[test]
    fn test_rejects_nan_and_width_mismatch() {
        let model = Regressor::Linear { coefficients: vec![1.0, 1.0], intercept: 0.0 };

        let err = model.predict(&array![[f64::NAN, 1.0]]).unwrap_err();
        assert!(matches!(err, PredictionError::ContainsNaN));

        let err = model.predict(&array![[1.0, 2.0, 3.0]]).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::FeatureMismatch { expected: 2, got: 3, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let mut tree = stump(0, 1.0, 0.0, 1.0);
        tree.children_right[0] = 0;
        let model = Regressor::TreeEnsemble(TreeEnsemble {
            n_features: 1,
            trees: vec![tree],
            aggregation: Aggregation::Mean,
            learning_rate: 1.0,
            base_value: 0.0,
        });
        let err = model.validate().unwrap_err();
        assert!(err.contains("invalid child"));
    }

    #[test]
    fn test_deserialize_tagged() {
        let model: Regressor = serde_json::from_str(
            r#"{"type": "tree_ensemble", "n_features": 1, "aggregation": "sum",
                "trees": [{"children_left": [-1], "children_right": [-1],
                           "feature": [-2], "threshold": [-2.0], "value": [7.5]}]}"#,
        )
        .unwrap();
        assert!(model.validate().is_ok());
        assert_eq!(model.predict(&array![[42.0]]).unwrap()[0], 7.5);
    }
}
