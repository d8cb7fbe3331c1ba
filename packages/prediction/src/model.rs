//! Regression model runtime.
//!
//! The engine only sees the [`RegressionModel`] trait. The production
//! implementation is [`RandomForestModel`], which evaluates a tree ensemble
//! exported as JSON using scikit-learn's flat `tree_` array layout: each
//! tree is five parallel arrays indexed by node id, a node is a leaf when
//! its left child is `-1`, and a sample goes left when
//! `x[feature] <= threshold`. The forest predicts the mean of its trees.

use std::path::Path;

use crime_rate_prediction_models::{FEATURE_NAMES, FeatureVector};
use serde::{Deserialize, Serialize};

/// Child index marking a leaf node.
const LEAF: i64 = -1;

/// Errors raised while loading or evaluating a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The artifact could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is not valid JSON for the expected layout.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact parsed but is structurally unusable.
    #[error("Invalid model artifact: {message}")]
    InvalidArtifact {
        /// What is wrong with the artifact.
        message: String,
    },

    /// Evaluation did not yield a usable number.
    #[error("Inference failed: {message}")]
    Inference {
        /// Description of what went wrong.
        message: String,
    },
}

impl ModelError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArtifact {
            message: message.into(),
        }
    }

    pub(crate) fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }
}

/// A trained regressor mapping one feature vector to one scalar.
///
/// Implementations must be deterministic and free of interior mutation so
/// a single loaded instance can be shared across callers.
pub trait RegressionModel: Send + Sync {
    /// Predicts the crime rate for `features`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the model cannot produce a prediction.
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

/// One regression tree in flat array form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    /// Feature index tested at each node. Ignored for leaves.
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Leaf output. Ignored for internal nodes.
    pub value: Vec<f64>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.value.len()
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        let nodes = self.node_count();
        if nodes == 0 {
            return Err("tree has no nodes".to_string());
        }
        if [
            self.children_left.len(),
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
        ]
        .iter()
        .any(|&len| len != nodes)
        {
            return Err(format!("node arrays differ in length (expected {nodes})"));
        }

        let in_range = |idx: i64| usize::try_from(idx).is_ok_and(|idx| idx < nodes);

        for node in 0..nodes {
            let left = self.children_left[node];
            if left == LEAF {
                if !self.value[node].is_finite() {
                    return Err(format!("leaf {node} has a non-finite value"));
                }
                continue;
            }
            let right = self.children_right[node];
            if !in_range(left) || !in_range(right) {
                return Err(format!("node {node} has out-of-range children"));
            }
            if !usize::try_from(self.feature[node]).is_ok_and(|f| f < n_features) {
                return Err(format!(
                    "node {node} tests feature {} but the model has {n_features}",
                    self.feature[node]
                ));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {node} has a NaN threshold"));
            }
        }

        Ok(())
    }

    /// Walks the tree for one row. Indices were checked by `validate`, so
    /// the only failure left is a cycle, caught by bounding the walk.
    fn evaluate(&self, row: &[f64]) -> Result<f64, ModelError> {
        let mut node = 0_usize;
        for _ in 0..=self.node_count() {
            let left = self.children_left[node];
            if left == LEAF {
                return Ok(self.value[node]);
            }
            let feature = usize::try_from(self.feature[node])
                .map_err(|_| ModelError::inference(format!("bad feature at node {node}")))?;
            let next = if row[feature] <= self.threshold[node] {
                left
            } else {
                self.children_right[node]
            };
            node = usize::try_from(next)
                .map_err(|_| ModelError::inference(format!("bad child at node {node}")))?;
        }

        Err(ModelError::inference("tree walk did not reach a leaf"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForestArtifact {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

/// Random forest regressor averaging a set of [`DecisionTree`]s.
#[derive(Debug, Clone)]
pub struct RandomForestModel {
    trees: Vec<DecisionTree>,
}

impl RandomForestModel {
    /// Builds a forest from already-parsed trees.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArtifact`] if the forest is empty or any
    /// tree is malformed.
    pub fn new(trees: Vec<DecisionTree>) -> Result<Self, ModelError> {
        if trees.is_empty() {
            return Err(ModelError::invalid("forest has no trees"));
        }
        for (idx, tree) in trees.iter().enumerate() {
            tree.validate(FEATURE_NAMES.len())
                .map_err(|message| ModelError::invalid(format!("tree {idx}: {message}")))?;
        }
        Ok(Self { trees })
    }

    /// Parses a forest from its JSON export.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Json`] for malformed JSON and
    /// [`ModelError::InvalidArtifact`] if the forest does not fit the
    /// four-feature input contract or a tree is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let artifact: ForestArtifact = serde_json::from_str(json)?;
        if artifact.n_features != FEATURE_NAMES.len() {
            return Err(ModelError::invalid(format!(
                "model expects {} features, inputs provide {}",
                artifact.n_features,
                FEATURE_NAMES.len()
            )));
        }
        Self::new(artifact.trees)
    }

    /// Reads and parses a forest from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Number of trees in the ensemble.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Total nodes across all trees.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(DecisionTree::node_count).sum()
    }
}

impl RegressionModel for RandomForestModel {
    #[allow(clippy::cast_precision_loss)]
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let row = features.to_row();
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(&row)?;
        }
        Ok(sum / self.trees.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on year (feature 0) at 2015.5: 2.0 below, 8.0 above.
    fn year_stump(low: f64, high: f64) -> DecisionTree {
        DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![0, -2, -2],
            threshold: vec![2015.5, -2.0, -2.0],
            value: vec![0.0, low, high],
        }
    }

    #[test]
    fn stump_routes_on_threshold_inclusive_left() {
        let forest = RandomForestModel::new(vec![year_stump(2.0, 8.0)]).unwrap();
        let at = |year| forest.predict(&FeatureVector::new(year, 0, 10.0, 0)).unwrap();
        assert!((at(2015) - 2.0).abs() < f64::EPSILON);
        assert!((at(2016) - 8.0).abs() < f64::EPSILON);

        let tree = DecisionTree {
            threshold: vec![2015.0, -2.0, -2.0],
            ..year_stump(2.0, 8.0)
        };
        let forest = RandomForestModel::new(vec![tree]).unwrap();
        let rate = forest.predict(&FeatureVector::new(2015, 0, 10.0, 0)).unwrap();
        assert!((rate - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn forest_averages_trees() {
        let forest =
            RandomForestModel::new(vec![year_stump(2.0, 8.0), year_stump(4.0, 12.0)]).unwrap();
        assert_eq!(forest.tree_count(), 2);
        assert_eq!(forest.node_count(), 6);
        let rate = forest.predict(&FeatureVector::new(2020, 3, 21.5, 1)).unwrap();
        assert!((rate - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_leaf_tree_is_constant() {
        let tree = DecisionTree {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![3.25],
        };
        let forest = RandomForestModel::new(vec![tree]).unwrap();
        let rate = forest.predict(&FeatureVector::new(1990, 18, -5.0, 9)).unwrap();
        assert!((rate - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_json_export() {
        let json = serde_json::json!({
            "nFeatures": 4,
            "trees": [{
                "childrenLeft": [1, -1, -1],
                "childrenRight": [2, -1, -1],
                "feature": [2, -2, -2],
                "threshold": [50.0, -2.0, -2.0],
                "value": [0.0, 1.5, 20.0]
            }]
        })
        .to_string();
        let forest = RandomForestModel::from_json_str(&json).unwrap();
        let small = forest.predict(&FeatureVector::new(2020, 0, 21.5, 0)).unwrap();
        let large = forest.predict(&FeatureVector::new(2020, 14, 184.1, 0)).unwrap();
        assert!((small - 1.5).abs() < f64::EPSILON);
        assert!((large - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_wrong_feature_count() {
        let json = r#"{"nFeatures": 3, "trees": []}"#;
        assert!(matches!(
            RandomForestModel::from_json_str(json),
            Err(ModelError::InvalidArtifact { .. })
        ));
    }

    #[test]
    fn rejects_malformed_trees() {
        assert!(RandomForestModel::new(Vec::new()).is_err());

        let mut short = year_stump(1.0, 2.0);
        short.threshold.pop();
        assert!(RandomForestModel::new(vec![short]).is_err());

        let mut dangling = year_stump(1.0, 2.0);
        dangling.children_right[0] = 7;
        assert!(RandomForestModel::new(vec![dangling]).is_err());

        let mut bad_feature = year_stump(1.0, 2.0);
        bad_feature.feature[0] = 4;
        assert!(RandomForestModel::new(vec![bad_feature]).is_err());

        assert!(matches!(
            RandomForestModel::from_json_str("not json"),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn cyclic_tree_fails_at_inference() {
        let tree = DecisionTree {
            children_left: vec![1, 0],
            children_right: vec![1, 0],
            feature: vec![0, 0],
            threshold: vec![0.0, 0.0],
            value: vec![0.0, 0.0],
        };
        let forest = RandomForestModel::new(vec![tree]).unwrap();
        assert!(matches!(
            forest.predict(&FeatureVector::new(2020, 0, 1.0, 0)),
            Err(ModelError::Inference { .. })
        ));
    }
}
