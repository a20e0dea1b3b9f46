//! Pre-trained decision tree loaded from a JSON artifact.

use crate::domain::model::FeatureValue;
use crate::domain::ports::Classifier;
use crate::utils::error::{PredictError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MODEL_TYPE: &str = "decision_tree_classifier";

/// Decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Leaf with the training-sample count of each class
    Leaf { class_counts: Vec<f64> },
    /// Internal node; samples with `x[feature_idx] <= threshold` go left
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Serialized form of a trained tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeArtifact {
    pub model_type: String,
    pub feature_names: Vec<String>,
    /// Category lists for string-valued features; a value encodes as its index.
    #[serde(default)]
    pub categories: HashMap<String, Vec<String>>,
    pub classes: Vec<String>,
    pub root: TreeNode,
}

#[derive(Debug, Clone)]
pub struct DecisionTreeClassifier {
    feature_names: Vec<String>,
    categories: HashMap<String, Vec<String>>,
    classes: Vec<String>,
    root: TreeNode,
}

impl DecisionTreeClassifier {
    /// Parse and check an artifact. `origin` only labels errors.
    pub fn from_json_slice(bytes: &[u8], origin: &str) -> Result<Self> {
        let artifact: DecisionTreeArtifact = serde_json::from_slice(bytes)
            .map_err(|e| PredictError::artifact_missing(origin, format!("unreadable model: {}", e)))?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: DecisionTreeArtifact) -> Result<Self> {
        if artifact.model_type != MODEL_TYPE {
            return Err(PredictError::SchemaMismatch {
                expected: format!("model_type {}", MODEL_TYPE),
                actual: format!("model_type {}", artifact.model_type),
            });
        }

        if artifact.classes.len() != 2 {
            return Err(PredictError::SchemaMismatch {
                expected: "2 classes".to_string(),
                actual: format!("{} classes {:?}", artifact.classes.len(), artifact.classes),
            });
        }

        for name in artifact.categories.keys() {
            if !artifact.feature_names.contains(name) {
                return Err(PredictError::SchemaMismatch {
                    expected: format!("categorical feature among {:?}", artifact.feature_names),
                    actual: name.clone(),
                });
            }
        }

        check_node(&artifact.root, artifact.feature_names.len(), artifact.classes.len())?;

        Ok(Self {
            feature_names: artifact.feature_names,
            categories: artifact.categories,
            classes: artifact.classes,
            root: artifact.root,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Get tree depth
    pub fn depth(&self) -> usize {
        node_depth(&self.root)
    }

    /// Get number of leaves
    pub fn n_leaves(&self) -> usize {
        count_leaves(&self.root)
    }

    fn encode(&self, row: &[(&str, FeatureValue)]) -> Result<Vec<f64>> {
        let actual: Vec<&str> = row.iter().map(|(name, _)| *name).collect();
        if actual.len() != self.feature_names.len()
            || actual.iter().zip(&self.feature_names).any(|(a, e)| *a != e.as_str())
        {
            return Err(PredictError::SchemaMismatch {
                expected: format!("{:?}", self.feature_names),
                actual: format!("{:?}", actual),
            });
        }

        row.iter()
            .map(|(name, value)| match value {
                FeatureValue::Numeric(x) => {
                    if self.categories.contains_key(*name) {
                        Err(PredictError::SchemaMismatch {
                            expected: format!("categorical value for {}", name),
                            actual: format!("numeric {}", x),
                        })
                    } else {
                        Ok(*x)
                    }
                }
                FeatureValue::Category(category) => {
                    let known = self.categories.get(*name).ok_or_else(|| {
                        PredictError::SchemaMismatch {
                            expected: format!("numeric value for {}", name),
                            actual: format!("category '{}'", category),
                        }
                    })?;
                    known
                        .iter()
                        .position(|c| c.as_str() == *category)
                        .map(|idx| idx as f64)
                        .ok_or_else(|| PredictError::SchemaMismatch {
                            expected: format!("{} in {:?}", name, known),
                            actual: format!("'{}'", category),
                        })
                }
            })
            .collect()
    }

    fn leaf_counts(&self, sample: &[f64]) -> &[f64] {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { class_counts } => return class_counts,
                TreeNode::Split {
                    feature_idx,
                    threshold,
                    left,
                    right,
                } => {
                    node = if sample[*feature_idx] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

impl Classifier for DecisionTreeClassifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_proba(&self, row: &[(&str, FeatureValue)]) -> Result<[f64; 2]> {
        let sample = self.encode(row)?;
        let counts = self.leaf_counts(&sample);
        let total: f64 = counts.iter().sum();
        Ok([counts[0] / total, counts[1] / total])
    }
}

fn check_node(node: &TreeNode, n_features: usize, n_classes: usize) -> Result<()> {
    match node {
        TreeNode::Leaf { class_counts } => {
            let total: f64 = class_counts.iter().sum();
            if class_counts.len() != n_classes
                || class_counts.iter().any(|c| !c.is_finite() || *c < 0.0)
                || !total.is_finite()
                || total <= 0.0
            {
                return Err(PredictError::SchemaMismatch {
                    expected: format!("{} non-negative class counts with a positive total", n_classes),
                    actual: format!("{:?}", class_counts),
                });
            }
            Ok(())
        }
        TreeNode::Split {
            feature_idx,
            threshold,
            left,
            right,
        } => {
            if *feature_idx >= n_features {
                return Err(PredictError::SchemaMismatch {
                    expected: format!("feature index below {}", n_features),
                    actual: feature_idx.to_string(),
                });
            }
            if !threshold.is_finite() {
                return Err(PredictError::SchemaMismatch {
                    expected: "finite split threshold".to_string(),
                    actual: threshold.to_string(),
                });
            }
            check_node(left, n_features, n_classes)?;
            check_node(right, n_features, n_classes)
        }
    }
}

fn node_depth(node: &TreeNode) -> usize {
    match node {
        TreeNode::Leaf { .. } => 1,
        TreeNode::Split { left, right, .. } => 1 + node_depth(left).max(node_depth(right)),
    }
}

fn count_leaves(node: &TreeNode) -> usize {
    match node {
        TreeNode::Leaf { .. } => 1,
        TreeNode::Split { left, right, .. } => count_leaves(left) + count_leaves(right),
    }
}
