//! Classifier abstraction and the shipped multinomial logistic model.
//!
//! `MatchScorer` only sees `dyn Classifier`, so any model that maps a
//! fixed-width vector to per-class probabilities can be swapped in.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::EngineError;
use crate::models::normalize_skill;
use crate::scoring::features::FeatureVocabulary;

/// A trained multi-class classifier.
pub trait Classifier: Send + Sync {
    /// Number of input features the model was trained on.
    fn input_width(&self) -> usize;

    /// Class labels (career identifiers), aligned with `predict_proba` output.
    fn classes(&self) -> &[String];

    /// One probability per class. Callers validate and re-normalize.
    fn predict_proba(&self, features: &[f64]) -> Vec<f64>;
}

/// Serialized form of a trained model plus its feature vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: String,
    pub trained_at: DateTime<Utc>,
    pub vocabulary: Vec<String>,
    pub classes: Vec<String>,
    /// `weights[class][feature]`
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

/// A loaded, validated artifact ready to hand to `MatchScorer::new`.
pub struct LoadedModel {
    pub version: String,
    pub trained_at: DateTime<Utc>,
    pub vocabulary: FeatureVocabulary,
    pub classifier: SoftmaxClassifier,
}

impl ModelArtifact {
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        serde_json::from_str(raw).map_err(|e| EngineError::ModelLoad(e.to_string()))
    }

    pub fn load_path(path: impl AsRef<Path>) -> Result<LoadedModel, EngineError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| EngineError::ModelLoad(format!("cannot read {}: {e}", path.display())))?;
        let model = Self::from_json(&raw)?.into_model()?;
        info!(
            "Loaded model {} (trained {}) with {} classes and {} vocabulary skills",
            model.version,
            model.trained_at,
            model.classifier.classes().len(),
            model.vocabulary.len()
        );
        Ok(model)
    }

    /// Validates internal consistency. Vocabulary entries are normalized so
    /// they line up with candidate skills.
    pub fn into_model(self) -> Result<LoadedModel, EngineError> {
        let vocabulary = self
            .vocabulary
            .iter()
            .map(|s| {
                normalize_skill(s)
                    .ok_or_else(|| EngineError::ModelLoad("blank vocabulary entry".to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let vocabulary = FeatureVocabulary::new(vocabulary)?;
        let classifier = SoftmaxClassifier::new(self.classes, self.weights, self.bias)?;
        Ok(LoadedModel {
            version: self.version,
            trained_at: self.trained_at,
            vocabulary,
            classifier,
        })
    }
}

/// Multinomial logistic regression: `softmax(W·x + b)`.
#[derive(Debug, Clone)]
pub struct SoftmaxClassifier {
    classes: Vec<String>,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    width: usize,
}

impl SoftmaxClassifier {
    pub fn new(
        classes: Vec<String>,
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
    ) -> Result<Self, EngineError> {
        if classes.is_empty() {
            return Err(EngineError::ModelLoad("model has no classes".to_string()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = classes.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(EngineError::ModelLoad(format!("class '{dup}' listed twice")));
        }
        if weights.len() != classes.len() || bias.len() != classes.len() {
            return Err(EngineError::ModelLoad(format!(
                "{} classes but {} weight rows and {} biases",
                classes.len(),
                weights.len(),
                bias.len()
            )));
        }
        let width = weights[0].len();
        if weights.iter().any(|row| row.len() != width) {
            return Err(EngineError::ModelLoad("weight rows have differing widths".to_string()));
        }
        if weights.iter().flatten().chain(bias.iter()).any(|w| !w.is_finite()) {
            return Err(EngineError::ModelLoad("non-finite parameter".to_string()));
        }
        Ok(Self {
            classes,
            weights,
            bias,
            width,
        })
    }
}

impl Classifier for SoftmaxClassifier {
    fn input_width(&self) -> usize {
        self.width
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let logits: Vec<f64> = self
            .weights
            .iter()
            .zip(self.bias.iter())
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();
        // Shift by the max logit so exp never overflows.
        let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        exps.into_iter().map(|e| e / total).collect()
    }
}
