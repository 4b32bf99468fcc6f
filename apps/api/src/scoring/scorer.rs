use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::CareerCatalog;
use crate::errors::EngineError;
use crate::models::CandidateProfile;
use crate::scoring::classifier::{Classifier, LoadedModel};
use crate::scoring::features::FeatureVocabulary;

/// Tolerance on the probability sum before the scorer re-normalizes.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Classifier output for one profile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreOutcome {
    /// Probability per trained class; sums to 1 within `PROBABILITY_TOLERANCE`.
    pub probabilities: BTreeMap<String, f64>,
    /// One `UnscoredCareer` per catalog career the model cannot score.
    #[serde(skip)]
    pub warnings: Vec<EngineError>,
}

/// Wraps a trained classifier together with the vocabulary that defines its
/// input layout. Shared read-only across requests.
pub struct MatchScorer {
    vocabulary: FeatureVocabulary,
    classifier: Box<dyn Classifier>,
    model_version: String,
}

impl MatchScorer {
    /// Fails with `ModelVersionMismatch` if the vocabulary does not produce
    /// vectors of the width the classifier was trained on.
    pub fn new(
        vocabulary: FeatureVocabulary,
        classifier: Box<dyn Classifier>,
        model_version: impl Into<String>,
    ) -> Result<Self, EngineError> {
        let expected = vocabulary.feature_width();
        let actual = classifier.input_width();
        if expected != actual {
            return Err(EngineError::ModelVersionMismatch { expected, actual });
        }
        Ok(Self {
            vocabulary,
            classifier,
            model_version: model_version.into(),
        })
    }

    pub fn from_model(model: LoadedModel) -> Result<Self, EngineError> {
        Self::new(model.vocabulary, Box::new(model.classifier), model.version)
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    pub fn score(&self, profile: &CandidateProfile, catalog: &CareerCatalog) -> ScoreOutcome {
        let features = self.vocabulary.featurize(profile);
        let unknown = self.vocabulary.unknown_skills(profile);
        if !unknown.is_empty() {
            debug!(?unknown, "Profile skills outside the model vocabulary are ignored");
        }

        let raw = self.classifier.predict_proba(&features);
        let probs = normalize_probabilities(raw, self.classifier.classes().len());

        let probabilities: BTreeMap<String, f64> = self
            .classifier
            .classes()
            .iter()
            .cloned()
            .zip(probs)
            .collect();

        let trained: HashSet<&str> = self.classifier.classes().iter().map(String::as_str).collect();
        let warnings: Vec<EngineError> = catalog
            .all()
            .filter(|career| !trained.contains(career.id.as_str()))
            .map(|career| {
                warn!("Career '{}' has no trained class; excluded from ranking", career.id);
                EngineError::UnscoredCareer(career.id.clone())
            })
            .collect();

        ScoreOutcome {
            probabilities,
            warnings,
        }
    }
}

/// Clamps invalid outputs to 0 and re-normalizes when the sum drifts outside
/// tolerance. A missing, truncated or all-zero output becomes uniform.
fn normalize_probabilities(mut raw: Vec<f64>, classes: usize) -> Vec<f64> {
    if raw.len() != classes {
        warn!(
            "Classifier returned {} probabilities for {} classes; falling back to uniform",
            raw.len(),
            classes
        );
        return vec![1.0 / classes as f64; classes];
    }
    for p in raw.iter_mut() {
        if !p.is_finite() || *p < 0.0 {
            *p = 0.0;
        }
    }
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return vec![1.0 / classes as f64; classes];
    }
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        debug!(total, "Re-normalizing classifier output");
        for p in raw.iter_mut() {
            *p /= total;
        }
    }
    raw
}
