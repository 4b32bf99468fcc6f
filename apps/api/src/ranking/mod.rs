//! Ranker — blends classifier probability with catalog-derived similarity.
//!
//! composite = w_classifier·p + w_riasec·riasec_similarity + w_skill·skill_overlap
//!
//! Ordering is composite descending, then career id ascending, so identical
//! inputs always produce identical output regardless of map iteration order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CareerCatalog;
use crate::errors::EngineError;
use crate::models::{CandidateProfile, CareerDefinition, SalaryRange};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    pub classifier: f64,
    pub riasec: f64,
    pub skill: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            classifier: 0.6,
            riasec: 0.2,
            skill: 0.2,
        }
    }
}

impl RankingWeights {
    pub fn validate(&self) -> Result<(), EngineError> {
        let parts = [self.classifier, self.riasec, self.skill];
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EngineError::InvalidInput(
                "ranking weights must be non-negative".to_string(),
            ));
        }
        let sum: f64 = parts.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidInput(format!(
                "ranking weights must sum to 1, got {sum}"
            )));
        }
        Ok(())
    }

    pub fn composite(&self, sub: &SubScores) -> f64 {
        self.classifier * sub.classifier_probability
            + self.riasec * sub.riasec_similarity
            + self.skill * sub.skill_overlap_ratio
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub classifier_probability: f64,
    pub riasec_similarity: f64,
    pub skill_overlap_ratio: f64,
}

/// One ranked career. Created once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub career_id: String,
    pub career_name: String,
    pub composite_score: f64,
    pub rank: usize,
    pub sub_scores: SubScores,
    pub salary: SalaryRange,
    pub meets_min_education: bool,
}

/// Weighted share of a career's required skills the candidate already holds.
/// A career with no requirements is trivially satisfied.
pub fn skill_overlap_ratio(profile: &CandidateProfile, career: &CareerDefinition) -> f64 {
    let total = career.total_required_weight();
    if career.required_skills.is_empty() || total <= 0.0 {
        return 1.0;
    }
    let held: f64 = career
        .required_skills
        .iter()
        .filter(|r| profile.skills().contains(&r.skill))
        .map(|r| r.weight)
        .sum();
    held / total
}

/// Ranks every career present in both `catalog` and `scores`, returning at
/// most `top_n` results with contiguous 1-based ranks.
pub fn rank(
    scores: &BTreeMap<String, f64>,
    profile: &CandidateProfile,
    catalog: &CareerCatalog,
    weights: &RankingWeights,
    top_n: i64,
) -> Result<Vec<MatchResult>, EngineError> {
    if top_n <= 0 {
        return Err(EngineError::InvalidTopN(top_n));
    }
    weights.validate()?;

    let mut scored: Vec<(f64, SubScores, &CareerDefinition)> = catalog
        .all()
        .filter_map(|career| {
            let probability = *scores.get(&career.id)?;
            let sub = SubScores {
                classifier_probability: probability,
                riasec_similarity: profile.riasec().cosine_similarity(&career.target_riasec),
                skill_overlap_ratio: skill_overlap_ratio(profile, career),
            };
            Some((weights.composite(&sub), sub, career))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.2.id.cmp(&b.2.id))
    });

    let limit = usize::try_from(top_n).unwrap_or(usize::MAX);
    debug!(candidates = scored.len(), limit, "Ranked careers");

    Ok(scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (composite_score, sub_scores, career))| MatchResult {
            career_id: career.id.clone(),
            career_name: career.name.clone(),
            composite_score,
            rank: i + 1,
            sub_scores,
            salary: career.salary,
            meets_min_education: profile.education() >= career.min_education,
        })
        .collect())
}
