use serde::{Deserialize, Serialize};

use crate::models::profile::EducationLevel;
use crate::models::riasec::RiasecVector;

/// A required skill and its importance weight in (0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub skill: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

/// One row of the career catalog. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerDefinition {
    pub id: String,
    pub name: String,
    /// Sorted by skill name; names are normalized and unique.
    pub required_skills: Vec<RequiredSkill>,
    pub target_riasec: RiasecVector,
    pub salary: SalaryRange,
    pub min_education: EducationLevel,
}

impl CareerDefinition {
    pub fn total_required_weight(&self) -> f64 {
        self.required_skills.iter().map(|r| r.weight).sum()
    }
}
