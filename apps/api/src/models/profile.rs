use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::models::riasec::RiasecVector;
use crate::models::skill::SkillSet;

/// Ordinal education level: 0 none, 1 high school, 2 associate, 3 bachelor,
/// 4 master, 5 doctorate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct EducationLevel(u8);

impl EducationLevel {
    pub const NONE: EducationLevel = EducationLevel(0);
    pub const HIGH_SCHOOL: EducationLevel = EducationLevel(1);
    pub const ASSOCIATE: EducationLevel = EducationLevel(2);
    pub const BACHELOR: EducationLevel = EducationLevel(3);
    pub const MASTER: EducationLevel = EducationLevel(4);
    pub const DOCTORATE: EducationLevel = EducationLevel(5);

    const NAMES: [&'static str; 6] = [
        "none",
        "high_school",
        "associate",
        "bachelor",
        "master",
        "doctorate",
    ];

    pub fn new(ordinal: u8) -> Result<Self, EngineError> {
        if (ordinal as usize) < Self::NAMES.len() {
            Ok(Self(ordinal))
        } else {
            Err(EngineError::InvalidInput(format!(
                "education level must be 0..=5, got {ordinal}"
            )))
        }
    }

    pub fn ordinal(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self.0 as usize]
    }
}

impl TryFrom<u8> for EducationLevel {
    type Error = EngineError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        EducationLevel::new(v)
    }
}

impl From<EducationLevel> for u8 {
    fn from(level: EducationLevel) -> Self {
        level.0
    }
}

impl FromStr for EducationLevel {
    type Err = EngineError;

    /// Accepts either the ordinal ("3") or the name ("bachelor", "High School").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return EducationLevel::new(n);
        }
        let key = trimmed.to_lowercase().replace([' ', '-'], "_");
        Self::NAMES
            .iter()
            .position(|name| *name == key)
            .map(|i| EducationLevel(i as u8))
            .ok_or_else(|| EngineError::InvalidInput(format!("unknown education level '{s}'")))
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A normalized candidate, immutable for the duration of a recommendation run.
/// Built through `profile::ProfileBuilder`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateProfile {
    skills: SkillSet,
    education: EducationLevel,
    experience_years: f64,
    riasec: RiasecVector,
}

impl CandidateProfile {
    pub(crate) fn new(
        skills: SkillSet,
        education: EducationLevel,
        experience_years: f64,
        riasec: RiasecVector,
    ) -> Self {
        Self {
            skills,
            education,
            experience_years,
            riasec,
        }
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn education(&self) -> EducationLevel {
        self.education
    }

    pub fn experience_years(&self) -> f64 {
        self.experience_years
    }

    pub fn riasec(&self) -> &RiasecVector {
        &self.riasec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_parses_ordinal() {
        assert_eq!("3".parse::<EducationLevel>().unwrap(), EducationLevel::BACHELOR);
    }

    #[test]
    fn test_education_parses_name_loosely() {
        assert_eq!(
            "High School".parse::<EducationLevel>().unwrap(),
            EducationLevel::HIGH_SCHOOL
        );
        assert_eq!("Doctorate".parse::<EducationLevel>().unwrap(), EducationLevel::DOCTORATE);
    }

    #[test]
    fn test_education_rejects_out_of_range() {
        assert!("6".parse::<EducationLevel>().is_err());
        assert!("wizard".parse::<EducationLevel>().is_err());
    }

    #[test]
    fn test_education_ordering() {
        assert!(EducationLevel::MASTER > EducationLevel::BACHELOR);
    }
}
