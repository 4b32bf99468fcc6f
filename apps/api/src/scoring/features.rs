use std::collections::{HashMap, HashSet};

use crate::errors::EngineError;
use crate::models::CandidateProfile;

/// Number of non-skill features appended after the skill indicators:
/// education ordinal, experience years, six RIASEC dimensions.
pub const PROFILE_FEATURES: usize = 8;

/// The fixed skill vocabulary a model was trained on, in training order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVocabulary {
    skills: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureVocabulary {
    /// Entries are expected to be normalized already; duplicates are rejected
    /// since two columns for one skill would make the layout ambiguous.
    pub fn new(skills: Vec<String>) -> Result<Self, EngineError> {
        let mut index = HashMap::with_capacity(skills.len());
        for (i, skill) in skills.iter().enumerate() {
            if index.insert(skill.clone(), i).is_some() {
                return Err(EngineError::ModelLoad(format!(
                    "vocabulary lists '{skill}' more than once"
                )));
            }
        }
        Ok(Self { skills, index })
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Width of the vectors produced by `featurize`.
    pub fn feature_width(&self) -> usize {
        self.skills.len() + PROFILE_FEATURES
    }

    /// Layout: `[skill indicators..., education, experience, R, I, A, S, E, C]`.
    /// RIASEC values are divided by 100. Skills outside the vocabulary are
    /// ignored; a missing signal contributes zeros.
    pub fn featurize(&self, profile: &CandidateProfile) -> Vec<f64> {
        let mut features = vec![0.0; self.feature_width()];
        for skill in profile.skills().iter() {
            if let Some(&i) = self.index.get(skill) {
                features[i] = 1.0;
            }
        }
        let base = self.skills.len();
        features[base] = profile.education().ordinal() as f64;
        features[base + 1] = profile.experience_years();
        for (i, score) in profile.riasec().as_array().iter().enumerate() {
            features[base + 2 + i] = score / 100.0;
        }
        features
    }

    /// Profile skills the model has never seen.
    pub fn unknown_skills<'a>(&self, profile: &'a CandidateProfile) -> Vec<&'a str> {
        let known: HashSet<&str> = self.skills.iter().map(String::as_str).collect();
        profile
            .skills()
            .iter()
            .filter(|s| !known.contains(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationLevel, RiasecVector};
    use crate::profile::ProfileBuilder;

    fn vocab() -> FeatureVocabulary {
        FeatureVocabulary::new(vec!["excel".into(), "python".into(), "sql".into()]).unwrap()
    }

    #[test]
    fn test_featurize_layout() {
        let profile = ProfileBuilder::default()
            .build_from_scores(
                &["python", "rust"],
                EducationLevel::BACHELOR,
                2.0,
                RiasecVector::new([80.0, 60.0, 10.0, 20.0, 70.0, 30.0]).unwrap(),
            )
            .unwrap();
        let f = vocab().featurize(&profile);
        assert_eq!(f.len(), 11);
        assert_eq!(&f[..3], &[0.0, 1.0, 0.0]);
        assert_eq!(f[3], 3.0);
        assert_eq!(f[4], 2.0);
        assert!((f[5] - 0.8).abs() < 1e-12);
        assert!((f[10] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_skills_reported() {
        let profile = ProfileBuilder::default()
            .build_from_scores(&["python", "rust"], EducationLevel::NONE, 0.0, RiasecVector::zero())
            .unwrap();
        assert_eq!(vocab().unknown_skills(&profile), vec!["rust"]);
    }

    #[test]
    fn test_duplicate_vocabulary_rejected() {
        assert!(FeatureVocabulary::new(vec!["sql".into(), "sql".into()]).is_err());
    }
}
