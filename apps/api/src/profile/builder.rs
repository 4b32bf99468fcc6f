use tracing::debug;

use crate::errors::EngineError;
use crate::models::{CandidateProfile, EducationLevel, RiasecVector, SkillSet};
use crate::profile::assessment::{score_answers, AnswerScale, RiasecAnswers};

/// Normalizes raw candidate signals into a `CandidateProfile`.
#[derive(Debug, Clone, Copy)]
pub struct ProfileBuilder {
    answer_scale: AnswerScale,
    scale_riasec: bool,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self {
            answer_scale: AnswerScale::default(),
            scale_riasec: true,
        }
    }
}

impl ProfileBuilder {
    pub fn new(answer_scale: AnswerScale, scale_riasec: bool) -> Self {
        Self {
            answer_scale,
            scale_riasec,
        }
    }

    /// Builds a profile from questionnaire answers.
    pub fn build<S: AsRef<str>>(
        &self,
        raw_skills: &[S],
        education: EducationLevel,
        experience_years: f64,
        riasec_answers: &RiasecAnswers,
    ) -> Result<CandidateProfile, EngineError> {
        let riasec = score_answers(riasec_answers, self.answer_scale, self.scale_riasec)?;
        self.build_from_scores(raw_skills, education, experience_years, riasec)
    }

    /// Builds a profile from an already-scored RIASEC vector.
    pub fn build_from_scores<S: AsRef<str>>(
        &self,
        raw_skills: &[S],
        education: EducationLevel,
        experience_years: f64,
        riasec: RiasecVector,
    ) -> Result<CandidateProfile, EngineError> {
        if !experience_years.is_finite() || experience_years < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "experience_years must be a non-negative number, got {experience_years}"
            )));
        }

        let skills = SkillSet::from_raw(raw_skills);

        if skills.is_empty() && riasec.is_zero() {
            return Err(EngineError::IncompleteProfile);
        }
        if skills.is_empty() || riasec.is_zero() {
            debug!(
                skills = skills.len(),
                riasec_zero = riasec.is_zero(),
                "Building degraded profile with a single signal"
            );
        }

        Ok(CandidateProfile::new(
            skills,
            education,
            experience_years,
            riasec,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiasecDimension;

    fn riasec(s: [f64; 6]) -> RiasecVector {
        RiasecVector::new(s).unwrap()
    }

    #[test]
    fn test_build_normalizes_skills() {
        let profile = ProfileBuilder::default()
            .build_from_scores(
                &["JS", " Python", "python", ""],
                EducationLevel::BACHELOR,
                2.0,
                riasec([10.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            )
            .unwrap();
        let skills: Vec<&str> = profile.skills().iter().collect();
        assert_eq!(skills, vec!["javascript", "python"]);
    }

    #[test]
    fn test_empty_skills_and_zero_riasec_is_incomplete() {
        let err = ProfileBuilder::default()
            .build_from_scores(&[" "], EducationLevel::NONE, 0.0, RiasecVector::zero())
            .unwrap_err();
        assert_eq!(err, EngineError::IncompleteProfile);
    }

    #[test]
    fn test_skills_only_profile_is_valid() {
        let profile = ProfileBuilder::default()
            .build_from_scores(&["sql"], EducationLevel::NONE, 0.0, RiasecVector::zero())
            .unwrap();
        assert!(profile.riasec().is_zero());
    }

    #[test]
    fn test_riasec_only_profile_is_valid() {
        let empty: [&str; 0] = [];
        let profile = ProfileBuilder::default()
            .build_from_scores(
                &empty,
                EducationLevel::NONE,
                0.0,
                riasec([0.0, 0.0, 50.0, 0.0, 0.0, 0.0]),
            )
            .unwrap();
        assert!(profile.skills().is_empty());
    }

    #[test]
    fn test_negative_experience_rejected() {
        let r = ProfileBuilder::default().build_from_scores(
            &["sql"],
            EducationLevel::NONE,
            -1.0,
            RiasecVector::zero(),
        );
        assert!(matches!(r, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_build_from_answers_scales_to_100() {
        let answers = RiasecAnswers {
            scores: vec![5.0, 3.0],
            dimensions: vec![RiasecDimension::Realistic, RiasecDimension::Social],
        };
        let profile = ProfileBuilder::default()
            .build(&["rust"], EducationLevel::MASTER, 5.0, &answers)
            .unwrap();
        assert_eq!(profile.riasec().get(RiasecDimension::Realistic), 100.0);
        assert_eq!(profile.riasec().get(RiasecDimension::Social), 50.0);
        assert_eq!(profile.education(), EducationLevel::MASTER);
    }

    #[test]
    fn test_all_minimum_answers_without_skills_is_incomplete() {
        let answers = RiasecAnswers {
            scores: vec![1.0; 6],
            dimensions: RiasecDimension::ALL.to_vec(),
        };
        let empty: [&str; 0] = [];
        let r = ProfileBuilder::default().build(&empty, EducationLevel::NONE, 0.0, &answers);
        assert_eq!(r.unwrap_err(), EngineError::IncompleteProfile);
    }
}
