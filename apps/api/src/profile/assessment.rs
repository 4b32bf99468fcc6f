//! RIASEC assessment scoring — turns per-item answers into a `RiasecVector`.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::models::{RiasecDimension, RiasecVector};

/// Inclusive range a single answer may take. Defaults to a 1–5 Likert scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerScale {
    pub min: f64,
    pub max: f64,
}

impl Default for AnswerScale {
    fn default() -> Self {
        Self { min: 1.0, max: 5.0 }
    }
}

/// Raw questionnaire answers. `dimensions[i]` names the dimension item `i`
/// contributes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiasecAnswers {
    pub scores: Vec<f64>,
    pub dimensions: Vec<RiasecDimension>,
}

/// Sums item scores per dimension. With `scale` set, each dimension is
/// min-max scaled to 0–100 against the theoretical range of its own items,
/// so assessments with different item counts stay comparable.
pub fn score_answers(
    answers: &RiasecAnswers,
    answer_scale: AnswerScale,
    scale: bool,
) -> Result<RiasecVector, EngineError> {
    if answers.scores.len() != answers.dimensions.len() {
        return Err(EngineError::InvalidInput(format!(
            "{} RIASEC answers but {} item dimensions",
            answers.scores.len(),
            answers.dimensions.len()
        )));
    }
    if !(answer_scale.max > answer_scale.min) {
        return Err(EngineError::InvalidInput(
            "answer scale max must exceed min".to_string(),
        ));
    }

    let mut sums = [0.0_f64; 6];
    let mut counts = [0_usize; 6];

    for (score, dim) in answers.scores.iter().zip(answers.dimensions.iter()) {
        if !score.is_finite() || *score < answer_scale.min || *score > answer_scale.max {
            return Err(EngineError::InvalidInput(format!(
                "RIASEC answer {score} outside [{}, {}]",
                answer_scale.min, answer_scale.max
            )));
        }
        sums[dim.index()] += score;
        counts[dim.index()] += 1;
    }

    let scores = if scale {
        let span = answer_scale.max - answer_scale.min;
        let mut scaled = [0.0_f64; 6];
        for i in 0..6 {
            if counts[i] == 0 {
                continue;
            }
            let n = counts[i] as f64;
            scaled[i] = ((sums[i] - n * answer_scale.min) / (n * span) * 100.0).clamp(0.0, 100.0);
        }
        scaled
    } else {
        // Raw sums can still be negative on a scale that allows it.
        sums.map(|s| s.max(0.0))
    };

    RiasecVector::new(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use RiasecDimension::*;

    fn answers(pairs: &[(f64, RiasecDimension)]) -> RiasecAnswers {
        RiasecAnswers {
            scores: pairs.iter().map(|(s, _)| *s).collect(),
            dimensions: pairs.iter().map(|(_, d)| *d).collect(),
        }
    }

    #[test]
    fn test_scaled_max_answers_score_100() {
        let a = answers(&[(5.0, Realistic), (5.0, Realistic)]);
        let v = score_answers(&a, AnswerScale::default(), true).unwrap();
        assert_eq!(v.get(Realistic), 100.0);
        assert_eq!(v.get(Social), 0.0);
    }

    #[test]
    fn test_scaled_min_answers_score_0() {
        let a = answers(&[(1.0, Artistic), (1.0, Artistic), (1.0, Artistic)]);
        let v = score_answers(&a, AnswerScale::default(), true).unwrap();
        assert_eq!(v.get(Artistic), 0.0);
    }

    #[test]
    fn test_scaling_is_item_count_independent() {
        // Two items averaging 3 and four items averaging 3 both land at 50.
        let a = answers(&[
            (2.0, Social),
            (4.0, Social),
            (3.0, Conventional),
            (3.0, Conventional),
            (1.0, Conventional),
            (5.0, Conventional),
        ]);
        let v = score_answers(&a, AnswerScale::default(), true).unwrap();
        assert!((v.get(Social) - 50.0).abs() < 1e-9);
        assert!((v.get(Conventional) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_unscaled_sums_per_dimension() {
        let a = answers(&[(4.0, Investigative), (3.0, Investigative), (2.0, Enterprising)]);
        let v = score_answers(&a, AnswerScale::default(), false).unwrap();
        assert_eq!(v.get(Investigative), 7.0);
        assert_eq!(v.get(Enterprising), 2.0);
    }

    #[test]
    fn test_length_mismatch_is_invalid() {
        let a = RiasecAnswers {
            scores: vec![3.0, 4.0],
            dimensions: vec![Realistic],
        };
        assert!(matches!(
            score_answers(&a, AnswerScale::default(), true),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_out_of_scale_answer_is_invalid() {
        let a = answers(&[(6.0, Realistic)]);
        assert!(score_answers(&a, AnswerScale::default(), true).is_err());
    }

    #[test]
    fn test_nan_answer_is_invalid() {
        let a = answers(&[(3.0, Social), (f64::NAN, Social)]);
        assert!(matches!(
            score_answers(&a, AnswerScale::default(), true),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_no_answers_is_zero_vector() {
        let a = answers(&[]);
        let v = score_answers(&a, AnswerScale::default(), true).unwrap();
        assert!(v.is_zero());
    }
}
