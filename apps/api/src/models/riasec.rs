use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// The six Holland interest dimensions, in canonical R-I-A-S-E-C order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiasecDimension {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl RiasecDimension {
    pub const ALL: [RiasecDimension; 6] = [
        RiasecDimension::Realistic,
        RiasecDimension::Investigative,
        RiasecDimension::Artistic,
        RiasecDimension::Social,
        RiasecDimension::Enterprising,
        RiasecDimension::Conventional,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Six non-negative interest scores. Construction rejects negative or
/// non-finite values; an all-zero vector is representable (a catalog or
/// profile decides whether that is acceptable).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "[f64; 6]", into = "[f64; 6]")]
pub struct RiasecVector([f64; 6]);

impl RiasecVector {
    pub fn new(scores: [f64; 6]) -> Result<Self, EngineError> {
        if let Some(bad) = scores.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(EngineError::InvalidInput(format!(
                "RIASEC scores must be finite and non-negative, got {bad}"
            )));
        }
        Ok(Self(scores))
    }

    pub fn zero() -> Self {
        Self([0.0; 6])
    }

    pub fn get(&self, dim: RiasecDimension) -> f64 {
        self.0[dim.index()]
    }

    pub fn as_array(&self) -> &[f64; 6] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|s| *s == 0.0)
    }

    /// Cosine similarity clamped to [0, 1]. Both vectors are non-negative so
    /// the raw cosine never goes below zero; the clamp only absorbs rounding.
    /// Returns 0 when either side is all-zero.
    pub fn cosine_similarity(&self, other: &RiasecVector) -> f64 {
        let dot: f64 = self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum();
        let norm_a = self.0.iter().map(|a| a * a).sum::<f64>().sqrt();
        let norm_b = other.0.iter().map(|b| b * b).sum::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
    }

    /// Dimensions sorted by score descending; ties keep R-I-A-S-E-C order.
    pub fn top_dimensions(&self, n: usize) -> Vec<RiasecDimension> {
        let mut dims = RiasecDimension::ALL.to_vec();
        dims.sort_by(|a, b| {
            self.get(*b)
                .partial_cmp(&self.get(*a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        dims.truncate(n);
        dims
    }
}

impl TryFrom<[f64; 6]> for RiasecVector {
    type Error = EngineError;

    fn try_from(scores: [f64; 6]) -> Result<Self, Self::Error> {
        RiasecVector::new(scores)
    }
}

impl From<RiasecVector> for [f64; 6] {
    fn from(v: RiasecVector) -> Self {
        v.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec6(s: [f64; 6]) -> RiasecVector {
        RiasecVector::new(s).unwrap()
    }

    #[test]
    fn test_rejects_negative_score() {
        assert!(RiasecVector::new([1.0, -0.1, 0.0, 0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_rejects_nan() {
        assert!(RiasecVector::new([f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_identical_vectors_similarity_one() {
        let v = vec6([80.0, 60.0, 10.0, 20.0, 70.0, 30.0]);
        assert!((v.cosine_similarity(&v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_orthogonal_vectors_similarity_zero() {
        let a = vec6([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let b = vec6([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(a.cosine_similarity(&b), 0.0);
    }

    #[test]
    fn test_zero_vector_similarity_zero() {
        let a = vec6([80.0, 60.0, 10.0, 20.0, 70.0, 30.0]);
        assert_eq!(a.cosine_similarity(&RiasecVector::zero()), 0.0);
    }

    #[test]
    fn test_similarity_is_scale_invariant() {
        let a = vec6([8.0, 6.0, 1.0, 2.0, 7.0, 3.0]);
        let b = vec6([80.0, 60.0, 10.0, 20.0, 70.0, 30.0]);
        assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_top_dimensions_order_and_ties() {
        let v = vec6([50.0, 90.0, 50.0, 10.0, 70.0, 0.0]);
        assert_eq!(
            v.top_dimensions(3),
            vec![
                RiasecDimension::Investigative,
                RiasecDimension::Enterprising,
                RiasecDimension::Realistic
            ]
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: RiasecVector = serde_json::from_str("[1,2,3,4,5,6]").unwrap();
        assert_eq!(ok.get(RiasecDimension::Conventional), 6.0);
        assert!(serde_json::from_str::<RiasecVector>("[1,2,3,4,5,-6]").is_err());
    }
}
