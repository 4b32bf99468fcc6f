//! Recommendation Engine — score → rank → gap analysis → upskill mapping.
//!
//! Holds only `Arc`-shared, read-only state; each call owns its profile and
//! results, so one engine serves any number of concurrent requests.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::catalog::CareerCatalog;
use crate::errors::EngineError;
use crate::gap::{analyze, summarize, GapEntry, GapSummary};
use crate::models::{CandidateProfile, ResourceRef, RiasecDimension};
use crate::ranking::{rank, MatchResult, RankingWeights};
use crate::scoring::MatchScorer;
use crate::upskill::{map_to_resources, ResourceProvider};

#[derive(Debug, Clone, Serialize)]
pub struct CareerGapReport {
    pub career_id: String,
    pub career_name: String,
    pub entries: Vec<GapEntry>,
    pub summary: GapSummary,
    pub resources: BTreeMap<String, Vec<ResourceRef>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub model_version: String,
    pub top_interests: Vec<RiasecDimension>,
    pub matches: Vec<MatchResult>,
    pub gap_reports: Vec<CareerGapReport>,
    pub warnings: Vec<String>,
}

#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<CareerCatalog>,
    scorer: Arc<MatchScorer>,
    provider: Arc<dyn ResourceProvider>,
    weights: RankingWeights,
}

impl RecommendationEngine {
    pub fn new(
        catalog: Arc<CareerCatalog>,
        scorer: Arc<MatchScorer>,
        provider: Arc<dyn ResourceProvider>,
        weights: RankingWeights,
    ) -> Result<Self, EngineError> {
        weights.validate()?;
        Ok(Self {
            catalog,
            scorer,
            provider,
            weights,
        })
    }

    pub fn catalog(&self) -> &CareerCatalog {
        &self.catalog
    }

    pub fn model_version(&self) -> &str {
        self.scorer.model_version()
    }

    /// Full pipeline for one candidate. `top_n` is validated before any
    /// scoring happens.
    pub async fn recommend(
        &self,
        profile: &CandidateProfile,
        top_n: i64,
    ) -> Result<RecommendationReport, EngineError> {
        if top_n <= 0 {
            return Err(EngineError::InvalidTopN(top_n));
        }
        let run_id = Uuid::new_v4();

        let outcome = self.scorer.score(profile, &self.catalog);
        let matches = rank(
            &outcome.probabilities,
            profile,
            &self.catalog,
            &self.weights,
            top_n,
        )?;

        let mut gap_reports = Vec::with_capacity(matches.len());
        for m in &matches {
            gap_reports.push(self.gap_report(profile, &m.career_id).await?);
        }

        info!(
            %run_id,
            matches = matches.len(),
            warnings = outcome.warnings.len(),
            "Recommendation run complete"
        );

        Ok(RecommendationReport {
            run_id,
            generated_at: Utc::now(),
            model_version: self.scorer.model_version().to_string(),
            top_interests: if profile.riasec().is_zero() {
                Vec::new()
            } else {
                profile.riasec().top_dimensions(3)
            },
            matches,
            gap_reports,
            warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
        })
    }

    /// Gap analysis and resources for a single career, ranked or not.
    pub async fn gap_report(
        &self,
        profile: &CandidateProfile,
        career_id: &str,
    ) -> Result<CareerGapReport, EngineError> {
        let career = self.catalog.get(career_id)?;
        let entries = analyze(profile, career);
        let summary = summarize(&entries, profile);
        let resources = map_to_resources(&entries, self.provider.as_ref()).await;

        Ok(CareerGapReport {
            career_id: career.id.clone(),
            career_name: career.name.clone(),
            entries,
            summary,
            resources,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::engine;
    use super::*;
    use crate::models::{EducationLevel, RiasecVector};
    use crate::profile::ProfileBuilder;

    fn analyst_profile() -> CandidateProfile {
        ProfileBuilder::default()
            .build_from_scores(
                &["Python", "SQL"],
                EducationLevel::BACHELOR,
                2.0,
                RiasecVector::new([80.0, 60.0, 10.0, 20.0, 70.0, 30.0]).unwrap(),
            )
            .unwrap()
    }

    #[tokio::test]
    async fn test_recommend_full_pipeline() {
        let report = engine().recommend(&analyst_profile(), 5).await.unwrap();

        assert_eq!(report.matches.len(), 3);
        assert_eq!(report.matches[0].career_id, "data_analyst");
        assert_eq!(report.gap_reports.len(), 3);
        assert_eq!(report.model_version, "test-1");
        assert_eq!(
            report.warnings,
            vec!["Career 'legacy_clerk' is not one of the model's trained classes".to_string()]
        );

        let analyst_gaps = &report.gap_reports[0];
        assert_eq!(analyst_gaps.career_id, "data_analyst");
        assert_eq!(analyst_gaps.entries[0].skill, "excel");
        assert_eq!(analyst_gaps.resources["excel"].len(), 1);
        assert_eq!(
            report.top_interests,
            vec![
                RiasecDimension::Realistic,
                RiasecDimension::Enterprising,
                RiasecDimension::Investigative
            ]
        );
    }

    #[tokio::test]
    async fn test_recommend_is_deterministic() {
        let engine = engine();
        let a = engine.recommend(&analyst_profile(), 3).await.unwrap();
        let b = engine.recommend(&analyst_profile(), 3).await.unwrap();
        assert_eq!(a.matches, b.matches);
        assert_ne!(a.run_id, b.run_id);
    }

    #[tokio::test]
    async fn test_recommend_rejects_bad_top_n() {
        let engine = engine();
        for n in [0, -1] {
            assert_eq!(
                engine.recommend(&analyst_profile(), n).await.unwrap_err(),
                EngineError::InvalidTopN(n)
            );
        }
    }

    #[tokio::test]
    async fn test_gap_report_for_unranked_career() {
        let report = engine()
            .gap_report(&analyst_profile(), "legacy_clerk")
            .await
            .unwrap();
        assert_eq!(report.summary.missing_skills, vec!["filing".to_string()]);
        assert!(report.resources["filing"].is_empty());
    }

    #[tokio::test]
    async fn test_gap_report_unknown_career() {
        let err = engine()
            .gap_report(&analyst_profile(), "astronaut")
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::UnknownCareer("astronaut".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_engine() {
        let engine = engine();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                tokio::spawn(async move { engine.recommend(&analyst_profile(), 2).await })
            })
            .collect();
        let mut first = None;
        for h in handles {
            let report = h.await.unwrap().unwrap();
            let ids: Vec<String> = report.matches.iter().map(|m| m.career_id.clone()).collect();
            match &first {
                None => first = Some(ids),
                Some(expected) => assert_eq!(&ids, expected),
            }
        }
    }
}
