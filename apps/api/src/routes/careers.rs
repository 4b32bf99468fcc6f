//! Axum route handlers for the catalog and recommendation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::engine::{CareerGapReport, RecommendationReport};
use crate::errors::AppError;
use crate::models::{CandidateProfile, CareerDefinition, EducationLevel, RiasecVector};
use crate::profile::RiasecAnswers;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Education may be sent as the ordinal or the level name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EducationInput {
    Ordinal(u8),
    Name(String),
}

impl EducationInput {
    fn resolve(&self) -> Result<EducationLevel, AppError> {
        let level = match self {
            EducationInput::Ordinal(n) => EducationLevel::new(*n)?,
            EducationInput::Name(name) => name.parse::<EducationLevel>()?,
        };
        Ok(level)
    }
}

/// Raw candidate signals. Exactly one of `riasec_answers` or `riasec_scores`
/// must be present.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    pub education: EducationInput,
    pub experience_years: f64,
    pub riasec_answers: Option<RiasecAnswers>,
    pub riasec_scores: Option<RiasecVector>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub profile: ProfileRequest,
    pub top_n: Option<i64>,
}

fn build_profile(state: &AppState, req: &ProfileRequest) -> Result<CandidateProfile, AppError> {
    let education = req.education.resolve()?;
    let builder = &state.profile_builder;
    let profile = match (&req.riasec_answers, &req.riasec_scores) {
        (Some(answers), None) => {
            builder.build(req.skills.as_slice(), education, req.experience_years, answers)?
        }
        (None, Some(scores)) => {
            builder.build_from_scores(
                req.skills.as_slice(),
                education,
                req.experience_years,
                *scores,
            )?
        }
        _ => {
            return Err(AppError::Validation(
                "provide exactly one of riasec_answers or riasec_scores".to_string(),
            ))
        }
    };
    Ok(profile)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Json<Vec<CareerDefinition>> {
    Json(state.engine.catalog().all().cloned().collect())
}

/// GET /api/v1/careers/:id
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CareerDefinition>, AppError> {
    Ok(Json(state.engine.catalog().get(&id)?.clone()))
}

/// POST /api/v1/recommendations
///
/// Ranked careers with per-career gap reports and learning resources.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationReport>, AppError> {
    let top_n = request.top_n.unwrap_or(state.default_top_n);
    let profile = build_profile(&state, &request.profile)?;
    let report = state.engine.recommend(&profile, top_n).await?;
    Ok(Json(report))
}

/// POST /api/v1/careers/:id/gaps
///
/// Gap report for one career the candidate picked, ranked or not.
pub async fn handle_career_gaps(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<CareerGapReport>, AppError> {
    let profile = build_profile(&state, &request)?;
    let report = state.engine.gap_report(&profile, &id).await?;
    Ok(Json(report))
}
