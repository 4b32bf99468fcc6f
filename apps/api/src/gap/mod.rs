//! Gap Analyzer — per-skill coverage of a career's requirements.
//!
//! Every required skill is reported, held ones with severity 0, so callers get
//! full coverage from a single list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{CandidateProfile, CareerDefinition, EducationLevel};

const MONTHS_PER_SKILL: f64 = 2.0;
/// Above this many missing skills, learning them one after another is advised.
const SEQUENCING_THRESHOLD: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapEntry {
    pub skill: String,
    pub required_weight: f64,
    pub present: bool,
    /// `required_weight` when absent, otherwise 0.
    pub severity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    ShortTerm,
    MediumTerm,
    LongTerm,
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Intensive,
    PartTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentEstimate {
    pub total_months: f64,
    pub time_frame: TimeFrame,
    pub intensity: Intensity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Sequencing,
    FormalEducation,
    SelfLearning,
    PracticalApplication,
    Networking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentStrategy {
    pub kind: StrategyKind,
    pub description: String,
}

impl DevelopmentStrategy {
    fn new(kind: StrategyKind, description: &str) -> Self {
        Self {
            kind,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapSummary {
    pub total_required: usize,
    pub skills_possessed: usize,
    pub completion_percentage: f64,
    /// Missing skill names in severity order.
    pub missing_skills: Vec<String>,
    pub estimate: DevelopmentEstimate,
    pub strategies: Vec<DevelopmentStrategy>,
}

/// Diffs the candidate's skills against the career's requirements.
/// Ordered by severity descending, then skill name ascending.
pub fn analyze(profile: &CandidateProfile, career: &CareerDefinition) -> Vec<GapEntry> {
    let mut entries: Vec<GapEntry> = career
        .required_skills
        .iter()
        .map(|req| {
            let present = profile.skills().contains(&req.skill);
            GapEntry {
                skill: req.skill.clone(),
                required_weight: req.weight,
                present,
                severity: if present { 0.0 } else { req.weight },
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.severity
            .partial_cmp(&a.severity)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.skill.cmp(&b.skill))
    });
    entries
}

/// Rolls a gap list up into coverage numbers and a development-time estimate.
pub fn summarize(entries: &[GapEntry], profile: &CandidateProfile) -> GapSummary {
    let total_required = entries.len();
    let skills_possessed = entries.iter().filter(|e| e.present).count();
    let completion_percentage = if total_required == 0 {
        100.0
    } else {
        skills_possessed as f64 / total_required as f64 * 100.0
    };
    let missing_skills: Vec<String> = entries
        .iter()
        .filter(|e| e.severity > 0.0)
        .map(|e| e.skill.clone())
        .collect();
    let estimate = estimate_development(missing_skills.len(), profile.education());
    let strategies = development_strategies(missing_skills.len());

    GapSummary {
        total_required,
        skills_possessed,
        completion_percentage,
        missing_skills,
        estimate,
        strategies,
    }
}

/// Two months per missing skill, shortened for higher education levels.
pub fn estimate_development(missing: usize, education: EducationLevel) -> DevelopmentEstimate {
    let factor = match education {
        EducationLevel::DOCTORATE => 0.7,
        EducationLevel::MASTER => 0.8,
        EducationLevel::BACHELOR => 0.9,
        _ => 1.0,
    };
    let total_months = ((missing as f64 * MONTHS_PER_SKILL * factor) * 10.0).round() / 10.0;

    let time_frame = match total_months {
        m if m < 3.0 => TimeFrame::ShortTerm,
        m if m < 6.0 => TimeFrame::MediumTerm,
        m if m < 12.0 => TimeFrame::LongTerm,
        _ => TimeFrame::Extended,
    };
    let intensity = if total_months > 6.0 {
        Intensity::PartTime
    } else {
        Intensity::Intensive
    };

    DevelopmentEstimate {
        total_months,
        time_frame,
        intensity,
    }
}

/// General advice for closing `missing` skill gaps. Empty when nothing is
/// missing; leads with sequencing when the list is long.
pub fn development_strategies(missing: usize) -> Vec<DevelopmentStrategy> {
    if missing == 0 {
        return Vec::new();
    }

    let mut strategies = Vec::with_capacity(5);
    if missing > SEQUENCING_THRESHOLD {
        strategies.push(DevelopmentStrategy::new(
            StrategyKind::Sequencing,
            "Focus on developing these skills in sequence rather than simultaneously",
        ));
    }
    strategies.extend([
        DevelopmentStrategy::new(
            StrategyKind::FormalEducation,
            "Consider courses or certifications for technical skills",
        ),
        DevelopmentStrategy::new(
            StrategyKind::SelfLearning,
            "Use online learning platforms for self-paced study",
        ),
        DevelopmentStrategy::new(
            StrategyKind::PracticalApplication,
            "Apply skills in projects to gain practical experience",
        ),
        DevelopmentStrategy::new(
            StrategyKind::Networking,
            "Connect with professionals who already use these skills",
        ),
    ]);
    strategies
}
