//! Score computation: normalization, per-section aggregation, and the
//! composite score with its three-tier classification.

mod normalize;
mod section;

pub use normalize::{display_scale, normalize_answer};

use serde::{Deserialize, Serialize};

use super::domain::{MaturityLevel, ResponseWithQuestion, SectionKind};

/// Composite scoring output. Derived on demand from the full response
/// set; never persisted, so two calls over the same responses always
/// agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsoScores {
    pub governance_score: u32,
    pub financial_score: u32,
    pub programme_score: u32,
    pub hr_score: u32,
    pub total_score: u32,
    pub governance_percentage: f64,
    pub financial_percentage: f64,
    pub programme_percentage: f64,
    pub hr_percentage: f64,
    pub total_percentage: f64,
    pub overall_level: MaturityLevel,
}

impl CsoScores {
    pub fn section_score(&self, section: SectionKind) -> u32 {
        match section {
            SectionKind::Governance => self.governance_score,
            SectionKind::Financial => self.financial_score,
            SectionKind::Programme => self.programme_score,
            SectionKind::HumanResources => self.hr_score,
        }
    }

    pub fn section_percentage(&self, section: SectionKind) -> f64 {
        match section {
            SectionKind::Governance => self.governance_percentage,
            SectionKind::Financial => self.financial_percentage,
            SectionKind::Programme => self.programme_percentage,
            SectionKind::HumanResources => self.hr_percentage,
        }
    }
}

/// Compute the full score sheet for an assessment's responses.
///
/// Pure function: partitions responses into the four fixed sections,
/// aggregates each against its constant question maximum, then derives
/// totals, percentages, and the overall maturity tier.
pub fn calculate_cso_scores(responses: &[ResponseWithQuestion]) -> CsoScores {
    let mut section_scores = [0_u32; 4];

    for (slot, section) in SectionKind::ordered().into_iter().enumerate() {
        let answers: Vec<_> = responses
            .iter()
            .filter(|entry| entry.question.section == section)
            .filter_map(|entry| {
                entry
                    .response
                    .value
                    .as_ref()
                    .map(|value| (value, entry.question.question_type))
            })
            .collect();
        section_scores[slot] = section::section_raw_score(&answers, section.max_questions());
    }

    let [governance_score, financial_score, programme_score, hr_score] = section_scores;
    let total_score = governance_score + financial_score + programme_score + hr_score;

    CsoScores {
        governance_score,
        financial_score,
        programme_score,
        hr_score,
        total_score,
        governance_percentage: percentage(governance_score, SectionKind::Governance.max_points()),
        financial_percentage: percentage(financial_score, SectionKind::Financial.max_points()),
        programme_percentage: percentage(programme_score, SectionKind::Programme.max_points()),
        hr_percentage: percentage(hr_score, SectionKind::HumanResources.max_points()),
        total_percentage: percentage(total_score, SectionKind::TOTAL_MAX_POINTS),
        overall_level: MaturityLevel::from_percentage(percentage(
            total_score,
            SectionKind::TOTAL_MAX_POINTS,
        )),
    }
}

fn percentage(score: u32, max_points: u32) -> f64 {
    f64::from(score) / f64::from(max_points) * 100.0
}
