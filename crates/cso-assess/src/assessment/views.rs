use serde::Serialize;

use super::domain::{MaturityLevel, SectionKind};
use super::scoring::{normalize_answer, CsoScores};
use super::store::AssessmentSnapshot;
use super::suggestions::{GeneratedSuggestion, SuggestionKind};

#[derive(Debug, Clone, Serialize)]
pub struct SectionScoreEntry {
    pub section: SectionKind,
    pub section_label: &'static str,
    pub score: u32,
    pub max_points: u32,
    pub percentage: f64,
    pub answered: usize,
    pub max_questions: u32,
    /// Mean of the answered responses on the common 0–1 scale.
    pub average_normalized: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReportView {
    pub assessment_id: String,
    pub organization: String,
    pub status: &'static str,
    pub sections: Vec<SectionScoreEntry>,
    pub total_score: u32,
    pub total_max_points: u32,
    pub total_percentage: f64,
    pub overall_level: MaturityLevel,
    pub overall_level_label: &'static str,
}

impl ScoreReportView {
    pub fn build(snapshot: &AssessmentSnapshot, scores: &CsoScores) -> Self {
        let sections = SectionKind::ordered()
            .into_iter()
            .map(|section| section_entry(snapshot, scores, section))
            .collect();

        Self {
            assessment_id: snapshot.assessment.id.0.clone(),
            organization: snapshot.assessment.organization.clone(),
            status: snapshot.assessment.status.label(),
            sections,
            total_score: scores.total_score,
            total_max_points: SectionKind::TOTAL_MAX_POINTS,
            total_percentage: scores.total_percentage,
            overall_level: scores.overall_level,
            overall_level_label: scores.overall_level.label(),
        }
    }
}

fn section_entry(
    snapshot: &AssessmentSnapshot,
    scores: &CsoScores,
    section: SectionKind,
) -> SectionScoreEntry {
    let normalized: Vec<f64> = snapshot
        .responses
        .iter()
        .filter(|entry| entry.question.section == section && entry.response.is_answered())
        .filter_map(|entry| {
            entry
                .response
                .value
                .as_ref()
                .map(|value| normalize_answer(value, &entry.question))
        })
        .collect();

    let average_normalized = if normalized.is_empty() {
        0.0
    } else {
        normalized.iter().sum::<f64>() / normalized.len() as f64
    };

    SectionScoreEntry {
        section,
        section_label: section.label(),
        score: scores.section_score(section),
        max_points: section.max_points(),
        percentage: scores.section_percentage(section),
        answered: normalized.len(),
        max_questions: section.max_questions(),
        average_normalized,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionView {
    pub id: String,
    pub kind: SuggestionKind,
    pub kind_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub suggestion: String,
    pub priority: i32,
    pub weight: f64,
    pub metadata: serde_json::Value,
}

impl SuggestionView {
    pub fn from_suggestion(suggestion: &GeneratedSuggestion) -> Self {
        Self {
            id: suggestion.id.clone(),
            kind: suggestion.kind,
            kind_label: suggestion.kind.label(),
            source_id: suggestion.source_id.clone(),
            suggestion: suggestion.suggestion.clone(),
            priority: suggestion.priority,
            weight: suggestion.weight,
            metadata: suggestion.metadata.clone(),
        }
    }
}
