//! Rule-based suggestion generation.
//!
//! Four passes over a computed score sheet: admin-configured
//! assessment-level rules, built-in section score bands merged with
//! admin-configured section rules, built-in strategic rules, and
//! admin-configured question-level rules. Matches are flattened into one
//! prioritized list; persistence is full-replace, never incremental.

mod catalog;
mod condition;

pub use catalog::{section_band_rules, strategic_rules, SectionBandRule, StrategicRule};
pub use condition::{
    ConditionError, ConditionOperator, ResponseCondition, RuleCondition, ScoreBand,
    SectionScoreBand,
};

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{QuestionId, ResponseWithQuestion, SectionKind};
use super::scoring::{calculate_cso_scores, normalize_answer, CsoScores};

/// Which layer of the questionnaire a suggestion was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Question,
    Section,
    Assessment,
}

impl SuggestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Question => "Question",
            Self::Section => "Section",
            Self::Assessment => "Assessment",
        }
    }
}

/// One emitted recommendation, persisted per assessment report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSuggestion {
    pub id: String,
    pub kind: SuggestionKind,
    pub source_id: Option<String>,
    pub suggestion: String,
    pub priority: i32,
    pub weight: f64,
    pub metadata: serde_json::Value,
}

/// Admin-configured rule evaluated against the composite score sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRule {
    pub id: String,
    pub condition: RuleCondition,
    pub suggestion: String,
    pub priority: i32,
    pub weight: f64,
    pub is_active: bool,
}

/// Admin-configured rule scoped to one section's raw score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRule {
    pub id: String,
    pub section: SectionKind,
    pub condition: RuleCondition,
    pub suggestion: String,
    pub priority: i32,
    pub weight: f64,
    pub is_active: bool,
}

/// Admin-configured rule attached to one question, evaluated against the
/// raw response value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRule {
    pub id: String,
    pub question_id: QuestionId,
    pub condition: ResponseCondition,
    pub suggestion: String,
    pub priority: i32,
    pub weight: f64,
    pub is_active: bool,
}

/// The admin-configured rules loaded for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub assessment: Vec<AssessmentRule>,
    pub section: Vec<SectionRule>,
    pub question: Vec<QuestionRule>,
}

/// Stateless generator applying the built-in catalog plus an admin rule
/// set to an assessment's responses.
#[derive(Debug, Default)]
pub struct SuggestionEngine;

impl SuggestionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run every pass and return the flattened, ordered suggestion list.
    ///
    /// Pure function of its inputs: the same responses and rules always
    /// produce the same suggestions, which is what makes regeneration a
    /// safe full replacement.
    pub fn generate(
        &self,
        responses: &[ResponseWithQuestion],
        rules: &RuleSet,
    ) -> Vec<GeneratedSuggestion> {
        let scores = calculate_cso_scores(responses);
        let mut suggestions = Vec::new();

        self.assessment_pass(&scores, rules, &mut suggestions);
        self.section_pass(&scores, rules, &mut suggestions);
        self.strategic_pass(&scores, &mut suggestions);
        self.question_pass(responses, rules, &mut suggestions);

        suggestions.sort_by(compare_priority);
        for (index, suggestion) in suggestions.iter_mut().enumerate() {
            suggestion.id = format!("sug-{:03}", index + 1);
        }
        suggestions
    }

    fn assessment_pass(
        &self,
        scores: &CsoScores,
        rules: &RuleSet,
        out: &mut Vec<GeneratedSuggestion>,
    ) {
        for rule in rules.assessment.iter().filter(|rule| rule.is_active) {
            if rule.condition.matches(scores) {
                out.push(GeneratedSuggestion {
                    id: String::new(),
                    kind: SuggestionKind::Assessment,
                    source_id: Some(rule.id.clone()),
                    suggestion: rule.suggestion.clone(),
                    priority: rule.priority,
                    weight: rule.weight,
                    metadata: assessment_metadata(scores, &rule.condition, "assessment", false),
                });
            }
        }
    }

    /// Built-in score bands first, then admin section rules evaluated
    /// with the section's raw score as the scoped fact.
    fn section_pass(
        &self,
        scores: &CsoScores,
        rules: &RuleSet,
        out: &mut Vec<GeneratedSuggestion>,
    ) {
        for rule in section_band_rules() {
            let section_score = f64::from(scores.section_score(rule.section));
            if rule.band.contains(section_score) {
                out.push(section_suggestion(
                    rule.section,
                    rule.suggestion.to_string(),
                    rule.priority,
                    rule.weight,
                    scores,
                    rule.category,
                    json!(rule.band),
                ));
            }
        }

        for rule in rules.section.iter().filter(|rule| rule.is_active) {
            let section_score = f64::from(scores.section_score(rule.section));
            if rule.condition.matches_scoped(scores, Some(section_score)) {
                out.push(section_suggestion(
                    rule.section,
                    rule.suggestion.clone(),
                    rule.priority,
                    rule.weight,
                    scores,
                    "section",
                    json!(&rule.condition),
                ));
            }
        }
    }

    fn strategic_pass(&self, scores: &CsoScores, out: &mut Vec<GeneratedSuggestion>) {
        for rule in strategic_rules() {
            if rule.condition.matches(scores) {
                out.push(GeneratedSuggestion {
                    id: String::new(),
                    kind: SuggestionKind::Assessment,
                    source_id: Some(rule.key.to_string()),
                    suggestion: rule.suggestion.to_string(),
                    priority: rule.priority,
                    weight: rule.weight,
                    metadata: assessment_metadata(scores, &rule.condition, rule.category, true),
                });
            }
        }
    }

    fn question_pass(
        &self,
        responses: &[ResponseWithQuestion],
        rules: &RuleSet,
        out: &mut Vec<GeneratedSuggestion>,
    ) {
        for entry in responses {
            let Some(value) = entry.response.value.as_ref() else {
                continue;
            };
            if value.is_empty() {
                continue;
            }

            for rule in rules
                .question
                .iter()
                .filter(|rule| rule.is_active && rule.question_id == entry.question.id)
            {
                if rule.condition.matches(value) {
                    out.push(GeneratedSuggestion {
                        id: String::new(),
                        kind: SuggestionKind::Question,
                        source_id: Some(entry.question.id.0.clone()),
                        suggestion: rule.suggestion.clone(),
                        priority: rule.priority,
                        weight: rule.weight,
                        metadata: json!({
                            "questionText": &entry.question.prompt,
                            "responseValue": value.display(),
                            "normalizedScore": normalize_answer(value, &entry.question),
                        }),
                    });
                }
            }
        }
    }
}

fn section_suggestion(
    section: SectionKind,
    suggestion: String,
    priority: i32,
    weight: f64,
    scores: &CsoScores,
    category: &str,
    condition: serde_json::Value,
) -> GeneratedSuggestion {
    GeneratedSuggestion {
        id: String::new(),
        kind: SuggestionKind::Section,
        source_id: Some(section.key().to_string()),
        suggestion,
        priority,
        weight,
        metadata: json!({
            "sectionTitle": section.label(),
            "sectionScore": scores.section_score(section),
            "category": category,
            "condition": condition,
        }),
    }
}

fn assessment_metadata(
    scores: &CsoScores,
    condition: &RuleCondition,
    category: &str,
    is_strategic: bool,
) -> serde_json::Value {
    let mut metadata = json!({
        "overallScore": scores.total_score,
        "overallPercentage": scores.total_percentage,
        "overallLevel": scores.overall_level.label(),
        "sectionScores": {
            "governance": scores.governance_score,
            "financial": scores.financial_score,
            "programme": scores.programme_score,
            "hr": scores.hr_score,
        },
        "sectionPercentages": {
            "governance": scores.governance_percentage,
            "financial": scores.financial_percentage,
            "programme": scores.programme_percentage,
            "hr": scores.hr_percentage,
        },
        "condition": condition,
        "category": category,
    });
    if is_strategic {
        metadata["isStrategic"] = json!(true);
    }
    metadata
}

/// Priority descending, then weight descending; the sort is stable so
/// equal entries keep their pass order.
fn compare_priority(a: &GeneratedSuggestion, b: &GeneratedSuggestion) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then(b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal))
}

/// Sort a stored list back into presentation order.
pub fn sort_suggestions(suggestions: &mut [GeneratedSuggestion]) {
    suggestions.sort_by(compare_priority);
}
