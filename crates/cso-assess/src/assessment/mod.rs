//! CSO self-assessment scoring and suggestion generation.
//!
//! Organizations answer the fixed accountability questionnaire; the
//! scoring module normalizes and aggregates responses into per-section
//! and composite scores, and the suggestion engine matches rule
//! conditions against those scores to emit prioritized recommendations.

pub mod domain;
pub mod questionnaire;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod suggestions;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerValue, Assessment, AssessmentId, AssessmentStatus, MaturityLevel, Question, QuestionId,
    QuestionType, ReportId, Response, ResponseWithQuestion, SectionKind,
};
pub use questionnaire::AssessmentBlueprint;
pub use router::assessment_router;
pub use scoring::{calculate_cso_scores, display_scale, normalize_answer, CsoScores};
pub use service::{AssessmentService, AssessmentServiceError};
pub use store::{AssessmentSnapshot, AssessmentStore, StoreError};
pub use suggestions::{
    AssessmentRule, ConditionError, ConditionOperator, GeneratedSuggestion, QuestionRule,
    ResponseCondition, RuleCondition, RuleSet, ScoreBand, SectionRule, SectionScoreBand,
    SuggestionEngine, SuggestionKind,
};
