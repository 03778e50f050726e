use serde::{Deserialize, Serialize};

use super::domain::{Assessment, AssessmentId, ReportId, ResponseWithQuestion};
use super::suggestions::{GeneratedSuggestion, RuleSet};

/// Everything the engine needs about one assessment, materialized in a
/// single read: the assessment record plus each response joined to its
/// question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub assessment: Assessment,
    pub responses: Vec<ResponseWithQuestion>,
}

/// Storage abstraction so the service can be exercised against an
/// in-memory fake. The core treats this as a transactional document
/// store and does not depend on any engine's query language.
pub trait AssessmentStore: Send + Sync {
    fn fetch_assessment(&self, id: &AssessmentId)
        -> Result<Option<AssessmentSnapshot>, StoreError>;

    /// Active admin-configured rules, schema-validated at the loading
    /// boundary; malformed rules are dropped there, not here.
    fn active_rules(&self) -> Result<RuleSet, StoreError>;

    fn find_or_create_report(&self, assessment_id: &AssessmentId) -> Result<ReportId, StoreError>;

    /// Replace the report's suggestion set wholesale. Implementations
    /// must apply the delete and insert atomically: a failure leaves the
    /// previous suggestions intact, never an empty or partial set.
    fn replace_suggestions(
        &self,
        report_id: &ReportId,
        suggestions: &[GeneratedSuggestion],
    ) -> Result<(), StoreError>;

    /// Previously generated suggestions for the assessment's report, or
    /// `None` when no report exists yet.
    fn report_suggestions(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Option<Vec<GeneratedSuggestion>>, StoreError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
