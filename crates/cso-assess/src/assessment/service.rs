use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::info;

use super::domain::AssessmentId;
use super::scoring::{calculate_cso_scores, CsoScores};
use super::store::{AssessmentSnapshot, AssessmentStore, StoreError};
use super::suggestions::{sort_suggestions, GeneratedSuggestion, SuggestionEngine};

/// Service composing the store, the scoring functions, and the
/// suggestion engine behind the interface the HTTP layer consumes.
pub struct AssessmentService<S> {
    store: Arc<S>,
    engine: SuggestionEngine,
    generation_locks: Mutex<HashMap<AssessmentId, Arc<Mutex<()>>>>,
}

impl<S> AssessmentService<S>
where
    S: AssessmentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            engine: SuggestionEngine::new(),
            generation_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Compute the score sheet for an assessment, or `None` when the
    /// assessment is unknown.
    pub fn scores(&self, id: &AssessmentId) -> Result<Option<CsoScores>, AssessmentServiceError> {
        let Some(snapshot) = self.snapshot(id)? else {
            return Ok(None);
        };
        Ok(Some(calculate_cso_scores(&snapshot.responses)))
    }

    /// Fetch the assessment with its responses joined to questions.
    pub fn snapshot(
        &self,
        id: &AssessmentId,
    ) -> Result<Option<AssessmentSnapshot>, AssessmentServiceError> {
        Ok(self.store.fetch_assessment(id)?)
    }

    /// Regenerate the assessment's suggestions: compute, fully replace
    /// the stored set, and return the new list in presentation order.
    ///
    /// Runs are serialized per assessment id; concurrent regeneration of
    /// different assessments proceeds in parallel.
    pub fn generate_suggestions(
        &self,
        id: &AssessmentId,
    ) -> Result<Vec<GeneratedSuggestion>, AssessmentServiceError> {
        let lock = self.generation_lock(id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let snapshot = self
            .store
            .fetch_assessment(id)?
            .ok_or(StoreError::NotFound)?;
        let rules = self.store.active_rules()?;

        let suggestions = self.engine.generate(&snapshot.responses, &rules);

        let report_id = self.store.find_or_create_report(id)?;
        self.store.replace_suggestions(&report_id, &suggestions)?;

        info!(
            assessment = %id.0,
            report = %report_id.0,
            count = suggestions.len(),
            "regenerated assessment suggestions"
        );

        Ok(suggestions)
    }

    /// Previously generated suggestions, ordered by priority then
    /// weight descending. An assessment without a report yet yields an
    /// empty list; an unknown assessment is an error.
    pub fn suggestions(
        &self,
        id: &AssessmentId,
    ) -> Result<Vec<GeneratedSuggestion>, AssessmentServiceError> {
        if self.store.fetch_assessment(id)?.is_none() {
            return Err(StoreError::NotFound.into());
        }

        let mut suggestions = self.store.report_suggestions(id)?.unwrap_or_default();
        sort_suggestions(&mut suggestions);
        Ok(suggestions)
    }

    fn generation_lock(&self, id: &AssessmentId) -> Arc<Mutex<()>> {
        let mut locks = self
            .generation_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(id.clone()).or_default().clone()
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
