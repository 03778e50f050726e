use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::assessment::domain::{
    AnswerValue, Assessment, AssessmentId, AssessmentStatus, Question, QuestionId, QuestionType,
    ReportId, Response, ResponseWithQuestion, SectionKind,
};
use crate::assessment::questionnaire::AssessmentBlueprint;
use crate::assessment::service::AssessmentService;
use crate::assessment::store::{AssessmentSnapshot, AssessmentStore, StoreError};
use crate::assessment::suggestions::{GeneratedSuggestion, RuleSet};

pub(super) fn question(id: &str, section: SectionKind, question_type: QuestionType) -> Question {
    Question {
        id: QuestionId(id.to_string()),
        section,
        prompt: format!("prompt for {id}"),
        question_type,
        options: Vec::new(),
        option_scores: Vec::new(),
        weight: 1.0,
        mandatory: true,
    }
}

pub(super) fn respond(question: Question, value: Option<AnswerValue>) -> ResponseWithQuestion {
    ResponseWithQuestion {
        response: Response {
            id: format!("resp-{}", question.id.0),
            assessment_id: AssessmentId("assessment-1".to_string()),
            question_id: question.id.clone(),
            value,
            created_at: Utc::now(),
        },
        question,
    }
}

/// Answer the full standard questionnaire through one closure.
pub(super) fn sheet_with(
    fill: impl Fn(&Question) -> Option<AnswerValue>,
) -> Vec<ResponseWithQuestion> {
    AssessmentBlueprint::standard()
        .questions()
        .iter()
        .map(|question| respond(question.clone(), fill(question)))
        .collect()
}

/// Every Likert question at 5, every Boolean at yes: 215 points.
pub(super) fn full_marks_sheet() -> Vec<ResponseWithQuestion> {
    sheet_with(|question| {
        Some(match question.question_type {
            QuestionType::Boolean => AnswerValue::Flag(true),
            _ => AnswerValue::Number(5.0),
        })
    })
}

/// Uniform mid/low sheet used to land well under the Leading tier.
pub(super) fn uniform_sheet(likert: f64, flag: bool) -> Vec<ResponseWithQuestion> {
    sheet_with(|question| {
        Some(match question.question_type {
            QuestionType::Boolean => AnswerValue::Flag(flag),
            _ => AnswerValue::Number(likert),
        })
    })
}

pub(super) fn assessment(id: &str) -> Assessment {
    Assessment {
        id: AssessmentId(id.to_string()),
        organization: "River Basin Development Trust".to_string(),
        status: AssessmentStatus::Completed,
        started_at: Utc::now(),
        completed_at: Some(Utc::now()),
    }
}

pub(super) fn snapshot(id: &str, responses: Vec<ResponseWithQuestion>) -> AssessmentSnapshot {
    AssessmentSnapshot {
        assessment: assessment(id),
        responses,
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    assessments: Mutex<HashMap<AssessmentId, AssessmentSnapshot>>,
    rules: Mutex<RuleSet>,
    reports: Mutex<HashMap<AssessmentId, ReportId>>,
    suggestions: Mutex<HashMap<ReportId, Vec<GeneratedSuggestion>>>,
}

impl MemoryStore {
    pub(super) fn insert_assessment(&self, snapshot: AssessmentSnapshot) {
        self.assessments
            .lock()
            .expect("assessment mutex poisoned")
            .insert(snapshot.assessment.id.clone(), snapshot);
    }

    pub(super) fn set_rules(&self, rules: RuleSet) {
        *self.rules.lock().expect("rules mutex poisoned") = rules;
    }

    pub(super) fn stored_suggestions(&self, report_id: &ReportId) -> Vec<GeneratedSuggestion> {
        self.suggestions
            .lock()
            .expect("suggestion mutex poisoned")
            .get(report_id)
            .cloned()
            .unwrap_or_default()
    }

    pub(super) fn report_for(&self, assessment_id: &AssessmentId) -> Option<ReportId> {
        self.reports
            .lock()
            .expect("report mutex poisoned")
            .get(assessment_id)
            .cloned()
    }
}

impl AssessmentStore for MemoryStore {
    fn fetch_assessment(
        &self,
        id: &AssessmentId,
    ) -> Result<Option<AssessmentSnapshot>, StoreError> {
        let guard = self.assessments.lock().expect("assessment mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn active_rules(&self) -> Result<RuleSet, StoreError> {
        Ok(self.rules.lock().expect("rules mutex poisoned").clone())
    }

    fn find_or_create_report(&self, assessment_id: &AssessmentId) -> Result<ReportId, StoreError> {
        let mut guard = self.reports.lock().expect("report mutex poisoned");
        Ok(guard
            .entry(assessment_id.clone())
            .or_insert_with(|| ReportId(format!("report-{}", assessment_id.0)))
            .clone())
    }

    fn replace_suggestions(
        &self,
        report_id: &ReportId,
        suggestions: &[GeneratedSuggestion],
    ) -> Result<(), StoreError> {
        self.suggestions
            .lock()
            .expect("suggestion mutex poisoned")
            .insert(report_id.clone(), suggestions.to_vec());
        Ok(())
    }

    fn report_suggestions(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Option<Vec<GeneratedSuggestion>>, StoreError> {
        let reports = self.reports.lock().expect("report mutex poisoned");
        let Some(report_id) = reports.get(assessment_id) else {
            return Ok(None);
        };
        let suggestions = self.suggestions.lock().expect("suggestion mutex poisoned");
        Ok(Some(
            suggestions.get(report_id).cloned().unwrap_or_default(),
        ))
    }
}

/// Store whose reads fail, for surfacing propagation behavior.
pub(super) struct UnavailableStore;

impl AssessmentStore for UnavailableStore {
    fn fetch_assessment(
        &self,
        _id: &AssessmentId,
    ) -> Result<Option<AssessmentSnapshot>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn active_rules(&self) -> Result<RuleSet, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn find_or_create_report(&self, _assessment_id: &AssessmentId) -> Result<ReportId, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn replace_suggestions(
        &self,
        _report_id: &ReportId,
        _suggestions: &[GeneratedSuggestion],
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn report_suggestions(
        &self,
        _assessment_id: &AssessmentId,
    ) -> Result<Option<Vec<GeneratedSuggestion>>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<AssessmentService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(AssessmentService::new(store.clone()));
    (service, store)
}
