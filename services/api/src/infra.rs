use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::warn;

use cso_assess::assessment::{
    AnswerValue, Assessment, AssessmentBlueprint, AssessmentId, AssessmentRule,
    AssessmentSnapshot, AssessmentStatus, AssessmentStore, ConditionOperator, GeneratedSuggestion,
    QuestionId, QuestionRule, QuestionType, ReportId, Response, ResponseCondition,
    ResponseWithQuestion, RuleCondition, RuleSet, SectionKind, SectionRule, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryAssessmentStore {
    assessments: Mutex<HashMap<AssessmentId, AssessmentSnapshot>>,
    rules: Mutex<RuleSet>,
    reports: Mutex<HashMap<AssessmentId, ReportId>>,
    suggestions: Mutex<HashMap<ReportId, Vec<GeneratedSuggestion>>>,
}

impl InMemoryAssessmentStore {
    pub(crate) fn insert_assessment(&self, snapshot: AssessmentSnapshot) {
        self.assessments
            .lock()
            .expect("assessment mutex poisoned")
            .insert(snapshot.assessment.id.clone(), snapshot);
    }

    pub(crate) fn set_rules(&self, rules: RuleSet) {
        *self.rules.lock().expect("rules mutex poisoned") = rules;
    }
}

impl AssessmentStore for InMemoryAssessmentStore {
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

/// Admin rule set shipped with the demo deployment. Conditions are built
/// through the JSON validator the admin surface would use.
pub(crate) fn default_rule_set() -> RuleSet {
    let mut rules = RuleSet::default();

    match RuleCondition::from_json(json!({
        "overallScore": { "min": 180 },
    })) {
        Ok(condition) => rules.assessment.push(AssessmentRule {
            id: "admin-near-top".to_string(),
            condition,
            suggestion: "Scores above 180 qualify for the sector peer-review programme; \
                         consider applying this cycle."
                .to_string(),
            priority: 6,
            weight: 1.2,
            is_active: true,
        }),
        Err(error) => warn!(%error, rule = "admin-near-top", "skipping malformed rule"),
    }

    match RuleCondition::from_json(json!({
        "score": { "min": 20, "max": 39 },
    })) {
        Ok(condition) => rules.section.push(SectionRule {
            id: "admin-financial-mid".to_string(),
            section: SectionKind::Financial,
            condition,
            suggestion: "Financial controls are partial: schedule the next external audit \
                         before the financial year closes."
                .to_string(),
            priority: 6,
            weight: 1.0,
            is_active: true,
        }),
        Err(error) => warn!(%error, rule = "admin-financial-mid", "skipping malformed rule"),
    }

    rules.question.push(QuestionRule {
        id: "admin-no-audit".to_string(),
        question_id: QuestionId("fin-03".to_string()),
        condition: ResponseCondition {
            operator: ConditionOperator::Equals,
            value: json!(false),
        },
        suggestion: "No independent audit is in place; engage an external auditor for the \
                     current financial year."
            .to_string(),
        priority: 8,
        weight: 1.5,
        is_active: true,
    });

    rules
}

/// Canned answer profiles used by the demo and `--demo-data` seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum DemoProfile {
    Leading,
    Typical,
    Emerging,
}

pub(crate) fn seed_demo_assessment(
    store: &InMemoryAssessmentStore,
    id: &str,
    organization: &str,
    profile: DemoProfile,
) -> AssessmentId {
    let assessment_id = AssessmentId(id.to_string());
    let responses = AssessmentBlueprint::standard()
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| ResponseWithQuestion {
            response: Response {
                id: format!("resp-{}", question.id.0),
                assessment_id: assessment_id.clone(),
                question_id: question.id.clone(),
                value: Some(profile_answer(profile, question.question_type, index)),
                created_at: Utc::now(),
            },
            question: question.clone(),
        })
        .collect();

    store.insert_assessment(AssessmentSnapshot {
        assessment: Assessment {
            id: assessment_id.clone(),
            organization: organization.to_string(),
            status: AssessmentStatus::Completed,
            started_at: Utc::now(),
            completed_at: Some(Utc::now()),
        },
        responses,
    });

    assessment_id
}

fn profile_answer(profile: DemoProfile, question_type: QuestionType, index: usize) -> AnswerValue {
    match (profile, question_type) {
        (DemoProfile::Leading, QuestionType::Boolean) => AnswerValue::Flag(true),
        (DemoProfile::Leading, _) => AnswerValue::Number(5.0),
        (DemoProfile::Typical, QuestionType::Boolean) => AnswerValue::Flag(index % 3 != 0),
        (DemoProfile::Typical, _) => AnswerValue::Number(if index % 2 == 0 { 4.0 } else { 3.0 }),
        (DemoProfile::Emerging, QuestionType::Boolean) => AnswerValue::Flag(false),
        (DemoProfile::Emerging, _) => AnswerValue::Number(if index % 3 == 0 { 2.0 } else { 1.0 }),
    }
}
