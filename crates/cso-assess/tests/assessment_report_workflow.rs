//! Integration scenarios for the assessment scoring and suggestion
//! workflow, driven through the public service facade and HTTP router.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use cso_assess::assessment::{
        AnswerValue, Assessment, AssessmentBlueprint, AssessmentId, AssessmentService,
        AssessmentSnapshot, AssessmentStatus, AssessmentStore, GeneratedSuggestion, QuestionType,
        ReportId, Response, ResponseWithQuestion, RuleSet, StoreError,
    };

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        assessments: Mutex<HashMap<AssessmentId, AssessmentSnapshot>>,
        rules: Mutex<RuleSet>,
        reports: Mutex<HashMap<AssessmentId, ReportId>>,
        suggestions: Mutex<HashMap<ReportId, Vec<GeneratedSuggestion>>>,
    }

    impl MemoryStore {
        pub(crate) fn insert_assessment(&self, snapshot: AssessmentSnapshot) {
            self.assessments
                .lock()
                .expect("lock")
                .insert(snapshot.assessment.id.clone(), snapshot);
        }

        pub(crate) fn set_rules(&self, rules: RuleSet) {
            *self.rules.lock().expect("lock") = rules;
        }
    }

    impl AssessmentStore for MemoryStore {
        fn fetch_assessment(
            &self,
            id: &AssessmentId,
        ) -> Result<Option<AssessmentSnapshot>, StoreError> {
            Ok(self.assessments.lock().expect("lock").get(id).cloned())
        }

        fn active_rules(&self) -> Result<RuleSet, StoreError> {
            Ok(self.rules.lock().expect("lock").clone())
        }

        fn find_or_create_report(
            &self,
            assessment_id: &AssessmentId,
        ) -> Result<ReportId, StoreError> {
            let mut guard = self.reports.lock().expect("lock");
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
                .expect("lock")
                .insert(report_id.clone(), suggestions.to_vec());
            Ok(())
        }

        fn report_suggestions(
            &self,
            assessment_id: &AssessmentId,
        ) -> Result<Option<Vec<GeneratedSuggestion>>, StoreError> {
            let reports = self.reports.lock().expect("lock");
            let Some(report_id) = reports.get(assessment_id) else {
                return Ok(None);
            };
            let suggestions = self.suggestions.lock().expect("lock");
            Ok(Some(
                suggestions.get(report_id).cloned().unwrap_or_default(),
            ))
        }
    }

    pub(crate) fn seeded_snapshot(
        id: &str,
        fill: impl Fn(&cso_assess::assessment::Question) -> Option<AnswerValue>,
    ) -> AssessmentSnapshot {
        let responses: Vec<ResponseWithQuestion> = AssessmentBlueprint::standard()
            .questions()
            .iter()
            .map(|question| ResponseWithQuestion {
                response: Response {
                    id: format!("resp-{}", question.id.0),
                    assessment_id: AssessmentId(id.to_string()),
                    question_id: question.id.clone(),
                    value: fill(question),
                    created_at: Utc::now(),
                },
                question: question.clone(),
            })
            .collect();

        AssessmentSnapshot {
            assessment: Assessment {
                id: AssessmentId(id.to_string()),
                organization: "Harbor Education Collective".to_string(),
                status: AssessmentStatus::Completed,
                started_at: Utc::now(),
                completed_at: Some(Utc::now()),
            },
            responses,
        }
    }

    pub(crate) fn leading_fill(
        question: &cso_assess::assessment::Question,
    ) -> Option<AnswerValue> {
        Some(match question.question_type {
            QuestionType::Boolean => AnswerValue::Flag(true),
            _ => AnswerValue::Number(5.0),
        })
    }

    pub(crate) fn emerging_fill(
        question: &cso_assess::assessment::Question,
    ) -> Option<AnswerValue> {
        Some(match question.question_type {
            QuestionType::Boolean => AnswerValue::Flag(false),
            _ => AnswerValue::Number(1.0),
        })
    }

    pub(crate) fn build_service() -> (Arc<AssessmentService<MemoryStore>>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let service = Arc::new(AssessmentService::new(store.clone()));
        (service, store)
    }
}

mod scoring {
    use super::common::*;
    use cso_assess::assessment::{AssessmentId, MaturityLevel};

    #[test]
    fn leading_organization_reaches_the_full_score() {
        let (service, store) = build_service();
        store.insert_assessment(seeded_snapshot("assessment-leading", leading_fill));

        let scores = service
            .scores(&AssessmentId("assessment-leading".to_string()))
            .expect("lookup succeeds")
            .expect("assessment known");

        assert_eq!(scores.total_score, 215);
        assert_eq!(scores.total_percentage, 100.0);
        assert_eq!(scores.overall_level, MaturityLevel::Leading);
    }

    #[test]
    fn weak_organization_lands_in_the_emerging_tier() {
        let (service, store) = build_service();
        store.insert_assessment(seeded_snapshot("assessment-weak", emerging_fill));

        let scores = service
            .scores(&AssessmentId("assessment-weak".to_string()))
            .expect("lookup succeeds")
            .expect("assessment known");

        assert_eq!(scores.total_score, 43);
        assert_eq!(scores.overall_level, MaturityLevel::Emerging);
    }
}

mod suggestions {
    use super::common::*;
    use cso_assess::assessment::{
        AssessmentId, AssessmentRule, RuleCondition, RuleSet, ScoreBand, SuggestionKind,
    };

    #[test]
    fn generation_is_idempotent_across_repeated_runs() {
        let (service, store) = build_service();
        let id = AssessmentId("assessment-weak".to_string());
        store.insert_assessment(seeded_snapshot("assessment-weak", emerging_fill));

        let first = service.generate_suggestions(&id).expect("first run");
        let second = service.generate_suggestions(&id).expect("second run");

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.suggestion, b.suggestion);
            assert_eq!(a.priority, b.priority);
            assert_eq!(a.kind, b.kind);
        }

        let stored = service.suggestions(&id).expect("read back");
        assert_eq!(stored.len(), second.len());
    }

    #[test]
    fn admin_rule_fires_against_the_computed_total() {
        let (service, store) = build_service();
        let leading_id = AssessmentId("assessment-leading".to_string());
        let weak_id = AssessmentId("assessment-weak".to_string());
        store.insert_assessment(seeded_snapshot("assessment-leading", leading_fill));
        store.insert_assessment(seeded_snapshot("assessment-weak", emerging_fill));
        store.set_rules(RuleSet {
            assessment: vec![AssessmentRule {
                id: "rule-top-score".to_string(),
                condition: RuleCondition {
                    overall_score: Some(ScoreBand::at_least(200.0)),
                    ..RuleCondition::default()
                },
                suggestion: "Capture what sustains this score for peer learning.".to_string(),
                priority: 6,
                weight: 1.0,
                is_active: true,
            }],
            ..RuleSet::default()
        });

        let leading = service
            .generate_suggestions(&leading_id)
            .expect("leading run");
        assert!(leading
            .iter()
            .any(|s| s.source_id.as_deref() == Some("rule-top-score")));

        let weak = service.generate_suggestions(&weak_id).expect("weak run");
        assert!(!weak
            .iter()
            .any(|s| s.source_id.as_deref() == Some("rule-top-score")));
    }

    #[test]
    fn weak_assessments_lead_with_strategic_guidance() {
        let (service, store) = build_service();
        let id = AssessmentId("assessment-weak".to_string());
        store.insert_assessment(seeded_snapshot("assessment-weak", emerging_fill));

        let generated = service.generate_suggestions(&id).expect("generation");

        assert_eq!(generated[0].kind, SuggestionKind::Assessment);
        assert_eq!(generated[0].priority, 10);
        assert!(generated
            .iter()
            .filter(|s| s.kind == SuggestionKind::Section)
            .count()
            >= 4);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use cso_assess::assessment::assessment_router;
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn score_and_suggestion_endpoints_round_trip() {
        let (service, store) = build_service();
        store.insert_assessment(seeded_snapshot("assessment-leading", leading_fill));
        let router = assessment_router(service);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/assessments/assessment-leading/scores")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload["total_score"], 215);
        assert_eq!(payload["overall_level_label"], "Leading");

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/assessments/assessment-leading/suggestions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let generated: Value = serde_json::from_slice(&body).expect("json");
        let generated = generated.as_array().expect("array").len();
        assert!(generated > 0);

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/assessments/assessment-leading/suggestions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let stored: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(stored.as_array().expect("array").len(), generated);
    }

    #[tokio::test]
    async fn unknown_assessment_is_a_404_everywhere() {
        let (service, _) = build_service();
        let router = assessment_router(service);

        for (method, uri) in [
            ("GET", "/api/v1/assessments/ghost/scores"),
            ("GET", "/api/v1/assessments/ghost/suggestions"),
            ("POST", "/api/v1/assessments/ghost/suggestions"),
        ] {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("router dispatch");
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        }
    }
}
