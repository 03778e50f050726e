use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use super::common::*;
use crate::assessment::domain::AssessmentId;
use crate::assessment::router::assessment_router;

fn build_router() -> (axum::Router, std::sync::Arc<MemoryStore>) {
    let (service, store) = build_service();
    (assessment_router(service), store)
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn get_scores_returns_the_full_report() {
    let (router, store) = build_router();
    store.insert_assessment(snapshot("assessment-1", full_marks_sheet()));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/assessments/assessment-1/scores")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    assert_eq!(payload["assessment_id"], "assessment-1");
    assert_eq!(payload["total_score"], 215);
    assert_eq!(payload["total_percentage"], 100.0);
    assert_eq!(payload["overall_level_label"], "Leading");
    let sections = payload["sections"].as_array().expect("sections array");
    assert_eq!(sections.len(), 4);
    assert_eq!(sections[0]["section_label"], "Governance");
    assert_eq!(sections[0]["score"], 115);
    assert_eq!(sections[0]["average_normalized"], 1.0);
}

#[tokio::test]
async fn get_scores_for_unknown_assessment_is_404() {
    let (router, _) = build_router();

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/assessments/missing/scores")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["assessment_id"], "missing");
}

#[tokio::test]
async fn post_suggestions_regenerates_and_returns_the_list() {
    let (router, store) = build_router();
    store.insert_assessment(snapshot("assessment-1", uniform_sheet(1.0, false)));

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/assessments/assessment-1/suggestions")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let list = payload.as_array().expect("suggestion array");
    assert!(!list.is_empty());
    assert!(list[0]["priority"].as_i64() >= list[list.len() - 1]["priority"].as_i64());

    let report_id = store
        .report_for(&AssessmentId("assessment-1".to_string()))
        .expect("report created");
    assert_eq!(store.stored_suggestions(&report_id).len(), list.len());
}

#[tokio::test]
async fn get_suggestions_reads_the_stored_set() {
    let (service, store) = build_service();
    store.insert_assessment(snapshot("assessment-1", uniform_sheet(1.0, false)));
    let generated = service
        .generate_suggestions(&AssessmentId("assessment-1".to_string()))
        .expect("generation");

    let router = assessment_router(service);
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/assessments/assessment-1/suggestions")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let list = payload.as_array().expect("suggestion array");
    assert_eq!(list.len(), generated.len());
    assert_eq!(list[0]["kind_label"], "Assessment");
}

#[tokio::test]
async fn post_suggestions_for_unknown_assessment_is_404() {
    let (router, _) = build_router();

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/assessments/missing/suggestions")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
