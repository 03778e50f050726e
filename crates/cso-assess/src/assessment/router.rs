use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::AssessmentId;
use super::scoring::calculate_cso_scores;
use super::service::{AssessmentService, AssessmentServiceError};
use super::store::{AssessmentStore, StoreError};
use super::suggestions::GeneratedSuggestion;
use super::views::{ScoreReportView, SuggestionView};

/// Router builder exposing the score and suggestion endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: AssessmentStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments/:assessment_id/scores",
            get(scores_handler::<S>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/suggestions",
            get(suggestions_handler::<S>).post(regenerate_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn scores_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let id = AssessmentId(assessment_id);
    match score_report(&service, &id) {
        Ok(Some(view)) => (StatusCode::OK, axum::Json(view)).into_response(),
        Ok(None) => not_found_response(&id),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn suggestions_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.suggestions(&id) {
        Ok(suggestions) => suggestion_list_response(&suggestions),
        Err(AssessmentServiceError::Store(StoreError::NotFound)) => not_found_response(&id),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn regenerate_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.generate_suggestions(&id) {
        Ok(suggestions) => suggestion_list_response(&suggestions),
        Err(AssessmentServiceError::Store(StoreError::NotFound)) => not_found_response(&id),
        Err(error) => error_response(error),
    }
}

fn score_report<S>(
    service: &AssessmentService<S>,
    id: &AssessmentId,
) -> Result<Option<ScoreReportView>, AssessmentServiceError>
where
    S: AssessmentStore + 'static,
{
    let Some(snapshot) = service.snapshot(id)? else {
        return Ok(None);
    };
    let scores = calculate_cso_scores(&snapshot.responses);
    Ok(Some(ScoreReportView::build(&snapshot, &scores)))
}

fn suggestion_list_response(suggestions: &[GeneratedSuggestion]) -> Response {
    let views: Vec<SuggestionView> = suggestions
        .iter()
        .map(SuggestionView::from_suggestion)
        .collect();
    (StatusCode::OK, axum::Json(views)).into_response()
}

fn not_found_response(id: &AssessmentId) -> Response {
    let payload = json!({
        "assessment_id": &id.0,
        "error": "assessment not found",
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn error_response(error: AssessmentServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
