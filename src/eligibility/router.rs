use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::engine::{EligibilityError, EvaluationResult};
use super::profile::{Profile, ProfileId};
use super::repository::{ProfileRepository, RepositoryError};
use super::scheme::SchemeType;
use super::service::{EligibilityService, EligibilityServiceError, SchemeQuery};

const MAX_SCHEME_LIMIT: usize = 100;
const DEFAULT_PROFILE_LIMIT: i64 = 100;
const MAX_PROFILE_LIMIT: i64 = 1000;

/// Router builder exposing profile intake, evaluation, and catalog browsing.
pub fn eligibility_router<R>(service: Arc<EligibilityService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/profiles",
            get(list_profiles_handler::<R>).post(create_profile_handler::<R>),
        )
        .route(
            "/api/v1/profiles/:profile_id",
            get(get_profile_handler::<R>)
                .put(update_profile_handler::<R>)
                .delete(delete_profile_handler::<R>),
        )
        .route(
            "/api/v1/eligibility/evaluate",
            post(evaluate_inline_handler::<R>),
        )
        .route(
            "/api/v1/eligibility/evaluate/:profile_id",
            post(evaluate_stored_handler::<R>),
        )
        .route("/api/v1/eligibility/schemes", get(list_schemes_handler::<R>))
        .route(
            "/api/v1/eligibility/schemes/:scheme_id",
            get(scheme_handler::<R>),
        )
        .with_state(service)
}

/// Evaluation payload stamped with the time it was produced.
#[derive(Debug, Serialize)]
struct EvaluationView {
    #[serde(flatten)]
    result: EvaluationResult,
    summary: String,
    evaluated_at: DateTime<Utc>,
}

impl From<EvaluationResult> for EvaluationView {
    fn from(result: EvaluationResult) -> Self {
        Self {
            summary: result.summary(),
            result,
            evaluated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SchemeListParams {
    scheme_type: Option<SchemeType>,
    active_only: Option<bool>,
    limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProfileListParams {
    limit: Option<i64>,
    offset: Option<i64>,
}

pub(crate) async fn list_profiles_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Query(params): Query<ProfileListParams>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let limit = params.limit.unwrap_or(DEFAULT_PROFILE_LIMIT);
    if !(1..=MAX_PROFILE_LIMIT).contains(&limit) {
        return bad_request(format!("limit must be between 1 and {MAX_PROFILE_LIMIT}"));
    }
    let offset = params.offset.unwrap_or(0);
    if offset < 0 {
        return bad_request("offset must be non-negative".to_string());
    }

    match service.list_profiles(offset as usize, limit as usize) {
        Ok(ids) => (StatusCode::OK, axum::Json(ids)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_profile_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    axum::Json(profile): axum::Json<Profile>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.create_profile(profile) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_profile_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.get_profile(&ProfileId(profile_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_profile_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Path(profile_id): Path<String>,
    axum::Json(changes): axum::Json<Profile>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.update_profile(&ProfileId(profile_id), changes) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_profile_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.delete_profile(&ProfileId(profile_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_stored_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.evaluate(&ProfileId(profile_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(EvaluationView::from(result))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_inline_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    axum::Json(profile): axum::Json<Profile>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.evaluate_profile(&profile) {
        Ok(result) => (StatusCode::OK, axum::Json(EvaluationView::from(result))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_schemes_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Query(params): Query<SchemeListParams>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let defaults = SchemeQuery::default();
    let limit = params.limit.unwrap_or(defaults.limit);
    if !(1..=MAX_SCHEME_LIMIT).contains(&limit) {
        let payload = json!({
            "error": format!("limit must be between 1 and {MAX_SCHEME_LIMIT}"),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let query = SchemeQuery {
        scheme_type: params.scheme_type,
        active_only: params.active_only.unwrap_or(defaults.active_only),
        limit,
    };
    let schemes = service.schemes(&query);
    let payload = json!({
        "total": schemes.len(),
        "schemes": schemes,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn scheme_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Path(scheme_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.scheme(&scheme_id) {
        Some(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        None => {
            let payload = json!({
                "error": format!("scheme {scheme_id} not found"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) fn error_status(error: &EligibilityServiceError) -> StatusCode {
    match error {
        EligibilityServiceError::Profile(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EligibilityServiceError::EmptyUpdate => StatusCode::BAD_REQUEST,
        EligibilityServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        EligibilityServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        EligibilityServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        EligibilityServiceError::Eligibility(EligibilityError::TimeBudgetExceeded { .. }) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        EligibilityServiceError::Eligibility(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": message }))).into_response()
}

fn error_response(error: EligibilityServiceError) -> Response {
    let status = error_status(&error);
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
