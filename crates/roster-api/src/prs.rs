use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use roster_types::api::{CreatePrRequest, ReassignRequest};
use roster_types::{PrId, UserId};

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};
use crate::validate;

fn pr_id(path: Result<Path<PrId>, PathRejection>) -> Result<PrId, ApiError> {
    let Path(id) = path?;
    validate::valid_id(id.is_valid(), "pr_id")?;
    Ok(id)
}

/// POST /prs: opens a pull request and assigns up to two reviewers.
pub async fn create_pr(
    State(state): State<AppState>,
    payload: Result<Json<CreatePrRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    validate::non_empty(&req.title, "title")?;
    validate::valid_id(req.author_id.is_valid(), "author_id")?;

    let pr = run_blocking(&state, move |engine| engine.create_pr(&req.title, req.author_id)).await?;
    Ok((StatusCode::CREATED, Json(pr)))
}

/// GET /prs/{pr_id}
pub async fn get_pr(
    State(state): State<AppState>,
    path: Result<Path<PrId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = pr_id(path)?;
    let pr = run_blocking(&state, move |engine| engine.get_pr(id)).await?;
    Ok(Json(pr))
}

/// POST /prs/{pr_id}/reassign
pub async fn reassign(
    State(state): State<AppState>,
    path: Result<Path<PrId>, PathRejection>,
    payload: Result<Json<ReassignRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = pr_id(path)?;
    let Json(req) = payload?;
    validate::valid_id(req.old_user_id.is_valid(), "old_user_id")?;

    let pr = run_blocking(&state, move |engine| engine.reassign_reviewer(id, req.old_user_id)).await?;
    Ok(Json(pr))
}

/// POST /prs/{pr_id}/merge: repeat calls return the merged state unchanged.
pub async fn merge(
    State(state): State<AppState>,
    path: Result<Path<PrId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = pr_id(path)?;
    let pr = run_blocking(&state, move |engine| engine.merge_pr(id)).await?;
    Ok(Json(pr))
}

/// GET /users/{user_id}/prs: pull requests the user is reviewing.
pub async fn list_for_reviewer(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(user_id) = path?;
    validate::valid_id(user_id.is_valid(), "user_id")?;

    let prs = run_blocking(&state, move |engine| engine.prs_for_reviewer(user_id)).await?;
    debug!(user_id = %user_id, count = prs.len(), "reviewer queue served");
    Ok(Json(prs))
}
