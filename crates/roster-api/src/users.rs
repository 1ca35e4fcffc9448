use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use roster_types::TeamId;
use roster_types::api::{
    CreateTeamMemberRequest, CreateUserRequest, DeactivateUsersRequest, DeactivateUsersResponse,
};

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};
use crate::validate;

/// POST /teams/{team_id}/users
pub async fn create_team_member(
    State(state): State<AppState>,
    path: Result<Path<TeamId>, PathRejection>,
    payload: Result<Json<CreateTeamMemberRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(team_id) = path?;
    let Json(req) = payload?;
    validate::valid_id(team_id.is_valid(), "team_id")?;
    validate::non_empty(&req.name, "name")?;

    let user = run_blocking(&state, move |engine| {
        engine.create_user(Some(team_id), &req.name, req.is_active)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /users, with team membership optional.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    validate::non_empty(&req.name, "name")?;
    if let Some(team_id) = req.team_id {
        validate::valid_id(team_id.is_valid(), "team_id")?;
    }

    let user = run_blocking(&state, move |engine| {
        engine.create_user(req.team_id, &req.name, req.is_active)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /teams/{team_id}/users/deactivate
pub async fn deactivate_users(
    State(state): State<AppState>,
    path: Result<Path<TeamId>, PathRejection>,
    payload: Result<Json<DeactivateUsersRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(team_id) = path?;
    let Json(req) = payload?;
    validate::valid_id(team_id.is_valid(), "team_id")?;
    for id in &req.user_ids {
        validate::valid_id(id.is_valid(), "user_ids")?;
    }

    let deactivated =
        run_blocking(&state, move |engine| engine.deactivate_users(team_id, &req.user_ids)).await?;
    Ok(Json(DeactivateUsersResponse { deactivated }))
}
