use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use roster_types::api::CreateTeamRequest;

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};
use crate::validate;

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    payload: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    validate::non_empty(&req.name, "name")?;

    let team = run_blocking(&state, move |engine| engine.create_team(&req.name)).await?;
    Ok((StatusCode::CREATED, Json(team)))
}
