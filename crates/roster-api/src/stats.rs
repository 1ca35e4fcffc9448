use axum::{Json, extract::State, response::IntoResponse};

use roster_types::api::StatsResponse;

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};

/// GET /stats: total (pr, reviewer) assignments across all pull requests.
pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let total_assignments = run_blocking(&state, |engine| engine.assignment_count()).await?;
    Ok(Json(StatsResponse { total_assignments }))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
