use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use roster_engine::ReviewService;

use crate::state::{AppState, AppStateInner};
use crate::{prs, stats, teams, users};

/// Builds the HTTP surface over a review service. Middleware such as CORS,
/// tracing and timeouts is layered on by the binary.
pub fn router(engine: ReviewService) -> Router {
    let state: AppState = Arc::new(AppStateInner { engine });

    let team_routes = Router::new()
        .route("/teams", post(teams::create_team))
        .route("/teams/{team_id}/users", post(users::create_team_member))
        .route("/teams/{team_id}/users/deactivate", post(users::deactivate_users))
        .route("/users", post(users::create_user))
        .route("/users/{user_id}/prs", get(prs::list_for_reviewer))
        .with_state(state.clone());

    let pr_routes = Router::new()
        .route("/prs", post(prs::create_pr))
        .route("/prs/{pr_id}", get(prs::get_pr))
        .route("/prs/{pr_id}/reassign", post(prs::reassign))
        .route("/prs/{pr_id}/merge", post(prs::merge))
        .route("/stats", get(stats::stats))
        .with_state(state);

    Router::new()
        .merge(team_routes)
        .merge(pr_routes)
        .route("/health", get(stats::health))
}
