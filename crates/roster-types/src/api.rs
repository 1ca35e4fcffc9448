use serde::{Deserialize, Serialize};

use crate::ids::{TeamId, UserId};

// -- Teams --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTeamRequest {
    pub name: String,
}

// -- Users --

/// Body of `POST /teams/{team_id}/users`. The team comes from the path.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTeamMemberRequest {
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Body of `POST /users`, where team membership is optional.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeactivateUsersRequest {
    pub user_ids: Vec<UserId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeactivateUsersResponse {
    pub deactivated: usize,
}

// -- Pull requests --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePrRequest {
    pub title: String,
    pub author_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReassignRequest {
    pub old_user_id: UserId,
}

// -- Stats --

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_assignments: u64,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}
