use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{PrId, TeamId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A user may belong to no team at all. Such users can author pull requests
/// but never receive reviewers automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub team_id: Option<TeamId>,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Pull request lifecycle. `Merged` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrStatus {
    Open,
    Merged,
}

impl PrStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

impl fmt::Display for PrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status text found where a `PrStatus` was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown pull request status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for PrStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: PrId,
    pub title: String,
    pub author_id: UserId,
    pub status: PrStatus,
    pub created_at: DateTime<Utc>,
}

/// A pull request together with its reviewers as currently stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrWithReviewers {
    #[serde(flatten)]
    pub pr: PullRequest,
    pub reviewers: Vec<User>,
}

impl PrWithReviewers {
    pub fn reviewer_ids(&self) -> Vec<UserId> {
        self.reviewers.iter().map(|u| u.id).collect()
    }
}
