use std::fmt;

use roster_types::{PrId, TeamId, UserId};
use thiserror::Error;

/// The entity a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Team(TeamId),
    User(UserId),
    /// The author named on a new pull request.
    Author(UserId),
    PullRequest(PrId),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Team(id) => write!(f, "team {}", id),
            Self::User(id) => write!(f, "user {}", id),
            Self::Author(id) => write!(f, "author {}", id),
            Self::PullRequest(id) => write!(f, "pull request {}", id),
        }
    }
}

/// Every way an engine operation can fail.
///
/// Business-rule variants carry the ids involved so the transport can
/// report them without parsing messages. `Storage` wraps whatever the
/// storage contract returned and is never reclassified.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(Missing),

    #[error("author {0} is not active")]
    AuthorInactive(UserId),

    #[error("pull request {0} is already merged")]
    PrMerged(PrId),

    #[error("user {user} is not a reviewer of pull request {pr}")]
    NotAssigned { pr: PrId, user: UserId },

    #[error("no active replacement candidate in team {team} for pull request {pr}")]
    NoCandidate { pr: PrId, team: TeamId },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl EngineError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
