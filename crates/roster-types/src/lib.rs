pub mod api;
pub mod ids;
pub mod models;

pub use ids::{PrId, TeamId, UserId};
pub use models::{PrStatus, PrWithReviewers, PullRequest, Team, User};
