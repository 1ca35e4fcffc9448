//! Storage contract the engine runs against.
//!
//! Each method is atomic on its own. `replace_reviewer` is the one compound
//! operation and must apply both halves or neither.

use anyhow::Result;
use roster_types::{PrId, PrStatus, PrWithReviewers, PullRequest, Team, TeamId, User, UserId};

/// Fields needed to create a user. Id and timestamp come from storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub team_id: Option<TeamId>,
    pub name: String,
    pub is_active: bool,
}

/// What `replace_reviewer` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    Swapped,
    /// `old` was not a reviewer of the pull request.
    NotAssigned,
    /// The pull request is no longer `OPEN`.
    Merged,
}

pub trait ReviewStore: Send + Sync {
    // -- Teams --

    fn create_team(&self, name: &str) -> Result<Team>;

    fn get_team(&self, id: TeamId) -> Result<Option<Team>>;

    fn get_team_by_name(&self, name: &str) -> Result<Option<Team>>;

    // -- Users --

    fn create_user(&self, user: &NewUser) -> Result<User>;

    fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Active members of a team, ordered by id.
    fn list_active_team_members(&self, team_id: TeamId) -> Result<Vec<User>>;

    /// Marks the listed users inactive, ignoring ids outside the team.
    /// Returns how many rows changed.
    fn deactivate_team_members(&self, team_id: TeamId, user_ids: &[UserId]) -> Result<usize>;

    // -- Pull requests --

    /// Inserts a new pull request with status `OPEN`.
    fn create_pr(&self, title: &str, author_id: UserId) -> Result<PullRequest>;

    fn get_pr(&self, id: PrId) -> Result<Option<PullRequest>>;

    /// Writes a new status. A `MERGED` pull request is never moved back.
    fn set_pr_status(&self, id: PrId, status: PrStatus) -> Result<()>;

    // -- Assignments --

    /// Inserts (pr, reviewer) pairs. Pairs that already exist are skipped.
    fn assign_reviewers(&self, pr_id: PrId, reviewer_ids: &[UserId]) -> Result<()>;

    /// Reviewers of a pull request, ordered by user id.
    fn reviewers_of(&self, pr_id: PrId) -> Result<Vec<User>>;

    /// Swaps `old` for `new` on one pull request as a single unit, checking
    /// the status in the same unit so a merged pull request is never touched.
    ///
    /// Reports `Merged` or `NotAssigned` without changing anything. Fails,
    /// again changing nothing, when `new` is already assigned.
    fn replace_reviewer(&self, pr_id: PrId, old: UserId, new: UserId) -> Result<Replacement>;

    /// Pull requests the user reviews, each with its full reviewer set.
    fn prs_reviewed_by(&self, user_id: UserId) -> Result<Vec<PrWithReviewers>>;

    fn count_assignments(&self) -> Result<u64>;
}
