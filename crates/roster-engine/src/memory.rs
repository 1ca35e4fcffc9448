//! In-memory implementation of [`ReviewStore`].
//!
//! Everything lives behind one mutex, so each call (including
//! `replace_reviewer`) is atomic with respect to every other call.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};
use chrono::Utc;
use roster_types::{PrId, PrStatus, PrWithReviewers, PullRequest, Team, TeamId, User, UserId};

use crate::store::{NewUser, Replacement, ReviewStore};

#[derive(Default)]
struct State {
    teams: BTreeMap<TeamId, Team>,
    users: BTreeMap<UserId, User>,
    prs: BTreeMap<PrId, PullRequest>,
    /// (pr, reviewer) pairs; the set enforces uniqueness.
    assignments: BTreeSet<(PrId, UserId)>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn reviewers_of(&self, pr_id: PrId) -> Vec<User> {
        self.assignments
            .range((pr_id, UserId(i64::MIN))..=(pr_id, UserId(i64::MAX)))
            .filter_map(|(_, uid)| self.users.get(uid).cloned())
            .collect()
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> Result<T>) -> Result<T> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| anyhow!("in-memory store lock poisoned: {}", e))?;
        f(&mut state)
    }
}

impl ReviewStore for InMemoryStore {
    fn create_team(&self, name: &str) -> Result<Team> {
        self.with_state(|s| {
            if s.teams.values().any(|t| t.name == name) {
                bail!("team name '{}' already taken", name);
            }
            let team = Team {
                id: TeamId(s.next_id()),
                name: name.to_string(),
                created_at: Utc::now(),
            };
            s.teams.insert(team.id, team.clone());
            Ok(team)
        })
    }

    fn get_team(&self, id: TeamId) -> Result<Option<Team>> {
        self.with_state(|s| Ok(s.teams.get(&id).cloned()))
    }

    fn get_team_by_name(&self, name: &str) -> Result<Option<Team>> {
        self.with_state(|s| Ok(s.teams.values().find(|t| t.name == name).cloned()))
    }

    fn create_user(&self, user: &NewUser) -> Result<User> {
        self.with_state(|s| {
            if let Some(team_id) = user.team_id {
                if !s.teams.contains_key(&team_id) {
                    bail!("foreign key violation: team {} does not exist", team_id);
                }
            }
            let created = User {
                id: UserId(s.next_id()),
                team_id: user.team_id,
                name: user.name.clone(),
                is_active: user.is_active,
                created_at: Utc::now(),
            };
            s.users.insert(created.id, created.clone());
            Ok(created)
        })
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.with_state(|s| Ok(s.users.get(&id).cloned()))
    }

    fn list_active_team_members(&self, team_id: TeamId) -> Result<Vec<User>> {
        self.with_state(|s| {
            Ok(s.users
                .values()
                .filter(|u| u.team_id == Some(team_id) && u.is_active)
                .cloned()
                .collect())
        })
    }

    fn deactivate_team_members(&self, team_id: TeamId, user_ids: &[UserId]) -> Result<usize> {
        self.with_state(|s| {
            let mut changed = 0;
            for user in s.users.values_mut() {
                if user.team_id == Some(team_id) && user_ids.contains(&user.id) && user.is_active {
                    user.is_active = false;
                    changed += 1;
                }
            }
            Ok(changed)
        })
    }

    fn create_pr(&self, title: &str, author_id: UserId) -> Result<PullRequest> {
        self.with_state(|s| {
            if !s.users.contains_key(&author_id) {
                bail!("foreign key violation: user {} does not exist", author_id);
            }
            let pr = PullRequest {
                id: PrId(s.next_id()),
                title: title.to_string(),
                author_id,
                status: PrStatus::Open,
                created_at: Utc::now(),
            };
            s.prs.insert(pr.id, pr.clone());
            Ok(pr)
        })
    }

    fn get_pr(&self, id: PrId) -> Result<Option<PullRequest>> {
        self.with_state(|s| Ok(s.prs.get(&id).cloned()))
    }

    fn set_pr_status(&self, id: PrId, status: PrStatus) -> Result<()> {
        self.with_state(|s| {
            match s.prs.get_mut(&id) {
                Some(pr) if pr.status == PrStatus::Open => pr.status = status,
                _ => {}
            }
            Ok(())
        })
    }

    fn assign_reviewers(&self, pr_id: PrId, reviewer_ids: &[UserId]) -> Result<()> {
        self.with_state(|s| {
            if !s.prs.contains_key(&pr_id) {
                bail!("foreign key violation: pull request {} does not exist", pr_id);
            }
            if let Some(missing) = reviewer_ids.iter().find(|id| !s.users.contains_key(*id)) {
                bail!("foreign key violation: user {} does not exist", missing);
            }
            for &uid in reviewer_ids {
                s.assignments.insert((pr_id, uid));
            }
            Ok(())
        })
    }

    fn reviewers_of(&self, pr_id: PrId) -> Result<Vec<User>> {
        self.with_state(|s| Ok(s.reviewers_of(pr_id)))
    }

    fn replace_reviewer(&self, pr_id: PrId, old: UserId, new: UserId) -> Result<Replacement> {
        self.with_state(|s| {
            let Some(pr) = s.prs.get(&pr_id) else {
                bail!("foreign key violation: pull request {} does not exist", pr_id);
            };
            if pr.status != PrStatus::Open {
                return Ok(Replacement::Merged);
            }
            if !s.assignments.contains(&(pr_id, old)) {
                return Ok(Replacement::NotAssigned);
            }
            if s.assignments.contains(&(pr_id, new)) {
                bail!("user {} is already a reviewer of pull request {}", new, pr_id);
            }
            if !s.users.contains_key(&new) {
                bail!("foreign key violation: user {} does not exist", new);
            }
            s.assignments.remove(&(pr_id, old));
            s.assignments.insert((pr_id, new));
            Ok(Replacement::Swapped)
        })
    }

    fn prs_reviewed_by(&self, user_id: UserId) -> Result<Vec<PrWithReviewers>> {
        self.with_state(|s| {
            Ok(s.assignments
                .iter()
                .filter(|(_, uid)| *uid == user_id)
                .filter_map(|(pid, _)| s.prs.get(pid))
                .map(|pr| PrWithReviewers {
                    pr: pr.clone(),
                    reviewers: s.reviewers_of(pr.id),
                })
                .collect())
        })
    }

    fn count_assignments(&self) -> Result<u64> {
        self.with_state(|s| Ok(s.assignments.len() as u64))
    }
}
