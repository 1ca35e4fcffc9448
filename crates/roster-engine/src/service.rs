//! Entry points called by the transport layer, one per user-facing
//! operation. Each is a short synchronous sequence of storage calls.

use std::sync::Arc;

use roster_types::{PrId, PrStatus, PrWithReviewers, PullRequest, Team, TeamId, User, UserId};
use tracing::{debug, error, info, warn};

use crate::eligibility::eligible_candidates;
use crate::error::{EngineError, EngineResult, Missing};
use crate::lifecycle::{MergeStep, ensure_reassignable, merge_step};
use crate::sampler::{RandomSource, pick_one, sample_indices};
use crate::store::{NewUser, Replacement, ReviewStore};

/// Reviewers requested for every new pull request.
pub const REVIEWERS_PER_PR: usize = 2;

#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn ReviewStore>,
    rng: Arc<dyn RandomSource>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn ReviewStore>, rng: Arc<dyn RandomSource>) -> Self {
        Self { store, rng }
    }

    // -- Teams & users --

    pub fn create_team(&self, name: &str) -> EngineResult<Team> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::bad_request("team name empty"));
        }

        if self.store.get_team_by_name(name)?.is_some() {
            warn!(name, "team name already taken");
            return Err(EngineError::bad_request("team name already exists"));
        }

        let team = self.store.create_team(name).map_err(|e| {
            error!(name, "failed to create team: {:#}", e);
            e
        })?;

        info!(team_id = %team.id, name = %team.name, "team created");
        Ok(team)
    }

    pub fn create_user(
        &self,
        team_id: Option<TeamId>,
        name: &str,
        is_active: bool,
    ) -> EngineResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::bad_request("user name empty"));
        }

        if let Some(team_id) = team_id {
            if self.store.get_team(team_id)?.is_none() {
                warn!(team_id = %team_id, "team not found for user creation");
                return Err(EngineError::bad_request("team not found"));
            }
        }

        let user = self
            .store
            .create_user(&NewUser {
                team_id,
                name: name.to_string(),
                is_active,
            })
            .map_err(|e| {
                error!(name, "failed to create user: {:#}", e);
                e
            })?;

        info!(user_id = %user.id, name = %user.name, is_active, "user created");
        Ok(user)
    }

    /// Marks team members inactive. Their current assignments stay; they
    /// simply stop being drawn for new ones.
    pub fn deactivate_users(&self, team_id: TeamId, user_ids: &[UserId]) -> EngineResult<usize> {
        if self.store.get_team(team_id)?.is_none() {
            return Err(EngineError::NotFound(Missing::Team(team_id)));
        }

        let changed = self.store.deactivate_team_members(team_id, user_ids)?;
        info!(team_id = %team_id, requested = user_ids.len(), changed, "users deactivated");
        Ok(changed)
    }

    // -- Pull requests --

    /// Opens a pull request and draws up to [`REVIEWERS_PER_PR`] reviewers
    /// from the author's active teammates.
    pub fn create_pr(&self, title: &str, author_id: UserId) -> EngineResult<PrWithReviewers> {
        if title.trim().is_empty() {
            return Err(EngineError::bad_request("title empty"));
        }

        let author = self
            .store
            .get_user(author_id)?
            .ok_or(EngineError::NotFound(Missing::Author(author_id)))?;

        if !author.is_active {
            warn!(author_id = %author_id, "author is not active");
            return Err(EngineError::AuthorInactive(author_id));
        }

        let pr = self.store.create_pr(title, author_id).map_err(|e| {
            error!(author_id = %author_id, "failed to create pull request: {:#}", e);
            e
        })?;

        let Some(team_id) = author.team_id else {
            info!(pr_id = %pr.id, "pull request created without reviewers (author has no team)");
            return Ok(PrWithReviewers {
                pr,
                reviewers: Vec::new(),
            });
        };

        let roster = self.store.list_active_team_members(team_id)?;
        let candidates = eligible_candidates(roster, author_id, &[]);

        let chosen: Vec<UserId> = sample_indices(self.rng.as_ref(), candidates.len(), REVIEWERS_PER_PR)
            .into_iter()
            .map(|i| candidates[i].id)
            .collect();

        if !chosen.is_empty() {
            self.store.assign_reviewers(pr.id, &chosen).map_err(|e| {
                error!(pr_id = %pr.id, "failed to assign reviewers: {:#}", e);
                e
            })?;
        }

        let reviewers = self.store.reviewers_of(pr.id)?;
        info!(
            pr_id = %pr.id,
            team_id = %team_id,
            candidates = candidates.len(),
            reviewer_count = reviewers.len(),
            "pull request created"
        );

        Ok(PrWithReviewers { pr, reviewers })
    }

    pub fn get_pr(&self, pr_id: PrId) -> EngineResult<PrWithReviewers> {
        let pr = self.load_pr(pr_id)?;
        let reviewers = self.store.reviewers_of(pr_id)?;
        Ok(PrWithReviewers { pr, reviewers })
    }

    /// Swaps one reviewer for a randomly drawn active teammate of theirs.
    pub fn reassign_reviewer(&self, pr_id: PrId, old_user_id: UserId) -> EngineResult<PrWithReviewers> {
        let pr = self.load_pr(pr_id)?;

        if let Err(e) = ensure_reassignable(&pr) {
            warn!(pr_id = %pr_id, "attempt to reassign reviewer on merged pull request");
            return Err(e);
        }

        let old = self
            .store
            .get_user(old_user_id)?
            .ok_or(EngineError::NotFound(Missing::User(old_user_id)))?;

        let Some(team_id) = old.team_id else {
            warn!(user_id = %old_user_id, "reviewer has no team");
            return Err(EngineError::bad_request("reviewer has no team"));
        };

        let current: Vec<UserId> = self.store.reviewers_of(pr_id)?.iter().map(|u| u.id).collect();
        if !current.contains(&old_user_id) {
            warn!(pr_id = %pr_id, user_id = %old_user_id, "user is not a reviewer of this pull request");
            return Err(EngineError::NotAssigned {
                pr: pr_id,
                user: old_user_id,
            });
        }

        let roster = self.store.list_active_team_members(team_id)?;
        let candidates = eligible_candidates(roster, pr.author_id, &current);

        let Some(idx) = pick_one(self.rng.as_ref(), candidates.len()) else {
            warn!(
                pr_id = %pr_id,
                old_user_id = %old_user_id,
                team_id = %team_id,
                "no replacement candidate"
            );
            return Err(EngineError::NoCandidate {
                pr: pr_id,
                team: team_id,
            });
        };
        let new = &candidates[idx];

        let outcome = self.store.replace_reviewer(pr_id, old_user_id, new.id).map_err(|e| {
            error!(pr_id = %pr_id, old_user_id = %old_user_id, new_user_id = %new.id, "failed to replace reviewer: {:#}", e);
            e
        })?;
        match outcome {
            Replacement::Swapped => {}
            Replacement::Merged => {
                warn!(pr_id = %pr_id, "pull request merged before reviewer replacement");
                return Err(EngineError::PrMerged(pr_id));
            }
            Replacement::NotAssigned => {
                warn!(pr_id = %pr_id, user_id = %old_user_id, "reviewer vanished before replacement");
                return Err(EngineError::NotAssigned {
                    pr: pr_id,
                    user: old_user_id,
                });
            }
        }

        let pr = self.load_pr(pr_id)?;
        let reviewers = self.store.reviewers_of(pr_id)?;
        info!(
            pr_id = %pr_id,
            old_user_id = %old_user_id,
            new_user_id = %new.id,
            new_user_name = %new.name,
            "reviewer reassigned"
        );

        Ok(PrWithReviewers { pr, reviewers })
    }

    /// Moves an open pull request to `MERGED`. Merging again is a no-op
    /// that returns the stored state.
    pub fn merge_pr(&self, pr_id: PrId) -> EngineResult<PrWithReviewers> {
        let pr = self.load_pr(pr_id)?;

        let pr = match merge_step(pr.status) {
            MergeStep::AlreadyMerged => {
                info!(pr_id = %pr_id, "pull request already merged");
                pr
            }
            MergeStep::Transition => {
                self.store.set_pr_status(pr_id, PrStatus::Merged).map_err(|e| {
                    error!(pr_id = %pr_id, "failed to set status to merged: {:#}", e);
                    e
                })?;
                let merged = self.load_pr(pr_id)?;
                info!(pr_id = %pr_id, "pull request merged");
                merged
            }
        };

        let reviewers = self.store.reviewers_of(pr_id)?;
        Ok(PrWithReviewers { pr, reviewers })
    }

    // -- Queries --

    pub fn prs_for_reviewer(&self, user_id: UserId) -> EngineResult<Vec<PrWithReviewers>> {
        if self.store.get_user(user_id)?.is_none() {
            warn!(user_id = %user_id, "user not found for pull request listing");
            return Err(EngineError::NotFound(Missing::User(user_id)));
        }

        let prs = self.store.prs_reviewed_by(user_id)?;
        debug!(user_id = %user_id, count = prs.len(), "listed pull requests for reviewer");
        Ok(prs)
    }

    pub fn assignment_count(&self) -> EngineResult<u64> {
        Ok(self.store.count_assignments()?)
    }

    fn load_pr(&self, pr_id: PrId) -> EngineResult<PullRequest> {
        self.store
            .get_pr(pr_id)?
            .ok_or(EngineError::NotFound(Missing::PullRequest(pr_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::sampler::SeededRandom;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Delegates to an in-memory store and counts roster lookups and writes.
    /// Can also merge a pull request from inside a roster lookup, the way a
    /// concurrent merge request would land mid-operation.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryStore,
        roster_lookups: AtomicUsize,
        writes: AtomicUsize,
        merge_on_lookup: Mutex<Option<PrId>>,
    }

    impl CountingStore {
        fn roster_lookups(&self) -> usize {
            self.roster_lookups.load(Ordering::SeqCst)
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        fn wrote(&self) {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }

        fn merge_during_next_lookup(&self, pr: PrId) {
            *self.merge_on_lookup.lock().unwrap() = Some(pr);
        }
    }

    impl ReviewStore for CountingStore {
        fn create_team(&self, name: &str) -> anyhow::Result<Team> {
            self.wrote();
            self.inner.create_team(name)
        }
        fn get_team(&self, id: TeamId) -> anyhow::Result<Option<Team>> {
            self.inner.get_team(id)
        }
        fn get_team_by_name(&self, name: &str) -> anyhow::Result<Option<Team>> {
            self.inner.get_team_by_name(name)
        }
        fn create_user(&self, user: &NewUser) -> anyhow::Result<User> {
            self.wrote();
            self.inner.create_user(user)
        }
        fn get_user(&self, id: UserId) -> anyhow::Result<Option<User>> {
            self.inner.get_user(id)
        }
        fn list_active_team_members(&self, team_id: TeamId) -> anyhow::Result<Vec<User>> {
            self.roster_lookups.fetch_add(1, Ordering::SeqCst);
            if let Some(pr) = self.merge_on_lookup.lock().unwrap().take() {
                self.inner.set_pr_status(pr, PrStatus::Merged)?;
            }
            self.inner.list_active_team_members(team_id)
        }
        fn deactivate_team_members(&self, team_id: TeamId, user_ids: &[UserId]) -> anyhow::Result<usize> {
            self.wrote();
            self.inner.deactivate_team_members(team_id, user_ids)
        }
        fn create_pr(&self, title: &str, author_id: UserId) -> anyhow::Result<PullRequest> {
            self.wrote();
            self.inner.create_pr(title, author_id)
        }
        fn get_pr(&self, id: PrId) -> anyhow::Result<Option<PullRequest>> {
            self.inner.get_pr(id)
        }
        fn set_pr_status(&self, id: PrId, status: PrStatus) -> anyhow::Result<()> {
            self.wrote();
            self.inner.set_pr_status(id, status)
        }
        fn assign_reviewers(&self, pr_id: PrId, reviewer_ids: &[UserId]) -> anyhow::Result<()> {
            self.wrote();
            self.inner.assign_reviewers(pr_id, reviewer_ids)
        }
        fn reviewers_of(&self, pr_id: PrId) -> anyhow::Result<Vec<User>> {
            self.inner.reviewers_of(pr_id)
        }
        fn replace_reviewer(&self, pr_id: PrId, old: UserId, new: UserId) -> anyhow::Result<Replacement> {
            self.wrote();
            self.inner.replace_reviewer(pr_id, old, new)
        }
        fn prs_reviewed_by(&self, user_id: UserId) -> anyhow::Result<Vec<PrWithReviewers>> {
            self.inner.prs_reviewed_by(user_id)
        }
        fn count_assignments(&self) -> anyhow::Result<u64> {
            self.inner.count_assignments()
        }
    }

    struct Fixture {
        store: Arc<CountingStore>,
        svc: ReviewService,
    }

    impl Fixture {
        fn new(seed: u64) -> Self {
            let store = Arc::new(CountingStore::default());
            let svc = ReviewService::new(store.clone(), Arc::new(SeededRandom::with_seed(seed)));
            Self { store, svc }
        }

        fn team(&self, name: &str) -> TeamId {
            self.svc.create_team(name).unwrap().id
        }

        fn member(&self, team: TeamId, name: &str) -> UserId {
            self.svc.create_user(Some(team), name, true).unwrap().id
        }

        fn reviewer_ids(&self, pr: PrId) -> HashSet<UserId> {
            self.svc.get_pr(pr).unwrap().reviewer_ids().into_iter().collect()
        }
    }

    /// Team "Backend" with author A and teammates B, C, D, all active.
    fn backend(seed: u64) -> (Fixture, [UserId; 4]) {
        let fx = Fixture::new(seed);
        let team = fx.team("Backend");
        let ids = [
            fx.member(team, "A"),
            fx.member(team, "B"),
            fx.member(team, "C"),
            fx.member(team, "D"),
        ];
        (fx, ids)
    }

    #[test]
    fn create_pr_picks_two_teammates_never_the_author() {
        for seed in 0..50 {
            let (fx, [a, b, c, d]) = backend(seed);
            let pr = fx.svc.create_pr("Add login", a).unwrap();

            assert_eq!(pr.pr.status, PrStatus::Open);
            assert_eq!(pr.reviewers.len(), 2);
            let ids: HashSet<_> = pr.reviewer_ids().into_iter().collect();
            assert_eq!(ids.len(), 2);
            assert!(!ids.contains(&a));
            assert!(ids.is_subset(&HashSet::from([b, c, d])));
        }
    }

    #[test]
    fn create_pr_reviewers_are_active_same_team() {
        let fx = Fixture::new(9);
        let backend = fx.team("Backend");
        let frontend = fx.team("Frontend");
        let author = fx.member(backend, "A");
        let teammate = fx.member(backend, "B");
        fx.svc.create_user(Some(backend), "Idle", false).unwrap();
        fx.member(frontend, "F1");
        fx.member(frontend, "F2");

        let pr = fx.svc.create_pr("Refactor", author).unwrap();
        assert_eq!(pr.reviewer_ids(), vec![teammate]);
        for r in &pr.reviewers {
            assert!(r.is_active);
            assert_eq!(r.team_id, Some(backend));
        }
    }

    #[test]
    fn create_pr_with_no_eligible_teammates_has_no_reviewers() {
        let fx = Fixture::new(1);
        let team = fx.team("Solo");
        let author = fx.member(team, "A");

        let pr = fx.svc.create_pr("Lonely change", author).unwrap();
        assert!(pr.reviewers.is_empty());
        assert_eq!(fx.svc.assignment_count().unwrap(), 0);
    }

    #[test]
    fn teamless_author_skips_candidate_lookup() {
        let fx = Fixture::new(1);
        let team = fx.team("Backend");
        fx.member(team, "B");
        let author = fx.svc.create_user(None, "Drifter", true).unwrap().id;

        let pr = fx.svc.create_pr("Docs", author).unwrap();
        assert!(pr.reviewers.is_empty());
        assert_eq!(fx.store.roster_lookups(), 0);
    }

    #[test]
    fn create_pr_rejects_unknown_and_inactive_authors() {
        let fx = Fixture::new(1);
        let team = fx.team("Backend");
        let idle = fx.svc.create_user(Some(team), "Idle", false).unwrap().id;

        let err = fx.svc.create_pr("x", UserId(999)).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(Missing::Author(UserId(999)))));

        let err = fx.svc.create_pr("x", idle).unwrap_err();
        assert!(matches!(err, EngineError::AuthorInactive(id) if id == idle));
    }

    #[test]
    fn reassign_picks_the_only_free_teammate() {
        let fx = Fixture::new(3);
        let team = fx.team("Backend");
        let a = fx.member(team, "A");
        let b = fx.member(team, "B");
        let c = fx.member(team, "C");
        let pr = fx.svc.create_pr("Add login", a).unwrap().pr.id;
        assert_eq!(fx.reviewer_ids(pr), HashSet::from([b, c]));
        let d = fx.member(team, "D");

        let out = fx.svc.reassign_reviewer(pr, b).unwrap();
        assert_eq!(out.reviewers.len(), 2);
        assert_eq!(out.reviewer_ids().into_iter().collect::<HashSet<_>>(), HashSet::from([c, d]));
    }

    #[test]
    fn reassign_keeps_reviewer_count() {
        for seed in 0..20 {
            let fx = Fixture::new(seed);
            let team = fx.team("Big");
            let author = fx.member(team, "A");
            for i in 0..6 {
                fx.member(team, &format!("M{}", i));
            }
            let pr = fx.svc.create_pr("p", author).unwrap();
            let before = pr.reviewer_ids();
            let old = before[0];

            let after = fx.svc.reassign_reviewer(pr.pr.id, old).unwrap();
            assert_eq!(after.reviewers.len(), before.len());
            let ids = after.reviewer_ids();
            assert!(!ids.contains(&old));
            assert!(!ids.contains(&author));
            assert!(ids.contains(&before[1]));
        }
    }

    #[test]
    fn reassign_without_candidates_leaves_reviewers_alone() {
        let fx = Fixture::new(2);
        let team = fx.team("Backend");
        let a = fx.member(team, "A");
        let b = fx.member(team, "B");
        let c = fx.member(team, "C");
        let pr = fx.svc.create_pr("p", a).unwrap().pr.id;
        assert_eq!(fx.reviewer_ids(pr), HashSet::from([b, c]));

        let writes = fx.store.writes();
        let err = fx.svc.reassign_reviewer(pr, b).unwrap_err();
        assert!(matches!(err, EngineError::NoCandidate { .. }));
        assert_eq!(fx.reviewer_ids(pr), HashSet::from([b, c]));
        assert_eq!(fx.store.writes(), writes);
    }

    #[test]
    fn reassign_ignores_deactivated_teammates() {
        let fx = Fixture::new(2);
        let team = fx.team("Backend");
        let a = fx.member(team, "A");
        let b = fx.member(team, "B");
        let c = fx.member(team, "C");
        let pr = fx.svc.create_pr("p", a).unwrap().pr.id;
        let d = fx.member(team, "D");
        assert_eq!(fx.svc.deactivate_users(team, &[d]).unwrap(), 1);

        let err = fx.svc.reassign_reviewer(pr, b).unwrap_err();
        assert!(matches!(err, EngineError::NoCandidate { .. }));
        assert_eq!(fx.reviewer_ids(pr), HashSet::from([b, c]));
    }

    #[test]
    fn reassign_rejects_non_reviewer() {
        let (fx, [a, b, c, d]) = backend(4);
        let pr = fx.svc.create_pr("p", a).unwrap();
        let assigned = pr.reviewer_ids();
        let outsider = [b, c, d].into_iter().find(|id| !assigned.contains(id)).unwrap();

        let err = fx.svc.reassign_reviewer(pr.pr.id, outsider).unwrap_err();
        assert!(matches!(err, EngineError::NotAssigned { user, .. } if user == outsider));
        assert_eq!(fx.svc.get_pr(pr.pr.id).unwrap().reviewer_ids(), assigned);
    }

    #[test]
    fn reassign_error_paths() {
        let (fx, [a, b, _, _]) = backend(4);
        let pr = fx.svc.create_pr("p", a).unwrap().pr.id;
        let teamless = fx.svc.create_user(None, "Nomad", true).unwrap().id;

        let err = fx.svc.reassign_reviewer(PrId(777), b).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(Missing::PullRequest(PrId(777)))));

        let err = fx.svc.reassign_reviewer(pr, UserId(888)).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(Missing::User(UserId(888)))));

        let err = fx.svc.reassign_reviewer(pr, teamless).unwrap_err();
        assert!(matches!(err, EngineError::BadRequest(ref m) if m == "reviewer has no team"));
    }

    #[test]
    fn merged_pr_refuses_reassignment_and_merges_idempotently() {
        let (fx, [a, _, _, _]) = backend(6);
        let pr = fx.svc.create_pr("p", a).unwrap();
        let id = pr.pr.id;
        let reviewer = pr.reviewer_ids()[0];

        let first = fx.svc.merge_pr(id).unwrap();
        assert_eq!(first.pr.status, PrStatus::Merged);
        assert_eq!(first.reviewers, pr.reviewers);

        let err = fx.svc.reassign_reviewer(id, reviewer).unwrap_err();
        assert!(matches!(err, EngineError::PrMerged(p) if p == id));
        assert_eq!(fx.svc.get_pr(id).unwrap().reviewers, pr.reviewers);

        let writes = fx.store.writes();
        let second = fx.svc.merge_pr(id).unwrap();
        assert_eq!(second, first);
        assert_eq!(fx.store.writes(), writes);
    }

    #[test]
    fn merge_landing_mid_reassign_blocks_the_swap() {
        let (fx, [a, ..]) = backend(9);
        let pr = fx.svc.create_pr("p", a).unwrap();
        let id = pr.pr.id;
        let before = fx.reviewer_ids(id);
        let reviewer = pr.reviewer_ids()[0];

        fx.store.merge_during_next_lookup(id);
        let err = fx.svc.reassign_reviewer(id, reviewer).unwrap_err();
        assert!(matches!(err, EngineError::PrMerged(p) if p == id));

        let after = fx.svc.get_pr(id).unwrap();
        assert_eq!(after.pr.status, PrStatus::Merged);
        assert_eq!(fx.reviewer_ids(id), before);
    }

    #[test]
    fn reassign_returns_fresh_pr_state() {
        let (fx, [a, ..]) = backend(10);
        let pr = fx.svc.create_pr("p", a).unwrap();
        let out = fx.svc.reassign_reviewer(pr.pr.id, pr.reviewer_ids()[0]).unwrap();
        assert_eq!(out, fx.svc.get_pr(pr.pr.id).unwrap());
        assert_eq!(out.pr.status, PrStatus::Open);
    }

    #[test]
    fn create_pr_keeps_title_as_given() {
        let (fx, [a, ..]) = backend(11);
        let pr = fx.svc.create_pr("  Fix flaky test ", a).unwrap();
        assert_eq!(pr.pr.title, "  Fix flaky test ");
        assert!(matches!(fx.svc.create_pr("   ", a), Err(EngineError::BadRequest(_))));
    }

    #[test]
    fn merge_unknown_pr() {
        let fx = Fixture::new(0);
        let err = fx.svc.merge_pr(PrId(5)).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(Missing::PullRequest(PrId(5)))));
    }

    #[test]
    fn same_seed_same_reviewers() {
        let (fx1, [a1, ..]) = backend(77);
        let (fx2, [a2, ..]) = backend(77);
        for _ in 0..5 {
            let r1 = fx1.svc.create_pr("p", a1).unwrap().reviewer_ids();
            let r2 = fx2.svc.create_pr("p", a2).unwrap().reviewer_ids();
            assert_eq!(r1, r2);
        }
    }

    #[test]
    fn reviewer_listing_and_stats() {
        let fx = Fixture::new(8);
        let team = fx.team("Backend");
        let a = fx.member(team, "A");
        let b = fx.member(team, "B");
        let c = fx.member(team, "C");

        fx.svc.create_pr("one", a).unwrap();
        fx.svc.create_pr("two", a).unwrap();
        fx.svc.create_pr("three", b).unwrap();

        assert_eq!(fx.svc.assignment_count().unwrap(), 6);
        let for_c = fx.svc.prs_for_reviewer(c).unwrap();
        assert_eq!(for_c.len(), 3);
        assert!(for_c.iter().all(|p| p.reviewer_ids().contains(&c)));
        assert_eq!(fx.svc.prs_for_reviewer(a).unwrap().len(), 1);

        let err = fx.svc.prs_for_reviewer(UserId(404)).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(Missing::User(_))));
    }

    #[test]
    fn team_and_user_validation() {
        let fx = Fixture::new(0);
        fx.team("Backend");

        assert!(matches!(fx.svc.create_team("  "), Err(EngineError::BadRequest(_))));
        assert!(matches!(fx.svc.create_team("Backend"), Err(EngineError::BadRequest(_))));
        assert!(matches!(
            fx.svc.create_user(Some(TeamId(99)), "X", true),
            Err(EngineError::BadRequest(ref m)) if m == "team not found"
        ));
        assert!(matches!(fx.svc.create_user(None, "", true), Err(EngineError::BadRequest(_))));
        assert!(matches!(
            fx.svc.deactivate_users(TeamId(99), &[]),
            Err(EngineError::NotFound(Missing::Team(TeamId(99))))
        ));
    }
}
