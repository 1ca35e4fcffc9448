//! Pull request status machine: `OPEN` → `MERGED`, nothing else.

use roster_types::{PrStatus, PullRequest};

use crate::error::{EngineError, EngineResult};

/// What a merge request should do given the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStep {
    /// Write `MERGED`.
    Transition,
    /// Already terminal; return the pull request as it is.
    AlreadyMerged,
}

pub fn can_reassign(status: PrStatus) -> bool {
    status == PrStatus::Open
}

/// Rejects reviewer changes on a merged pull request.
pub fn ensure_reassignable(pr: &PullRequest) -> EngineResult<()> {
    if can_reassign(pr.status) {
        Ok(())
    } else {
        Err(EngineError::PrMerged(pr.id))
    }
}

pub fn merge_step(status: PrStatus) -> MergeStep {
    match status {
        PrStatus::Open => MergeStep::Transition,
        PrStatus::Merged => MergeStep::AlreadyMerged,
    }
}
