//! Unit-of-work stages.

use super::error::PublishError;
use crate::git::GitError;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Progress of one branch/commit/PR cycle. Stages are only entered in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStage {
    Idle,
    BranchPrepared,
    MutationsApplied,
    Committed,
    Pushed,
    PullRequestOpenOrConfirmed,
}

impl PublishStage {
    /// The stage that follows this one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::BranchPrepared),
            Self::BranchPrepared => Some(Self::MutationsApplied),
            Self::MutationsApplied => Some(Self::Committed),
            Self::Committed => Some(Self::Pushed),
            Self::Pushed => Some(Self::PullRequestOpenOrConfirmed),
            Self::PullRequestOpenOrConfirmed => None,
        }
    }

    /// Returns the stage as a string for logs and errors.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::BranchPrepared => "branch_prepared",
            Self::MutationsApplied => "mutations_applied",
            Self::Committed => "committed",
            Self::Pushed => "pushed",
            Self::PullRequestOpenOrConfirmed => "pull_request_open_or_confirmed",
        }
    }
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the stage reached by the unit of work in progress.
#[derive(Debug)]
pub(super) struct UnitProgress {
    stage: PublishStage,
}

impl UnitProgress {
    pub(super) fn new() -> Self {
        Self {
            stage: PublishStage::Idle,
        }
    }

    pub(super) fn stage(&self) -> PublishStage {
        self.stage
    }

    /// Moves to `next`, which must directly follow the current stage.
    pub(super) fn advance(&mut self, next: PublishStage) {
        debug_assert_eq!(self.stage.next(), Some(next), "stages must advance in order");
        debug!(stage = %next, "Stage reached");
        self.stage = next;
    }

    /// Wraps a git failure with the last stage completed.
    pub(super) fn git_failure(&self, source: GitError) -> PublishError {
        PublishError::Git {
            stage: self.stage,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_form_a_chain() {
        let mut stage = PublishStage::Idle;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            visited.push(next);
            stage = next;
        }
        assert_eq!(visited.len(), 6);
        assert_eq!(stage, PublishStage::PullRequestOpenOrConfirmed);
    }

    #[test]
    fn git_failure_carries_stage() {
        let mut progress = UnitProgress::new();
        progress.advance(PublishStage::BranchPrepared);
        progress.advance(PublishStage::MutationsApplied);

        let error = progress.git_failure(GitError::Failed {
            command: "commit -m x".to_string(),
            stderr: "nothing to commit".to_string(),
        });
        assert!(matches!(
            error,
            PublishError::Git {
                stage: PublishStage::MutationsApplied,
                ..
            }
        ));
        assert!(error.to_string().contains("mutations_applied"));
    }
}
