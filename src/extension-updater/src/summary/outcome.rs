//! Publishing outcome types.

use crate::pull_requests::PrStatus;
use crate::updates::OutdatedUpdate;
use serde::Serialize;
use std::fmt;

/// Result of one unit of publishing work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// Changes were committed and pushed, and a PR was requested.
    Published {
        /// Branch holding the changes.
        branch: String,
        /// Updates recorded in the commit.
        updates: Vec<OutdatedUpdate>,
        /// PR creation status.
        pr: PrStatus,
    },

    /// Nothing was committed for these updates.
    Skipped {
        /// Branch the updates were meant for.
        branch: String,
        /// Updates that were not applied.
        updates: Vec<OutdatedUpdate>,
        /// Reason for skipping.
        reason: String,
    },
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published { branch, pr, .. } => match pr {
                PrStatus::Created { url, .. } => write!(f, "PR created: {url}"),
                PrStatus::AlreadyExists { .. } => write!(f, "PR already exists for {branch}"),
                PrStatus::Failed { error } => {
                    write!(f, "Failed to create PR for {branch}: {error}")
                }
            },
            Self::Skipped {
                updates, reason, ..
            } => {
                let identifiers: Vec<&str> =
                    updates.iter().map(|u| u.identifier.as_str()).collect();
                write!(f, "Skipped {} ({reason})", identifiers.join(", "))
            }
        }
    }
}
