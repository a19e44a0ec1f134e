//! Run summary types.

use super::outcome::PublishOutcome;
use crate::pull_requests::PrStatus;
use crate::updates::{OutdatedUpdate, VersionCheck};

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Every version check, in recipe order.
    pub checks: Vec<VersionCheck>,

    /// `.vsix` files installed without a resolvable source.
    pub unresolved_assets: Vec<String>,

    /// Updates found to be outdated.
    pub outdated: Vec<OutdatedUpdate>,

    /// Publishing outcomes, one per unit of work or skipped update.
    pub outcomes: Vec<PublishOutcome>,

    /// Number of updates committed.
    pub updates_applied: usize,

    /// Number of updates whose install directive was not rewritten.
    pub updates_skipped: usize,

    /// Number of PRs successfully created.
    pub prs_created: usize,

    /// Number of PRs that were already open.
    pub prs_existing: usize,

    /// Number of PRs that failed to create.
    pub prs_failed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Records a version check, tracking the update it calls for.
    pub fn record_check(&mut self, check: VersionCheck) {
        if let Some(update) = check.outdated() {
            self.outdated.push(update);
        }
        self.checks.push(check);
    }

    /// Updates the summary with a publishing outcome.
    pub fn record_outcome(&mut self, outcome: PublishOutcome) {
        match &outcome {
            PublishOutcome::Published { updates, pr, .. } => {
                self.updates_applied += updates.len();
                match pr {
                    PrStatus::Created { .. } => self.prs_created += 1,
                    PrStatus::AlreadyExists { .. } => self.prs_existing += 1,
                    PrStatus::Failed { .. } => self.prs_failed += 1,
                }
            }
            PublishOutcome::Skipped { updates, .. } => self.updates_skipped += updates.len(),
        }
        self.outcomes.push(outcome);
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.prs_failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::ExtensionReference;
    use crate::updates::UpdateSource;

    fn update() -> OutdatedUpdate {
        OutdatedUpdate {
            identifier: "a.b".to_string(),
            old_version: "1.0".to_string(),
            new_version: "2.0".to_string(),
            source: UpdateSource::Marketplace,
        }
    }

    #[test]
    fn records_outdated_checks() {
        let mut summary = RunSummary::new(false);
        let reference = ExtensionReference {
            identifier: "a.b".to_string(),
            current_version: Some("1.0".to_string()),
        };

        summary.record_check(VersionCheck::marketplace(&reference, Some("2.0".to_string())));
        summary.record_check(VersionCheck::marketplace(&reference, None));

        assert_eq!(summary.checks.len(), 2);
        assert_eq!(summary.outdated, vec![update()]);
    }

    #[test]
    fn can_record_outcomes() {
        let mut summary = RunSummary::new(false);

        summary.record_outcome(PublishOutcome::Published {
            branch: "update/a-b-2.0".to_string(),
            updates: vec![update()],
            pr: PrStatus::AlreadyExists {
                branch: "update/a-b-2.0".to_string(),
            },
        });
        summary.record_outcome(PublishOutcome::Skipped {
            branch: "update/c-d-2.0".to_string(),
            updates: vec![update()],
            reason: "install directive not found".to_string(),
        });

        assert_eq!(summary.updates_applied, 1);
        assert_eq!(summary.updates_skipped, 1);
        assert_eq!(summary.prs_existing, 1);
        assert!(!summary.has_failures());

        summary.record_outcome(PublishOutcome::Published {
            branch: "update/e-f-2.0".to_string(),
            updates: vec![update()],
            pr: PrStatus::Failed {
                error: "HTTP 500".to_string(),
            },
        });
        assert!(summary.has_failures());
    }
}
