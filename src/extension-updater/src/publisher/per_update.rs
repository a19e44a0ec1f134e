//! One branch and pull request per update.

use super::stage::{PublishStage, UnitProgress};
use super::{PublishError, Publisher};
use crate::config::validate_branch_name;
use crate::pull_requests::{PrStatus, PullRequestDescriptor};
use crate::recipe::apply_update;
use crate::summary::PublishOutcome;
use crate::updates::OutdatedUpdate;
use tracing::{error, info, info_span, warn, Instrument};

impl Publisher<'_> {
    pub(super) async fn publish_per_update(
        &self,
        updates: &[OutdatedUpdate],
    ) -> Result<Vec<PublishOutcome>, PublishError> {
        let mut outcomes = Vec::with_capacity(updates.len());

        for update in updates {
            let span = info_span!(
                "update",
                identifier = %update.identifier,
                new_version = %update.new_version
            );
            let outcome = self.publish_one(update).instrument(span).await?;
            outcomes.push(outcome);
        }

        self.return_to_base().await?;
        Ok(outcomes)
    }

    async fn publish_one(&self, update: &OutdatedUpdate) -> Result<PublishOutcome, PublishError> {
        let branch = self.renderer.branch_name(update)?;
        if let Err(e) = validate_branch_name("branch-name-format", &branch) {
            warn!(branch = %branch, error = %e, "Skipping update with invalid branch name");
            return Ok(skipped(branch, update, e.to_string()));
        }

        let mut progress = UnitProgress::new();

        self.git
            .prepare_branch(&branch, &self.base_branch)
            .await
            .map_err(|e| progress.git_failure(e))?;
        progress.advance(PublishStage::BranchPrepared);

        let applied = apply_update(
            &self.recipe_file(),
            &update.identifier,
            &update.old_version,
            &update.new_version,
        )?;
        if !applied {
            warn!(branch = %branch, "Install directive not found, skipping update");
            return Ok(skipped(
                branch,
                update,
                "install directive not found".to_string(),
            ));
        }
        progress.advance(PublishStage::MutationsApplied);

        let commit_title = self.renderer.commit_title(update)?;
        self.git
            .commit_paths(&[self.recipe_path()], &commit_title)
            .await
            .map_err(|e| progress.git_failure(e))?;
        progress.advance(PublishStage::Committed);

        self.git
            .push(&branch, true)
            .await
            .map_err(|e| progress.git_failure(e))?;
        progress.advance(PublishStage::Pushed);

        let descriptor = PullRequestDescriptor {
            title: self.renderer.pr_title(update)?,
            branch_name: branch.clone(),
            base_branch: self.base_branch.clone(),
            body: self.renderer.pr_body(update)?,
        };

        let pr = match self.pull_requests.open(&descriptor).await {
            Ok(status) => {
                progress.advance(PublishStage::PullRequestOpenOrConfirmed);
                info!(branch = %branch, status = status.as_str(), "Pull request ready");
                status
            }
            Err(e) => {
                error!(
                    branch = %branch,
                    stage = %progress.stage(),
                    error = %e,
                    "Failed to open pull request"
                );
                PrStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        Ok(PublishOutcome::Published {
            branch,
            updates: vec![update.clone()],
            pr,
        })
    }
}

fn skipped(branch: String, update: &OutdatedUpdate, reason: String) -> PublishOutcome {
    PublishOutcome::Skipped {
        branch,
        updates: vec![update.clone()],
        reason,
    }
}
