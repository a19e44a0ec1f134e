//! A single branch and pull request for every update.

use super::stage::{PublishStage, UnitProgress};
use super::{PublishError, Publisher};
use crate::pull_requests::PullRequestDescriptor;
use crate::recipe::apply_update;
use crate::summary::PublishOutcome;
use crate::updates::OutdatedUpdate;
use tracing::{info, info_span, warn, Instrument};

impl Publisher<'_> {
    pub(super) async fn publish_aggregate(
        &self,
        updates: &[OutdatedUpdate],
    ) -> Result<Vec<PublishOutcome>, PublishError> {
        let span = info_span!("aggregate", branch = %self.aggregate_branch, count = updates.len());
        let outcomes = self.publish_all(updates).instrument(span).await?;

        self.return_to_base().await?;
        Ok(outcomes)
    }

    async fn publish_all(
        &self,
        updates: &[OutdatedUpdate],
    ) -> Result<Vec<PublishOutcome>, PublishError> {
        let branch = self.aggregate_branch.clone();
        let mut progress = UnitProgress::new();

        self.git
            .prepare_branch(&branch, &self.base_branch)
            .await
            .map_err(|e| progress.git_failure(e))?;
        progress.advance(PublishStage::BranchPrepared);

        let recipe_file = self.recipe_file();
        let mut applied = Vec::new();
        let mut missing = Vec::new();
        for update in updates {
            if apply_update(
                &recipe_file,
                &update.identifier,
                &update.old_version,
                &update.new_version,
            )? {
                applied.push(update.clone());
            } else {
                warn!(identifier = %update.identifier, "Install directive not found, skipping update");
                missing.push(update.clone());
            }
        }

        let mut outcomes = Vec::new();
        if !missing.is_empty() {
            outcomes.push(PublishOutcome::Skipped {
                branch: branch.clone(),
                updates: missing,
                reason: "install directive not found".to_string(),
            });
        }

        if applied.is_empty() {
            info!("No updates applied, nothing to commit");
            return Ok(outcomes);
        }
        progress.advance(PublishStage::MutationsApplied);

        let message = self.renderer.aggregate_commit_message(&applied)?;
        self.git
            .commit_paths(&[self.recipe_path()], &message)
            .await
            .map_err(|e| progress.git_failure(e))?;
        progress.advance(PublishStage::Committed);

        self.git
            .push(&branch, true)
            .await
            .map_err(|e| progress.git_failure(e))?;
        progress.advance(PublishStage::Pushed);

        let descriptor = PullRequestDescriptor {
            title: self.renderer.aggregate_pr_title(&applied)?,
            branch_name: branch.clone(),
            base_branch: self.base_branch.clone(),
            body: self.renderer.aggregate_pr_body(&applied)?,
        };

        let pr = self
            .pull_requests
            .open(&descriptor)
            .await
            .map_err(|source| PublishError::PullRequest {
                branch: branch.clone(),
                source,
            })?;
        progress.advance(PublishStage::PullRequestOpenOrConfirmed);
        info!(status = pr.as_str(), applied = applied.len(), "Pull request ready");

        outcomes.push(PublishOutcome::Published {
            branch,
            updates: applied,
            pr,
        });
        Ok(outcomes)
    }
}
