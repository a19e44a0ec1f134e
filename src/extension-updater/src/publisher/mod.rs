//! Turns outdated updates into branches, commits and pull requests.
//!
//! Every unit of work runs prepare, mutate, commit, push and open in that
//! order on the shared working tree. Units never overlap.
//!
//! - [`PublishStrategy::PerUpdate`]: one branch and pull request per update.
//! - [`PublishStrategy::Aggregate`]: a single branch and pull request for all
//!   updates.

mod aggregate;
mod error;
mod per_update;
mod stage;

pub use error::PublishError;
pub use stage::PublishStage;

use crate::git::GitWorkTree;
use crate::pull_requests::PullRequestClient;
use crate::summary::PublishOutcome;
use crate::templates::TemplateRenderer;
use crate::updates::OutdatedUpdate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How updates are grouped into pull requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublishStrategy {
    /// One branch and pull request per update.
    #[default]
    PerUpdate,

    /// All updates in one branch and pull request.
    Aggregate,
}

impl PublishStrategy {
    /// Returns the strategy as it is spelled in settings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerUpdate => "per-update",
            Self::Aggregate => "aggregate",
        }
    }
}

impl fmt::Display for PublishStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-update" => Ok(Self::PerUpdate),
            "aggregate" => Ok(Self::Aggregate),
            other => Err(format!(
                "unknown strategy '{other}', expected 'per-update' or 'aggregate'"
            )),
        }
    }
}

/// Collaborators shared by every unit of work.
pub struct Publisher<'a> {
    git: &'a GitWorkTree,
    pull_requests: &'a PullRequestClient,
    renderer: &'a TemplateRenderer,
    recipe_path: PathBuf,
    base_branch: String,
    aggregate_branch: String,
}

impl<'a> Publisher<'a> {
    /// Creates a publisher. `recipe_path` is relative to the working tree root.
    #[must_use]
    pub fn new(
        git: &'a GitWorkTree,
        pull_requests: &'a PullRequestClient,
        renderer: &'a TemplateRenderer,
        recipe_path: impl Into<PathBuf>,
        base_branch: impl Into<String>,
        aggregate_branch: impl Into<String>,
    ) -> Self {
        Self {
            git,
            pull_requests,
            renderer,
            recipe_path: recipe_path.into(),
            base_branch: base_branch.into(),
            aggregate_branch: aggregate_branch.into(),
        }
    }

    /// Publishes `updates` with the given strategy.
    ///
    /// Pull request failures of the per-update strategy are reported as
    /// outcomes and do not stop the remaining updates.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when git, the recipe file or a template
    /// fails, or when the aggregate pull request cannot be opened.
    pub async fn publish(
        &self,
        strategy: PublishStrategy,
        updates: &[OutdatedUpdate],
    ) -> Result<Vec<PublishOutcome>, PublishError> {
        if updates.is_empty() {
            return Ok(Vec::new());
        }

        match strategy {
            PublishStrategy::PerUpdate => self.publish_per_update(updates).await,
            PublishStrategy::Aggregate => self.publish_aggregate(updates).await,
        }
    }

    /// Recipe path relative to the working tree, as passed to `git add`.
    fn recipe_path(&self) -> &Path {
        &self.recipe_path
    }

    /// Recipe path on disk.
    fn recipe_file(&self) -> PathBuf {
        self.git.root().join(&self.recipe_path)
    }

    async fn return_to_base(&self) -> Result<(), PublishError> {
        self.git
            .checkout(&self.base_branch)
            .await
            .map_err(|source| PublishError::Git {
                stage: PublishStage::Idle,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_parses_settings_spelling() {
        assert_eq!(
            "per-update".parse::<PublishStrategy>(),
            Ok(PublishStrategy::PerUpdate)
        );
        assert_eq!(
            "aggregate".parse::<PublishStrategy>(),
            Ok(PublishStrategy::Aggregate)
        );
        assert!("batch".parse::<PublishStrategy>().is_err());
    }

    #[test]
    fn strategy_round_trips_through_display() {
        for strategy in [PublishStrategy::PerUpdate, PublishStrategy::Aggregate] {
            assert_eq!(strategy.to_string().parse::<PublishStrategy>(), Ok(strategy));
        }
    }

    #[test]
    fn per_update_is_default() {
        assert_eq!(PublishStrategy::default(), PublishStrategy::PerUpdate);
    }
}
