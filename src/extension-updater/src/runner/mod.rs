//! Orchestrates a full scan, resolve and publish run.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::git::GitWorkTree;
use crate::publisher::{PublishStrategy, Publisher};
use crate::pull_requests::PullRequestClient;
use crate::recipe::{read_recipe, RecipeScan};
use crate::registry::{build_client, GithubReleases, OpenVsxClient, VersionOracle};
use crate::summary::RunSummary;
use crate::templates::TemplateRenderer;
use crate::updates::{OutdatedUpdate, VersionCheck};
use tracing::{info, warn};

/// Orchestrates one run against a local clone.
pub struct Runner {
    config: RunnerConfig,
    git: GitWorkTree,
    oracle: VersionOracle,
    pull_requests: PullRequestClient,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// Template formats are compiled here, so syntax errors surface before
    /// any lookup or git command.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the GitHub client cannot be built or a
    /// template does not compile.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let octocrab = build_client(
            config.token(),
            config.github_api_url().as_str().trim_end_matches('/'),
        )?;
        let oracle = VersionOracle::new(
            OpenVsxClient::new(config.marketplace_url().clone()),
            GithubReleases::new(octocrab.clone()),
        );
        let pull_requests = PullRequestClient::new(octocrab, config.owner(), config.name());
        let renderer = TemplateRenderer::new(config.templates())?;
        let git = GitWorkTree::new(config.repo_dir(), config.remote());

        Ok(Self {
            config,
            git,
            oracle,
            pull_requests,
            renderer,
        })
    }

    /// Executes the full orchestration flow: [`check`](Self::check), then
    /// [`publish`](Self::publish).
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on git failures, recipe I/O errors, template
    /// render errors, or a failed aggregate pull request.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let summary = self.check().await?;
        self.publish(summary).await
    }

    /// Syncs the base branch in live mode, then scans the recipe and resolves
    /// every extension against its registry.
    ///
    /// Each check is logged as soon as it is resolved, and the returned
    /// summary holds every check before anything is published.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if git fails or the recipe cannot be read.
    pub async fn check(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());

        if !self.config.dry_run() {
            let committer = self.config.committer();
            self.git
                .configure_identity(&committer.name, &committer.email)
                .await?;
            self.git.sync_base(self.config.base_branch()).await?;
        }

        let recipe_file = self.config.recipe_file();
        info!(path = %recipe_file.display(), "Scanning recipe");
        let text = read_recipe(&recipe_file)?;
        self.resolve(&RecipeScan::new(&text), &mut summary).await;

        info!(
            checked = summary.checks.len(),
            outdated = summary.outdated.len(),
            "Resolved extension versions"
        );
        Ok(summary)
    }

    /// Publishes the outdated updates of a summary produced by
    /// [`check`](Self::check). In dry-run mode only a preview is printed.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on git failures, recipe I/O errors, template
    /// render errors, or a failed aggregate pull request.
    pub async fn publish(&self, mut summary: RunSummary) -> Result<RunSummary, RunnerError> {
        if self.config.dry_run() {
            self.print_dry_run_preview(&summary.outdated);
            return Ok(summary);
        }

        if summary.outdated.is_empty() {
            info!("All extensions are up to date");
            return Ok(summary);
        }

        let publisher = Publisher::new(
            &self.git,
            &self.pull_requests,
            &self.renderer,
            self.config.recipe_path(),
            self.config.base_branch(),
            self.config.aggregate_branch(),
        );
        let outcomes = publisher
            .publish(self.config.strategy(), &summary.outdated)
            .await?;
        for outcome in outcomes {
            summary.record_outcome(outcome);
        }

        Ok(summary)
    }

    /// Looks up every reference in recipe order: marketplace extensions,
    /// then bare `.vsix` installs, then release downloads.
    async fn resolve(&self, scan: &RecipeScan<'_>, summary: &mut RunSummary) {
        for reference in scan.marketplace() {
            let latest = self
                .oracle
                .latest_marketplace_version(&reference.identifier)
                .await;
            let check = VersionCheck::marketplace(&reference, latest);
            info!(check = %check, "Checked extension");
            summary.record_check(check);
        }

        for filename in scan.bare_assets() {
            warn!(asset = %filename, "Cannot resolve a source for installed .vsix file");
            summary.unresolved_assets.push(filename);
        }

        for reference in scan.github_assets() {
            let latest = self
                .oracle
                .latest_github_release_version(&reference.repo_slug)
                .await;
            let check = VersionCheck::github_asset(&reference, latest);
            info!(check = %check, "Checked extension");
            summary.record_check(check);
        }
    }

    fn print_dry_run_preview(&self, updates: &[OutdatedUpdate]) {
        println!("\n[DRY RUN] Strategy: {}", self.config.strategy());
        if updates.is_empty() {
            println!("  All extensions are up to date.\n");
            return;
        }
        println!("  {} update(s) would be published:\n", updates.len());

        match self.config.strategy() {
            PublishStrategy::PerUpdate => {
                for (i, update) in updates.iter().enumerate() {
                    println!(
                        "  [{}/{}] {}: {} -> {}",
                        i + 1,
                        updates.len(),
                        update.identifier,
                        update.old_version,
                        update.new_version
                    );
                    if let Ok(branch) = self.renderer.branch_name(update) {
                        println!("    Would push branch: {branch}");
                    }
                    if let Ok(title) = self.renderer.pr_title(update) {
                        println!("    Would open PR: \"{title}\"");
                    }
                }
            }
            PublishStrategy::Aggregate => {
                for update in updates {
                    println!(
                        "  - {}: {} -> {}",
                        update.identifier, update.old_version, update.new_version
                    );
                }
                println!(
                    "\n  Would push branch: {}",
                    self.config.aggregate_branch()
                );
                if let Ok(title) = self.renderer.aggregate_pr_title(updates) {
                    println!("  Would open PR: \"{title}\"");
                }
            }
        }

        println!();
    }
}
