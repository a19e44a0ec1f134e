//! CLI for the Extension Updater.
//!
//! This tool scans a container build recipe for pinned editor extensions,
//! resolves their latest versions and opens pull requests that bump them.

use clap::Parser;
use extension_updater::{
    PublishStrategy, RunSummary, Runner, RunnerConfig, RunnerError, UpdaterSettings,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Extension Updater - Bump editor extensions pinned in a build recipe and open pull requests.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML settings file.
    #[arg(long, env = "UPDATER_CONFIG")]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Root of the local clone holding the recipe.
    #[arg(long, env = "UPDATER_REPO_DIR", default_value = ".")]
    repo_dir: PathBuf,

    /// Repository that receives pull requests, as `owner/name`.
    #[arg(long, env = "UPDATER_REPOSITORY")]
    repository: Option<String>,

    /// Branch that updates start from and pull requests target.
    #[arg(long, env = "UPDATER_BASE_BRANCH")]
    base_branch: Option<String>,

    /// Recipe path relative to the repository root.
    #[arg(long, env = "UPDATER_RECIPE_PATH")]
    recipe_path: Option<PathBuf>,

    /// How updates are grouped: `per-update` or `aggregate`.
    #[arg(long, env = "UPDATER_STRATEGY")]
    strategy: Option<PublishStrategy>,

    /// Preview updates without touching files or git.
    #[arg(
        long,
        env = "UPDATER_DRY_RUN",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with compact output and `RUST_LOG` filtering,
/// falling back to `info`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mut settings = match &args.config {
        Some(path) => UpdaterSettings::load(path)?,
        None => UpdaterSettings::default(),
    };

    // Flags and their environment variables win over the settings file.
    if let Some(repository) = args.repository {
        settings.repository = Some(repository);
    }
    if let Some(base_branch) = args.base_branch {
        settings.base_branch = base_branch;
    }
    if let Some(recipe_path) = args.recipe_path {
        settings.recipe_path = recipe_path;
    }
    if let Some(strategy) = args.strategy {
        settings.strategy = strategy;
    }

    let config = RunnerConfig::new(settings, args.token, args.repo_dir, args.dry_run)?;
    let runner = Runner::new(config)?;

    // Report checks before publishing so they survive a publishing failure.
    let summary = runner.check().await?;
    print_checks(&summary);
    runner.publish(summary).await
}

/// Prints one line per checked extension.
fn print_checks(summary: &RunSummary) {
    println!("\nExtensions:");
    for check in &summary.checks {
        println!("  {check}");
    }
    for asset in &summary.unresolved_assets {
        println!("  {asset} (no resolvable source)");
    }
}

/// Prints publishing outcomes and the final counters.
fn print_summary(summary: &RunSummary) {
    if !summary.outcomes.is_empty() {
        println!("\nPublished:");
        for outcome in &summary.outcomes {
            println!("  {outcome}");
        }
    }

    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Extensions checked: {}", summary.checks.len());
    println!("  Outdated: {}", summary.outdated.len());

    if !summary.dry_run {
        println!("  Updates applied: {}", summary.updates_applied);
        println!("  Updates skipped: {}", summary.updates_skipped);
        println!("  PRs created: {}", summary.prs_created);
        println!("  PRs already open: {}", summary.prs_existing);
        println!("  PRs failed: {}", summary.prs_failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_env_accepts_truthy_values() {
        for (value, expected) in [
            ("1", true),
            ("yes", true),
            ("on", true),
            ("true", true),
            ("0", false),
            ("off", false),
        ] {
            temp_env::with_var("UPDATER_DRY_RUN", Some(value), || {
                let args = Args::try_parse_from(["extension-updater"]).unwrap();
                assert_eq!(args.dry_run, expected, "UPDATER_DRY_RUN={value}");
            });
        }
    }

    #[test]
    fn dry_run_flag_sets_mode() {
        temp_env::with_var_unset("UPDATER_DRY_RUN", || {
            let args = Args::try_parse_from(["extension-updater", "--dry-run"]).unwrap();
            assert!(args.dry_run);

            let args = Args::try_parse_from(["extension-updater"]).unwrap();
            assert!(!args.dry_run);
        });
    }

    #[test]
    fn strategy_flag_parses() {
        let args =
            Args::try_parse_from(["extension-updater", "--strategy", "aggregate"]).unwrap();
        assert_eq!(args.strategy, Some(PublishStrategy::Aggregate));
        assert!(Args::try_parse_from(["extension-updater", "--strategy", "batch"]).is_err());
    }
}
