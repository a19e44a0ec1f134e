//! Git working tree operations.
//!
//! All version control goes through the `git` binary. Every unit of work
//! shares one working tree and branch pointer, so callers must finish one
//! prepare/commit/push sequence before starting the next.

mod error;

pub use error::GitError;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A local clone driven through the `git` command line.
#[derive(Debug, Clone)]
pub struct GitWorkTree {
    root: PathBuf,
    remote: String,
}

impl GitWorkTree {
    /// Wraps the working tree at `root`, pushing to `remote`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            remote: remote.into(),
        }
    }

    /// Root directory of the working tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sets the committer identity in the repository's local config.
    pub async fn configure_identity(&self, name: &str, email: &str) -> Result<(), GitError> {
        self.run(&["config", "user.name", name]).await?;
        self.run(&["config", "user.email", email]).await?;
        Ok(())
    }

    /// Checks out `base` and fast-forwards it to the remote tip.
    pub async fn sync_base(&self, base: &str) -> Result<(), GitError> {
        debug!(base, "Syncing base branch");
        self.run(&["fetch", &self.remote, base]).await?;
        self.run(&["checkout", base]).await?;
        self.run(&["pull", "--ff-only", &self.remote, base]).await?;
        Ok(())
    }

    /// Discards local changes and points `branch` at the tip of `base`,
    /// creating it if needed, then checks it out.
    pub async fn prepare_branch(&self, branch: &str, base: &str) -> Result<(), GitError> {
        debug!(branch, base, "Preparing branch");
        self.run(&["checkout", "--force", base]).await?;
        self.run(&["reset", "--hard"]).await?;
        self.run(&["checkout", "-B", branch]).await?;
        Ok(())
    }

    /// Stages `paths` and records a commit with `message`.
    pub async fn commit_paths(&self, paths: &[&Path], message: &str) -> Result<(), GitError> {
        let mut add = vec!["add".to_string(), "--".to_string()];
        add.extend(paths.iter().map(|p| p.to_string_lossy().into_owned()));
        let add: Vec<&str> = add.iter().map(String::as_str).collect();

        self.run(&add).await?;
        self.run(&["commit", "-m", message]).await?;
        Ok(())
    }

    /// Pushes `branch` to the remote, overwriting it when `force` is set.
    pub async fn push(&self, branch: &str, force: bool) -> Result<(), GitError> {
        let mut args = vec!["push", "--set-upstream"];
        if force {
            args.push("--force");
        }
        args.push(&self.remote);
        args.push(branch);

        self.run(&args).await
    }

    /// Checks out an existing branch.
    pub async fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", branch]).await
    }

    /// Runs a git command in the working tree.
    async fn run(&self, args: &[&str]) -> Result<(), GitError> {
        debug!(command = %args.join(" "), "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| GitError::Spawn {
                command: args.join(" "),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::Failed {
                command: args.join(" "),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failing_command_reports_stderr() {
        let temp = tempfile::TempDir::new().unwrap();
        let git = GitWorkTree::new(temp.path(), "origin");

        // Not a repository, so every repository command fails.
        match git.checkout("master").await {
            Err(GitError::Failed { command, stderr }) => {
                assert_eq!(command, "checkout master");
                assert!(!stderr.is_empty());
            }
            // No git binary on this machine.
            Err(GitError::Spawn { .. }) => {}
            Ok(()) => panic!("checkout outside a repository must fail"),
        }
    }
}
