//! Git command error types.

use thiserror::Error;

/// Errors raised by git invocations. All of them abort the run.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be started.
    #[error("Failed to execute git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Git exited with a non-zero status.
    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}
