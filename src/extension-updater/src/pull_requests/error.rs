//! Pull request error types.

use thiserror::Error;

/// Errors that can occur during PR operations.
#[derive(Debug, Error)]
pub enum PrError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// GitHub rejected the request.
    #[error("GitHub returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A successful response could not be decoded.
    #[error("Failed to decode pull request response: {0}")]
    JsonError(#[from] serde_json::Error),
}
