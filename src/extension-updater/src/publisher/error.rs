//! Publishing error types.

use super::PublishStage;
use crate::git::GitError;
use crate::pull_requests::PrError;
use crate::recipe::RecipeError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that abort publishing.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A git command failed. The working tree may be left on the update branch.
    #[error("Git failed after stage '{stage}': {source}")]
    Git {
        stage: PublishStage,
        #[source]
        source: GitError,
    },

    /// The recipe could not be read or written.
    #[error(transparent)]
    Recipe(#[from] RecipeError),

    /// A branch name, commit message or PR text failed to render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The aggregate pull request could not be opened.
    #[error("Failed to open pull request for '{branch}': {source}")]
    PullRequest {
        branch: String,
        #[source]
        source: PrError,
    },
}
