//! Pull request descriptor.

use serde::Serialize;

/// Everything needed to open one pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestDescriptor {
    /// PR title.
    pub title: String,

    /// Head branch holding the changes.
    #[serde(rename = "head")]
    pub branch_name: String,

    /// Branch the PR targets.
    #[serde(rename = "base")]
    pub base_branch: String,

    /// Rendered PR body.
    pub body: String,
}
