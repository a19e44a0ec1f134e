//! Registry lookup error types.

use thiserror::Error;

/// Errors that can occur while looking up a latest version.
///
/// None of these are fatal to a run; the oracle turns them into an unknown version.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Marketplace identifier is not in `namespace.name` form.
    #[error("Malformed extension identifier '{identifier}': expected 'namespace.name'")]
    MalformedIdentifier { identifier: String },

    /// Repository slug is not in `owner/repo` form.
    #[error("Malformed repository slug '{slug}': expected 'owner/repo'")]
    MalformedRepository { slug: String },

    /// Transport or decoding failure talking to the marketplace.
    #[error("Marketplace request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Marketplace answered with something other than 200 OK.
    #[error("Marketplace returned HTTP {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Registry answered without a usable version.
    #[error("Registry returned no version for '{subject}'")]
    EmptyVersion { subject: String },

    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}
