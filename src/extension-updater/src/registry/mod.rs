//! Latest-version lookups against the extension registries.
//!
//! Two sources are consulted: the Open VSX marketplace for `namespace.name`
//! extensions and GitHub releases for `.vsix` assets downloaded from a
//! release. The clients report failures as [`RegistryError`]; the
//! [`VersionOracle`] logs them and reports the version as unknown.

mod error;
mod github;
mod open_vsx;

pub use error::RegistryError;
pub use github::{build_client, strip_version_prefix, GithubReleases, DEFAULT_GITHUB_API_URL};
pub use open_vsx::{split_identifier, OpenVsxClient, DEFAULT_MARKETPLACE_URL};

use tracing::warn;

/// Resolves the latest known version of extensions.
///
/// Lookups never fail: any error is logged and yields `None`.
#[derive(Debug, Clone)]
pub struct VersionOracle {
    marketplace: OpenVsxClient,
    releases: GithubReleases,
}

impl VersionOracle {
    /// Creates an oracle over the two registries.
    #[must_use]
    pub fn new(marketplace: OpenVsxClient, releases: GithubReleases) -> Self {
        Self {
            marketplace,
            releases,
        }
    }

    /// Latest marketplace version of `identifier`, or `None` if unknown.
    pub async fn latest_marketplace_version(&self, identifier: &str) -> Option<String> {
        match self.marketplace.latest_version(identifier).await {
            Ok(version) => Some(version),
            Err(e) => {
                warn!(identifier, error = %e, "Failed to fetch marketplace version");
                None
            }
        }
    }

    /// Latest release version of `repo_slug`, or `None` if unknown.
    pub async fn latest_github_release_version(&self, repo_slug: &str) -> Option<String> {
        match self.releases.latest_version(repo_slug).await {
            Ok(version) => Some(version),
            Err(e) => {
                warn!(repo = repo_slug, error = %e, "Failed to fetch latest release");
                None
            }
        }
    }
}
