//! GitHub release lookups.

use super::error::RegistryError;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;

/// Public GitHub REST API.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Builds an authenticated GitHub client.
///
/// `base_uri` points the client at a GitHub Enterprise instance or a test
/// server instead of the public API.
///
/// # Errors
///
/// Returns an error if the base URI is invalid or the client cannot be built.
pub fn build_client(token: &str, base_uri: &str) -> Result<Octocrab, octocrab::Error> {
    // Both ring and aws-lc-rs can end up in the dependency graph; pin the
    // process-wide provider before any TLS config is built. An `Err` means
    // one is already installed.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    Octocrab::builder()
        .base_uri(base_uri)?
        .personal_token(token.to_string())
        .build()
}

/// Removes a single leading `v` from a release tag.
#[must_use]
pub fn strip_version_prefix(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Looks up the latest release of GitHub repositories.
#[derive(Debug, Clone)]
pub struct GithubReleases {
    octocrab: Octocrab,
}

impl GithubReleases {
    /// Wraps an authenticated client.
    #[must_use]
    pub fn new(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    /// Fetches the latest release tag for `repo_slug` without its `v` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the slug is malformed, the request fails,
    /// or the tag is empty.
    pub async fn latest_version(&self, repo_slug: &str) -> Result<String, RegistryError> {
        let (owner, repo) = match repo_slug.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => (owner, repo),
            _ => {
                return Err(RegistryError::MalformedRepository {
                    slug: repo_slug.to_string(),
                })
            }
        };

        let route = format!("/repos/{owner}/{repo}/releases/latest");
        debug!(route = %route, "Querying latest release");

        let release: LatestRelease = self.octocrab.get(route, None::<&()>).await?;
        let version = strip_version_prefix(release.tag_name.trim());
        if version.is_empty() {
            return Err(RegistryError::EmptyVersion {
                subject: repo_slug.to_string(),
            });
        }

        Ok(version.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_leading_v() {
        assert_eq!(strip_version_prefix("v1.3.0"), "1.3.0");
        assert_eq!(strip_version_prefix("1.3.0"), "1.3.0");
        assert_eq!(strip_version_prefix("vv2"), "v2");
    }
}
