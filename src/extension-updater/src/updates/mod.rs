//! Outdated extension detection.
//!
//! Each checked extension produces a [`VersionCheck`]. A check yields an
//! [`OutdatedUpdate`] only when both the current and the latest version are
//! known, non-empty, and different.

use crate::recipe::{ExtensionReference, GithubAssetReference};
use serde::Serialize;
use std::fmt;

/// Where the newer version of an update was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateSource {
    /// Open VSX marketplace.
    Marketplace,

    /// Latest release of a GitHub repository.
    GithubRelease {
        /// Repository in `owner/repo` form.
        repo_slug: String,
    },
}

/// A validated version change scheduled for the recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedUpdate {
    /// Marketplace id, or asset filename for release downloads.
    pub identifier: String,

    /// Version currently pinned in the recipe.
    pub old_version: String,

    /// Latest published version.
    pub new_version: String,

    /// Registry the new version came from.
    pub source: UpdateSource,
}

impl OutdatedUpdate {
    /// Creates an update if `current` and `latest` are both non-empty and differ.
    #[must_use]
    pub fn between(
        identifier: &str,
        current: Option<&str>,
        latest: Option<&str>,
        source: UpdateSource,
    ) -> Option<Self> {
        let old_version = current.filter(|v| !v.is_empty())?;
        let new_version = latest.filter(|v| !v.is_empty())?;
        if old_version == new_version {
            return None;
        }

        Some(Self {
            identifier: identifier.to_string(),
            old_version: old_version.to_string(),
            new_version: new_version.to_string(),
            source,
        })
    }
}

/// The extension a check was made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckSubject {
    /// Marketplace extension.
    Marketplace { identifier: String },

    /// `.vsix` asset from a GitHub release.
    GithubAsset {
        repo_slug: String,
        asset_filename: String,
    },
}

/// Outcome of resolving one extension against its registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionCheck {
    /// Checked extension.
    pub subject: CheckSubject,

    /// Version pinned in the recipe.
    pub current: Option<String>,

    /// Latest version, `None` when the registry lookup failed.
    pub latest: Option<String>,
}

impl VersionCheck {
    /// Records a marketplace lookup.
    #[must_use]
    pub fn marketplace(reference: &ExtensionReference, latest: Option<String>) -> Self {
        Self {
            subject: CheckSubject::Marketplace {
                identifier: reference.identifier.clone(),
            },
            current: reference.current_version.clone(),
            latest,
        }
    }

    /// Records a release lookup.
    #[must_use]
    pub fn github_asset(reference: &GithubAssetReference, latest: Option<String>) -> Self {
        Self {
            subject: CheckSubject::GithubAsset {
                repo_slug: reference.repo_slug.clone(),
                asset_filename: reference.asset_filename.clone(),
            },
            current: Some(reference.current_version.clone()),
            latest,
        }
    }

    /// The update this check calls for, if any.
    ///
    /// Release assets are keyed on their filename, not the repository.
    #[must_use]
    pub fn outdated(&self) -> Option<OutdatedUpdate> {
        let (identifier, source) = match &self.subject {
            CheckSubject::Marketplace { identifier } => (identifier, UpdateSource::Marketplace),
            CheckSubject::GithubAsset {
                repo_slug,
                asset_filename,
            } => (
                asset_filename,
                UpdateSource::GithubRelease {
                    repo_slug: repo_slug.clone(),
                },
            ),
        };

        OutdatedUpdate::between(
            identifier,
            self.current.as_deref(),
            self.latest.as_deref(),
            source,
        )
    }
}

impl fmt::Display for VersionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let latest = self.latest.as_deref().unwrap_or("unknown");
        let current = self.current.as_deref().unwrap_or("unpinned");
        let outdated = self.outdated().is_some();

        match &self.subject {
            CheckSubject::Marketplace { identifier } if outdated => {
                write!(f, "{identifier}@{current} -> {latest}  [UPDATE]")
            }
            CheckSubject::Marketplace { identifier } => {
                write!(f, "{identifier}@{current} (latest: {latest})")
            }
            CheckSubject::GithubAsset {
                repo_slug,
                asset_filename,
            } if outdated => write!(
                f,
                "{repo_slug} {asset_filename} (current: {current} -> {latest})  [UPDATE]"
            ),
            CheckSubject::GithubAsset {
                repo_slug,
                asset_filename,
            } => write!(
                f,
                "{repo_slug} {asset_filename} (current: {current}, latest: {latest})"
            ),
        }
    }
}
