//! Extension references extracted from a build recipe.

use serde::Serialize;

/// File suffix of packaged editor extensions.
pub const BINARY_ASSET_SUFFIX: &str = ".vsix";

/// Returns true if the identifier names a packaged extension file rather
/// than a marketplace id.
#[must_use]
pub fn is_binary_asset(identifier: &str) -> bool {
    identifier.ends_with(BINARY_ASSET_SUFFIX)
}

/// An extension installed by marketplace identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionReference {
    /// Marketplace id in `namespace.name` form.
    pub identifier: String,

    /// Pinned version, if the install directive carries an `@version` suffix.
    pub current_version: Option<String>,
}

/// An extension downloaded from a GitHub release asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GithubAssetReference {
    /// Repository in `owner/repo` form.
    pub repo_slug: String,

    /// Release version taken from the download URL, without a leading `v`.
    pub current_version: String,

    /// Name of the downloaded `.vsix` file.
    pub asset_filename: String,
}

/// Result of matching a single recipe line against one line shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// An install directive naming a marketplace extension.
    Marketplace(ExtensionReference),

    /// An install directive naming a local `.vsix` file.
    BareAsset(String),

    /// A download of a `.vsix` from a GitHub release.
    GithubAsset(GithubAssetReference),

    /// The line does not have this shape.
    NoMatch,
}
