//! Settings file deserialization.

use super::ConfigError;
use crate::publisher::PublishStrategy;
use crate::registry::{DEFAULT_GITHUB_API_URL, DEFAULT_MARKETPLACE_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parsed contents of an optional `extension-updater.toml`.
///
/// Every key is optional; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct UpdaterSettings {
    /// Repository that receives pull requests, in `owner/name` form.
    pub repository: Option<String>,

    /// Branch that update branches start from and pull requests target.
    pub base_branch: String,

    /// Recipe path, relative to the repository root.
    pub recipe_path: PathBuf,

    /// Git remote to push to.
    pub remote: String,

    /// How updates are grouped into pull requests.
    pub strategy: PublishStrategy,

    /// Branch used by the aggregate strategy.
    pub aggregate_branch: String,

    /// Root of the Open VSX registry.
    pub marketplace_url: String,

    /// Root of the GitHub REST API.
    pub github_api_url: String,

    /// Identity recorded on commits.
    pub committer: CommitterIdentity,

    /// Handlebars formats for branch names, commits and pull requests.
    pub templates: TemplateFormats,
}

impl Default for UpdaterSettings {
    fn default() -> Self {
        Self {
            repository: None,
            base_branch: "master".to_string(),
            recipe_path: PathBuf::from("Dockerfile"),
            remote: "origin".to_string(),
            strategy: PublishStrategy::default(),
            aggregate_branch: "update/editor-extensions".to_string(),
            marketplace_url: DEFAULT_MARKETPLACE_URL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            committer: CommitterIdentity::default(),
            templates: TemplateFormats::default(),
        }
    }
}

impl UpdaterSettings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable or invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// Name and email used for commits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommitterIdentity {
    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,
}

impl Default for CommitterIdentity {
    fn default() -> Self {
        Self {
            name: "Extension Update Bot".to_string(),
            email: "bot@extension-updater".to_string(),
        }
    }
}

/// Handlebars formats used when publishing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TemplateFormats {
    /// Branch name for a single update.
    pub branch_name_format: String,

    /// Commit title for a single update.
    pub commit_title_format: String,

    /// Pull request title for a single update.
    pub pr_title_format: String,

    /// Pull request body for a single update.
    pub pr_body_format: String,

    /// Commit title for the aggregate update.
    pub aggregate_commit_title_format: String,

    /// Pull request title for the aggregate update.
    pub aggregate_pr_title_format: String,

    /// Pull request body for the aggregate update.
    pub aggregate_pr_body_format: String,
}

impl Default for TemplateFormats {
    fn default() -> Self {
        Self {
            branch_name_format: default_branch_name_format(),
            commit_title_format: default_commit_title_format(),
            pr_title_format: default_pr_title_format(),
            pr_body_format: default_pr_body_format(),
            aggregate_commit_title_format: default_aggregate_commit_title_format(),
            aggregate_pr_title_format: default_aggregate_pr_title_format(),
            aggregate_pr_body_format: default_aggregate_pr_body_format(),
        }
    }
}

pub(crate) fn default_branch_name_format() -> String {
    "update/{{token}}-{{new_version}}".to_string()
}

pub(crate) fn default_commit_title_format() -> String {
    "Update {{identifier}} to {{new_version}}".to_string()
}

pub(crate) fn default_pr_title_format() -> String {
    "Automated: {{commit_title}}".to_string()
}

pub(crate) fn default_pr_body_format() -> String {
    "This PR updates `{{identifier}}` from `{{old_version}}` to `{{new_version}}`.".to_string()
}

pub(crate) fn default_aggregate_commit_title_format() -> String {
    "Update editor extensions".to_string()
}

pub(crate) fn default_aggregate_pr_title_format() -> String {
    "Automated: Update {{count}} editor extension(s)".to_string()
}

pub(crate) fn default_aggregate_pr_body_format() -> String {
    "This PR updates the following editor extensions:\n\n\
     {{#each updates}}- `{{identifier}}`: `{{old_version}}` -> `{{new_version}}`\n{{/each}}"
        .to_string()
}
