//! Runner configuration.

use crate::config::{
    parse_repository_slug, parse_url, require_non_empty, validate_branch_name, CommitterIdentity,
    ConfigError, TemplateFormats, UpdaterSettings,
};
use crate::publisher::PublishStrategy;
use std::path::{Path, PathBuf};
use url::Url;

/// Validated configuration for one run. Immutable once built.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// GitHub token used for API calls.
    token: String,
    /// Root of the local clone.
    repo_dir: PathBuf,
    /// Repository owner.
    owner: String,
    /// Repository name.
    name: String,
    /// Branch updates start from and target.
    base_branch: String,
    /// Recipe path relative to `repo_dir`.
    recipe_path: PathBuf,
    /// Git remote to push to.
    remote: String,
    /// How updates are grouped into pull requests.
    strategy: PublishStrategy,
    /// Branch used by the aggregate strategy.
    aggregate_branch: String,
    /// Open VSX root.
    marketplace_url: Url,
    /// GitHub API root.
    github_api_url: Url,
    /// Commit identity.
    committer: CommitterIdentity,
    /// Handlebars formats.
    templates: TemplateFormats,
    /// Whether to preview changes without touching files or git.
    dry_run: bool,
}

impl RunnerConfig {
    /// Validates `settings` and the credential into a run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the token is missing, the repository slug,
    /// a branch name or a URL is malformed, the committer identity is empty,
    /// or the recipe does not exist under `repo_dir`.
    pub fn new(
        settings: UpdaterSettings,
        token: Option<String>,
        repo_dir: PathBuf,
        dry_run: bool,
    ) -> Result<Self, ConfigError> {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingCredential)?;

        let slug = settings
            .repository
            .as_deref()
            .ok_or_else(|| ConfigError::ValidationError {
                key: "repository".to_string(),
                message: "must be set in the settings file or with --repository".to_string(),
            })?;
        let (owner, name) = parse_repository_slug("repository", slug)?;

        validate_branch_name("base-branch", &settings.base_branch)?;
        validate_branch_name("aggregate-branch", &settings.aggregate_branch)?;
        require_non_empty("remote", &settings.remote)?;

        let marketplace_url = parse_url("marketplace-url", &settings.marketplace_url)?;
        let github_api_url = parse_url("github-api-url", &settings.github_api_url)?;

        require_non_empty("committer.name", &settings.committer.name)?;
        require_non_empty("committer.email", &settings.committer.email)?;

        let recipe_file = repo_dir.join(&settings.recipe_path);
        if !recipe_file.is_file() {
            return Err(ConfigError::MissingFile {
                path: recipe_file.display().to_string(),
            });
        }

        Ok(Self {
            token,
            repo_dir,
            owner: owner.to_string(),
            name: name.to_string(),
            base_branch: settings.base_branch,
            recipe_path: settings.recipe_path,
            remote: settings.remote,
            strategy: settings.strategy,
            aggregate_branch: settings.aggregate_branch,
            marketplace_url,
            github_api_url,
            committer: settings.committer,
            templates: settings.templates,
            dry_run,
        })
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the root of the local clone.
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base branch.
    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    /// Returns the recipe path relative to the clone.
    pub fn recipe_path(&self) -> &Path {
        &self.recipe_path
    }

    /// Returns the recipe path on disk.
    pub fn recipe_file(&self) -> PathBuf {
        self.repo_dir.join(&self.recipe_path)
    }

    /// Returns the git remote.
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Returns the publishing strategy.
    pub fn strategy(&self) -> PublishStrategy {
        self.strategy
    }

    /// Returns the aggregate branch name.
    pub fn aggregate_branch(&self) -> &str {
        &self.aggregate_branch
    }

    /// Returns the Open VSX root.
    pub fn marketplace_url(&self) -> &Url {
        &self.marketplace_url
    }

    /// Returns the GitHub API root.
    pub fn github_api_url(&self) -> &Url {
        &self.github_api_url
    }

    /// Returns the commit identity.
    pub fn committer(&self) -> &CommitterIdentity {
        &self.committer
    }

    /// Returns the template formats.
    pub fn templates(&self) -> &TemplateFormats {
        &self.templates
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn repo_with_recipe() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Dockerfile"), "FROM scratch\n").unwrap();
        temp
    }

    fn settings() -> UpdaterSettings {
        UpdaterSettings {
            repository: Some("acme/images".to_string()),
            ..UpdaterSettings::default()
        }
    }

    #[test]
    fn builds_from_defaults() {
        let repo = repo_with_recipe();
        let config = RunnerConfig::new(
            settings(),
            Some("token".to_string()),
            repo.path().to_path_buf(),
            false,
        )
        .unwrap();

        assert_eq!(config.owner(), "acme");
        assert_eq!(config.name(), "images");
        assert_eq!(config.base_branch(), "master");
        assert_eq!(config.strategy(), PublishStrategy::PerUpdate);
        assert_eq!(config.recipe_file(), repo.path().join("Dockerfile"));
        assert_eq!(config.marketplace_url().as_str(), "https://open-vsx.org/");
    }

    #[test]
    fn missing_or_blank_token_is_fatal() {
        let repo = repo_with_recipe();
        for token in [None, Some(String::new()), Some("  ".to_string())] {
            let result = RunnerConfig::new(settings(), token, repo.path().to_path_buf(), false);
            assert!(matches!(result, Err(ConfigError::MissingCredential)));
        }
    }

    #[test]
    fn repository_is_required() {
        let repo = repo_with_recipe();
        let result = RunnerConfig::new(
            UpdaterSettings::default(),
            Some("token".to_string()),
            repo.path().to_path_buf(),
            false,
        );
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref key, .. }) if key == "repository"
        ));
    }

    #[test]
    fn rejects_invalid_branch() {
        let repo = repo_with_recipe();
        let result = RunnerConfig::new(
            UpdaterSettings {
                base_branch: "bad..branch".to_string(),
                ..settings()
            },
            Some("token".to_string()),
            repo.path().to_path_buf(),
            false,
        );
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref key, .. }) if key == "base-branch"
        ));
    }

    #[test]
    fn rejects_empty_committer() {
        let repo = repo_with_recipe();
        let mut invalid = settings();
        invalid.committer.email = String::new();
        let result = RunnerConfig::new(
            invalid,
            Some("token".to_string()),
            repo.path().to_path_buf(),
            false,
        );
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref key, .. }) if key == "committer.email"
        ));
    }

    #[test]
    fn missing_recipe_is_fatal() {
        let repo = TempDir::new().unwrap();
        let result = RunnerConfig::new(
            settings(),
            Some("token".to_string()),
            repo.path().to_path_buf(),
            false,
        );
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }
}
