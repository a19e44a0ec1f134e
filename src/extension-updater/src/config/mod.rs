//! Configuration loading and validation.
//!
//! Settings come from an optional TOML file and are overridden by
//! command-line flags or environment variables. The validated result is a
//! [`RunnerConfig`](crate::runner::RunnerConfig), built once per run.
//!
//! ```toml
//! repository = "acme/images"
//! base-branch = "master"
//! recipe-path = "images/mid/Dockerfile"
//! strategy = "per-update"
//!
//! [committer]
//! name = "Extension Update Bot"
//! email = "bot@example.com"
//!
//! [templates]
//! branch-name-format = "update/{{token}}-{{new_version}}"
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{CommitterIdentity, TemplateFormats, UpdaterSettings};

use bstr::ByteSlice;
use url::Url;

/// Splits an `owner/name` repository slug.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] unless the slug has exactly two
/// non-empty parts.
pub fn parse_repository_slug<'a>(
    key: &str,
    slug: &'a str,
) -> Result<(&'a str, &'a str), ConfigError> {
    match slug.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("expected 'owner/name', got '{slug}'"),
        }),
    }
}

/// Checks that `branch` is a valid git branch name.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] describing why git would reject it.
pub fn validate_branch_name(key: &str, branch: &str) -> Result<(), ConfigError> {
    gix_validate::reference::name_partial(branch.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("'{branch}' is not a valid branch name: {e}"),
        })
}

/// Parses an absolute URL setting.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] if the URL cannot be parsed.
pub fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("'{value}' is not a valid URL: {e}"),
    })
}

/// Rejects empty or whitespace-only values.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] if `value` is blank.
pub fn require_non_empty(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repository_slug() {
        assert_eq!(
            parse_repository_slug("repository", "acme/images").unwrap(),
            ("acme", "images")
        );
        for bad in ["acme", "acme/", "/images", "acme/images/extra"] {
            assert!(matches!(
                parse_repository_slug("repository", bad),
                Err(ConfigError::ValidationError { .. })
            ));
        }
    }

    #[test]
    fn validates_branch_names() {
        assert!(validate_branch_name("base-branch", "master").is_ok());
        assert!(validate_branch_name("base-branch", "update/ms-python-python-2024.5.0").is_ok());
        assert!(validate_branch_name("base-branch", "bad..name").is_err());
        assert!(validate_branch_name("base-branch", "has space").is_err());
        assert!(validate_branch_name("base-branch", "").is_err());
    }

    #[test]
    fn validates_urls() {
        assert!(parse_url("marketplace-url", "https://open-vsx.org").is_ok());
        assert!(parse_url("marketplace-url", "open-vsx.org").is_err());
    }

    #[test]
    fn rejects_blank_values() {
        assert!(require_non_empty("committer.name", "Bot").is_ok());
        assert!(require_non_empty("committer.name", "  ").is_err());
    }
}
