//! In-place version rewrites of install directives.

use super::error::RecipeError;
use regex::Regex;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Rewrites every `code-server --install-extension <identifier>@<old_version>`
/// directive to `<new_version>`.
///
/// The version token must end at whitespace, a line continuation, a quote, a
/// shell separator (`;`, `&`, `|`) or the end of the line, so `foo.bar@1.0`
/// never matches `foo.bar@1.0.1`. All other bytes of the text are preserved.
///
/// Returns `None` if no directive matched.
#[must_use]
pub fn rewrite_install_version(
    text: &str,
    identifier: &str,
    old_version: &str,
    new_version: &str,
) -> Option<String> {
    let pattern = format!(
        r#"(?m)(code-server[ \t]+--install-extension[ \t]+){}@{}([\s\\"';&|]|$)"#,
        regex::escape(identifier),
        regex::escape(old_version)
    );
    // Both inputs are escaped, so the pattern is always well formed.
    let directive = Regex::new(&pattern).ok()?;

    if !directive.is_match(text) {
        return None;
    }

    let rewritten = directive.replace_all(text, |captures: &regex::Captures<'_>| {
        format!("{}{identifier}@{new_version}{}", &captures[1], &captures[2])
    });
    Some(rewritten.into_owned())
}

/// Applies a version rewrite to the recipe file at `path`.
///
/// The whole file is read, rewritten in memory, and written back through a
/// temporary file in the same directory that replaces the original. Returns
/// `Ok(false)` without touching the file when no directive matched; callers
/// treat that as a skipped update.
///
/// # Errors
///
/// Returns [`RecipeError`] if the file cannot be read or replaced.
pub fn apply_update(
    path: &Path,
    identifier: &str,
    old_version: &str,
    new_version: &str,
) -> Result<bool, RecipeError> {
    let text = super::read_recipe(path)?;

    let Some(rewritten) = rewrite_install_version(&text, identifier, old_version, new_version)
    else {
        debug!(
            identifier,
            old_version, "Install directive not found, leaving recipe unchanged"
        );
        return Ok(false);
    };

    write_recipe(path, &rewritten)?;
    info!(identifier, old_version, new_version, "Updated recipe");
    Ok(true)
}

fn write_recipe(path: &Path, contents: &str) -> Result<(), RecipeError> {
    let io_error = |source| RecipeError::IoError {
        path: path.display().to_string(),
        source,
    };

    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let permissions = std::fs::metadata(path).map_err(io_error)?.permissions();

    let mut staged = tempfile::NamedTempFile::new_in(directory).map_err(io_error)?;
    staged
        .as_file()
        .set_permissions(permissions)
        .map_err(io_error)?;
    staged.write_all(contents.as_bytes()).map_err(io_error)?;
    staged.flush().map_err(io_error)?;
    staged
        .persist(path)
        .map_err(|e| RecipeError::PersistError {
            path: path.display().to_string(),
            source: e.error,
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RECIPE: &str = "FROM ubuntu:22.04\r\n\
RUN code-server --install-extension ms-python.python@2023.1.0 && \\\r\n\
    code-server --install-extension redhat.vscode-yaml@1.0 \\\r\n\
    && code-server --install-extension redhat.vscode-yaml@1.0.1\r\n";

    #[test]
    fn rewrites_matching_directive() {
        let rewritten =
            rewrite_install_version(RECIPE, "ms-python.python", "2023.1.0", "2024.5.0").unwrap();

        assert!(rewritten
            .contains("RUN code-server --install-extension ms-python.python@2024.5.0 && \\\r\n"));
        assert_eq!(rewritten.len(), RECIPE.len());
    }

    #[test]
    fn respects_version_token_boundary() {
        let rewritten =
            rewrite_install_version(RECIPE, "redhat.vscode-yaml", "1.0", "1.2").unwrap();

        assert!(rewritten.contains("redhat.vscode-yaml@1.2 \\"));
        assert!(rewritten.contains("redhat.vscode-yaml@1.0.1\r\n"));
    }

    #[test]
    fn keeps_trailing_shell_separator() {
        let text = "RUN code-server --install-extension a.b@1.0; echo done\n";
        assert_eq!(
            rewrite_install_version(text, "a.b", "1.0", "1.1").as_deref(),
            Some("RUN code-server --install-extension a.b@1.1; echo done\n")
        );
    }

    #[test]
    fn leaves_other_lines_byte_identical() {
        let rewritten =
            rewrite_install_version(RECIPE, "ms-python.python", "2023.1.0", "2024.5.0").unwrap();

        let before: Vec<_> = RECIPE.split_inclusive('\n').collect();
        let after: Vec<_> = rewritten.split_inclusive('\n').collect();
        assert_eq!(before.len(), after.len());

        let changed: Vec<_> = before
            .iter()
            .zip(&after)
            .enumerate()
            .filter(|(_, (b, a))| b != a)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(changed, vec![1]);
    }

    #[test]
    fn identifier_metacharacters_are_literal() {
        let text = "code-server --install-extension msXpython.python@1.0\n";
        assert_eq!(
            rewrite_install_version(text, "ms.python.python", "1.0", "2.0"),
            None
        );
    }

    #[test]
    fn returns_none_when_version_absent() {
        assert_eq!(
            rewrite_install_version(RECIPE, "ms-python.python", "2022.0.0", "2024.5.0"),
            None
        );
    }

    #[test]
    fn apply_update_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Dockerfile");
        fs::write(&path, RECIPE).unwrap();

        assert!(apply_update(&path, "ms-python.python", "2023.1.0", "2024.5.0").unwrap());
        let once = fs::read(&path).unwrap();

        assert!(!apply_update(&path, "ms-python.python", "2023.1.0", "2024.5.0").unwrap());
        assert_eq!(fs::read(&path).unwrap(), once);
    }

    #[test]
    fn apply_update_missing_version_leaves_file_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Dockerfile");
        fs::write(&path, RECIPE).unwrap();

        assert!(!apply_update(&path, "foo.bar", "1.0.0", "1.1.0").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), RECIPE);
    }

    #[test]
    fn apply_update_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = apply_update(&temp.path().join("missing"), "a.b", "1", "2");
        assert!(matches!(result, Err(RecipeError::IoError { .. })));
    }
}
