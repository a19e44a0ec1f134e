//! Line-oriented extraction of extension references.

use super::reference::{is_binary_asset, ExtensionReference, GithubAssetReference, LineMatch};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static INSTALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"code-server\s+--install-extension\s+([^\s@\\;&|"']+)(?:@([^\s\\;&|"']+))?"#)
        .unwrap()
});

static DOWNLOAD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:wget|curl)\b.*github\.com/([^/\s]+/[^/\s]+)/releases/download/v?([0-9.]+)/([^\s]+\.vsix)",
    )
    .unwrap()
});

/// Parses the first install directive on a line, such as
/// `code-server --install-extension ms-python.python@2023.1.0`.
///
/// Shell separators (`;`, `&`, `|`) and quotes end the identifier and version.
/// Use [`parse_install_directives`] for lines chaining several directives.
#[must_use]
pub fn parse_install_line(line: &str) -> LineMatch {
    parse_install_directives(line)
        .next()
        .unwrap_or(LineMatch::NoMatch)
}

/// Parses every install directive on a line, in order.
pub fn parse_install_directives(line: &str) -> impl Iterator<Item = LineMatch> + '_ {
    INSTALL_PATTERN.captures_iter(line).map(|captures| {
        let identifier = captures[1].to_string();
        if is_binary_asset(&identifier) {
            return LineMatch::BareAsset(identifier);
        }

        LineMatch::Marketplace(ExtensionReference {
            identifier,
            current_version: captures.get(2).map(|m| m.as_str().to_string()),
        })
    })
}

/// Parses a download of a `.vsix` release asset, e.g.
/// `wget https://github.com/acme/tool/releases/download/v1.2.0/tool.vsix`.
///
/// The optional `v` in front of the version is not part of the captured version.
#[must_use]
pub fn parse_download_line(line: &str) -> LineMatch {
    match DOWNLOAD_PATTERN.captures(line) {
        Some(captures) => LineMatch::GithubAsset(GithubAssetReference {
            repo_slug: captures[1].to_string(),
            current_version: captures[2].to_string(),
            asset_filename: captures[3].to_string(),
        }),
        None => LineMatch::NoMatch,
    }
}

/// Borrowed view over a recipe's text.
///
/// Every accessor walks the text from the start, so repeated calls yield
/// identical sequences.
#[derive(Debug, Clone, Copy)]
pub struct RecipeScan<'a> {
    text: &'a str,
}

impl<'a> RecipeScan<'a> {
    /// Creates a scan over the full recipe text.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Marketplace extensions in order of first appearance.
    pub fn marketplace(&self) -> impl Iterator<Item = ExtensionReference> + 'a {
        let mut seen = HashSet::new();
        self.text
            .lines()
            .flat_map(parse_install_directives)
            .filter_map(|parsed| match parsed {
                LineMatch::Marketplace(reference) => Some(reference),
                _ => None,
            })
            .filter(move |reference| seen.insert(reference.identifier.clone()))
    }

    /// `.vsix` files installed directly, with no resolvable source.
    pub fn bare_assets(&self) -> impl Iterator<Item = String> + 'a {
        let mut seen = HashSet::new();
        self.text
            .lines()
            .flat_map(parse_install_directives)
            .filter_map(|parsed| match parsed {
                LineMatch::BareAsset(filename) => Some(filename),
                _ => None,
            })
            .filter(move |filename| seen.insert(filename.clone()))
    }

    /// Release assets downloaded from GitHub.
    pub fn github_assets(&self) -> impl Iterator<Item = GithubAssetReference> + 'a {
        let mut seen = HashSet::new();
        self.text
            .lines()
            .filter_map(|line| match parse_download_line(line) {
                LineMatch::GithubAsset(reference) => Some(reference),
                _ => None,
            })
            .filter(move |reference| {
                seen.insert((reference.repo_slug.clone(), reference.asset_filename.clone()))
            })
    }
}
