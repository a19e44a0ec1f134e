//! Build recipe scanning and rewriting.
//!
//! The recipe is treated as flat, line-oriented text. Two line shapes are
//! recognised:
//!
//! ```text
//! RUN code-server --install-extension ms-python.python@2023.1.0
//! RUN wget https://github.com/acme/tool/releases/download/v1.2.0/tool.vsix
//! ```
//!
//! Reads and writes always cover the whole file.

mod error;
mod mutator;
mod reference;
mod scanner;

pub use error::RecipeError;
pub use mutator::{apply_update, rewrite_install_version};
pub use reference::{
    is_binary_asset, ExtensionReference, GithubAssetReference, LineMatch, BINARY_ASSET_SUFFIX,
};
pub use scanner::{
    parse_download_line, parse_install_directives, parse_install_line, RecipeScan,
};

use std::path::Path;

/// Reads the full recipe text.
///
/// # Errors
///
/// Returns [`RecipeError::IoError`] if the file cannot be read.
pub fn read_recipe(path: &Path) -> Result<String, RecipeError> {
    std::fs::read_to_string(path).map_err(|e| RecipeError::IoError {
        path: path.display().to_string(),
        source: e,
    })
}
