//! Recipe file error types.

use thiserror::Error;

/// Errors that can occur while reading or rewriting the recipe.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Failed to read or write the recipe.
    #[error("Failed to access recipe '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to move the rewritten recipe over the original.
    #[error("Failed to replace recipe '{path}': {source}")]
    PersistError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
