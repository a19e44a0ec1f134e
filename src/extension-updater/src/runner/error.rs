//! Runner error types.

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading and validation errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Invalid template formats.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Git failures outside a unit of work.
    #[error(transparent)]
    Git(#[from] crate::git::GitError),

    /// The recipe could not be read.
    #[error(transparent)]
    Recipe(#[from] crate::recipe::RecipeError),

    /// Publishing failures.
    #[error(transparent)]
    Publish(#[from] crate::publisher::PublishError),
}
