#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod git;
pub mod publisher;
pub mod pull_requests;
pub mod recipe;
pub mod registry;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod updates;

pub use config::{CommitterIdentity, ConfigError, TemplateFormats, UpdaterSettings};
pub use git::{GitError, GitWorkTree};
pub use publisher::{PublishError, PublishStage, PublishStrategy, Publisher};
pub use pull_requests::{PrError, PrStatus, PullRequestClient, PullRequestDescriptor};
pub use recipe::{
    apply_update, parse_download_line, parse_install_line, ExtensionReference,
    GithubAssetReference, LineMatch, RecipeError, RecipeScan,
};
pub use registry::{GithubReleases, OpenVsxClient, RegistryError, VersionOracle};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{PublishOutcome, RunSummary};
pub use templates::{branch_token, TemplateError, TemplateRenderer};
pub use updates::{CheckSubject, OutdatedUpdate, UpdateSource, VersionCheck};
