//! Template rendering using Handlebars.
//!
//! Branch names, commit titles and pull request text are rendered from
//! configurable formats. Single-update formats receive `identifier`, `token`,
//! `old_version` and `new_version`; aggregate formats receive `count` and an
//! `updates` list of the same objects.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{branch_token, create_handlebars_registry, TemplateRenderer};
