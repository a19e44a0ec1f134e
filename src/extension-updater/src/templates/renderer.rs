//! Template renderer.

use crate::config::TemplateFormats;
use crate::recipe::BINARY_ASSET_SUFFIX;
use crate::updates::OutdatedUpdate;
use handlebars::{no_escape, Handlebars};
use serde_json::{json, Value};

const BRANCH_NAME: &str = "branch-name";
const COMMIT_TITLE: &str = "commit-title";
const PR_TITLE: &str = "pr-title";
const PR_BODY: &str = "pr-body";
const AGGREGATE_COMMIT_TITLE: &str = "aggregate-commit-title";
const AGGREGATE_PR_TITLE: &str = "aggregate-pr-title";
const AGGREGATE_PR_BODY: &str = "aggregate-pr-body";

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Disable HTML escaping for markdown output
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs
}

/// Turns an extension identifier into a token usable inside a branch name.
///
/// A trailing `.vsix` is dropped and `.`, `/` and `@` become `-`.
#[must_use]
pub fn branch_token(identifier: &str) -> String {
    identifier
        .strip_suffix(BINARY_ASSET_SUFFIX)
        .unwrap_or(identifier)
        .replace(['.', '/', '@'], "-")
}

/// Renders branch names, commit titles and pull request text for updates.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Compiles the configured formats.
    ///
    /// # Errors
    ///
    /// Returns an error if any format is not a valid Handlebars template.
    pub fn new(formats: &TemplateFormats) -> Result<Self, super::TemplateError> {
        let mut handlebars = create_handlebars_registry();
        for (name, format) in [
            (BRANCH_NAME, &formats.branch_name_format),
            (COMMIT_TITLE, &formats.commit_title_format),
            (PR_TITLE, &formats.pr_title_format),
            (PR_BODY, &formats.pr_body_format),
            (AGGREGATE_COMMIT_TITLE, &formats.aggregate_commit_title_format),
            (AGGREGATE_PR_TITLE, &formats.aggregate_pr_title_format),
            (AGGREGATE_PR_BODY, &formats.aggregate_pr_body_format),
        ] {
            handlebars.register_template_string(name, format)?;
        }
        Ok(Self { handlebars })
    }

    /// Branch holding a single update.
    pub fn branch_name(&self, update: &OutdatedUpdate) -> Result<String, super::TemplateError> {
        self.render(BRANCH_NAME, &update_data(update))
    }

    /// Commit title for a single update.
    pub fn commit_title(&self, update: &OutdatedUpdate) -> Result<String, super::TemplateError> {
        self.render(COMMIT_TITLE, &update_data(update))
    }

    /// Pull request title for a single update.
    ///
    /// The rendered commit title is available as `{{commit_title}}`.
    pub fn pr_title(&self, update: &OutdatedUpdate) -> Result<String, super::TemplateError> {
        let mut data = update_data(update);
        data["commit_title"] = Value::String(self.commit_title(update)?);
        self.render(PR_TITLE, &data)
    }

    /// Pull request body for a single update.
    pub fn pr_body(&self, update: &OutdatedUpdate) -> Result<String, super::TemplateError> {
        self.render(PR_BODY, &update_data(update))
    }

    /// Commit message listing every applied update, one `identifier: old -> new` per line.
    pub fn aggregate_commit_message(
        &self,
        updates: &[OutdatedUpdate],
    ) -> Result<String, super::TemplateError> {
        let title = self.render(AGGREGATE_COMMIT_TITLE, &aggregate_data(updates))?;
        let lines: Vec<String> = updates
            .iter()
            .map(|u| format!("{}: {} -> {}", u.identifier, u.old_version, u.new_version))
            .collect();
        Ok(format!("{title}\n\n{}", lines.join("\n")))
    }

    /// Pull request title for an aggregate update.
    pub fn aggregate_pr_title(
        &self,
        updates: &[OutdatedUpdate],
    ) -> Result<String, super::TemplateError> {
        self.render(AGGREGATE_PR_TITLE, &aggregate_data(updates))
    }

    /// Pull request body for an aggregate update.
    pub fn aggregate_pr_body(
        &self,
        updates: &[OutdatedUpdate],
    ) -> Result<String, super::TemplateError> {
        self.render(AGGREGATE_PR_BODY, &aggregate_data(updates))
    }

    fn render(&self, name: &str, data: &Value) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render(name, data)?)
    }
}

fn update_data(update: &OutdatedUpdate) -> Value {
    json!({
        "identifier": update.identifier,
        "token": branch_token(&update.identifier),
        "old_version": update.old_version,
        "new_version": update.new_version,
    })
}

fn aggregate_data(updates: &[OutdatedUpdate]) -> Value {
    json!({
        "count": updates.len(),
        "updates": updates.iter().map(update_data).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updates::UpdateSource;

    fn sample_update(identifier: &str) -> OutdatedUpdate {
        OutdatedUpdate {
            identifier: identifier.to_string(),
            old_version: "2023.1.0".to_string(),
            new_version: "2024.5.0".to_string(),
            source: UpdateSource::Marketplace,
        }
    }

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new(&TemplateFormats::default()).unwrap()
    }

    #[test]
    fn sanitizes_branch_tokens() {
        assert_eq!(branch_token("ms-python.python"), "ms-python-python");
        assert_eq!(branch_token("tool.vsix"), "tool");
        assert_eq!(branch_token("acme/tool@beta.vsix"), "acme-tool-beta");
    }

    #[test]
    fn renders_default_single_update_text() {
        let renderer = renderer();
        let update = sample_update("ms-python.python");

        assert_eq!(
            renderer.branch_name(&update).unwrap(),
            "update/ms-python-python-2024.5.0"
        );
        assert_eq!(
            renderer.commit_title(&update).unwrap(),
            "Update ms-python.python to 2024.5.0"
        );
        assert_eq!(
            renderer.pr_title(&update).unwrap(),
            "Automated: Update ms-python.python to 2024.5.0"
        );
        assert_eq!(
            renderer.pr_body(&update).unwrap(),
            "This PR updates `ms-python.python` from `2023.1.0` to `2024.5.0`."
        );
    }

    #[test]
    fn renders_aggregate_commit_message() {
        let renderer = renderer();
        let updates = vec![sample_update("ms-python.python"), sample_update("tool.vsix")];

        let message = renderer.aggregate_commit_message(&updates).unwrap();
        assert_eq!(
            message,
            "Update editor extensions\n\n\
             ms-python.python: 2023.1.0 -> 2024.5.0\n\
             tool.vsix: 2023.1.0 -> 2024.5.0"
        );

        let body = renderer.aggregate_pr_body(&updates).unwrap();
        assert!(body.contains("- `ms-python.python`: `2023.1.0` -> `2024.5.0`"));
        assert!(body.contains("- `tool.vsix`: `2023.1.0` -> `2024.5.0`"));
        assert_eq!(
            renderer.aggregate_pr_title(&updates).unwrap(),
            "Automated: Update 2 editor extension(s)"
        );
    }

    #[test]
    fn rejects_invalid_template() {
        let formats = TemplateFormats {
            branch_name_format: "update/{{#if}}".to_string(),
            ..TemplateFormats::default()
        };
        assert!(matches!(
            TemplateRenderer::new(&formats),
            Err(super::super::TemplateError::RegistrationError(_))
        ));
    }

    #[test]
    fn strict_mode_rejects_unknown_variables() {
        let formats = TemplateFormats {
            commit_title_format: "Bump {{extension}}".to_string(),
            ..TemplateFormats::default()
        };
        let renderer = TemplateRenderer::new(&formats).unwrap();
        assert!(renderer.commit_title(&sample_update("a.b")).is_err());
    }

    #[test]
    fn no_html_escaping() {
        let renderer = renderer();
        let mut update = sample_update("a.b");
        update.new_version = "<2.0>".to_string();

        assert_eq!(
            renderer.commit_title(&update).unwrap(),
            "Update a.b to <2.0>"
        );
    }
}
