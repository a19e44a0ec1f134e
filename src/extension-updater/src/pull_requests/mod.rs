//! Pull request creation.
//!
//! Pull requests are opened through the GitHub REST API. A request that
//! GitHub rejects because a pull request for the branch is already open is
//! reported as [`PrStatus::AlreadyExists`], not as an error.

mod descriptor;
mod error;
mod status;

pub use descriptor::PullRequestDescriptor;
pub use error::PrError;
pub use status::PrStatus;

use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{debug, info};

/// Marker GitHub puts in the 422 response for a duplicate pull request.
const ALREADY_EXISTS_MARKER: &str = "pull request already exists";

#[derive(Debug, Deserialize)]
struct CreatedPullRequest {
    number: u64,
    #[serde(default)]
    html_url: Option<String>,
}

/// Opens pull requests against one repository.
#[derive(Debug, Clone)]
pub struct PullRequestClient {
    octocrab: Octocrab,
    owner: String,
    name: String,
}

impl PullRequestClient {
    /// Creates a client for `owner/name`.
    #[must_use]
    pub fn new(octocrab: Octocrab, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            octocrab,
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Opens a pull request, or confirms one is already open for the branch.
    ///
    /// The response body is inspected as raw text, so a 422 is recognised as
    /// a duplicate whatever shape GitHub gives its error document.
    ///
    /// # Errors
    ///
    /// Returns [`PrError`] for transport failures and for any response other
    /// than a 2xx or a duplicate 422.
    pub async fn open(&self, descriptor: &PullRequestDescriptor) -> Result<PrStatus, PrError> {
        let route = format!("/repos/{}/{}/pulls", self.owner, self.name);
        debug!(branch = %descriptor.branch_name, route = %route, "Opening pull request");

        let response = self
            .octocrab
            ._post(route.as_str(), Some(descriptor))
            .await?;
        let status = response.status().as_u16();
        let body = self.octocrab.body_to_string(response).await?;

        if (200..300).contains(&status) {
            let pr: CreatedPullRequest = serde_json::from_str(&body)?;
            let url = pr.html_url.unwrap_or_else(|| {
                format!(
                    "https://github.com/{}/{}/pull/{}",
                    self.owner, self.name, pr.number
                )
            });
            info!(pr_number = pr.number, url = %url, "PR created");
            return Ok(PrStatus::Created {
                number: pr.number,
                url,
            });
        }

        if is_already_exists(status, &body) {
            info!(branch = %descriptor.branch_name, "PR already exists");
            return Ok(PrStatus::AlreadyExists {
                branch: descriptor.branch_name.clone(),
            });
        }

        Err(PrError::UnexpectedStatus {
            status,
            body: body.trim().to_string(),
        })
    }
}

/// Checks if a response is GitHub's 422 for a duplicate pull request.
fn is_already_exists(status: u16, body: &str) -> bool {
    status == 422 && body.to_lowercase().contains(ALREADY_EXISTS_MARKER)
}
