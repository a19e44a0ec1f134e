//! Open VSX marketplace client.

use super::error::RegistryError;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Public Open VSX instance.
pub const DEFAULT_MARKETPLACE_URL: &str = "https://open-vsx.org";

#[derive(Debug, Deserialize)]
struct LatestExtension {
    #[serde(default)]
    version: Option<String>,
}

/// Splits a marketplace identifier into namespace and name at the first `.`.
///
/// # Errors
///
/// Returns [`RegistryError::MalformedIdentifier`] if there is no separator or
/// either side is empty.
pub fn split_identifier(identifier: &str) -> Result<(&str, &str), RegistryError> {
    match identifier.split_once('.') {
        Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => {
            Ok((namespace, name))
        }
        _ => Err(RegistryError::MalformedIdentifier {
            identifier: identifier.to_string(),
        }),
    }
}

/// Looks up latest extension versions on an Open VSX registry.
#[derive(Debug, Clone)]
pub struct OpenVsxClient {
    http: reqwest::Client,
    base_url: Url,
}

impl OpenVsxClient {
    /// Creates a client for the registry rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetches the latest published version of `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] for malformed identifiers, transport errors,
    /// non-200 responses, undecodable bodies and empty versions.
    pub async fn latest_version(&self, identifier: &str) -> Result<String, RegistryError> {
        let (namespace, name) = split_identifier(identifier)?;
        let url = format!(
            "{}/api/{namespace}/{name}/latest",
            self.base_url.as_str().trim_end_matches('/')
        );
        debug!(url = %url, "Querying marketplace");

        let response = self.http.get(&url).send().await?;
        if response.status() != reqwest::StatusCode::OK {
            return Err(RegistryError::UnexpectedStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        let body: LatestExtension = response.json().await?;
        body.version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| RegistryError::EmptyVersion {
                subject: identifier.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_separator() {
        let (namespace, name) = split_identifier("ms-python.python.extra").unwrap();
        assert_eq!(namespace, "ms-python");
        assert_eq!(name, "python.extra");
    }

    #[test]
    fn rejects_identifier_without_separator() {
        assert!(matches!(
            split_identifier("python"),
            Err(RegistryError::MalformedIdentifier { .. })
        ));
        assert!(matches!(
            split_identifier(".python"),
            Err(RegistryError::MalformedIdentifier { .. })
        ));
    }
}
