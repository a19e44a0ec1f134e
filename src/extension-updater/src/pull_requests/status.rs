//! Pull request status types.

use serde::Serialize;

/// Status of a PR creation operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PrStatus {
    /// PR successfully created.
    Created {
        /// GitHub PR number.
        number: u64,
        /// GitHub PR URL.
        url: String,
    },

    /// An open PR for the branch already exists.
    AlreadyExists {
        /// Head branch of the existing PR.
        branch: String,
    },

    /// PR creation failed.
    Failed {
        /// Error message.
        error: String,
    },
}

impl PrStatus {
    /// Returns the status as a string for reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::AlreadyExists { .. } => "already_exists",
            Self::Failed { .. } => "failed",
        }
    }

    /// Returns the PR URL if created.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Created { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Returns true unless creation failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_pr_status_to_string() {
        assert_eq!(
            PrStatus::Created {
                number: 1,
                url: "https://example.com".to_string()
            }
            .as_str(),
            "created"
        );
        assert_eq!(
            PrStatus::AlreadyExists {
                branch: "update/x".to_string()
            }
            .as_str(),
            "already_exists"
        );
        assert_eq!(
            PrStatus::Failed {
                error: "test".to_string()
            }
            .as_str(),
            "failed"
        );
    }

    #[test]
    fn already_exists_counts_as_success() {
        assert!(PrStatus::AlreadyExists {
            branch: "update/x".to_string()
        }
        .is_success());
        assert!(!PrStatus::Failed {
            error: "boom".to_string()
        }
        .is_success());
    }
}
