//! Policy lifecycle status
//!
//! The status string on a document is classified once, at construction or
//! rebuild, into a small set of read-only flags.

use serde::{Deserialize, Serialize};

/// Known document status values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyStatus {
    Draft,
    Published,
    DryRun,
    PublishError,
    /// Any status this model does not interpret (kept verbatim)
    Other(String),
}

impl PolicyStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "DRAFT" => PolicyStatus::Draft,
            "PUBLISH" => PolicyStatus::Published,
            "DRY-RUN" => PolicyStatus::DryRun,
            "PUBLISH_ERROR" => PolicyStatus::PublishError,
            other => PolicyStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PolicyStatus::Draft => "DRAFT",
            PolicyStatus::Published => "PUBLISH",
            PolicyStatus::DryRun => "DRY-RUN",
            PolicyStatus::PublishError => "PUBLISH_ERROR",
            PolicyStatus::Other(s) => s,
        }
    }
}

/// Derived status flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusFlags {
    pub is_draft: bool,
    pub is_published: bool,
    pub is_dry_run: bool,
    pub is_publish_error: bool,
    /// True iff published, dry-run, or publish-error
    pub readonly: bool,
}

impl StatusFlags {
    pub fn classify(status: Option<&str>) -> Self {
        let Some(status) = status else {
            return Self::default();
        };
        let status = PolicyStatus::parse(status);
        let is_draft = status == PolicyStatus::Draft;
        let is_published = status == PolicyStatus::Published;
        let is_dry_run = status == PolicyStatus::DryRun;
        let is_publish_error = status == PolicyStatus::PublishError;
        Self {
            is_draft,
            is_published,
            is_dry_run,
            is_publish_error,
            readonly: is_published || is_dry_run || is_publish_error,
        }
    }
}
