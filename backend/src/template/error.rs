use crate::tree::BuildError;
use thiserror::Error;

/// Errors raised by template operations
///
/// Every failing operation leaves the template exactly as it was.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to build node tree: {0}")]
    Build(#[from] BuildError),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Template has no source document")]
    Invalid,

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Invalid tool config: a tool template is required")]
    MissingToolTemplate,

    #[error("Tag '{0}' is already used in this scope")]
    TagInUse(String),

    #[error("Node {0} cannot be given an empty tag")]
    EmptyTag(String),

    #[error("Operation not allowed on the root node {0}")]
    RootNode(String),

    #[error("Node {0} is not attached to the tree")]
    NotAttached(String),

    #[error("Node {0} cannot hold children")]
    NotAContainer(String),

    #[error("Cannot move {node} under its own descendant {parent}")]
    Cycle { node: String, parent: String },
}
