//! Template configuration
//!
//! Tunables for the template model. All fields have defaults so a partial
//! JSON file is enough to override one of them.

use serde::{Deserialize, Serialize};

/// Block type used for the root when a document carries no `config`
pub const DEFAULT_ROOT_BLOCK_TYPE: &str = "interfaceContainerBlock";

/// Exclusive ceiling for numeric tag suffixes (`Block_1` .. `Block_999`)
pub const DEFAULT_MAX_TAG_SUFFIX: usize = 1000;

/// Maximum nesting depth accepted by the consistency validator
pub const DEFAULT_MAX_TREE_DEPTH: usize = 100;

/// Configuration for a [`PolicyTemplate`](crate::template::PolicyTemplate)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Tag generation tries suffixes `1..max_tag_suffix`
    pub max_tag_suffix: usize,

    /// Root block type substituted for an absent or empty root config
    pub root_block_type: String,

    /// Depth limit checked by `validate_template`
    pub max_tree_depth: usize,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            max_tag_suffix: DEFAULT_MAX_TAG_SUFFIX,
            root_block_type: DEFAULT_ROOT_BLOCK_TYPE.to_string(),
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
        }
    }
}

impl TemplateConfig {
    /// Parse a (possibly partial) configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = TemplateConfig::from_json(r#"{"max_tag_suffix": 5}"#).unwrap();
        assert_eq!(config.max_tag_suffix, 5);
        assert_eq!(config.root_block_type, DEFAULT_ROOT_BLOCK_TYPE);
        assert_eq!(config.max_tree_depth, DEFAULT_MAX_TREE_DEPTH);
    }
}
