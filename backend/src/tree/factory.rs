//! Node factory
//!
//! Interprets a node config's `blockType` and constructs the matching node
//! variant. The concrete block-type catalogue belongs to the editor; the
//! default [`CatalogueNodeFactory`] only checks membership in a
//! [`BlockCatalogue`].

use crate::core::IdGenerator;
use crate::models::NodeConfig;
use crate::tree::node::{ModuleScope, Node, NodeKind, NodeVariant, PolicyEvent, ToolLink};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Discriminator of the module variant
pub const MODULE_BLOCK_TYPE: &str = "module";

/// Discriminator of the tool variant
pub const TOOL_BLOCK_TYPE: &str = "tool";

/// Errors raised while constructing nodes
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Unknown block type: '{0}'")]
    UnknownBlockType(String),
}

/// Constructs a single node (without children) from its config
pub trait NodeFactory {
    /// Build the node for `config`. Children are built by the caller; the
    /// returned node must have none.
    fn build(
        &self,
        config: &NodeConfig,
        parent: Option<&str>,
        ids: &mut dyn IdGenerator,
    ) -> Result<Node, BuildError>;
}

/// Set of recognised plain block types (a JSON array of strings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockCatalogue {
    block_types: BTreeSet<String>,
}

const DEFAULT_BLOCK_TYPES: &[&str] = &[
    "interfaceContainerBlock",
    "interfaceStepBlock",
    "interfaceDocumentsSourceBlock",
    "interfaceActionBlock",
    "informationBlock",
    "policyRolesBlock",
    "groupManagerBlock",
    "requestVcDocumentBlock",
    "sendToGuardianBlock",
    "externalDataBlock",
    "documentsSourceAddon",
    "filtersAddon",
    "paginationAddon",
    "reassigningBlock",
    "aggregateDocumentBlock",
    "switchBlock",
    "buttonBlock",
    "customLogicBlock",
    "calculateContainerBlock",
    "calculateMathAddon",
    "mintDocumentBlock",
    "retirementDocumentBlock",
    "tokenActionBlock",
    "tokenConfirmationBlock",
    "timerBlock",
    "revokeBlock",
    "createTokenBlock",
    "splitBlock",
    "httpRequestBlock",
    "multiSignBlock",
    "reportBlock",
    "reportItemBlock",
];

impl Default for BlockCatalogue {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_TYPES.iter().copied())
    }
}

impl BlockCatalogue {
    pub fn new<I, S>(block_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            block_types: block_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, block_type: impl Into<String>) {
        self.block_types.insert(block_type.into());
    }

    /// Classify a discriminator; `module` and `tool` are always known
    pub fn classify(&self, block_type: &str) -> Result<NodeKind, BuildError> {
        match block_type {
            MODULE_BLOCK_TYPE => Ok(NodeKind::Module),
            TOOL_BLOCK_TYPE => Ok(NodeKind::Tool),
            other if self.block_types.contains(other) => Ok(NodeKind::Block),
            other => Err(BuildError::UnknownBlockType(other.to_string())),
        }
    }
}

/// Default factory backed by a [`BlockCatalogue`]
#[derive(Debug, Clone, Default)]
pub struct CatalogueNodeFactory {
    catalogue: BlockCatalogue,
}

impl CatalogueNodeFactory {
    pub fn new(catalogue: BlockCatalogue) -> Self {
        Self { catalogue }
    }

    pub fn catalogue(&self) -> &BlockCatalogue {
        &self.catalogue
    }
}

impl NodeFactory for CatalogueNodeFactory {
    fn build(
        &self,
        config: &NodeConfig,
        _parent: Option<&str>,
        ids: &mut dyn IdGenerator,
    ) -> Result<Node, BuildError> {
        let variant = match self.catalogue.classify(&config.block_type)? {
            NodeKind::Block => NodeVariant::Block,
            NodeKind::Module => NodeVariant::Module(ModuleScope::default()),
            NodeKind::Tool => NodeVariant::Tool(ToolLink {
                message_id: config.message_id.clone(),
                hash: config.hash.clone(),
            }),
        };

        let id = match config.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => ids.next_id(),
        };
        let events = config
            .events
            .iter()
            .map(|event| PolicyEvent::from_config(ids.next_id(), event))
            .collect();

        Ok(Node::new(
            id,
            config.tag.clone().unwrap_or_default(),
            config.block_type.clone(),
            variant,
        )
        .with_events(events)
        .with_permissions(config.permissions.clone())
        .with_default_active(config.default_active)
        .with_properties(config.properties.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequentialIdGenerator;

    #[test]
    fn test_classify() {
        let catalogue = BlockCatalogue::default();
        assert_eq!(catalogue.classify("module"), Ok(NodeKind::Module));
        assert_eq!(catalogue.classify("tool"), Ok(NodeKind::Tool));
        assert_eq!(catalogue.classify("informationBlock"), Ok(NodeKind::Block));
        assert_eq!(
            catalogue.classify("mysteryBlock"),
            Err(BuildError::UnknownBlockType("mysteryBlock".to_string()))
        );
    }

    #[test]
    fn test_factory_generates_missing_id() {
        let factory = CatalogueNodeFactory::default();
        let mut ids = SequentialIdGenerator::new("n");
        let node = factory
            .build(&NodeConfig::of_type("informationBlock"), None, &mut ids)
            .unwrap();
        assert_eq!(node.id(), "n-1");
        assert_eq!(node.tag(), "");
    }

    #[test]
    fn test_factory_builds_tool_link() {
        let factory = CatalogueNodeFactory::default();
        let mut ids = SequentialIdGenerator::new("n");
        let mut config = NodeConfig::of_type("tool").with_id("t1");
        config.message_id = Some("1700000000.000000001".to_string());
        let node = factory.build(&config, None, &mut ids).unwrap();
        assert!(node.is_tool());
        assert_eq!(
            node.tool().and_then(|t| t.message_id.as_deref()),
            Some("1700000000.000000001")
        );
    }
}
