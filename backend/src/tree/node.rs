//! Policy tree nodes
//!
//! Nodes live in a [`NodeArena`](crate::tree::NodeArena) keyed by id. Every
//! link between nodes (children, parent, owning module, resolved event
//! endpoints) is an id looked up in the arena, never an owning reference.

use crate::models::{EventConfig, NodeConfig};
use crate::tree::events::EventGraph;
use crate::tree::registry::NodeRegistry;
use serde::Serialize;
use serde_json::{Map, Value};

/// Stable, globally unique node identifier
pub type NodeId = String;

/// Node classification used by indexing and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Block,
    Module,
    Tool,
}

/// Variant-specific node state
#[derive(Debug, Clone)]
pub enum NodeVariant {
    /// Plain block; children share the enclosing scope
    Block,
    /// Module; owns the index scope over its descendants
    Module(ModuleScope),
    /// Tool; leaf referring to a published tool definition
    Tool(ToolLink),
}

impl NodeVariant {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeVariant::Block => NodeKind::Block,
            NodeVariant::Module(_) => NodeKind::Module,
            NodeVariant::Tool(_) => NodeKind::Tool,
        }
    }
}

/// Nested index scope owned by a module
#[derive(Debug, Clone, Default)]
pub struct ModuleScope {
    pub(crate) registry: NodeRegistry,
    pub(crate) events: EventGraph,
}

impl ModuleScope {
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn events(&self) -> &EventGraph {
        &self.events
    }
}

/// Reference from a tool node to its published definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolLink {
    pub message_id: Option<String>,
    pub hash: Option<String>,
}

/// Declared event edge
///
/// `source_tag`/`target_tag` are what the user typed; `source`/`target` are
/// filled by event resolution and stay `None` while the tag has no indexed
/// match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEvent {
    id: String,
    pub source_tag: String,
    pub target_tag: String,
    pub output: String,
    pub input: String,
    pub actor: String,
    pub disabled: bool,
    pub(crate) source: Option<NodeId>,
    pub(crate) target: Option<NodeId>,
}

impl PolicyEvent {
    pub fn from_config(id: String, config: &EventConfig) -> Self {
        Self {
            id,
            source_tag: config.source.clone(),
            target_tag: config.target.clone(),
            output: config.output.clone(),
            input: config.input.clone(),
            actor: config.actor.clone(),
            disabled: config.disabled,
            source: None,
            target: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }

    pub fn to_config(&self) -> EventConfig {
        EventConfig {
            source: self.source_tag.clone(),
            target: self.target_tag.clone(),
            output: self.output.clone(),
            input: self.input.clone(),
            actor: self.actor.clone(),
            disabled: self.disabled,
        }
    }
}

/// A node of the policy tree
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) tag: String,
    pub(crate) block_type: String,
    pub(crate) variant: NodeVariant,
    pub(crate) children: Vec<NodeId>,
    pub(crate) events: Vec<PolicyEvent>,
    pub(crate) permissions: Vec<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) module: Option<NodeId>,
    pub(crate) default_active: Option<bool>,
    pub(crate) properties: Map<String, Value>,
}

impl Node {
    /// Detached node with no children, events, or permissions
    pub fn new(
        id: impl Into<NodeId>,
        tag: impl Into<String>,
        block_type: impl Into<String>,
        variant: NodeVariant,
    ) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            block_type: block_type.into(),
            variant,
            children: Vec::new(),
            events: Vec::new(),
            permissions: Vec::new(),
            parent: None,
            module: None,
            default_active: None,
            properties: Map::new(),
        }
    }

    pub fn with_events(mut self, events: Vec<PolicyEvent>) -> Self {
        self.events = events;
        self
    }

    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_default_active(mut self, default_active: Option<bool>) -> Self {
        self.default_active = default_active;
        self
    }

    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn kind(&self) -> NodeKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> &NodeVariant {
        &self.variant
    }

    pub fn is_module(&self) -> bool {
        self.kind() == NodeKind::Module
    }

    pub fn is_tool(&self) -> bool {
        self.kind() == NodeKind::Tool
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn events(&self) -> &[PolicyEvent] {
        &self.events
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Module whose scope indexes this node (`None` for the template scope)
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn default_active(&self) -> Option<bool> {
        self.default_active
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Nested scope, for modules
    pub fn scope(&self) -> Option<&ModuleScope> {
        match &self.variant {
            NodeVariant::Module(scope) => Some(scope),
            _ => None,
        }
    }

    pub(crate) fn scope_mut(&mut self) -> Option<&mut ModuleScope> {
        match &mut self.variant {
            NodeVariant::Module(scope) => Some(scope),
            _ => None,
        }
    }

    /// Published tool reference, for tools
    pub fn tool(&self) -> Option<&ToolLink> {
        match &self.variant {
            NodeVariant::Tool(link) => Some(link),
            _ => None,
        }
    }

    /// Serialize this node alone; `children` are supplied by the caller
    pub(crate) fn to_config(&self, children: Vec<NodeConfig>) -> NodeConfig {
        let (message_id, hash) = match &self.variant {
            NodeVariant::Tool(link) => (link.message_id.clone(), link.hash.clone()),
            NodeVariant::Block | NodeVariant::Module(_) => (None, None),
        };
        NodeConfig {
            id: Some(self.id.clone()),
            tag: Some(self.tag.clone()),
            block_type: self.block_type.clone(),
            default_active: self.default_active,
            permissions: self.permissions.clone(),
            children,
            events: self.events.iter().map(PolicyEvent::to_config).collect(),
            message_id,
            hash,
            properties: self.properties.clone(),
        }
    }
}
