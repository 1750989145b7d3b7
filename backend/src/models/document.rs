//! Serialized policy document
//!
//! The JSON shape exchanged with the backend. A [`PolicyDocument`] is the
//! input to template construction and the output of `get_json`. Node
//! configs nest recursively through `children`; unknown keys on a node are
//! kept in `properties` so the block-type specific settings survive a round
//! trip untouched.

use crate::models::group::PolicyGroup;
use crate::models::token::PolicyToken;
use crate::models::topic::PolicyTopic;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Complete policy document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_topic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchronization_topic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date: Option<String>,

    /// Role names, in ordinal order
    #[serde(default)]
    pub policy_roles: Vec<String>,
    #[serde(default)]
    pub policy_groups: Vec<PolicyGroup>,
    #[serde(default)]
    pub policy_topics: Vec<PolicyTopic>,
    #[serde(default)]
    pub policy_tokens: Vec<PolicyToken>,

    /// Root node configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<NodeConfig>,
}

impl PolicyDocument {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Serialized node (block, module, or tool)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Variant discriminator (`module`, `tool`, or a catalogue block type)
    #[serde(default)]
    pub block_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventConfig>,

    /// Tool definition message (tools only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Tool definition hash (tools only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Block-type specific settings, carried verbatim
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl NodeConfig {
    /// Minimal config of the given block type
    pub fn of_type(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_child(mut self, child: NodeConfig) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_event(mut self, event: EventConfig) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    /// True when nothing identifies what to build
    pub fn is_empty(&self) -> bool {
        self.block_type.is_empty() && self.children.is_empty()
    }
}

/// Serialized event edge; endpoints are node tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfig {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    /// Output name on the source node
    #[serde(default)]
    pub output: String,
    /// Input name on the target node
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub disabled: bool,
}

impl EventConfig {
    pub fn new(
        source: impl Into<String>,
        output: impl Into<String>,
        target: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            output: output.into(),
            input: input.into(),
            ..Default::default()
        }
    }
}
