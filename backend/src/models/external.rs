//! Inputs owned by other subsystems
//!
//! Schemas, tokens, and published tools are supplied to the template from
//! outside. The template only reads the few fields it needs to build the
//! variable catalogue; everything else is carried in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schema visible to the policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Schema reference used by blocks
    #[serde(default)]
    pub iri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema {
    pub fn new(iri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Schema known only by reference (e.g. read from a block property)
    pub fn from_iri(iri: impl Into<String>) -> Self {
        let iri = iri.into();
        Self {
            name: iri.clone(),
            iri,
            ..Default::default()
        }
    }
}

/// An issued token visible to the policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(default)]
    pub token_id: String,
    #[serde(default)]
    pub token_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Token {
    pub fn new(token_id: impl Into<String>, token_name: impl Into<String>) -> Self {
        Self {
            token_id: token_id.into(),
            token_name: token_name.into(),
            ..Default::default()
        }
    }

    pub fn from_id(token_id: impl Into<String>) -> Self {
        let token_id = token_id.into();
        Self {
            token_name: token_id.clone(),
            token_id,
            ..Default::default()
        }
    }
}

/// A published tool that can be embedded in the policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Tool definition: `inputEvents`, `outputEvents`, `variables`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

impl ToolTemplate {
    pub fn new(name: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message_id: message_id.into(),
            ..Default::default()
        }
    }
}

/// A saved module whose subtree is copied into the policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleTemplate {
    pub config: crate::models::NodeConfig,
}
