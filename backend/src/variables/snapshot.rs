//! Variable snapshot types
//!
//! A [`VariableSnapshot`] is the flattened catalogue of everything a block
//! setting may refer to. It is rebuilt from scratch after every change and
//! never edited in place.

use crate::models::role::{ANY_ROLE, NO_ROLE, OWNER};
use crate::models::{PolicyGroup, PolicyRole, PolicyToken, PolicyTopic, Schema, Token, ToolTemplate};
use serde::Serialize;

/// Display name of the "nothing selected" entry
pub const NONE_LABEL: &str = "None";

/// Name/value entry used by most categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Sentinel entry heading every defaulted category
    pub fn none() -> Self {
        Self::new(NONE_LABEL, "")
    }

    pub fn is_none(&self) -> bool {
        self.value.is_empty() && self.name == NONE_LABEL
    }

    pub fn from_token(token: &Token) -> Self {
        Self::new(&token.token_name, &token.token_id)
    }

    pub fn from_role(role: &PolicyRole) -> Self {
        Self::new(role.name(), role.name())
    }

    pub fn from_group(group: &PolicyGroup) -> Self {
        Self::new(&group.name, &group.name)
    }

    pub fn from_topic(topic: &PolicyTopic) -> Self {
        Self::new(&topic.name, &topic.name)
    }

    pub fn from_token_template(token: &PolicyToken) -> Self {
        Self::new(&token.template_token_tag, &token.template_token_tag)
    }
}

/// Schema entry; `issues` is filled by the schema consistency check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaVariable {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl SchemaVariable {
    pub fn none() -> Self {
        Self {
            name: NONE_LABEL.to_string(),
            value: String::new(),
            version: None,
            status: None,
            issues: Vec::new(),
        }
    }

    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            name: schema.name.clone(),
            value: schema.iri.clone(),
            version: schema.version.clone(),
            status: schema.status.clone(),
            issues: Vec::new(),
        }
    }
}

/// Published tool entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolVariable {
    pub name: String,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl ToolVariable {
    pub fn from_tool(tool: &ToolTemplate) -> Self {
        Self {
            name: tool.name.clone(),
            message_id: tool.message_id.clone(),
            hash: tool.hash.clone(),
        }
    }
}

/// Built-in role entries, in display order
pub fn builtin_roles() -> Vec<Variable> {
    vec![
        Variable::new("Owner", OWNER),
        Variable::new("No Role", NO_ROLE),
        Variable::new("Any Role", ANY_ROLE),
    ]
}

/// Flattened catalogue of addressable capabilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableSnapshot {
    pub(crate) schemas: Vec<SchemaVariable>,
    pub(crate) tokens: Vec<Variable>,
    pub(crate) roles: Vec<Variable>,
    pub(crate) groups: Vec<Variable>,
    pub(crate) topics: Vec<Variable>,
    pub(crate) tools: Vec<ToolVariable>,
    pub(crate) token_templates: Vec<Variable>,
}

impl Default for VariableSnapshot {
    /// Snapshot with only the synthetic entries
    fn default() -> Self {
        Self {
            schemas: vec![SchemaVariable::none()],
            tokens: vec![Variable::none()],
            roles: builtin_roles(),
            groups: vec![Variable::none()],
            topics: vec![Variable::none()],
            tools: Vec::new(),
            token_templates: vec![Variable::none()],
        }
    }
}

impl VariableSnapshot {
    pub fn schemas(&self) -> &[SchemaVariable] {
        &self.schemas
    }

    pub fn tokens(&self) -> &[Variable] {
        &self.tokens
    }

    pub fn roles(&self) -> &[Variable] {
        &self.roles
    }

    pub fn groups(&self) -> &[Variable] {
        &self.groups
    }

    pub fn topics(&self) -> &[Variable] {
        &self.topics
    }

    pub fn tools(&self) -> &[ToolVariable] {
        &self.tools
    }

    pub fn token_templates(&self) -> &[Variable] {
        &self.token_templates
    }
}
