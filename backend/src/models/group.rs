//! Policy group

use crate::collections::CollectionElement;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How many groups of this kind a user may join
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupRelationshipType {
    Single,
    #[default]
    Multiple,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyGroup {
    #[serde(skip)]
    id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub group_relationship_type: GroupRelationshipType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_access_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PolicyGroup {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl CollectionElement for PolicyGroup {
    const KIND: &'static str = "group";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn set_label(&mut self, label: String) {
        self.name = label;
    }

    fn default_label(index: usize) -> String {
        format!("New Group {}", index)
    }
}
