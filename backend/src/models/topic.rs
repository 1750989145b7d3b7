//! Policy topic

use crate::collections::CollectionElement;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_topic_type() -> String {
    "any".to_string()
}

fn default_memo_obj() -> String {
    "topic".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTopic {
    #[serde(skip)]
    id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_topic_type", rename = "type")]
    pub topic_type: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default = "default_memo_obj")]
    pub memo_obj: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PolicyTopic {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            topic_type: default_topic_type(),
            is_static: false,
            memo_obj: default_memo_obj(),
            extra: Map::new(),
        }
    }
}

impl PolicyTopic {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl CollectionElement for PolicyTopic {
    const KIND: &'static str = "topic";

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
        format!("New Topic {}", index)
    }
}
