//! Policy token template
//!
//! A token template is a placeholder token definition inside the policy;
//! blocks refer to it by `templateTokenTag`.

use crate::collections::CollectionElement;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyToken {
    #[serde(skip)]
    id: String,
    #[serde(default)]
    pub template_token_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Number for fungible tokens, often an empty string otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PolicyToken {
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            template_token_tag: tag.into(),
            ..Default::default()
        }
    }
}

impl CollectionElement for PolicyToken {
    const KIND: &'static str = "token template";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.template_token_tag
    }

    fn set_label(&mut self, label: String) {
        self.template_token_tag = label;
    }

    fn default_label(index: usize) -> String {
        format!("token_template_{}", index)
    }
}
