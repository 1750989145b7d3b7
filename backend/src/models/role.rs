//! Policy role
//!
//! Roles serialize as their bare name. A role's ordinal in the role
//! collection is what node permission lists refer to.

use crate::collections::CollectionElement;
use serde::{Deserialize, Serialize};

/// Permission sentinel: document owner
pub const OWNER: &str = "OWNER";
/// Permission sentinel: user without a role
pub const NO_ROLE: &str = "NO_ROLE";
/// Permission sentinel: any assigned role
pub const ANY_ROLE: &str = "ANY_ROLE";

/// Display name for a permission sentinel, if `value` is one
pub fn sentinel_name(value: &str) -> Option<&'static str> {
    match value {
        OWNER => Some("Owner"),
        NO_ROLE => Some("No Role"),
        ANY_ROLE => Some("Any Role"),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyRole {
    #[serde(skip)]
    id: String,
    name: String,
}

impl PolicyRole {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CollectionElement for PolicyRole {
    const KIND: &'static str = "role";

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
        format!("New Role {}", index)
    }
}
