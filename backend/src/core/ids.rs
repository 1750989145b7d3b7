//! Identifier generation
//!
//! Node, event, and collection element ids are produced by an injected
//! [`IdGenerator`] so that production code gets globally unique UUIDs while
//! tests and tooling can use a deterministic sequence.
//!
//! # Example
//!
//! ```rust
//! use policy_template_core::core::{IdGenerator, SequentialIdGenerator};
//!
//! let mut ids = SequentialIdGenerator::new("node");
//! assert_eq!(ids.next_id(), "node-1");
//! assert_eq!(ids.next_id(), "node-2");
//! ```

use uuid::Uuid;

/// Source of globally unique identifier strings
pub trait IdGenerator {
    /// Produce a fresh identifier. Must never repeat within one template.
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 identifiers (default for real documents)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `{prefix}-{n}` identifiers, starting at 1
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", self.prefix, self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_generator_is_unique() {
        let mut ids = UuidGenerator;
        let generated: HashSet<String> = (0..100).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 100);
    }

    #[test]
    fn test_sequential_generator_counts() {
        let mut ids = SequentialIdGenerator::new("evt");
        ids.next_id();
        ids.next_id();
        assert_eq!(ids.next_id(), "evt-3");
        assert_eq!(ids.issued(), 3);
    }
}
