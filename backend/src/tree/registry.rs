//! Node Registry
//!
//! Dual index over one scope of the tree: tag → node and id → node. The
//! template scope covers everything outside modules (module nodes
//! included); each module's scope covers its own descendants.
//!
//! Indices are never patched incrementally. Every structural edit ends in a
//! full [`NodeRegistry::reindex`], which is what keeps the invariants below
//! true after arbitrary mutation.
//!
//! # Critical Invariants
//!
//! 1. **Coverage**: every node reachable in the scope is indexed by id exactly once
//! 2. **No orphans**: every indexed id is reachable in the scope
//! 3. **Tag uniqueness**: the last occurrence in pre-order wins; the tag is
//!    recorded in `duplicate_tags` and the node it displaced in `displaced`

use crate::tree::arena::NodeArena;
use crate::tree::node::{NodeId, NodeKind};
use std::collections::HashMap;
use tracing::warn;

/// Where a scope traversal starts
#[derive(Debug, Clone, Copy)]
pub enum IndexRoot<'a> {
    /// Index this node and everything under it (template scope)
    Node(&'a str),
    /// Index the children of this module, not the module itself
    Contents(&'a str),
}

#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    by_tag: HashMap<String, NodeId>,
    by_id: HashMap<NodeId, NodeKind>,
    order: Vec<NodeId>,
    modules: Vec<NodeId>,
    tools: Vec<NodeId>,
    untagged: Vec<NodeId>,
    duplicate_tags: Vec<String>,
    displaced: Vec<NodeId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both indices and rebuild them by pre-order traversal
    ///
    /// Plain blocks are indexed and descended into. Modules and tools are
    /// indexed but not descended into: a module's descendants belong to the
    /// module's own scope, and tools have no children.
    pub fn reindex(&mut self, arena: &NodeArena, root: IndexRoot<'_>) {
        self.clear();

        let mut stack: Vec<&str> = match root {
            IndexRoot::Node(id) => vec![id],
            IndexRoot::Contents(id) => arena
                .get(id)
                .map(|module| module.children().iter().rev().map(String::as_str).collect())
                .unwrap_or_default(),
        };

        while let Some(id) = stack.pop() {
            let Some(node) = arena.get(id) else {
                continue;
            };
            if self.by_id.contains_key(id) {
                continue;
            }
            let kind = node.kind();
            self.by_id.insert(id.to_string(), kind);
            self.order.push(id.to_string());

            if node.tag().is_empty() {
                self.untagged.push(id.to_string());
            } else if let Some(previous) = self.by_tag.insert(node.tag().to_string(), id.to_string()) {
                warn!(tag = node.tag(), id, displaced = %previous, "duplicate tag in scope");
                self.duplicate_tags.push(node.tag().to_string());
                self.displaced.push(previous);
            }

            match kind {
                NodeKind::Block => {
                    for child in node.children().iter().rev() {
                        stack.push(child);
                    }
                }
                NodeKind::Module => self.modules.push(id.to_string()),
                NodeKind::Tool => self.tools.push(id.to_string()),
            }
        }
    }

    pub fn clear(&mut self) {
        self.by_tag.clear();
        self.by_id.clear();
        self.order.clear();
        self.modules.clear();
        self.tools.clear();
        self.untagged.clear();
        self.duplicate_tags.clear();
        self.displaced.clear();
    }

    /// Smallest free `{base}_{n}` with `1 <= n < ceiling`
    ///
    /// When `candidate` is given the chosen tag is reserved for that node
    /// immediately. If every suffix is taken, `base` is returned unchanged,
    /// which may duplicate an existing tag.
    pub fn generate_unique_tag(
        &mut self,
        base: &str,
        candidate: Option<&str>,
        ceiling: usize,
    ) -> String {
        for n in 1..ceiling {
            let tag = format!("{}_{}", base, n);
            if !self.by_tag.contains_key(&tag) {
                if let Some(id) = candidate {
                    self.by_tag.insert(tag.clone(), id.to_string());
                }
                return tag;
            }
        }
        warn!(base, ceiling, "tag space exhausted, falling back to base name");
        base.to_string()
    }

    /// Claim `tag` for a node that is not (yet) reachable in this scope
    pub fn reserve(&mut self, tag: &str, id: &str) -> bool {
        if tag.is_empty() || self.by_tag.contains_key(tag) {
            return false;
        }
        self.by_tag.insert(tag.to_string(), id.to_string());
        true
    }

    /// Node id bound to `tag` (indexed or reserved)
    pub fn get_by_tag(&self, tag: &str) -> Option<&str> {
        self.by_tag.get(tag).map(String::as_str)
    }

    pub fn kind_of(&self, id: &str) -> Option<NodeKind> {
        self.by_id.get(id).copied()
    }

    /// True if `id` was reached by the last traversal
    pub fn is_indexed(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Indexed node ids in pre-order
    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    pub fn modules(&self) -> &[NodeId] {
        &self.modules
    }

    pub fn tools(&self) -> &[NodeId] {
        &self.tools
    }

    pub(crate) fn untagged(&self) -> &[NodeId] {
        &self.untagged
    }

    /// Tags seen more than once during the last traversal
    pub fn duplicate_tags(&self) -> &[String] {
        &self.duplicate_tags
    }

    /// Nodes whose tag entry was taken over by a later duplicate
    pub fn displaced(&self) -> &[NodeId] {
        &self.displaced
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::{ModuleScope, Node, NodeVariant, ToolLink};

    fn arena_with_module() -> NodeArena {
        let mut arena = NodeArena::new();
        arena.insert(Node::new("root", "root", "interfaceContainerBlock", NodeVariant::Block));
        arena.insert(Node::new("a", "A", "informationBlock", NodeVariant::Block));
        arena.insert(Node::new("m", "M", "module", NodeVariant::Module(ModuleScope::default())));
        arena.insert(Node::new("inner", "A", "informationBlock", NodeVariant::Block));
        arena.insert(Node::new("t", "T", "tool", NodeVariant::Tool(ToolLink::default())));
        arena.attach("root", "a", None);
        arena.attach("root", "m", None);
        arena.attach("m", "inner", None);
        arena.attach("root", "t", None);
        arena
    }

    #[test]
    fn test_reindex_stops_at_modules_and_tools() {
        let arena = arena_with_module();
        let mut registry = NodeRegistry::new();
        registry.reindex(&arena, IndexRoot::Node("root"));

        assert_eq!(registry.ids(), ["root", "a", "m", "t"]);
        assert_eq!(registry.modules(), ["m"]);
        assert_eq!(registry.tools(), ["t"]);
        assert!(!registry.is_indexed("inner"));
        assert_eq!(registry.get_by_tag("A"), Some("a"));
    }

    #[test]
    fn test_module_scope_indexes_contents_only() {
        let arena = arena_with_module();
        let mut registry = NodeRegistry::new();
        registry.reindex(&arena, IndexRoot::Contents("m"));

        assert_eq!(registry.ids(), ["inner"]);
        assert_eq!(registry.get_by_tag("A"), Some("inner"));
    }

    #[test]
    fn test_generate_unique_tag_sequence() {
        let mut registry = NodeRegistry::new();
        let tags: Vec<String> = (0..3)
            .map(|i| registry.generate_unique_tag("Block", Some(&format!("n{}", i)), 1000))
            .collect();
        assert_eq!(tags, vec!["Block_1", "Block_2", "Block_3"]);
    }

    #[test]
    fn test_generate_unique_tag_without_candidate_does_not_reserve() {
        let mut registry = NodeRegistry::new();
        assert_eq!(registry.generate_unique_tag("Block", None, 1000), "Block_1");
        assert_eq!(registry.generate_unique_tag("Block", None, 1000), "Block_1");
    }

    #[test]
    fn test_generate_unique_tag_exhausted_falls_back() {
        let mut registry = NodeRegistry::new();
        registry.reserve("Block_1", "x");
        registry.reserve("Block_2", "y");
        assert_eq!(registry.generate_unique_tag("Block", None, 3), "Block");
    }

    #[test]
    fn test_duplicate_tags_recorded() {
        let mut arena = arena_with_module();
        arena.insert(Node::new("dup", "A", "informationBlock", NodeVariant::Block));
        arena.attach("root", "dup", None);
        let mut registry = NodeRegistry::new();
        registry.reindex(&arena, IndexRoot::Node("root"));

        assert_eq!(registry.duplicate_tags(), ["A".to_string()]);
        assert_eq!(registry.get_by_tag("A"), Some("dup"));
        assert_eq!(registry.displaced(), ["a".to_string()]);
        assert!(registry.is_indexed("a"));
    }
}
