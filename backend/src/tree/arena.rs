//! Node arena
//!
//! Flat storage for every node of a template, keyed by node id. Parent and
//! child links are ids, so the tree has no reference cycles and any node is
//! reachable in O(1) from any other node that names it.
//!
//! # Critical Invariants
//!
//! 1. A node appears in at most one parent's `children`
//! 2. `node.parent == Some(p)` iff `p.children` contains `node.id`

use crate::models::NodeConfig;
use crate::tree::node::{Node, NodeId};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: HashMap<NodeId, Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Insert a node, replacing any node with the same id
    pub(crate) fn insert(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id.clone(), node)
    }

    /// Move every node of `other` into this arena
    pub(crate) fn absorb(&mut self, other: NodeArena) {
        self.nodes.extend(other.nodes);
    }

    /// Attach `child` under `parent` at `index` (clamped; `None` appends).
    /// Returns false if either node is missing.
    pub(crate) fn attach(&mut self, parent: &str, child: &str, index: Option<usize>) -> bool {
        if !self.nodes.contains_key(child) {
            return false;
        }
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let at = index
            .unwrap_or(parent_node.children.len())
            .min(parent_node.children.len());
        parent_node.children.insert(at, child.to_string());
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent.to_string());
        }
        true
    }

    /// Unlink `id` from its parent. Returns the former parent and position.
    pub(crate) fn detach(&mut self, id: &str) -> Option<(NodeId, usize)> {
        let parent = self.nodes.get_mut(id)?.parent.take()?;
        let parent_node = self.nodes.get_mut(&parent)?;
        let position = parent_node.children.iter().position(|c| c == id)?;
        parent_node.children.remove(position);
        Some((parent, position))
    }

    /// Put `new` in `old`'s slot under `old`'s parent. `old` ends detached.
    pub(crate) fn replace_child(&mut self, old: &str, new: &str) -> bool {
        if !self.nodes.contains_key(new) {
            return false;
        }
        let Some((parent, position)) = self.detach(old) else {
            return false;
        };
        self.attach(&parent, new, Some(position))
    }

    /// True if `ancestor` is `node` or lies on `node`'s parent chain
    pub fn is_ancestor(&self, ancestor: &str, node: &str) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent.as_deref());
        }
        false
    }

    /// Pre-order ids of the subtree rooted at `id`, including `id`
    pub fn descendants(&self, id: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            for child in node.children.iter().rev() {
                stack.push(child.clone());
            }
            out.push(current);
        }
        out
    }

    /// Depth of the subtree under `id` (a leaf has depth 0)
    pub fn depth(&self, id: &str) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(id, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.nodes.get(current) {
                for child in &node.children {
                    stack.push((child.as_str(), depth + 1));
                }
            }
        }
        max_depth
    }

    /// Serialize the subtree rooted at `id`
    pub fn to_config(&self, id: &str) -> Option<NodeConfig> {
        let node = self.nodes.get(id)?;
        let children = node
            .children
            .iter()
            .filter_map(|child| self.to_config(child))
            .collect();
        Some(node.to_config(children))
    }

    /// Drop every node not in `keep`. Returns how many were dropped.
    pub(crate) fn retain(&mut self, keep: &HashSet<NodeId>) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|id, _| keep.contains(id));
        before - self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::NodeVariant;

    fn block(id: &str) -> Node {
        Node::new(id, id.to_uppercase(), "interfaceContainerBlock", NodeVariant::Block)
    }

    fn sample() -> NodeArena {
        let mut arena = NodeArena::new();
        for id in ["root", "a", "b", "c"] {
            arena.insert(block(id));
        }
        arena.attach("root", "a", None);
        arena.attach("root", "b", None);
        arena.attach("a", "c", None);
        arena
    }

    #[test]
    fn test_descendants_pre_order() {
        let arena = sample();
        assert_eq!(arena.descendants("root"), vec!["root", "a", "c", "b"]);
        assert_eq!(arena.depth("root"), 2);
    }

    #[test]
    fn test_detach_and_reattach() {
        let mut arena = sample();
        assert_eq!(arena.detach("a"), Some(("root".to_string(), 0)));
        assert!(arena.get("a").unwrap().parent().is_none());
        assert_eq!(arena.get("root").unwrap().children(), ["b".to_string()]);
        assert!(arena.detach("a").is_none());

        assert!(arena.attach("root", "a", Some(5)));
        assert_eq!(arena.get("root").unwrap().children(), ["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_replace_child_keeps_position() {
        let mut arena = sample();
        arena.insert(block("m"));
        assert!(arena.replace_child("a", "m"));
        assert_eq!(arena.get("root").unwrap().children(), ["m".to_string(), "b".to_string()]);
        assert_eq!(arena.get("m").unwrap().parent(), Some("root"));
        assert!(arena.get("a").unwrap().parent().is_none());
    }

    #[test]
    fn test_is_ancestor() {
        let arena = sample();
        assert!(arena.is_ancestor("root", "c"));
        assert!(arena.is_ancestor("c", "c"));
        assert!(!arena.is_ancestor("b", "c"));
    }
}
