//! Tree Builder
//!
//! Turns a nested [`NodeConfig`] into nodes in an arena. The factory decides
//! what each node is; the builder owns recursion, parent links, id
//! uniqueness, and the per-module re-index once a module's subtree is
//! complete.
//!
//! A build is all-or-nothing from the caller's point of view: nodes are
//! built into a scratch arena and only handed back on success.

use crate::core::IdGenerator;
use crate::models::NodeConfig;
use crate::tree::arena::NodeArena;
use crate::tree::factory::{BuildError, NodeFactory};
use crate::tree::node::NodeId;
use crate::tree::registry::{IndexRoot, NodeRegistry};
use tracing::{debug, warn};

/// Result of a successful build
#[derive(Debug)]
pub struct BuiltTree {
    /// Id of the subtree root
    pub root: NodeId,
    /// Every node of the subtree
    pub arena: NodeArena,
}

pub struct TreeBuilder<'a> {
    factory: &'a dyn NodeFactory,
    ids: &'a mut dyn IdGenerator,
    existing: Option<&'a NodeArena>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(factory: &'a dyn NodeFactory, ids: &'a mut dyn IdGenerator) -> Self {
        Self {
            factory,
            ids,
            existing: None,
        }
    }

    /// Treat ids already present in `arena` as taken
    pub fn avoiding(mut self, arena: &'a NodeArena) -> Self {
        self.existing = Some(arena);
        self
    }

    /// Build `config` and its descendants. `parent` is recorded on the
    /// subtree root but the parent's child list is left to the caller.
    pub fn build(
        mut self,
        config: &NodeConfig,
        parent: Option<&str>,
    ) -> Result<BuiltTree, BuildError> {
        let mut arena = NodeArena::new();
        let root = self.build_node(config, parent, None, &mut arena)?;
        debug!(root = %root, nodes = arena.len(), "built subtree");
        Ok(BuiltTree { root, arena })
    }

    fn id_taken(&self, arena: &NodeArena, id: &str) -> bool {
        arena.contains(id) || self.existing.is_some_and(|existing| existing.contains(id))
    }

    fn build_node(
        &mut self,
        config: &NodeConfig,
        parent: Option<&str>,
        module: Option<&str>,
        arena: &mut NodeArena,
    ) -> Result<NodeId, BuildError> {
        let mut node = self.factory.build(config, parent, &mut *self.ids)?;
        if self.id_taken(arena, &node.id) {
            let fresh = self.ids.next_id();
            warn!(duplicate = %node.id, replacement = %fresh, "duplicate node id regenerated");
            node.id = fresh;
        }
        node.parent = parent.map(str::to_string);
        node.module = module.map(str::to_string);
        node.children.clear();

        let id = node.id.clone();
        let is_module = node.is_module();
        let is_tool = node.is_tool();
        arena.insert(node);

        if is_tool {
            if !config.children.is_empty() {
                warn!(tool = %id, dropped = config.children.len(), "tool children ignored");
            }
            return Ok(id);
        }

        let child_module = if is_module { Some(id.as_str()) } else { module };
        let mut children = Vec::with_capacity(config.children.len());
        for child in &config.children {
            children.push(self.build_node(child, Some(&id), child_module, arena)?);
        }
        if let Some(node) = arena.get_mut(&id) {
            node.children = children;
        }

        if is_module {
            let mut registry = NodeRegistry::new();
            registry.reindex(arena, IndexRoot::Contents(&id));
            if let Some(scope) = arena.get_mut(&id).and_then(|n| n.scope_mut()) {
                scope.registry = registry;
            }
        }

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequentialIdGenerator;
    use crate::tree::factory::CatalogueNodeFactory;

    fn config() -> NodeConfig {
        NodeConfig::of_type("interfaceContainerBlock")
            .with_id("root")
            .with_tag("Root")
            .with_child(NodeConfig::of_type("informationBlock").with_id("a").with_tag("A"))
            .with_child(
                NodeConfig::of_type("module")
                    .with_id("m")
                    .with_tag("M")
                    .with_child(NodeConfig::of_type("informationBlock").with_id("m1").with_tag("A")),
            )
    }

    #[test]
    fn test_build_wires_parents_in_order() {
        let factory = CatalogueNodeFactory::default();
        let mut ids = SequentialIdGenerator::new("n");
        let built = TreeBuilder::new(&factory, &mut ids).build(&config(), None).unwrap();

        assert_eq!(built.root, "root");
        assert_eq!(built.arena.len(), 4);
        let root = built.arena.get("root").unwrap();
        assert_eq!(root.children(), ["a".to_string(), "m".to_string()]);
        assert_eq!(built.arena.get("m1").unwrap().parent(), Some("m"));
        assert_eq!(built.arena.get("m1").unwrap().module(), Some("m"));
    }

    #[test]
    fn test_module_scope_indexed_after_build() {
        let factory = CatalogueNodeFactory::default();
        let mut ids = SequentialIdGenerator::new("n");
        let built = TreeBuilder::new(&factory, &mut ids).build(&config(), None).unwrap();

        let scope = built.arena.get("m").unwrap().scope().unwrap();
        assert_eq!(scope.registry().get_by_tag("A"), Some("m1"));
    }

    #[test]
    fn test_unknown_block_type_fails_whole_build() {
        let factory = CatalogueNodeFactory::default();
        let mut ids = SequentialIdGenerator::new("n");
        let bad = config().with_child(NodeConfig::of_type("notARealBlock"));
        let err = TreeBuilder::new(&factory, &mut ids).build(&bad, None).unwrap_err();
        assert_eq!(err, BuildError::UnknownBlockType("notARealBlock".to_string()));
    }

    #[test]
    fn test_duplicate_ids_regenerated() {
        let factory = CatalogueNodeFactory::default();
        let mut ids = SequentialIdGenerator::new("n");
        let dup = NodeConfig::of_type("interfaceContainerBlock")
            .with_id("x")
            .with_child(NodeConfig::of_type("informationBlock").with_id("x"));
        let built = TreeBuilder::new(&factory, &mut ids).build(&dup, None).unwrap();
        assert_eq!(built.arena.len(), 2);
        assert_eq!(built.arena.get("x").unwrap().children(), ["n-1".to_string()]);
    }
}
