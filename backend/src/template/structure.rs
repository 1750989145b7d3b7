//! Structural edits on the node tree
//!
//! Every edit here validates first and mutates second, then finishes with a
//! full [`PolicyTemplate::refresh`]. Indices are never patched in place.

use crate::core::Change;
use crate::models::{EventConfig, ModuleTemplate, NodeConfig, ToolTemplate};
use crate::template::error::TemplateError;
use crate::template::policy::PolicyTemplate;
use crate::tree::{
    resolve_events, BuiltTree, IndexRoot, NodeId, NodeRegistry, PolicyEvent, TreeBuilder,
    MODULE_BLOCK_TYPE, TOOL_BLOCK_TYPE,
};
use std::collections::HashSet;
use tracing::{debug, warn};

const NEW_BLOCK_TAG: &str = "Block";
const NEW_TOOL_TAG: &str = "Tool";
const NEW_MODULE_TAG: &str = "Module";

/// Tool template config keys copied onto a new tool node
const TOOL_CONFIG_KEYS: &[&str] = &["inputEvents", "outputEvents", "variables"];

impl PolicyTemplate {
    /// Re-derive every index, resolve every event, and emit an update
    pub fn refresh(&mut self) {
        self.reindex_all();
        self.emit_update();
    }

    /// Rebuild the template registry and every module scope from the tree
    ///
    /// Missing tags are generated from the block type, module ownership is
    /// reassigned, and nodes that are neither reachable nor pending are
    /// dropped from the arena.
    pub(crate) fn reindex_all(&mut self) {
        let Some(root) = self.root.clone() else {
            self.registry.clear();
            self.events = Default::default();
            return;
        };

        self.registry.reindex(&self.arena, IndexRoot::Node(&root));
        let mut registry = std::mem::take(&mut self.registry);
        self.tag_untagged(&mut registry);
        self.registry = registry;
        let scope_ids = self.registry.ids().to_vec();
        self.set_owner(&scope_ids, None);
        for module in self.registry.modules().to_vec() {
            self.index_module(&module);
        }

        self.pending
            .retain(|id| self.arena.get(id).is_some_and(|node| node.parent().is_none()));
        for pending in self.pending.clone() {
            for module in self.outermost_modules(&pending) {
                self.index_module(&module);
            }
        }
        let mut keep: HashSet<NodeId> = self.arena.descendants(&root).into_iter().collect();
        for id in &self.pending {
            keep.extend(self.arena.descendants(id));
        }
        let dropped = self.arena.retain(&keep);

        for id in self.pending.clone() {
            let tag = self
                .arena
                .get(&id)
                .map(|node| node.tag().to_string())
                .unwrap_or_default();
            self.registry.reserve(&tag, &id);
        }

        self.events = resolve_events(&mut self.arena, &self.registry);
        debug!(
            indexed = self.registry.len(),
            events = self.events.len(),
            dropped,
            pending = self.pending.len(),
            "template reindexed"
        );
    }

    fn index_module(&mut self, module: &str) {
        let mut registry = NodeRegistry::new();
        registry.reindex(&self.arena, IndexRoot::Contents(module));
        self.tag_untagged(&mut registry);
        let scope_ids = registry.ids().to_vec();
        self.set_owner(&scope_ids, Some(module));
        let events = resolve_events(&mut self.arena, &registry);
        let nested = registry.modules().to_vec();

        if let Some(scope) = self.arena.get_mut(module).and_then(|n| n.scope_mut()) {
            scope.registry = registry;
            scope.events = events;
        }
        for inner in nested {
            self.index_module(&inner);
        }
    }

    /// Modules in `id`'s subtree (including `id`) not nested in another module
    fn outermost_modules(&self, id: &str) -> Vec<NodeId> {
        let mut modules = Vec::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            let Some(node) = self.arena.get(&current) else {
                continue;
            };
            if node.is_module() {
                modules.push(current);
            } else {
                stack.extend(node.children().iter().cloned());
            }
        }
        modules
    }

    fn tag_untagged(&mut self, registry: &mut NodeRegistry) {
        for id in registry.untagged().to_vec() {
            let Some(base) = self.arena.get(&id).map(|n| n.block_type().to_string()) else {
                continue;
            };
            let tag = registry.generate_unique_tag(&base, Some(&id), self.config.max_tag_suffix);
            if let Some(node) = self.arena.get_mut(&id) {
                node.tag = tag;
            }
        }
    }

    fn set_owner(&mut self, ids: &[NodeId], module: Option<&str>) {
        for id in ids {
            if let Some(node) = self.arena.get_mut(id) {
                node.module = module.map(str::to_string);
            }
        }
    }

    /// Next free `{base}_{n}` in the template scope
    ///
    /// With a `candidate` node id the tag is reserved for it immediately.
    pub fn generate_unique_tag(&mut self, base: &str, candidate: Option<&str>) -> String {
        self.registry
            .generate_unique_tag(base, candidate, self.config.max_tag_suffix)
    }

    fn ensure_valid(&self) -> Result<(), TemplateError> {
        if self.valid {
            Ok(())
        } else {
            Err(TemplateError::Invalid)
        }
    }

    fn build_detached(&mut self, config: &NodeConfig) -> Result<BuiltTree, TemplateError> {
        let built = TreeBuilder::new(self.factory.as_ref(), self.ids.as_mut())
            .avoiding(&self.arena)
            .build(config, None)?;
        Ok(built)
    }

    /// Absorb a built subtree as a pending node tagged `{base}_{n}`
    fn add_pending(&mut self, built: BuiltTree, base: &str) -> NodeId {
        let BuiltTree { root, arena } = built;
        self.arena.absorb(arena);
        let tag = self.generate_unique_tag(base, Some(&root));
        if let Some(node) = self.arena.get_mut(&root) {
            node.tag = tag;
        }
        self.pending.push(root.clone());
        self.notifier.mark_changed();
        root
    }

    // ------------------------------------------------------------------
    // Node creation
    // ------------------------------------------------------------------

    /// Create a detached plain block tagged `Block_n`
    pub fn new_block(&mut self, block_type: &str) -> Result<NodeId, TemplateError> {
        self.ensure_valid()?;
        let built = self.build_detached(&NodeConfig::of_type(block_type))?;
        Ok(self.add_pending(built, NEW_BLOCK_TAG))
    }

    /// Create a detached tool from a published tool template
    pub fn new_tool(&mut self, template: Option<&ToolTemplate>) -> Result<NodeId, TemplateError> {
        self.ensure_valid()?;
        let template = template.ok_or(TemplateError::MissingToolTemplate)?;

        let mut config = NodeConfig::of_type(TOOL_BLOCK_TYPE);
        config.default_active = Some(true);
        config.message_id = Some(template.message_id.clone());
        config.hash = template.hash.clone();
        if let Some(tool_config) = &template.config {
            for key in TOOL_CONFIG_KEYS {
                if let Some(value) = tool_config.get(*key).filter(|v| !v.is_null()) {
                    config.properties.insert(key.to_string(), value.clone());
                }
            }
        }

        let built = self.build_detached(&config)?;
        Ok(self.add_pending(built, NEW_TOOL_TAG))
    }

    /// Create a detached module, empty or copied from a module template
    pub fn new_module(
        &mut self,
        template: Option<&ModuleTemplate>,
    ) -> Result<NodeId, TemplateError> {
        self.ensure_valid()?;
        let mut config = match template {
            Some(template) => template.config.clone(),
            None => NodeConfig::default(),
        };
        config.id = None;
        config.tag = None;
        config.block_type = MODULE_BLOCK_TYPE.to_string();
        config.default_active = Some(true);

        let built = self.build_detached(&config)?;
        Ok(self.add_pending(built, NEW_MODULE_TAG))
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    /// Scope that a child of `parent` is indexed in
    fn child_scope(&self, parent: &str) -> Option<NodeId> {
        let node = self.arena.get(parent)?;
        if node.is_module() {
            Some(node.id().to_string())
        } else {
            node.module().map(str::to_string)
        }
    }

    fn scope_registry(&self, module: Option<&str>) -> Option<&NodeRegistry> {
        match module {
            None => Some(&self.registry),
            Some(module) => self.arena.get(module)?.scope().map(|s| s.registry()),
        }
    }

    /// Tags that `id`'s subtree contributes to the scope it is placed in
    fn scope_tags(&self, id: &str) -> Vec<(String, NodeId)> {
        let mut tags = Vec::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            let Some(node) = self.arena.get(&current) else {
                continue;
            };
            if !node.tag().is_empty() {
                tags.push((node.tag().to_string(), current.clone()));
            }
            if !node.is_module() {
                stack.extend(node.children().iter().cloned());
            }
        }
        tags
    }

    fn check_placement(&self, node: &str, parent: &str) -> Result<(), TemplateError> {
        let root = self.root.as_deref().ok_or(TemplateError::Invalid)?;
        if !self.arena.contains(node) {
            return Err(TemplateError::NodeNotFound(node.to_string()));
        }
        let parent_node = self
            .arena
            .get(parent)
            .ok_or_else(|| TemplateError::NodeNotFound(parent.to_string()))?;
        if node == root {
            return Err(TemplateError::RootNode(node.to_string()));
        }
        if parent_node.is_tool() {
            return Err(TemplateError::NotAContainer(parent.to_string()));
        }
        if self.arena.is_ancestor(node, parent) {
            return Err(TemplateError::Cycle {
                node: node.to_string(),
                parent: parent.to_string(),
            });
        }
        if !self.arena.is_ancestor(root, parent) {
            return Err(TemplateError::NotAttached(parent.to_string()));
        }

        let scope = self.child_scope(parent);
        let registry = self
            .scope_registry(scope.as_deref())
            .ok_or_else(|| TemplateError::NodeNotFound(parent.to_string()))?;
        let subtree: HashSet<NodeId> = self.arena.descendants(node).into_iter().collect();
        for (tag, _) in self.scope_tags(node) {
            if let Some(owner) = registry.get_by_tag(&tag) {
                if !subtree.contains(owner) {
                    return Err(TemplateError::TagInUse(tag));
                }
            }
        }
        Ok(())
    }

    /// Attach `child` under `parent` at `index` (appended when `None`)
    ///
    /// `child` is usually a pending node from `new_block`, `new_tool` or
    /// `new_module`. An attached child is moved.
    pub fn add_child(
        &mut self,
        parent: &str,
        child: &str,
        index: Option<usize>,
    ) -> Result<Change, TemplateError> {
        self.move_node(child, parent, index)
    }

    /// Move `node` with its subtree under `new_parent` at `index`
    pub fn move_node(
        &mut self,
        node: &str,
        new_parent: &str,
        index: Option<usize>,
    ) -> Result<Change, TemplateError> {
        self.ensure_valid()?;
        self.check_placement(node, new_parent)?;

        let previous = self.arena.detach(node);
        let at = match (&previous, index) {
            // Removing the node first shifts later siblings left
            (Some((old_parent, old_position)), Some(index))
                if old_parent == new_parent && *old_position < index =>
            {
                Some(index - 1)
            }
            _ => index,
        };
        self.arena.attach(new_parent, node, at);
        self.pending.retain(|id| id != node);

        self.notifier.mark_changed();
        self.refresh();
        Ok(Change::Changed)
    }

    /// Detach `node` and drop its subtree from the tree and every index
    ///
    /// Unknown ids and the root are no-ops.
    pub fn remove_node(&mut self, node: &str) -> Change {
        if !self.valid || !self.arena.contains(node) {
            warn!(node, "remove of unknown node ignored");
            return Change::Unchanged;
        }
        if self.root.as_deref() == Some(node) {
            warn!(node, "root node cannot be removed");
            return Change::Unchanged;
        }

        let detached = self.arena.detach(node).is_some();
        let was_pending = self.pending.iter().any(|id| id == node);
        self.pending.retain(|id| id != node);
        if !detached && !was_pending {
            return Change::Unchanged;
        }

        self.notifier.mark_changed();
        self.refresh();
        Change::Changed
    }

    /// Wrap `node` in a new module placed at `node`'s former position
    ///
    /// The module takes over `node`'s permissions. If building the module
    /// fails the tree is left untouched.
    pub fn convert_module(&mut self, node: &str) -> Result<NodeId, TemplateError> {
        self.ensure_valid()?;
        let target = self
            .arena
            .get(node)
            .ok_or_else(|| TemplateError::NodeNotFound(node.to_string()))?;
        let root = self.root.as_deref().ok_or(TemplateError::Invalid)?;
        if root == node {
            return Err(TemplateError::RootNode(node.to_string()));
        }
        let parent = match target.parent() {
            Some(parent) if self.arena.is_ancestor(root, node) => parent.to_string(),
            _ => return Err(TemplateError::NotAttached(node.to_string())),
        };
        let permissions = target.permissions().to_vec();

        let mut config = NodeConfig::of_type(MODULE_BLOCK_TYPE);
        config.default_active = Some(true);
        let built = self.build_detached(&config)?;

        let scope = self.child_scope(&parent);
        let BuiltTree { root: module, arena } = built;
        self.arena.absorb(arena);
        let tag = match scope.as_deref() {
            None => self.generate_unique_tag(NEW_MODULE_TAG, Some(&module)),
            Some(scope) => {
                let ceiling = self.config.max_tag_suffix;
                self.arena
                    .get_mut(scope)
                    .and_then(|n| n.scope_mut())
                    .map(|s| s.registry.generate_unique_tag(NEW_MODULE_TAG, Some(&module), ceiling))
                    .unwrap_or_else(|| NEW_MODULE_TAG.to_string())
            }
        };
        if let Some(module_node) = self.arena.get_mut(&module) {
            module_node.tag = tag;
            module_node.permissions = permissions;
        }

        self.arena.replace_child(node, &module);
        self.arena.attach(&module, node, None);

        self.notifier.mark_changed();
        self.refresh();
        debug!(node, module = %module, "converted node into module");
        Ok(module)
    }

    // ------------------------------------------------------------------
    // Node edits
    // ------------------------------------------------------------------

    /// Rename a node. Rejects a blank tag and a tag already bound to another
    /// node in its scope.
    ///
    /// Events that referenced the old tag stay unresolved.
    pub fn set_node_tag(&mut self, node: &str, tag: &str) -> Result<Change, TemplateError> {
        self.ensure_valid()?;
        let current = self
            .arena
            .get(node)
            .ok_or_else(|| TemplateError::NodeNotFound(node.to_string()))?;
        if tag.trim().is_empty() {
            return Err(TemplateError::EmptyTag(node.to_string()));
        }
        if current.tag() == tag {
            return Ok(Change::Unchanged);
        }
        let registry = self
            .scope_registry(current.module())
            .ok_or_else(|| TemplateError::NodeNotFound(node.to_string()))?;
        if registry.get_by_tag(tag).is_some_and(|owner| owner != node) {
            return Err(TemplateError::TagInUse(tag.to_string()));
        }

        if let Some(target) = self.arena.get_mut(node) {
            target.tag = tag.to_string();
        }

        self.notifier.mark_changed();
        self.refresh();
        Ok(Change::Changed)
    }

    /// Replace a node's permission list. Marks the template dirty without
    /// emitting.
    pub fn set_node_permissions(
        &mut self,
        node: &str,
        permissions: Vec<String>,
    ) -> Result<Change, TemplateError> {
        self.ensure_valid()?;
        let target = self
            .arena
            .get_mut(node)
            .ok_or_else(|| TemplateError::NodeNotFound(node.to_string()))?;
        if target.permissions == permissions {
            return Ok(Change::Unchanged);
        }
        target.permissions = permissions;
        self.notifier.mark_changed();
        Ok(Change::Changed)
    }

    /// Declare a new event on `owner`. Returns the event id.
    pub fn add_event(
        &mut self,
        owner: &str,
        event: &EventConfig,
    ) -> Result<String, TemplateError> {
        self.ensure_valid()?;
        if !self.arena.contains(owner) {
            return Err(TemplateError::NodeNotFound(owner.to_string()));
        }
        let id = self.ids.next_id();
        if let Some(node) = self.arena.get_mut(owner) {
            node.events.push(PolicyEvent::from_config(id.clone(), event));
        }

        self.notifier.mark_changed();
        self.refresh();
        Ok(id)
    }

    /// Remove an event wherever it is declared
    pub fn remove_event(&mut self, event_id: &str) -> Change {
        let owner = self
            .arena
            .iter()
            .find(|node| node.events().iter().any(|e| e.id() == event_id))
            .map(|node| node.id().to_string());
        let Some(owner) = owner else {
            warn!(event_id, "remove of unknown event ignored");
            return Change::Unchanged;
        };
        if let Some(node) = self.arena.get_mut(&owner) {
            node.events.retain(|e| e.id() != event_id);
        }

        self.notifier.mark_changed();
        self.refresh();
        Change::Changed
    }
}
