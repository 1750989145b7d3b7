//! Event Graph Resolver
//!
//! Resolves the declared `source`/`target` tags of every event in a scope
//! into node ids. Resolution is a whole-scope pass that must follow a
//! complete reindex of that scope; resolving against a partial index would
//! silently under-resolve.
//!
//! A tag with no indexed match leaves the endpoint unresolved. That is a
//! normal editing state, not an error.

use crate::tree::arena::NodeArena;
use crate::tree::node::NodeId;
use crate::tree::registry::NodeRegistry;

/// One resolved (or partially resolved) event edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEdge {
    pub event_id: String,
    /// Node that declares the event
    pub owner: NodeId,
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
}

impl EventEdge {
    pub fn is_resolved(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }
}

/// Directed edge set of one scope
#[derive(Debug, Clone, Default)]
pub struct EventGraph {
    edges: Vec<EventEdge>,
}

impl EventGraph {
    pub fn edges(&self) -> &[EventEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn get(&self, event_id: &str) -> Option<&EventEdge> {
        self.edges.iter().find(|e| e.event_id == event_id)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &EventEdge> {
        self.edges.iter().filter(|e| !e.is_resolved())
    }

    /// Edges leaving `node`
    pub fn outgoing<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a EventEdge> {
        self.edges
            .iter()
            .filter(move |e| e.source.as_deref() == Some(node))
    }

    /// Edges arriving at `node`
    pub fn incoming<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a EventEdge> {
        self.edges
            .iter()
            .filter(move |e| e.target.as_deref() == Some(node))
    }
}

/// Look `tag` up in `registry`, accepting only nodes that are indexed in the
/// scope and still carry that tag
fn lookup(arena: &NodeArena, registry: &NodeRegistry, tag: &str) -> Option<NodeId> {
    if tag.is_empty() {
        return None;
    }
    let id = registry.get_by_tag(tag)?;
    if !registry.is_indexed(id) {
        return None;
    }
    let node = arena.get(id)?;
    (node.tag() == tag).then(|| id.to_string())
}

/// Resolve every event declared by a node indexed in `registry`
///
/// Writes the endpoints back onto the events and returns the scope's edge
/// set in declaration (pre-order) order.
pub fn resolve_events(arena: &mut NodeArena, registry: &NodeRegistry) -> EventGraph {
    let mut edges = Vec::new();

    for owner in registry.ids() {
        let Some(node) = arena.get(owner) else {
            continue;
        };
        for event in node.events() {
            edges.push(EventEdge {
                event_id: event.id().to_string(),
                owner: owner.clone(),
                source: lookup(arena, registry, &event.source_tag),
                target: lookup(arena, registry, &event.target_tag),
            });
        }
    }

    let mut cursor = 0;
    for owner in registry.ids() {
        let Some(node) = arena.get_mut(owner) else {
            continue;
        };
        for event in node.events.iter_mut() {
            let edge = &edges[cursor];
            event.source = edge.source.clone();
            event.target = edge.target.clone();
            cursor += 1;
        }
    }

    EventGraph { edges }
}
