// Policy tree: node storage, indexing, construction, and event resolution
//
// Architecture:
// - node.rs: Node, its variants (block / module / tool), and declared events
// - arena.rs: Flat node storage keyed by id; all links are ids
// - registry.rs: Dual tag/id index over one scope, unique tag generation
// - factory.rs: NodeFactory capability and the default block catalogue
// - builder.rs: Recursive construction of a subtree from its config
// - events.rs: Whole-scope resolution of event tags into node ids

pub mod arena;
pub mod builder;
pub mod events;
pub mod factory;
pub mod node;
pub mod registry;

// Re-export main types for convenience
pub use arena::NodeArena;
pub use builder::{BuiltTree, TreeBuilder};
pub use events::{resolve_events, EventEdge, EventGraph};
pub use factory::{
    BlockCatalogue, BuildError, CatalogueNodeFactory, NodeFactory, MODULE_BLOCK_TYPE,
    TOOL_BLOCK_TYPE,
};
pub use node::{ModuleScope, Node, NodeId, NodeKind, NodeVariant, PolicyEvent, ToolLink};
pub use registry::{IndexRoot, NodeRegistry};
