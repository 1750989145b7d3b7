//! Policy Template Core
//!
//! In-memory document model behind a policy editor: a tree of blocks,
//! modules and tools, the collections a policy declares, and the variable
//! catalogue the editor offers for autocomplete.
//!
//! # Architecture
//!
//! - **core**: Injected id generation and the `Change` mutation outcome
//! - **models**: Serialized document and collection element types
//! - **tree**: Node arena, per-scope registry, builder, event resolution
//! - **collections**: Roles, groups, topics, and token templates
//! - **variables**: Variable snapshot assembly
//! - **template**: The `PolicyTemplate` aggregate root and change notifier
//! - **validation**: Consistency checks over derived state
//!
//! # Critical Invariants
//!
//! 1. Every index is re-derived by a full traversal after structural edits
//! 2. Tags are unique within a scope; ids are unique across the template
//! 3. Event resolution runs only after the scope it reads is fully indexed
//! 4. A failing operation leaves the template unchanged

// Module declarations
pub mod collections;
pub mod config;
pub mod core;
pub mod models;
pub mod template;
pub mod tree;
pub mod validation;
pub mod variables;

// Re-exports for convenience
pub use collections::{Collection, CollectionElement};
pub use config::TemplateConfig;
pub use core::{Change, IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use models::{
    EventConfig, ModuleTemplate, NodeConfig, PolicyDocument, PolicyGroup, PolicyRole,
    PolicyStatus, PolicyToken, PolicyTopic, Schema, StatusFlags, Token, ToolTemplate,
};
pub use template::{
    ChangeNotice, PolicyInfo, PolicyTemplate, Subscription, TemplateContext, TemplateError,
};
pub use tree::{
    BlockCatalogue, BuildError, CatalogueNodeFactory, EventGraph, Node, NodeFactory, NodeId,
    NodeKind,
};
pub use validation::{validate_template, ValidationError, ValidationResult};
pub use variables::{SchemaVariableCheck, VariableSnapshot};
