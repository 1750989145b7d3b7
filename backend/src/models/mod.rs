//! Domain models: the serialized document, collection elements, and the
//! externally supplied inputs.

pub mod document;
pub mod external;
pub mod group;
pub mod role;
pub mod status;
pub mod token;
pub mod topic;

// Re-exports
pub use document::{EventConfig, NodeConfig, PolicyDocument};
pub use external::{ModuleTemplate, Schema, Token, ToolTemplate};
pub use group::{GroupRelationshipType, PolicyGroup};
pub use role::PolicyRole;
pub use status::{PolicyStatus, StatusFlags};
pub use token::PolicyToken;
pub use topic::PolicyTopic;
