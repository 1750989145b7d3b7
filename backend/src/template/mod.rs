//! Template facade
//!
//! [`PolicyTemplate`] is the aggregate root the editor talks to. It is
//! split across two files:
//!
//! - `policy.rs`: construction, document fields, collections, variables,
//!   change notification, serialization, and node queries
//! - `structure.rs`: structural edits on the node tree and the full
//!   re-index that follows each of them

pub mod context;
pub mod error;
pub mod notifier;
pub mod policy;
mod structure;

pub use context::TemplateContext;
pub use error::TemplateError;
pub use notifier::{ChangeNotice, ChangeNotifier, Subscription};
pub use policy::{DocumentHeader, PolicyInfo, PolicyTemplate};
