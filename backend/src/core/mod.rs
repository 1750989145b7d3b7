//! Injected capabilities and small shared types used by every layer.

pub mod change;
pub mod ids;

pub use change::Change;
pub use ids::{IdGenerator, SequentialIdGenerator, UuidGenerator};
