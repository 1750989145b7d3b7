//! Variable catalogue for editor autocomplete and validation

pub mod aggregator;
pub mod snapshot;

pub use aggregator::{CollectionSources, NoSchemaCheck, SchemaVariableCheck, VariableAggregator};
pub use snapshot::{builtin_roles, SchemaVariable, ToolVariable, Variable, VariableSnapshot};
