//! Variable Aggregator
//!
//! Assembles the [`VariableSnapshot`] from the externally supplied lists
//! (tools, schemas, draft schemas, tokens) and the template's own
//! collections. Synthetic entries always come first; each category then
//! follows the append order of its sources.

use crate::collections::Collection;
use crate::models::{PolicyGroup, PolicyRole, PolicyToken, PolicyTopic, Schema, Token, ToolTemplate};
use crate::variables::snapshot::{SchemaVariable, ToolVariable, Variable, VariableSnapshot};
use tracing::debug;

/// Consistency check run over the assembled schema category
pub trait SchemaVariableCheck {
    fn check(&self, schemas: &mut [SchemaVariable]);
}

/// Check that accepts every schema as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchemaCheck;

impl SchemaVariableCheck for NoSchemaCheck {
    fn check(&self, _schemas: &mut [SchemaVariable]) {}
}

/// The template collections that feed the snapshot
#[derive(Debug, Clone, Copy)]
pub struct CollectionSources<'a> {
    pub roles: &'a Collection<PolicyRole>,
    pub groups: &'a Collection<PolicyGroup>,
    pub topics: &'a Collection<PolicyTopic>,
    pub token_templates: &'a Collection<PolicyToken>,
}

/// Holds the external lists and rebuilds snapshots on demand
pub struct VariableAggregator {
    tools: Vec<ToolTemplate>,
    schemas: Vec<Schema>,
    temporary_schemas: Vec<Schema>,
    tokens: Vec<Token>,
    check: Box<dyn SchemaVariableCheck>,
}

impl Default for VariableAggregator {
    fn default() -> Self {
        Self::new(Box::new(NoSchemaCheck))
    }
}

impl std::fmt::Debug for VariableAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableAggregator")
            .field("tools", &self.tools.len())
            .field("schemas", &self.schemas.len())
            .field("temporary_schemas", &self.temporary_schemas.len())
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

impl VariableAggregator {
    pub fn new(check: Box<dyn SchemaVariableCheck>) -> Self {
        Self {
            tools: Vec::new(),
            schemas: Vec::new(),
            temporary_schemas: Vec::new(),
            tokens: Vec::new(),
            check,
        }
    }

    pub fn set_tools(&mut self, tools: Vec<ToolTemplate>) {
        self.tools = tools;
    }

    pub fn set_schemas(&mut self, schemas: Vec<Schema>) {
        self.schemas = schemas;
    }

    pub fn set_temporary_schemas(&mut self, schemas: Vec<Schema>) {
        self.temporary_schemas = schemas;
    }

    pub fn set_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
    }

    pub fn tools(&self) -> &[ToolTemplate] {
        &self.tools
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn temporary_schemas(&self) -> &[Schema] {
        &self.temporary_schemas
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Build a fresh snapshot. Pure apart from the schema check hook.
    pub fn recompute(&self, collections: CollectionSources<'_>) -> VariableSnapshot {
        let mut snapshot = VariableSnapshot::default();

        snapshot
            .tools
            .extend(self.tools.iter().map(ToolVariable::from_tool));
        snapshot.schemas.extend(
            self.schemas
                .iter()
                .chain(self.temporary_schemas.iter())
                .map(SchemaVariable::from_schema),
        );
        snapshot
            .tokens
            .extend(self.tokens.iter().map(Variable::from_token));
        snapshot
            .roles
            .extend(collections.roles.iter().map(Variable::from_role));
        snapshot
            .groups
            .extend(collections.groups.iter().map(Variable::from_group));
        snapshot
            .token_templates
            .extend(collections.token_templates.iter().map(Variable::from_token_template));
        snapshot
            .topics
            .extend(collections.topics.iter().map(Variable::from_topic));

        self.check.check(&mut snapshot.schemas);

        debug!(
            schemas = snapshot.schemas.len(),
            tokens = snapshot.tokens.len(),
            roles = snapshot.roles.len(),
            tools = snapshot.tools.len(),
            "variables recomputed"
        );
        snapshot
    }
}
