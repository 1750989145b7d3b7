//! Policy Template
//!
//! The aggregate root of the editor model. A [`PolicyTemplate`] owns the
//! node arena, the template-scope registry and event graph, the four
//! collections, the variable aggregator, and the change notifier.
//!
//! # States
//!
//! - **invalid**: constructed without a document; empty and read-only
//! - **valid, clean**: `is_changed() == false`
//! - **valid, dirty**: a mutator changed persisted content; cleared by
//!   [`PolicyTemplate::emit_update`] or [`PolicyTemplate::check_change`]
//!
//! # Example
//!
//! ```rust
//! use policy_template_core::template::PolicyTemplate;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"{
//!   "name": "Demo",
//!   "status": "DRAFT",
//!   "policyRoles": ["Registrant"],
//!   "config": {
//!     "id": "root",
//!     "tag": "Root",
//!     "blockType": "interfaceContainerBlock",
//!     "children": [
//!       {"id": "b1", "tag": "Apply", "blockType": "requestVcDocumentBlock"}
//!     ]
//!   }
//! }"#;
//! let mut template = PolicyTemplate::from_json(json)?;
//! assert!(template.is_draft());
//! assert_eq!(template.node_by_tag("Apply").map(|n| n.id()), Some("b1"));
//!
//! let _ = template.set_name("Renamed");
//! assert!(template.is_changed());
//! assert!(template.check_change());
//! assert!(!template.is_changed());
//! # Ok(())
//! # }
//! ```

use crate::collections::Collection;
use crate::config::TemplateConfig;
use crate::core::{Change, IdGenerator};
use crate::models::role::sentinel_name;
use crate::models::{
    NodeConfig, PolicyDocument, PolicyGroup, PolicyRole, PolicyToken, PolicyTopic, Schema,
    StatusFlags, Token, ToolTemplate,
};
use crate::template::context::TemplateContext;
use crate::template::error::TemplateError;
use crate::template::notifier::{ChangeNotice, ChangeNotifier, Subscription};
use crate::tree::{
    EventGraph, Node, NodeArena, NodeFactory, NodeId, NodeRegistry, TreeBuilder,
};
use crate::variables::{CollectionSources, VariableAggregator, VariableSnapshot};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Document fields that are fixed for the template's lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentHeader {
    pub id: Option<String>,
    pub uuid: Option<String>,
    pub code_version: Option<String>,
    pub creator: Option<String>,
    pub owner: Option<String>,
    pub create_date: Option<String>,
    pub status: Option<String>,
    pub topic_id: Option<String>,
    pub instance_topic_id: Option<String>,
    pub synchronization_topic_id: Option<String>,
    pub message_id: Option<String>,
    pub version: Option<String>,
    pub previous_version: Option<String>,
}

impl DocumentHeader {
    fn from_document(document: &PolicyDocument, ids: &mut dyn IdGenerator) -> Self {
        Self {
            id: document.id.clone(),
            uuid: Some(
                document
                    .uuid
                    .clone()
                    .filter(|uuid| !uuid.is_empty())
                    .unwrap_or_else(|| ids.next_id()),
            ),
            code_version: document.code_version.clone(),
            creator: document.creator.clone(),
            owner: document.owner.clone(),
            create_date: document.create_date.clone(),
            status: document.status.clone(),
            topic_id: document.topic_id.clone(),
            instance_topic_id: document.instance_topic_id.clone(),
            synchronization_topic_id: document.synchronization_topic_id.clone(),
            message_id: document.message_id.clone(),
            version: document.version.clone(),
            previous_version: document.previous_version.clone(),
        }
    }
}

/// Editable descriptive fields, set together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyInfo {
    pub name: String,
    pub description: String,
    pub topic_description: String,
}

/// Editable fields plus collections, as read from a document
pub(crate) struct PolicyContent {
    policy_tag: Option<String>,
    name: Option<String>,
    description: Option<String>,
    topic_description: Option<String>,
    roles: Collection<PolicyRole>,
    groups: Collection<PolicyGroup>,
    topics: Collection<PolicyTopic>,
    token_templates: Collection<PolicyToken>,
}

pub struct PolicyTemplate {
    pub(crate) valid: bool,
    pub(crate) header: DocumentHeader,
    pub(crate) flags: StatusFlags,

    pub(crate) policy_tag: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) topic_description: Option<String>,

    pub(crate) roles: Collection<PolicyRole>,
    pub(crate) groups: Collection<PolicyGroup>,
    pub(crate) topics: Collection<PolicyTopic>,
    pub(crate) token_templates: Collection<PolicyToken>,

    pub(crate) arena: NodeArena,
    pub(crate) root: Option<NodeId>,
    pub(crate) registry: NodeRegistry,
    pub(crate) events: EventGraph,
    /// Created but not yet attached subtree roots
    pub(crate) pending: Vec<NodeId>,

    pub(crate) aggregator: VariableAggregator,
    pub(crate) variables: VariableSnapshot,
    pub(crate) notifier: ChangeNotifier,

    pub(crate) ids: Box<dyn IdGenerator>,
    pub(crate) factory: Box<dyn NodeFactory>,
    pub(crate) config: TemplateConfig,
}

impl std::fmt::Debug for PolicyTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyTemplate")
            .field("valid", &self.valid)
            .field("uuid", &self.header.uuid)
            .field("name", &self.name)
            .field("root", &self.root)
            .field("nodes", &self.arena.len())
            .field("notifier", &self.notifier)
            .finish()
    }
}

impl PolicyTemplate {
    /// Construct with default capabilities. `None` yields an invalid template.
    pub fn new(document: Option<PolicyDocument>) -> Result<Self, TemplateError> {
        Self::with_context(document, TemplateContext::default())
    }

    /// Parse a JSON document and construct from it
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let document = PolicyDocument::from_json(json)?;
        Self::new(Some(document))
    }

    /// Empty, read-only placeholder
    pub fn invalid() -> Self {
        Self::empty(TemplateContext::default())
    }

    pub fn with_context(
        document: Option<PolicyDocument>,
        context: TemplateContext,
    ) -> Result<Self, TemplateError> {
        let mut template = Self::empty(context);
        let Some(document) = document else {
            return Ok(template);
        };

        let header = DocumentHeader::from_document(&document, template.ids.as_mut());
        let content = template.read_content(&document);
        let built = template.build_root(document.config.clone())?;

        template.valid = true;
        template.flags = StatusFlags::classify(header.status.as_deref());
        template.header = header;
        template.apply_content(content);
        template.arena = built.arena;
        template.root = Some(built.root);
        template.reindex_all();
        template.update_variables();
        Ok(template)
    }

    fn empty(context: TemplateContext) -> Self {
        let TemplateContext {
            ids,
            factory,
            schema_check,
            config,
        } = context;
        let mut template = Self {
            valid: false,
            header: DocumentHeader::default(),
            flags: StatusFlags::default(),
            policy_tag: None,
            name: None,
            description: None,
            topic_description: None,
            roles: Collection::new(),
            groups: Collection::new(),
            topics: Collection::new(),
            token_templates: Collection::new(),
            arena: NodeArena::new(),
            root: None,
            registry: NodeRegistry::new(),
            events: EventGraph::default(),
            pending: Vec::new(),
            aggregator: VariableAggregator::new(schema_check),
            variables: VariableSnapshot::default(),
            notifier: ChangeNotifier::new(),
            ids,
            factory,
            config,
        };
        template.update_variables();
        template
    }

    /// Read-only template scoped to a single block
    ///
    /// Roles come from the block's permissions (sentinels excluded); schemas
    /// and tokens come from its `schema`, `inputSchema`, `outputSchema`,
    /// `presetSchema` and `tokenId` properties.
    pub fn from_block(config: &NodeConfig) -> Self {
        let mut template = Self::invalid();

        for permission in &config.permissions {
            if sentinel_name(permission).is_none() {
                let _ = template
                    .roles
                    .add(PolicyRole::new(permission.as_str()), template.ids.as_mut());
            }
        }

        let mut schemas = Vec::new();
        let mut tokens = Vec::new();
        for (key, value) in &config.properties {
            match key.as_str() {
                "schema" | "inputSchema" | "outputSchema" | "presetSchema" => {
                    schemas.extend(string_values(value).map(Schema::from_iri));
                }
                "tokenId" => {
                    tokens.extend(string_values(value).map(Token::from_id));
                }
                _ => {}
            }
        }
        template.aggregator.set_schemas(schemas);
        template.aggregator.set_tokens(tokens);
        template.update_variables();
        template
    }

    fn read_content(&mut self, document: &PolicyDocument) -> PolicyContent {
        let ids = self.ids.as_mut();
        PolicyContent {
            policy_tag: document.policy_tag.clone(),
            name: document.name.clone(),
            description: document.description.clone(),
            topic_description: document.topic_description.clone(),
            roles: Collection::from_elements(
                document.policy_roles.iter().map(|name| PolicyRole::new(name.as_str())),
                ids,
            ),
            groups: Collection::from_elements(document.policy_groups.iter().cloned(), ids),
            topics: Collection::from_elements(document.policy_topics.iter().cloned(), ids),
            token_templates: Collection::from_elements(
                document.policy_tokens.iter().cloned(),
                ids,
            ),
        }
    }

    fn apply_content(&mut self, content: PolicyContent) {
        self.policy_tag = content.policy_tag;
        self.name = content.name;
        self.description = content.description;
        self.topic_description = content.topic_description;
        self.roles = content.roles;
        self.groups = content.groups;
        self.topics = content.topics;
        self.token_templates = content.token_templates;
    }

    /// Build a root tree without touching the template
    pub(crate) fn build_root(
        &mut self,
        config: Option<NodeConfig>,
    ) -> Result<crate::tree::BuiltTree, TemplateError> {
        let mut config = config.unwrap_or_default();
        if config.block_type.is_empty() {
            config.block_type = self.config.root_block_type.clone();
        }
        let built = TreeBuilder::new(self.factory.as_ref(), self.ids.as_mut()).build(&config, None)?;
        Ok(built)
    }

    /// Replace fields, collections, and tree from `document`. The header
    /// stays as constructed. `None` only emits an update.
    pub fn rebuild(&mut self, document: Option<PolicyDocument>) -> Result<(), TemplateError> {
        if let Some(document) = document {
            if !self.valid {
                return Err(TemplateError::Invalid);
            }
            let built = self.build_root(document.config.clone())?;
            let content = self.read_content(&document);
            self.apply_content(content);
            self.install_root(built);
        }
        self.emit_update();
        Ok(())
    }

    /// Replace only the node tree
    pub fn rebuild_config(&mut self, config: NodeConfig) -> Result<(), TemplateError> {
        if !self.valid {
            return Err(TemplateError::Invalid);
        }
        let built = self.build_root(Some(config))?;
        self.install_root(built);
        self.emit_update();
        Ok(())
    }

    fn install_root(&mut self, built: crate::tree::BuiltTree) {
        self.arena = built.arena;
        self.root = Some(built.root);
        self.pending.clear();
        self.flags = StatusFlags::classify(self.header.status.as_deref());
        self.reindex_all();
    }

    // ------------------------------------------------------------------
    // Document fields
    // ------------------------------------------------------------------

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn header(&self) -> &DocumentHeader {
        &self.header
    }

    pub fn flags(&self) -> StatusFlags {
        self.flags
    }

    pub fn is_draft(&self) -> bool {
        self.flags.is_draft
    }

    pub fn is_published(&self) -> bool {
        self.flags.is_published
    }

    pub fn is_dry_run(&self) -> bool {
        self.flags.is_dry_run
    }

    pub fn is_publish_error(&self) -> bool {
        self.flags.is_publish_error
    }

    pub fn readonly(&self) -> bool {
        self.flags.readonly
    }

    pub fn policy_tag(&self) -> &str {
        self.policy_tag.as_deref().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn topic_description(&self) -> &str {
        self.topic_description.as_deref().unwrap_or_default()
    }

    fn set_field(&mut self, field: FieldSlot, value: &str) -> Change {
        let slot = match field {
            FieldSlot::PolicyTag => &mut self.policy_tag,
            FieldSlot::Name => &mut self.name,
            FieldSlot::Description => &mut self.description,
            FieldSlot::TopicDescription => &mut self.topic_description,
        };
        if slot.as_deref() == Some(value) {
            return Change::Unchanged;
        }
        *slot = Some(value.to_string());
        self.notifier.mark_changed();
        Change::Changed
    }

    pub fn set_policy_tag(&mut self, value: &str) -> Change {
        self.set_field(FieldSlot::PolicyTag, value)
    }

    pub fn set_name(&mut self, value: &str) -> Change {
        self.set_field(FieldSlot::Name, value)
    }

    pub fn set_description(&mut self, value: &str) -> Change {
        self.set_field(FieldSlot::Description, value)
    }

    pub fn set_topic_description(&mut self, value: &str) -> Change {
        self.set_field(FieldSlot::TopicDescription, value)
    }

    pub fn set_policy_info(&mut self, info: &PolicyInfo) -> Change {
        self.set_name(&info.name)
            .or(self.set_description(&info.description))
            .or(self.set_topic_description(&info.topic_description))
    }

    // ------------------------------------------------------------------
    // Change notification
    // ------------------------------------------------------------------

    pub fn is_changed(&self) -> bool {
        self.notifier.is_changed()
    }

    /// Flag persisted state as modified without emitting
    pub fn mark_changed(&mut self) {
        self.notifier.mark_changed();
    }

    /// Register the single observer, replacing any previous one
    pub fn subscribe(&mut self, observer: impl FnMut(ChangeNotice) + 'static) -> Subscription {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.notifier.unsubscribe(subscription)
    }

    /// Recompute variables, clear the dirty flag, and notify the observer
    pub fn emit_update(&mut self) -> ChangeNotice {
        self.update_variables();
        let notice = self.notifier.emit();
        debug!(revision = notice.revision, "template update emitted");
        notice
    }

    /// Emit only if dirty. Returns whether an update was emitted.
    pub fn check_change(&mut self) -> bool {
        if self.notifier.is_changed() {
            self.emit_update();
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------

    pub fn roles(&self) -> &Collection<PolicyRole> {
        &self.roles
    }

    pub fn groups(&self) -> &Collection<PolicyGroup> {
        &self.groups
    }

    pub fn topics(&self) -> &Collection<PolicyTopic> {
        &self.topics
    }

    pub fn token_templates(&self) -> &Collection<PolicyToken> {
        &self.token_templates
    }

    fn collection_changed(&mut self, change: Change) -> Change {
        if change.is_changed() {
            self.notifier.mark_changed();
            self.emit_update();
        }
        change
    }

    pub fn create_role(&mut self, seed: PolicyRole) -> String {
        let id = self.roles.create(seed, self.ids.as_mut());
        let _ = self.collection_changed(Change::Changed);
        id
    }

    pub fn add_role(&mut self, role: PolicyRole) -> Change {
        let change = self.roles.add(role, self.ids.as_mut());
        self.collection_changed(change)
    }

    pub fn remove_role(&mut self, id: &str) -> Change {
        let change = Change::from(self.roles.remove(id).is_some());
        self.collection_changed(change)
    }

    pub fn create_group(&mut self, seed: PolicyGroup) -> String {
        let id = self.groups.create(seed, self.ids.as_mut());
        let _ = self.collection_changed(Change::Changed);
        id
    }

    pub fn add_group(&mut self, group: PolicyGroup) -> Change {
        let change = self.groups.add(group, self.ids.as_mut());
        self.collection_changed(change)
    }

    pub fn remove_group(&mut self, id: &str) -> Change {
        let change = Change::from(self.groups.remove(id).is_some());
        self.collection_changed(change)
    }

    pub fn create_topic(&mut self, seed: PolicyTopic) -> String {
        let id = self.topics.create(seed, self.ids.as_mut());
        let _ = self.collection_changed(Change::Changed);
        id
    }

    pub fn add_topic(&mut self, topic: PolicyTopic) -> Change {
        let change = self.topics.add(topic, self.ids.as_mut());
        self.collection_changed(change)
    }

    pub fn remove_topic(&mut self, id: &str) -> Change {
        let change = Change::from(self.topics.remove(id).is_some());
        self.collection_changed(change)
    }

    pub fn create_token(&mut self, seed: PolicyToken) -> String {
        let id = self.token_templates.create(seed, self.ids.as_mut());
        let _ = self.collection_changed(Change::Changed);
        id
    }

    pub fn add_token(&mut self, token: PolicyToken) -> Change {
        let change = self.token_templates.add(token, self.ids.as_mut());
        self.collection_changed(change)
    }

    pub fn remove_token(&mut self, id: &str) -> Change {
        let change = Change::from(self.token_templates.remove(id).is_some());
        self.collection_changed(change)
    }

    // ------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------

    pub(crate) fn update_variables(&mut self) {
        self.variables = self.aggregator.recompute(CollectionSources {
            roles: &self.roles,
            groups: &self.groups,
            topics: &self.topics,
            token_templates: &self.token_templates,
        });
    }

    /// Latest variable snapshot
    pub fn variables(&self) -> &VariableSnapshot {
        &self.variables
    }

    pub fn set_tools(&mut self, tools: Vec<ToolTemplate>) {
        self.aggregator.set_tools(tools);
        self.update_variables();
    }

    pub fn set_schemas(&mut self, schemas: Vec<Schema>) {
        self.aggregator.set_schemas(schemas);
        self.update_variables();
    }

    pub fn set_temporary_schemas(&mut self, schemas: Vec<Schema>) {
        self.aggregator.set_temporary_schemas(schemas);
        self.update_variables();
    }

    pub fn set_tokens(&mut self, tokens: Vec<Token>) {
        self.aggregator.set_tokens(tokens);
        self.update_variables();
    }

    // ------------------------------------------------------------------
    // Permissions
    // ------------------------------------------------------------------

    /// Ordinal of the role named `permission`
    pub fn get_permissions_number(&self, permission: &str) -> Option<usize> {
        self.roles.position_of_label(permission)
    }

    /// Display name for a permission value: a sentinel (`OWNER`, `NO_ROLE`,
    /// `ANY_ROLE`) or a role ordinal
    pub fn get_permissions_name(&self, permission: &str) -> Option<&str> {
        if let Some(name) = sentinel_name(permission) {
            return Some(name);
        }
        let ordinal: usize = permission.parse().ok()?;
        self.roles.at(ordinal).map(PolicyRole::name)
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serialize the whole template
    pub fn get_json(&self) -> PolicyDocument {
        let header = &self.header;
        PolicyDocument {
            id: header.id.clone(),
            uuid: header.uuid.clone(),
            name: self.name.clone(),
            version: header.version.clone(),
            previous_version: header.previous_version.clone(),
            description: self.description.clone(),
            topic_description: self.topic_description.clone(),
            status: header.status.clone(),
            creator: header.creator.clone(),
            owner: header.owner.clone(),
            topic_id: header.topic_id.clone(),
            instance_topic_id: header.instance_topic_id.clone(),
            synchronization_topic_id: header.synchronization_topic_id.clone(),
            policy_tag: self.policy_tag.clone(),
            message_id: header.message_id.clone(),
            code_version: header.code_version.clone(),
            create_date: header.create_date.clone(),
            policy_roles: self.roles.iter().map(|r| r.name().to_string()).collect(),
            policy_groups: self.groups.as_slice().to_vec(),
            policy_topics: self.topics.as_slice().to_vec(),
            policy_tokens: self.token_templates.as_slice().to_vec(),
            config: self.get_config(),
        }
    }

    /// Serialize only the root node tree
    pub fn get_config(&self) -> Option<NodeConfig> {
        self.root.as_deref().and_then(|root| self.arena.to_config(root))
    }

    /// SHA-256 of the serialized document with sorted keys
    pub fn fingerprint(&self) -> Result<String, TemplateError> {
        fn canonicalize(value: Value) -> Value {
            match value {
                Value::Object(map) => {
                    let sorted: BTreeMap<String, Value> =
                        map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                    Value::Object(sorted.into_iter().collect())
                }
                Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
                other => other,
            }
        }

        let value = canonicalize(self.get_json().to_value()?);
        let json = serde_json::to_string(&value)?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }

    // ------------------------------------------------------------------
    // Node queries
    // ------------------------------------------------------------------

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref().and_then(|root| self.arena.get(root))
    }

    /// Roots shown by the tree view
    pub fn data_source(&self) -> Vec<&Node> {
        self.root().into_iter().collect()
    }

    /// Any live node, including pending and module-internal ones
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Node indexed in the template scope
    pub fn get_block(&self, id: &str) -> Option<&Node> {
        if self.registry.is_indexed(id) {
            self.arena.get(id)
        } else {
            None
        }
    }

    /// Module indexed in the template scope
    pub fn get_module(&self, id: &str) -> Option<&Node> {
        self.get_block(id).filter(|node| node.is_module())
    }

    /// Indexed node currently carrying `tag` in the template scope
    pub fn node_by_tag(&self, tag: &str) -> Option<&Node> {
        let id = self.registry.get_by_tag(tag)?;
        self.get_block(id).filter(|node| node.tag() == tag)
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Template-scope nodes in pre-order
    pub fn all_blocks(&self) -> Vec<&Node> {
        self.nodes_of(self.registry.ids())
    }

    pub fn all_modules(&self) -> Vec<&Node> {
        self.nodes_of(self.registry.modules())
    }

    pub fn all_tools(&self) -> Vec<&Node> {
        self.nodes_of(self.registry.tools())
    }

    /// Template-scope event edges
    pub fn all_events(&self) -> &EventGraph {
        &self.events
    }

    /// Ids of created nodes not yet attached to the tree
    pub fn pending(&self) -> &[NodeId] {
        &self.pending
    }

    fn nodes_of(&self, ids: &[NodeId]) -> Vec<&Node> {
        ids.iter().filter_map(|id| self.arena.get(id)).collect()
    }

    /// Message ids of every tool, in the template and inside modules
    pub fn get_tools(&self) -> BTreeSet<String> {
        let mut tools = BTreeSet::new();
        let Some(root) = self.root.as_deref() else {
            return tools;
        };
        for id in self.arena.descendants(root) {
            let message_id = self
                .arena
                .get(&id)
                .and_then(Node::tool)
                .and_then(|link| link.message_id.clone());
            if let Some(message_id) = message_id {
                tools.insert(message_id);
            }
        }
        tools
    }

    /// Number of nodes reachable from the root
    pub fn node_count(&self) -> usize {
        self.root
            .as_deref()
            .map(|root| self.arena.descendants(root).len())
            .unwrap_or(0)
    }

    /// Index entries across the template scope and every module scope
    pub fn indexed_count(&self) -> usize {
        let mut total = self.registry.len();
        let mut modules: Vec<&NodeId> = self.registry.modules().iter().collect();
        while let Some(module) = modules.pop() {
            if let Some(scope) = self.arena.get(module).and_then(Node::scope) {
                total += scope.registry().len();
                modules.extend(scope.registry().modules().iter());
            }
        }
        total
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }
}

#[derive(Clone, Copy)]
enum FieldSlot {
    PolicyTag,
    Name,
    Description,
    TopicDescription,
}

/// Strings held by a property that is either a string or an array of them
fn string_values(value: &Value) -> impl Iterator<Item = String> + '_ {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    items
        .into_iter()
        .filter_map(|v| v.as_str().map(str::to_string))
}
