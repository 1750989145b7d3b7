// Template consistency validation
//
// Re-derives every index from the tree and compares it with what the
// template holds:
// - Tag uniqueness per scope
// - Index coverage (no orphans, nothing missing)
// - Resolved event endpoints point at indexed nodes
// - Tree depth limits
//
// Unresolved event endpoints are a normal editing state and are not reported.

use crate::template::PolicyTemplate;
use crate::tree::{EventGraph, IndexRoot, NodeRegistry};
use std::collections::HashSet;
use thiserror::Error;

/// Label of the template-level scope in reports
pub const TEMPLATE_SCOPE: &str = "template";

/// Validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate tag '{tag}' in scope {scope}")]
    DuplicateTag { scope: String, tag: String },

    #[error("Index entry for unreachable node {id} in scope {scope}")]
    OrphanIndexEntry { scope: String, id: String },

    #[error("Reachable node {id} missing from index of scope {scope}")]
    MissingIndexEntry { scope: String, id: String },

    #[error("Event {event} resolves to node {node} which is not indexed in scope {scope}")]
    DanglingEventEndpoint {
        scope: String,
        event: String,
        node: String,
    },

    #[error("Tree depth {actual} exceeds maximum {max}")]
    ExcessiveDepth { actual: usize, max: usize },
}

/// Validation result
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// One index scope as held by the template
struct ScopeView<'a> {
    label: String,
    root: IndexRoot<'a>,
    registry: &'a NodeRegistry,
    events: &'a EventGraph,
}

/// Validate a template's derived state against its tree
///
/// Runs all checks and returns every error found. An invalid (empty)
/// template is trivially consistent.
///
/// # Example
///
/// ```rust
/// use policy_template_core::template::PolicyTemplate;
/// use policy_template_core::validation::validate_template;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let json = r#"{
///   "config": {
///     "id": "root",
///     "tag": "Root",
///     "blockType": "interfaceContainerBlock",
///     "children": [
///       {"id": "a", "tag": "A", "blockType": "informationBlock"}
///     ]
///   }
/// }"#;
/// let template = PolicyTemplate::from_json(json)?;
///
/// match validate_template(&template) {
///     Ok(()) => println!("Template is consistent"),
///     Err(errors) => panic!("Validation failed: {} errors", errors.len()),
/// }
/// # Ok(())
/// # }
/// ```
pub fn validate_template(template: &PolicyTemplate) -> ValidationResult {
    let mut errors = Vec::new();

    let scopes = collect_scopes(template);

    if let Err(e) = validate_tag_uniqueness(&scopes) {
        errors.extend(e);
    }

    if let Err(e) = validate_index_coverage(template, &scopes) {
        errors.extend(e);
    }

    if let Err(e) = validate_event_endpoints(&scopes) {
        errors.extend(e);
    }

    if let Err(e) = validate_tree_depth(template) {
        errors.extend(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_scopes(template: &PolicyTemplate) -> Vec<ScopeView<'_>> {
    let mut scopes = Vec::new();
    let Some(root) = template.root() else {
        return scopes;
    };

    scopes.push(ScopeView {
        label: TEMPLATE_SCOPE.to_string(),
        root: IndexRoot::Node(root.id()),
        registry: template.registry(),
        events: template.all_events(),
    });

    let mut modules: Vec<&str> = template
        .registry()
        .modules()
        .iter()
        .map(String::as_str)
        .collect();
    while let Some(module) = modules.pop() {
        let Some(scope) = template.arena().get(module).and_then(|n| n.scope()) else {
            continue;
        };
        modules.extend(scope.registry().modules().iter().map(String::as_str));
        scopes.push(ScopeView {
            label: module.to_string(),
            root: IndexRoot::Contents(module),
            registry: scope.registry(),
            events: scope.events(),
        });
    }
    scopes
}

// ============================================================================
// Tag uniqueness
// ============================================================================

fn validate_tag_uniqueness(scopes: &[ScopeView<'_>]) -> ValidationResult {
    let mut errors = Vec::new();

    for scope in scopes {
        let mut reported = HashSet::new();
        for tag in scope.registry.duplicate_tags() {
            if reported.insert(tag.as_str()) {
                errors.push(ValidationError::DuplicateTag {
                    scope: scope.label.clone(),
                    tag: tag.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// Index coverage
// ============================================================================

/// Compare each held index with a fresh traversal of the same scope
fn validate_index_coverage(template: &PolicyTemplate, scopes: &[ScopeView<'_>]) -> ValidationResult {
    let mut errors = Vec::new();

    for scope in scopes {
        let mut fresh = NodeRegistry::new();
        fresh.reindex(template.arena(), scope.root);

        let held: HashSet<&str> = scope.registry.ids().iter().map(String::as_str).collect();
        let reachable: HashSet<&str> = fresh.ids().iter().map(String::as_str).collect();

        for id in scope.registry.ids() {
            if !reachable.contains(id.as_str()) {
                errors.push(ValidationError::OrphanIndexEntry {
                    scope: scope.label.clone(),
                    id: id.clone(),
                });
            }
        }
        for id in fresh.ids() {
            if !held.contains(id.as_str()) {
                errors.push(ValidationError::MissingIndexEntry {
                    scope: scope.label.clone(),
                    id: id.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// Event endpoints
// ============================================================================

fn validate_event_endpoints(scopes: &[ScopeView<'_>]) -> ValidationResult {
    let mut errors = Vec::new();

    for scope in scopes {
        for edge in scope.events.edges() {
            let endpoints = edge.source.iter().chain(edge.target.iter());
            for node in endpoints {
                if !scope.registry.is_indexed(node) {
                    errors.push(ValidationError::DanglingEventEndpoint {
                        scope: scope.label.clone(),
                        event: edge.event_id.clone(),
                        node: node.clone(),
                    });
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// Tree depth
// ============================================================================

fn validate_tree_depth(template: &PolicyTemplate) -> ValidationResult {
    let Some(root) = template.root() else {
        return Ok(());
    };
    let max = template.config().max_tree_depth;
    let actual = template.arena().depth(root.id());

    if actual > max {
        Err(vec![ValidationError::ExcessiveDepth { actual, max }])
    } else {
        Ok(())
    }
}
