//! Tests for template consistency validation
//!
//! Covers:
//! - Derived indices stay consistent across structural edits
//! - Duplicate tags reported per scope
//! - Unresolved events accepted

use policy_template_core::core::SequentialIdGenerator;
use policy_template_core::models::{EventConfig, NodeConfig, PolicyDocument};
use policy_template_core::validation::TEMPLATE_SCOPE;
use policy_template_core::{
    validate_template, PolicyTemplate, TemplateConfig, TemplateContext, ValidationError,
};
use proptest::prelude::*;

fn template(config: NodeConfig) -> PolicyTemplate {
    let document = PolicyDocument {
        config: Some(config),
        ..Default::default()
    };
    let context = TemplateContext::default().with_ids(SequentialIdGenerator::new("id"));
    PolicyTemplate::with_context(Some(document), context).unwrap()
}

fn block(id: &str, tag: &str) -> NodeConfig {
    NodeConfig::of_type("informationBlock").with_id(id).with_tag(tag)
}

fn sample() -> PolicyTemplate {
    template(
        NodeConfig::of_type("interfaceContainerBlock")
            .with_id("root")
            .with_tag("Root")
            .with_child(
                NodeConfig::of_type("interfaceStepBlock")
                    .with_id("step")
                    .with_tag("Step")
                    .with_event(EventConfig::new("Step", "RunEvent", "Info", "RunEvent"))
                    .with_child(block("info", "Info"))
                    .with_child(block("more", "More")),
            )
            .with_child(
                NodeConfig::of_type("module")
                    .with_id("mod")
                    .with_tag("Mod")
                    .with_child(block("inner", "Inner")),
            ),
    )
}

// ============================================================================
// Consistency after edits
// ============================================================================

#[test]
fn test_loaded_template_is_consistent() {
    assert_eq!(validate_template(&sample()), Ok(()));
}

#[test]
fn test_invalid_template_is_trivially_consistent() {
    assert_eq!(validate_template(&PolicyTemplate::invalid()), Ok(()));
}

#[test]
fn test_consistent_after_structural_edits() {
    let mut template = sample();

    let fresh = template.new_block("informationBlock").unwrap();
    let _ = template.add_child("mod", &fresh, None).unwrap();
    let _ = template.move_node("more", "root", Some(0)).unwrap();
    let _ = template.convert_module("step").unwrap();
    let _ = template.set_node_tag("inner", "Renamed").unwrap();
    let _ = template.remove_node("info");

    assert_eq!(validate_template(&template), Ok(()));
}

#[test]
fn test_pending_nodes_are_not_index_entries() {
    let mut template = sample();
    let _ = template.new_block("informationBlock").unwrap();

    assert_eq!(template.pending().len(), 1);
    assert_eq!(validate_template(&template), Ok(()));
}

// ============================================================================
// Reported problems
// ============================================================================

#[test]
fn test_duplicate_tag_in_module_scope_labelled_by_module() {
    let template = template(
        NodeConfig::of_type("interfaceContainerBlock")
            .with_id("root")
            .with_tag("Root")
            .with_child(block("outside", "Twin"))
            .with_child(
                NodeConfig::of_type("module")
                    .with_id("mod")
                    .with_tag("Mod")
                    .with_child(block("t1", "Twin"))
                    .with_child(block("t2", "Twin")),
            ),
    );

    let errors = validate_template(&template).unwrap_err();
    assert_eq!(
        errors,
        vec![ValidationError::DuplicateTag {
            scope: "mod".to_string(),
            tag: "Twin".to_string(),
        }]
    );
}

#[test]
fn test_duplicates_in_several_scopes_all_reported() {
    let template = template(
        NodeConfig::of_type("interfaceContainerBlock")
            .with_id("root")
            .with_tag("Root")
            .with_child(block("a", "Twin"))
            .with_child(block("b", "Twin"))
            .with_child(
                NodeConfig::of_type("module")
                    .with_id("mod")
                    .with_tag("Mod")
                    .with_child(block("c", "Pair"))
                    .with_child(block("d", "Pair")),
            ),
    );

    let errors = validate_template(&template).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&ValidationError::DuplicateTag {
        scope: TEMPLATE_SCOPE.to_string(),
        tag: "Twin".to_string(),
    }));
}

#[test]
fn test_unresolved_events_are_accepted() {
    let mut template = sample();
    let _ = template.set_node_tag("info", "Elsewhere").unwrap();

    assert_eq!(template.all_events().unresolved().count(), 1);
    assert_eq!(validate_template(&template), Ok(()));
}

#[test]
fn test_depth_limit_from_config() {
    let document = PolicyDocument {
        config: Some(
            NodeConfig::of_type("interfaceContainerBlock")
                .with_tag("Root")
                .with_child(
                    NodeConfig::of_type("interfaceContainerBlock")
                        .with_tag("Middle")
                        .with_child(NodeConfig::of_type("informationBlock").with_tag("Leaf")),
                ),
        ),
        ..Default::default()
    };
    let config = TemplateConfig {
        max_tree_depth: 1,
        ..Default::default()
    };
    let template =
        PolicyTemplate::with_context(Some(document), TemplateContext::default().with_config(config))
            .unwrap();

    let errors = validate_template(&template).unwrap_err();
    assert!(matches!(
        errors.as_slice(),
        [ValidationError::ExcessiveDepth { max: 1, .. }]
    ));
}

// ============================================================================
// Property tests
// ============================================================================

#[derive(Debug, Clone)]
enum Edit {
    Insert(usize),
    Move(usize, usize),
    Remove(usize),
    Convert(usize),
    Rename(usize, u8),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        any::<usize>().prop_map(Edit::Insert),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Edit::Move(a, b)),
        any::<usize>().prop_map(Edit::Remove),
        any::<usize>().prop_map(Edit::Convert),
        (any::<usize>(), 0u8..4).prop_map(|(a, t)| Edit::Rename(a, t)),
    ]
}

fn attached(template: &PolicyTemplate) -> Vec<String> {
    let root = template.root().map(|r| r.id().to_string()).unwrap_or_default();
    template.arena().descendants(&root)
}

fn pick(ids: &[String], index: usize) -> &str {
    &ids[index % ids.len()]
}

fn apply(template: &mut PolicyTemplate, edit: &Edit) {
    let ids = attached(template);
    match *edit {
        Edit::Insert(parent) => {
            if let Ok(node) = template.new_block("informationBlock") {
                let _ = template.add_child(pick(&ids, parent), &node, None);
            }
        }
        Edit::Move(node, parent) => {
            let _ = template.move_node(pick(&ids, node), pick(&ids, parent), None);
        }
        Edit::Remove(node) => {
            let _ = template.remove_node(pick(&ids, node));
        }
        Edit::Convert(node) => {
            let _ = template.convert_module(pick(&ids, node));
        }
        Edit::Rename(node, tag) => {
            let _ = template.set_node_tag(pick(&ids, node), &format!("Tag_{}", tag));
        }
    }
}

proptest! {
    /// Any sequence of edits keeps every derived index consistent
    #[test]
    fn prop_edits_preserve_consistency(edits in prop::collection::vec(edit(), 1..25)) {
        let mut template = sample();
        for edit in &edits {
            apply(&mut template, edit);
            prop_assert_eq!(validate_template(&template), Ok(()));
        }
    }

    /// The node count only changes by insertions, removals, and conversions
    #[test]
    fn prop_move_and_rename_keep_node_count(edits in prop::collection::vec(edit(), 1..25)) {
        let mut template = sample();
        for edit in &edits {
            let before = template.node_count();
            apply(&mut template, edit);
            if matches!(edit, Edit::Move(..) | Edit::Rename(..)) {
                prop_assert_eq!(template.node_count(), before);
            }
        }
    }
}
