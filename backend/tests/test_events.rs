//! Tests for event resolution across template and module scopes

use policy_template_core::core::SequentialIdGenerator;
use policy_template_core::models::{EventConfig, NodeConfig, PolicyDocument};
use policy_template_core::{Change, PolicyTemplate, TemplateContext};

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

fn two_blocks() -> PolicyTemplate {
    template(
        NodeConfig::of_type("interfaceContainerBlock")
            .with_id("root")
            .with_tag("Root")
            .with_child(block("a", "A").with_event(EventConfig::new("A", "RunEvent", "B", "RunEvent")))
            .with_child(block("b", "B")),
    )
}

#[test]
fn test_event_resolves_both_endpoints() {
    let template = two_blocks();

    let edges = template.all_events().edges();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].owner, "a");
    assert_eq!(edges[0].source.as_deref(), Some("a"));
    assert_eq!(edges[0].target.as_deref(), Some("b"));

    let event = &template.node("a").unwrap().events()[0];
    assert_eq!(event.source(), Some("a"));
    assert_eq!(event.target(), Some("b"));
    assert!(event.is_resolved());
}

#[test]
fn test_renamed_target_leaves_event_unresolved() {
    let mut template = two_blocks();

    let change = template.set_node_tag("b", "Renamed").unwrap();
    assert_eq!(change, Change::Changed);

    let event = &template.node("a").unwrap().events()[0];
    assert_eq!(event.source(), Some("a"));
    assert_eq!(event.target(), None);
    assert_eq!(event.target_tag, "B");
    assert_eq!(template.all_events().unresolved().count(), 1);
}

#[test]
fn test_event_resolves_after_target_tag_appears() {
    let mut template = template(
        NodeConfig::of_type("interfaceContainerBlock")
            .with_id("root")
            .with_tag("Root")
            .with_child(block("a", "A").with_event(EventConfig::new("A", "RunEvent", "Later", "RunEvent")))
            .with_child(block("b", "B")),
    );
    assert!(!template.all_events().edges()[0].is_resolved());

    let _ = template.set_node_tag("b", "Later").unwrap();
    assert_eq!(template.all_events().edges()[0].target.as_deref(), Some("b"));
}

#[test]
fn test_unresolved_event_is_not_an_error() {
    let template = template(
        NodeConfig::of_type("interfaceContainerBlock")
            .with_id("root")
            .with_tag("Root")
            .with_child(block("a", "A").with_event(EventConfig::new("Ghost", "x", "", "y"))),
    );

    let edge = &template.all_events().edges()[0];
    assert_eq!(edge.source, None);
    assert_eq!(edge.target, None);
}

#[test]
fn test_module_events_resolve_in_module_scope_only() {
    let template = template(
        NodeConfig::of_type("interfaceContainerBlock")
            .with_id("root")
            .with_tag("Root")
            .with_child(block("outer", "Outer"))
            .with_child(
                NodeConfig::of_type("module")
                    .with_id("m")
                    .with_tag("M")
                    .with_child(
                        block("in1", "In1")
                            .with_event(EventConfig::new("In1", "RunEvent", "In2", "RunEvent"))
                            .with_event(EventConfig::new("In1", "RunEvent", "Outer", "RunEvent")),
                    )
                    .with_child(block("in2", "In2")),
            ),
    );

    assert!(template.all_events().is_empty());

    let scope = template.node("m").unwrap().scope().unwrap();
    let edges = scope.events().edges();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].target.as_deref(), Some("in2"));
    assert_eq!(edges[1].target, None);
}

#[test]
fn test_add_and_remove_event() {
    let mut template = two_blocks();

    let id = template
        .add_event("b", &EventConfig::new("B", "RunEvent", "A", "RunEvent"))
        .unwrap();
    assert_eq!(template.all_events().len(), 2);
    let edge = template.all_events().get(&id).unwrap();
    assert_eq!(edge.source.as_deref(), Some("b"));
    assert_eq!(edge.target.as_deref(), Some("a"));
    assert_eq!(template.all_events().incoming("a").count(), 1);
    assert_eq!(template.all_events().outgoing("a").count(), 1);

    assert_eq!(template.remove_event(&id), Change::Changed);
    assert_eq!(template.all_events().len(), 1);
    assert_eq!(template.remove_event(&id), Change::Unchanged);
}

#[test]
fn test_add_event_to_unknown_owner_fails() {
    let mut template = two_blocks();
    let before = template.all_events().len();

    assert!(template
        .add_event("nobody", &EventConfig::new("A", "x", "B", "y"))
        .is_err());
    assert_eq!(template.all_events().len(), before);
}

#[test]
fn test_removed_target_unresolves_event() {
    let mut template = two_blocks();

    assert_eq!(template.remove_node("b"), Change::Changed);
    let event = &template.node("a").unwrap().events()[0];
    assert_eq!(event.target(), None);
}

#[test]
fn test_events_serialize_by_tag() {
    let template = two_blocks();
    let config = template.get_config().unwrap();
    let event = &config.children[0].events[0];
    assert_eq!(event.source, "A");
    assert_eq!(event.target, "B");
}

#[test]
fn test_duplicate_tag_resolves_to_last_in_tree_order() {
    let template = template(
        NodeConfig::of_type("interfaceContainerBlock")
            .with_id("root")
            .with_tag("Root")
            .with_child(block("src", "Src").with_event(EventConfig::new("Src", "RunEvent", "Dup", "RunEvent")))
            .with_child(block("first", "Dup"))
            .with_child(block("second", "Dup")),
    );

    assert_eq!(template.node_by_tag("Dup").map(|n| n.id()), Some("second"));
    assert_eq!(template.all_events().edges()[0].target.as_deref(), Some("second"));
    assert_eq!(template.registry().displaced(), &["first".to_string()]);
}
