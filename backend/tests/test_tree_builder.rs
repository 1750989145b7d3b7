//! Tests for building node trees from configs

use policy_template_core::core::SequentialIdGenerator;
use policy_template_core::models::{EventConfig, NodeConfig, PolicyDocument};
use policy_template_core::tree::{
    BlockCatalogue, BuildError, CatalogueNodeFactory, NodeKind, TreeBuilder,
};
use policy_template_core::{PolicyTemplate, TemplateContext, TemplateError};
use serde_json::json;

fn factory() -> CatalogueNodeFactory {
    CatalogueNodeFactory::default()
}

#[test]
fn test_children_built_in_declaration_order() {
    let config = NodeConfig::of_type("interfaceContainerBlock")
        .with_id("root")
        .with_child(NodeConfig::of_type("informationBlock").with_id("first"))
        .with_child(NodeConfig::of_type("informationBlock").with_id("second"))
        .with_child(NodeConfig::of_type("informationBlock").with_id("third"));

    let factory = factory();
    let mut ids = SequentialIdGenerator::new("n");
    let built = TreeBuilder::new(&factory, &mut ids).build(&config, None).unwrap();

    let root = built.arena.get(&built.root).unwrap();
    assert_eq!(root.children(), &["first", "second", "third"]);
    for child in root.children() {
        assert_eq!(built.arena.get(child).unwrap().parent(), Some("root"));
    }
}

#[test]
fn test_parent_recorded_on_subtree_root() {
    let factory = factory();
    let mut ids = SequentialIdGenerator::new("n");
    let built = TreeBuilder::new(&factory, &mut ids)
        .build(&NodeConfig::of_type("informationBlock"), Some("outer"))
        .unwrap();

    assert_eq!(built.arena.get(&built.root).unwrap().parent(), Some("outer"));
}

#[test]
fn test_unknown_block_type_aborts_build() {
    let config = NodeConfig::of_type("interfaceContainerBlock")
        .with_child(NodeConfig::of_type("informationBlock"))
        .with_child(NodeConfig::of_type("noSuchBlock"));

    let factory = factory();
    let mut ids = SequentialIdGenerator::new("n");
    let result = TreeBuilder::new(&factory, &mut ids).build(&config, None);

    assert_eq!(
        result.unwrap_err(),
        BuildError::UnknownBlockType("noSuchBlock".to_string())
    );
}

#[test]
fn test_custom_catalogue_accepts_new_block_type() {
    let mut catalogue = BlockCatalogue::new(["rootBlock"]);
    catalogue.insert("customBlock");
    let factory = CatalogueNodeFactory::new(catalogue);
    let config = NodeConfig::of_type("rootBlock").with_child(NodeConfig::of_type("customBlock"));

    let mut ids = SequentialIdGenerator::new("n");
    let built = TreeBuilder::new(&factory, &mut ids).build(&config, None).unwrap();
    assert_eq!(built.arena.len(), 2);
}

#[test]
fn test_catalogue_loads_from_json_array() {
    let catalogue = BlockCatalogue::from_json(r#"["a", "b"]"#).unwrap();
    assert_eq!(catalogue.classify("a"), Ok(NodeKind::Block));
    assert!(catalogue.classify("informationBlock").is_err());
    assert_eq!(catalogue.classify("module"), Ok(NodeKind::Module));
}

#[test]
fn test_module_scope_indexed_once_subtree_complete() {
    let config = NodeConfig::of_type("module")
        .with_id("m")
        .with_tag("M")
        .with_child(
            NodeConfig::of_type("interfaceContainerBlock")
                .with_id("c")
                .with_tag("C")
                .with_child(NodeConfig::of_type("informationBlock").with_id("leaf").with_tag("Leaf")),
        );

    let factory = factory();
    let mut ids = SequentialIdGenerator::new("n");
    let built = TreeBuilder::new(&factory, &mut ids).build(&config, None).unwrap();

    let module = built.arena.get("m").unwrap();
    let scope = module.scope().unwrap();
    assert_eq!(scope.registry().ids(), &["c", "leaf"]);
    assert_eq!(scope.registry().get_by_tag("Leaf"), Some("leaf"));
    assert_eq!(built.arena.get("leaf").unwrap().module(), Some("m"));
}

#[test]
fn test_tool_children_dropped() {
    let config = NodeConfig::of_type("tool")
        .with_id("t")
        .with_child(NodeConfig::of_type("informationBlock"));

    let factory = factory();
    let mut ids = SequentialIdGenerator::new("n");
    let built = TreeBuilder::new(&factory, &mut ids).build(&config, None).unwrap();

    assert_eq!(built.arena.len(), 1);
    assert!(built.arena.get("t").unwrap().children().is_empty());
}

#[test]
fn test_tool_link_read_from_config() {
    let mut config = NodeConfig::of_type("tool").with_id("t");
    config.message_id = Some("1700000000.000000001".to_string());
    config.hash = Some("abc".to_string());

    let factory = factory();
    let mut ids = SequentialIdGenerator::new("n");
    let built = TreeBuilder::new(&factory, &mut ids).build(&config, None).unwrap();

    let link = built.arena.get("t").unwrap().tool().unwrap();
    assert_eq!(link.message_id.as_deref(), Some("1700000000.000000001"));
    assert_eq!(link.hash.as_deref(), Some("abc"));
}

#[test]
fn test_ids_already_in_arena_are_regenerated() {
    let factory = factory();
    let mut ids = SequentialIdGenerator::new("n");
    let existing = TreeBuilder::new(&factory, &mut ids)
        .build(&NodeConfig::of_type("informationBlock").with_id("taken"), None)
        .unwrap();

    let built = TreeBuilder::new(&factory, &mut ids)
        .avoiding(&existing.arena)
        .build(&NodeConfig::of_type("informationBlock").with_id("taken"), None)
        .unwrap();

    assert_ne!(built.root, "taken");
}

#[test]
fn test_events_and_properties_carried() {
    let mut config = NodeConfig::of_type("informationBlock")
        .with_id("b")
        .with_tag("B")
        .with_permissions(["OWNER"])
        .with_event(EventConfig::new("B", "RunEvent", "C", "RunEvent"));
    config
        .properties
        .insert("uiMetaData".to_string(), json!({"title": "Hello"}));

    let factory = factory();
    let mut ids = SequentialIdGenerator::new("n");
    let built = TreeBuilder::new(&factory, &mut ids).build(&config, None).unwrap();

    let node = built.arena.get("b").unwrap();
    assert_eq!(node.events().len(), 1);
    assert_eq!(node.events()[0].source_tag, "B");
    assert_eq!(node.permissions(), &["OWNER"]);
    assert_eq!(node.properties()["uiMetaData"]["title"], "Hello");

    let round = built.arena.to_config("b").unwrap();
    assert_eq!(round, config);
}

// ============================================================================
// Through the template
// ============================================================================

#[test]
fn test_empty_root_config_defaults_to_container() {
    let document = PolicyDocument {
        config: Some(NodeConfig::default()),
        ..Default::default()
    };
    let template = PolicyTemplate::new(Some(document)).unwrap();

    let root = template.root().unwrap();
    assert_eq!(root.block_type(), "interfaceContainerBlock");
    assert_eq!(root.tag(), "interfaceContainerBlock_1");
}

#[test]
fn test_missing_root_config_defaults_to_container() {
    let template = PolicyTemplate::new(Some(PolicyDocument::default())).unwrap();
    assert_eq!(template.root().unwrap().block_type(), "interfaceContainerBlock");
}

#[test]
fn test_construction_error_surfaces() {
    let document = PolicyDocument {
        config: Some(NodeConfig::of_type("interfaceContainerBlock").with_child(NodeConfig::of_type("bogus"))),
        ..Default::default()
    };
    let err = PolicyTemplate::new(Some(document)).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Build(BuildError::UnknownBlockType(ref t)) if t == "bogus"
    ));
}

#[test]
fn test_missing_tags_generated_from_block_type() {
    let document = PolicyDocument {
        config: Some(
            NodeConfig::of_type("interfaceContainerBlock")
                .with_tag("Root")
                .with_child(NodeConfig::of_type("informationBlock").with_id("x"))
                .with_child(NodeConfig::of_type("informationBlock").with_id("y")),
        ),
        ..Default::default()
    };
    let context = TemplateContext::default().with_ids(SequentialIdGenerator::new("id"));
    let template = PolicyTemplate::with_context(Some(document), context).unwrap();

    assert_eq!(template.node("x").unwrap().tag(), "informationBlock_1");
    assert_eq!(template.node("y").unwrap().tag(), "informationBlock_2");
    assert_eq!(
        template.node_by_tag("informationBlock_2").map(|n| n.id()),
        Some("y")
    );
}
