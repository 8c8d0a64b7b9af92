//! Interning, containment derivation and confirmed-state propagation in
//! NodeFactory.

use depgraph::{NodeFactory, NodeKey, NodeKind};
use pretty_assertions::assert_eq;

#[test]
fn create_package_interns_by_name() {
    let mut factory = NodeFactory::new();
    let first = factory.create_package("a", false);
    let second = factory.create_package("a", false);
    assert_eq!(first, second);
    assert_eq!(factory.packages().len(), 1);
}

#[test]
fn create_class_materializes_its_package() {
    let mut factory = NodeFactory::new();
    let class = factory.create_class("a.A", false);
    assert_eq!(factory.packages().len(), 1);
    let package = factory.get(&NodeKey::package("a")).unwrap();
    assert!(package.children().contains(&class));
    assert_eq!(
        factory.get(&class).unwrap().parent(),
        Some(&NodeKey::package("a"))
    );
}

#[test]
fn undotted_class_lands_in_default_package() {
    let mut factory = NodeFactory::new();
    factory.create_class("A", false);
    assert!(factory.contains(&NodeKey::package("")));
}

#[test]
fn create_feature_materializes_class_and_package() {
    let mut factory = NodeFactory::new();
    let feature = factory.create_feature("a.A.a", false);
    assert!(factory.contains(&NodeKey::class("a.A")));
    assert!(factory.contains(&NodeKey::package("a")));
    let class = factory.get(&NodeKey::class("a.A")).unwrap();
    assert!(class.children().contains(&feature));
}

#[test]
fn feature_name_with_dotted_parameter_list_resolves_owner() {
    let mut factory = NodeFactory::new();
    factory.create_feature("foo.Foo.foo(foo.Foo)", false);
    assert!(factory.contains(&NodeKey::class("foo.Foo")));
    assert!(factory.contains(&NodeKey::package("foo")));
    assert_eq!(factory.classes().len(), 1);
}

#[test]
fn empty_name_yields_degenerate_nodes() {
    let mut factory = NodeFactory::new();
    let feature = factory.create_feature("", false);
    assert!(factory.contains(&feature));
    assert!(factory.contains(&NodeKey::class("")));
    assert!(factory.contains(&NodeKey::package("")));
}

#[test]
fn confirmed_creation_cascades_to_ancestors() {
    let mut factory = NodeFactory::new();
    factory.create_class("a.A", true);
    assert!(factory.get(&NodeKey::class("a.A")).unwrap().is_confirmed());
    assert!(factory.get(&NodeKey::package("a")).unwrap().is_confirmed());
}

#[test]
fn recreating_confirmed_node_as_referenced_does_not_downgrade() {
    let mut factory = NodeFactory::new();
    factory.create_class("a.A", true);
    factory.create_class("a.A", false);
    assert!(factory.get(&NodeKey::class("a.A")).unwrap().is_confirmed());
    assert!(factory.get(&NodeKey::package("a")).unwrap().is_confirmed());
}

#[test]
fn upgrading_existing_referenced_class_confirms_package_too() {
    let mut factory = NodeFactory::new();
    factory.create_class("a.A", false);
    assert!(!factory.get(&NodeKey::package("a")).unwrap().is_confirmed());

    factory.create_class("a.A", true);
    assert!(factory.get(&NodeKey::class("a.A")).unwrap().is_confirmed());
    assert!(factory.get(&NodeKey::package("a")).unwrap().is_confirmed());
}

#[test]
fn confirming_container_leaves_members_referenced() {
    let mut factory = NodeFactory::new();
    factory.create_feature("a.A.a", false);
    factory.create_class("a.A", true);
    assert!(factory.get(&NodeKey::class("a.A")).unwrap().is_confirmed());
    assert!(!factory.get(&NodeKey::feature("a.A.a")).unwrap().is_confirmed());
}

#[test]
fn add_dependency_records_both_halves() {
    let mut factory = NodeFactory::new();
    let from = factory.create_feature("a.A.a", true);
    let to = factory.create_feature("b.B.b", false);
    factory.add_dependency(&from, &to);

    assert!(factory.get(&from).unwrap().outbound().contains(&to));
    assert!(factory.get(&to).unwrap().inbound().contains(&from));
}

#[test]
fn duplicate_dependency_is_a_noop() {
    let mut factory = NodeFactory::new();
    let from = factory.create_class("a.A", false);
    let to = factory.create_class("b.B", false);
    factory.add_dependency(&from, &to);
    factory.add_dependency(&from, &to);
    assert_eq!(factory.get(&from).unwrap().outbound().len(), 1);
}

#[test]
fn self_dependency_is_permitted() {
    let mut factory = NodeFactory::new();
    let class = factory.create_class("a.A", false);
    factory.add_dependency(&class, &class);
    let node = factory.get(&class).unwrap();
    assert!(node.outbound().contains(&class));
    assert!(node.inbound().contains(&class));
}

#[test]
fn remove_dependency_unlinks_both_halves() {
    let mut factory = NodeFactory::new();
    let from = factory.create_class("a.A", false);
    let to = factory.create_class("b.B", false);
    factory.add_dependency(&from, &to);
    factory.remove_dependency(&from, &to);
    assert!(factory.get(&from).unwrap().outbound().is_empty());
    assert!(factory.get(&to).unwrap().inbound().is_empty());
}

#[test]
fn class_inheritance_is_symmetric() {
    let mut factory = NodeFactory::new();
    let child = factory.create_class("a.Sub", true);
    let parent = factory.create_class("b.Base", true);
    factory.add_class_parent(&child, &parent);
    assert!(factory.get(&child).unwrap().parent_classes().contains(&parent));
    assert!(factory.get(&parent).unwrap().child_classes().contains(&child));
}

#[test]
fn keys_order_by_name_across_kinds() {
    let a = NodeKey::feature("a.A.a");
    let b = NodeKey::package("b");
    assert!(a < b);
}

#[test]
fn simple_names_strip_the_container_prefix() {
    let mut factory = NodeFactory::new();
    factory.create_feature("a.A.a(int)", false);
    assert_eq!(
        factory.get(&NodeKey::class("a.A")).unwrap().simple_name(),
        "A"
    );
    assert_eq!(
        factory
            .get(&NodeKey::feature("a.A.a(int)"))
            .unwrap()
            .simple_name(),
        "a(int)"
    );
    assert_eq!(factory.get(&NodeKey::package("a")).unwrap().simple_name(), "a");
}

#[test]
fn nodes_iterates_packages_then_classes_then_features() {
    let mut factory = NodeFactory::new();
    factory.create_feature("b.B.b", false);
    factory.create_feature("a.A.a", false);
    let kinds: Vec<NodeKind> = factory.nodes().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Package,
            NodeKind::Package,
            NodeKind::Class,
            NodeKind::Class,
            NodeKind::Feature,
            NodeKind::Feature,
        ]
    );
    let names: Vec<&str> = factory.packages().values().map(|n| n.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
}
