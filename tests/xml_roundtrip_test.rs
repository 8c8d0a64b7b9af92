//! Reading and writing the XML interchange format.

use depgraph::{
    read_document, read_document_with_listener, write_document, DependencyEvent, NodeFactory,
    NodeKey, XmlError,
};
use indoc::indoc;
use pretty_assertions::assert_eq;

const SAMPLE: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <dependencies>
        <package confirmed="yes">
            <name>a</name>
            <class confirmed="yes">
                <name>a.A</name>
                <feature confirmed="yes">
                    <name>a.A.a</name>
                    <outbound type="feature" confirmed="no">b.B.b</outbound>
                </feature>
            </class>
        </package>
        <package confirmed="no">
            <name>b</name>
            <class confirmed="no">
                <name>b.B</name>
                <feature confirmed="no">
                    <name>b.B.b</name>
                    <inbound type="feature" confirmed="yes">a.A.a</inbound>
                </feature>
            </class>
        </package>
    </dependencies>
"#};

#[test]
fn sample_document_loads_into_a_factory() {
    let factory = read_document(SAMPLE).unwrap();

    assert_eq!(factory.packages().len(), 2);
    assert_eq!(factory.classes().len(), 2);
    assert_eq!(factory.features().len(), 2);

    let caller = factory.get(&NodeKey::feature("a.A.a")).unwrap();
    assert!(caller.is_confirmed());
    assert!(caller.outbound().contains(&NodeKey::feature("b.B.b")));

    let callee = factory.get(&NodeKey::feature("b.B.b")).unwrap();
    assert!(!callee.is_confirmed());
    assert!(callee.inbound().contains(&NodeKey::feature("a.A.a")));
}

#[test]
fn absent_confirmed_attribute_means_confirmed() {
    let xml = indoc! {r#"
        <dependencies>
            <package>
                <name>a</name>
            </package>
        </dependencies>
    "#};
    let factory = read_document(xml).unwrap();
    assert!(factory.get(&NodeKey::package("a")).unwrap().is_confirmed());
}

#[test]
fn confirmed_no_is_parsed_as_referenced() {
    let xml = indoc! {r#"
        <dependencies>
            <package confirmed="no">
                <name>a</name>
            </package>
        </dependencies>
    "#};
    let factory = read_document(xml).unwrap();
    assert!(!factory.get(&NodeKey::package("a")).unwrap().is_confirmed());
}

#[test]
fn edge_targets_are_materialized_with_their_chain() {
    let xml = indoc! {r#"
        <dependencies>
            <package confirmed="yes">
                <name>a</name>
                <class confirmed="yes">
                    <name>a.A</name>
                    <outbound type="class" confirmed="no">b.B</outbound>
                </class>
            </package>
        </dependencies>
    "#};
    let factory = read_document(xml).unwrap();
    assert!(factory.contains(&NodeKey::class("b.B")));
    assert!(factory.contains(&NodeKey::package("b")));
    assert!(!factory.get(&NodeKey::class("b.B")).unwrap().is_confirmed());
}

#[test]
fn written_documents_read_back_identically() {
    let mut factory = NodeFactory::new();
    let caller = factory.create_feature("a.A.a", true);
    let callee = factory.create_feature("b.B.b", false);
    factory.add_dependency(&caller, &callee);
    let class_from = factory.create_class("a.A", true);
    let class_to = factory.create_class("c.C", false);
    factory.add_dependency(&class_from, &class_to);

    let written = write_document(&factory);
    let reloaded = read_document(&written).unwrap();
    assert_eq!(write_document(&reloaded), written);
}

#[test]
fn names_with_markup_characters_round_trip() {
    let mut factory = NodeFactory::new();
    factory.create_feature("a.A.compare(List<String>)", true);

    let written = write_document(&factory);
    let reloaded = read_document(&written).unwrap();
    assert!(reloaded.contains(&NodeKey::feature("a.A.compare(List<String>)")));
}

#[test]
fn writer_emits_nodes_in_name_order() {
    let mut factory = NodeFactory::new();
    factory.create_package("b", true);
    factory.create_package("a", true);

    let written = write_document(&factory);
    let a = written.find("<name>a</name>").unwrap();
    let b = written.find("<name>b</name>").unwrap();
    assert!(a < b);
}

#[test]
fn listener_sees_the_load_in_order() {
    let mut events: Vec<DependencyEvent> = Vec::new();
    read_document_with_listener(SAMPLE, &mut events).unwrap();

    assert_eq!(events.first(), Some(&DependencyEvent::BeginSession));
    assert_eq!(events.last(), Some(&DependencyEvent::EndSession));
    assert!(events.contains(&DependencyEvent::BeginClass {
        name: "a.A".to_string()
    }));
    assert!(events.contains(&DependencyEvent::EndClass {
        name: "a.A".to_string()
    }));
    assert!(events.contains(&DependencyEvent::Dependency {
        dependent: NodeKey::feature("a.A.a"),
        dependable: NodeKey::feature("b.B.b"),
    }));
}

#[test]
fn inbound_elements_fire_with_the_dependent_first() {
    let xml = indoc! {r#"
        <dependencies>
            <package confirmed="yes">
                <name>b</name>
                <class confirmed="yes">
                    <name>b.B</name>
                    <inbound type="class" confirmed="no">a.A</inbound>
                </class>
            </package>
        </dependencies>
    "#};
    let mut events: Vec<DependencyEvent> = Vec::new();
    read_document_with_listener(xml, &mut events).unwrap();
    assert!(events.contains(&DependencyEvent::Dependency {
        dependent: NodeKey::class("a.A"),
        dependable: NodeKey::class("b.B"),
    }));
}

#[test]
fn unexpected_elements_are_rejected() {
    let xml = "<dependencies><bogus>x</bogus></dependencies>";
    match read_document(xml) {
        Err(XmlError::UnexpectedElement { element }) => assert_eq!(element, "bogus"),
        other => panic!("expected UnexpectedElement, got {other:?}"),
    }
}

#[test]
fn unknown_dependency_type_is_rejected() {
    let xml = indoc! {r#"
        <dependencies>
            <package confirmed="yes">
                <name>a</name>
                <outbound type="method" confirmed="no">b</outbound>
            </package>
        </dependencies>
    "#};
    match read_document(xml) {
        Err(XmlError::UnknownDependencyType { value }) => assert_eq!(value, "method"),
        other => panic!("expected UnknownDependencyType, got {other:?}"),
    }
}

#[test]
fn edge_without_a_type_is_rejected() {
    let xml = indoc! {r#"
        <dependencies>
            <package confirmed="yes">
                <name>a</name>
                <outbound confirmed="no">b</outbound>
            </package>
        </dependencies>
    "#};
    assert!(matches!(
        read_document(xml),
        Err(XmlError::UnknownDependencyType { .. })
    ));
}

#[test]
fn empty_document_yields_an_empty_factory() {
    let factory = read_document("<dependencies></dependencies>").unwrap();
    assert_eq!(factory.nodes().count(), 0);
}
