//! One-hop closure layer selection.

use std::collections::BTreeSet;

use depgraph::{ClosureSelector, NodeFactory, NodeKey, RegularExpressionSelectionCriteria};
use pretty_assertions::assert_eq;

fn chain_graph() -> NodeFactory {
    let mut factory = NodeFactory::new();
    let a = factory.create_feature("a.A.a", true);
    let b = factory.create_feature("b.B.b", true);
    let c = factory.create_feature("c.C.c", true);
    factory.add_dependency(&a, &b);
    factory.add_dependency(&b, &c);
    factory
}

#[test]
fn outbound_round_selects_uncovered_neighbors() {
    let graph = chain_graph();
    let start = NodeKey::feature("a.A.a");
    let coverage: BTreeSet<NodeKey> = [start.clone()].into();

    let mut selector = ClosureSelector::outbound(NodeFactory::new(), coverage);
    selector.traverse_nodes(&graph, &[start]);

    assert_eq!(selector.selected_nodes(), &[NodeKey::feature("b.B.b")]);
    assert_eq!(selector.copied_nodes(), &[NodeKey::feature("b.B.b")]);
}

#[test]
fn round_materializes_ancestors_and_the_crossed_edge() {
    let graph = chain_graph();
    let start = NodeKey::feature("a.A.a");
    let mut selector = ClosureSelector::outbound(NodeFactory::new(), BTreeSet::new());
    selector.traverse_nodes(&graph, &[start.clone()]);

    let result = selector.factory();
    assert!(result.contains(&NodeKey::package("a")));
    assert!(result.contains(&NodeKey::class("a.A")));
    assert!(result.contains(&NodeKey::package("b")));
    assert!(result
        .get(&start)
        .unwrap()
        .outbound()
        .contains(&NodeKey::feature("b.B.b")));
    // One hop only.
    assert!(!result.contains(&NodeKey::feature("c.C.c")));
}

#[test]
fn inbound_round_follows_the_other_side() {
    let graph = chain_graph();
    let start = NodeKey::feature("c.C.c");
    let mut selector = ClosureSelector::inbound(NodeFactory::new(), BTreeSet::new());
    selector.traverse_nodes(&graph, &[start.clone()]);

    assert_eq!(selector.selected_nodes(), &[NodeKey::feature("b.B.b")]);
    let result = selector.factory();
    assert!(result
        .get(&NodeKey::feature("b.B.b"))
        .unwrap()
        .outbound()
        .contains(&start));
}

#[test]
fn covered_neighbors_are_not_selected_again() {
    let graph = chain_graph();
    let start = NodeKey::feature("a.A.a");
    let coverage: BTreeSet<NodeKey> =
        [start.clone(), NodeKey::feature("b.B.b")].into();

    let mut selector = ClosureSelector::outbound(NodeFactory::new(), coverage);
    selector.traverse_nodes(&graph, &[start]);
    assert!(selector.selected_nodes().is_empty());
}

#[test]
fn successive_rounds_walk_the_chain() {
    let graph = chain_graph();
    let start = NodeKey::feature("a.A.a");
    let mut selector =
        ClosureSelector::outbound(NodeFactory::new(), [start.clone()].into());

    selector.traverse_nodes(&graph, &[start]);
    let next = selector.selected_nodes().to_vec();
    assert_eq!(next, vec![NodeKey::feature("b.B.b")]);

    selector.add_coverage(next.iter().cloned());
    selector.traverse_nodes(&graph, &next);
    assert_eq!(selector.selected_nodes(), &[NodeKey::feature("c.C.c")]);

    // Chain saturated.
    let next = selector.selected_nodes().to_vec();
    selector.add_coverage(next.iter().cloned());
    selector.traverse_nodes(&graph, &next);
    assert!(selector.selected_nodes().is_empty());
}

#[test]
fn filter_excludes_neighbors_from_the_round() {
    let graph = chain_graph();
    let start = NodeKey::feature("a.A.a");
    let mut filter = RegularExpressionSelectionCriteria::new();
    filter.set_global_excludes(["^b"]).unwrap();

    let mut selector = ClosureSelector::outbound(NodeFactory::new(), BTreeSet::new())
        .with_filter(Box::new(filter));
    selector.traverse_nodes(&graph, &[start.clone()]);

    assert!(selector.selected_nodes().is_empty());
    assert!(!selector.factory().contains(&NodeKey::feature("b.B.b")));
    // The input itself is still materialized.
    assert!(selector.factory().contains(&start));
}

#[test]
fn each_round_replaces_the_previous_results() {
    let graph = chain_graph();
    let start = NodeKey::feature("a.A.a");
    let mut selector = ClosureSelector::outbound(NodeFactory::new(), BTreeSet::new());
    selector.traverse_nodes(&graph, &[start]);
    assert!(!selector.selected_nodes().is_empty());

    selector.traverse_nodes(&graph, &[]);
    assert!(selector.selected_nodes().is_empty());
    assert!(selector.copied_nodes().is_empty());
}
