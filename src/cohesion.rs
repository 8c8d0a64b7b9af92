//! LCOM4 cohesion: connected components of a class's features.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::unionfind::UnionFind;

use crate::graph::{Node, NodeFactory, NodeKey};
use crate::traversal::{SelectiveTraversalStrategy, TraversalState, Visitor};

/// Gathers, per visited class, the connected components of its own
/// non-constructor features under intra-class dependency edges (either
/// direction). Cross-class edges never connect, and constructors are left
/// out entirely, including as mediating hops. LCOM4 for a class is its
/// component count.
pub struct Lcom4Gatherer {
    strategy: SelectiveTraversalStrategy,
    state: TraversalState,
    results: BTreeMap<String, Vec<BTreeSet<NodeKey>>>,
}

impl Lcom4Gatherer {
    pub fn new() -> Self {
        let mut strategy = SelectiveTraversalStrategy::comprehensive();
        strategy.set_pre_outbound(false);
        strategy.set_pre_inbound(false);
        Self {
            strategy,
            state: TraversalState::default(),
            results: BTreeMap::new(),
        }
    }

    /// Components keyed by class name. Every visited class has an entry;
    /// a class with no non-constructor features maps to an empty list.
    pub fn results(&self) -> &BTreeMap<String, Vec<BTreeSet<NodeKey>>> {
        &self.results
    }
}

impl Default for Lcom4Gatherer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for Lcom4Gatherer {
    fn strategy(&self) -> &SelectiveTraversalStrategy {
        &self.strategy
    }

    fn state(&self) -> &TraversalState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut TraversalState {
        &mut self.state
    }

    fn preprocess_class(&mut self, graph: &NodeFactory, node: &Node) {
        self.results
            .insert(node.name().to_string(), components_of(graph, node));
    }
}

fn is_constructor(class_simple: &str, feature: &Node) -> bool {
    feature
        .simple_name()
        .strip_prefix(class_simple)
        .is_some_and(|rest| rest.starts_with('('))
}

fn components_of(graph: &NodeFactory, class: &Node) -> Vec<BTreeSet<NodeKey>> {
    let class_simple = class.simple_name();
    let features: Vec<&Node> = class
        .children()
        .iter()
        .filter_map(|key| graph.get(key))
        .filter(|feature| !is_constructor(class_simple, feature))
        .collect();
    if features.is_empty() {
        return Vec::new();
    }

    let index: BTreeMap<&NodeKey, usize> = features
        .iter()
        .enumerate()
        .map(|(i, feature)| (feature.key(), i))
        .collect();
    let mut sets: UnionFind<usize> = UnionFind::new(features.len());
    for (i, feature) in features.iter().enumerate() {
        let linked = feature.outbound().iter().chain(feature.inbound());
        for neighbor in linked {
            if let Some(&j) = index.get(neighbor) {
                sets.union(i, j);
            }
        }
    }

    let mut groups: BTreeMap<usize, BTreeSet<NodeKey>> = BTreeMap::new();
    for (i, feature) in features.iter().enumerate() {
        groups
            .entry(sets.find(i))
            .or_default()
            .insert(feature.key().clone());
    }
    groups.into_values().collect()
}
