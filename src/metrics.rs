//! Whole-graph counts and shape histograms.

use std::collections::BTreeMap;

use crate::graph::{Node, NodeFactory, NodeKind};
use crate::traversal::{SelectiveTraversalStrategy, TraversalState, Visitor};

#[derive(Debug, Default, Clone, Copy)]
struct KindTally {
    nodes: u64,
    confirmed: u64,
    inbound: u64,
    outbound: u64,
}

/// Counts nodes (total and confirmed) and edge endpoints per kind, plus
/// classes-per-package and features-per-class histograms.
pub struct MetricsGatherer {
    strategy: SelectiveTraversalStrategy,
    state: TraversalState,
    packages: KindTally,
    classes: KindTally,
    features: KindTally,
    classes_per_package: BTreeMap<usize, u64>,
    features_per_class: BTreeMap<usize, u64>,
}

impl MetricsGatherer {
    pub fn new() -> Self {
        let mut strategy = SelectiveTraversalStrategy::comprehensive();
        strategy.set_pre_outbound(false);
        strategy.set_pre_inbound(false);
        Self {
            strategy,
            state: TraversalState::default(),
            packages: KindTally::default(),
            classes: KindTally::default(),
            features: KindTally::default(),
            classes_per_package: BTreeMap::new(),
            features_per_class: BTreeMap::new(),
        }
    }

    pub fn nb_packages(&self) -> u64 {
        self.packages.nodes
    }

    pub fn nb_confirmed_packages(&self) -> u64 {
        self.packages.confirmed
    }

    pub fn nb_classes(&self) -> u64 {
        self.classes.nodes
    }

    pub fn nb_confirmed_classes(&self) -> u64 {
        self.classes.confirmed
    }

    pub fn nb_features(&self) -> u64 {
        self.features.nodes
    }

    pub fn nb_confirmed_features(&self) -> u64 {
        self.features.confirmed
    }

    pub fn nb_inbound(&self, kind: NodeKind) -> u64 {
        self.tally(kind).inbound
    }

    pub fn nb_outbound(&self, kind: NodeKind) -> u64 {
        self.tally(kind).outbound
    }

    pub fn classes_per_package(&self) -> &BTreeMap<usize, u64> {
        &self.classes_per_package
    }

    pub fn features_per_class(&self) -> &BTreeMap<usize, u64> {
        &self.features_per_class
    }

    fn tally(&self, kind: NodeKind) -> &KindTally {
        match kind {
            NodeKind::Package => &self.packages,
            NodeKind::Class => &self.classes,
            NodeKind::Feature => &self.features,
        }
    }

    fn tally_mut(&mut self, kind: NodeKind) -> &mut KindTally {
        match kind {
            NodeKind::Package => &mut self.packages,
            NodeKind::Class => &mut self.classes,
            NodeKind::Feature => &mut self.features,
        }
    }

    fn count(&mut self, node: &Node) {
        let tally = self.tally_mut(node.kind());
        tally.nodes += 1;
        if node.is_confirmed() {
            tally.confirmed += 1;
        }
        tally.inbound += node.inbound().len() as u64;
        tally.outbound += node.outbound().len() as u64;
    }
}

impl Default for MetricsGatherer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for MetricsGatherer {
    fn strategy(&self) -> &SelectiveTraversalStrategy {
        &self.strategy
    }

    fn state(&self) -> &TraversalState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut TraversalState {
        &mut self.state
    }

    fn preprocess_package(&mut self, _graph: &NodeFactory, node: &Node) {
        self.count(node);
        *self
            .classes_per_package
            .entry(node.children().len())
            .or_insert(0) += 1;
    }

    fn preprocess_class(&mut self, _graph: &NodeFactory, node: &Node) {
        self.count(node);
        *self
            .features_per_class
            .entry(node.children().len())
            .or_insert(0) += 1;
    }

    fn preprocess_feature(&mut self, _graph: &NodeFactory, node: &Node) {
        self.count(node);
    }
}
