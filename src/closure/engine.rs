use std::collections::BTreeSet;

use log::debug;

use crate::copy::copy_node;
use crate::criteria::SelectionCriteria;
use crate::graph::{NodeFactory, NodeKey};

use super::{ClosureSelector, Direction};

/// Layered closure over one direction of the dependency edges.
///
/// Layer 0 is a scoped copy of every node under the given roots matching
/// the start criteria; each further layer is one hop of neighbors not yet
/// covered and not expanded past the stop criteria. All layers accumulate
/// into one destination factory. Once a computation yields nothing new the
/// layer count is frozen for good.
pub struct TransitiveClosureEngine<'a> {
    graph: &'a NodeFactory,
    stop: &'a dyn SelectionCriteria,
    selector: ClosureSelector,
    layers: Vec<Vec<NodeKey>>,
    frontier: Vec<NodeKey>,
}

impl<'a> TransitiveClosureEngine<'a> {
    pub fn new(
        graph: &'a NodeFactory,
        roots: &[NodeKey],
        start: &dyn SelectionCriteria,
        stop: &'a dyn SelectionCriteria,
        direction: Direction,
    ) -> Self {
        let mut factory = NodeFactory::new();
        let mut layer = Vec::new();
        for root in roots {
            seed(graph, root, start, &mut factory, &mut layer);
        }
        layer.sort();
        layer.dedup();
        debug!("closure layer 0: {} node(s)", layer.len());
        let coverage: BTreeSet<NodeKey> = layer.iter().cloned().collect();
        let frontier = layer.clone();
        let selector = ClosureSelector::new(direction, factory, coverage);
        Self {
            graph,
            stop,
            selector,
            layers: vec![layer],
            frontier,
        }
    }

    /// Expand the previous layer by one hop. A no-op once saturated.
    pub fn compute_next_layer(&mut self) {
        if self.frontier.is_empty() {
            return;
        }
        let inputs: Vec<NodeKey> = self
            .frontier
            .iter()
            .filter(|key| !self.stop_matches(key))
            .cloned()
            .collect();
        self.selector.traverse_nodes(self.graph, &inputs);
        let selected = self.selector.selected_nodes().to_vec();
        if selected.is_empty() {
            self.frontier.clear();
            return;
        }
        let layer = self.selector.copied_nodes().to_vec();
        debug!("closure layer {}: {} node(s)", self.layers.len(), layer.len());
        self.selector.add_coverage(selected.iter().cloned());
        self.layers.push(layer);
        self.frontier = selected;
    }

    pub fn compute_layers(&mut self, count: usize) {
        for _ in 0..count {
            if self.frontier.is_empty() {
                break;
            }
            self.compute_next_layer();
        }
    }

    pub fn compute_all_layers(&mut self) {
        while !self.frontier.is_empty() {
            self.compute_next_layer();
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Copies making up layer `index`, resolvable against [`factory`].
    ///
    /// [`factory`]: Self::factory
    pub fn layer(&self, index: usize) -> &[NodeKey] {
        &self.layers[index]
    }

    pub fn factory(&self) -> &NodeFactory {
        self.selector.factory()
    }

    pub fn into_factory(self) -> NodeFactory {
        self.selector.into_factory()
    }

    fn stop_matches(&self, key: &NodeKey) -> bool {
        self.graph
            .get(key)
            .is_some_and(|node| self.stop.matches(node))
    }
}

fn seed(
    graph: &NodeFactory,
    key: &NodeKey,
    start: &dyn SelectionCriteria,
    factory: &mut NodeFactory,
    layer: &mut Vec<NodeKey>,
) {
    let Some(node) = graph.get(key) else {
        return;
    };
    if start.matches(node) {
        layer.push(copy_node(factory, graph, node));
    }
    for child in node.children() {
        seed(graph, child, start, factory, layer);
    }
}
