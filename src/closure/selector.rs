use std::collections::BTreeSet;

use crate::copy::copy_node;
use crate::criteria::{NullSelectionCriteria, SelectionCriteria};
use crate::graph::{NodeFactory, NodeKey};

/// Which side of the dependency edges a closure follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

/// Computes one BFS layer of a closure.
///
/// Holds a private destination factory and a coverage set of already-reached
/// keys. Each round materializes the input nodes and their qualifying
/// neighbors (filter-approved, not covered) into the factory, recording the
/// crossed edges. Package, class and feature edges propagate independently.
pub struct ClosureSelector {
    direction: Direction,
    factory: NodeFactory,
    coverage: BTreeSet<NodeKey>,
    filter: Box<dyn SelectionCriteria>,
    selected: Vec<NodeKey>,
    copied: Vec<NodeKey>,
}

impl ClosureSelector {
    pub fn new(direction: Direction, factory: NodeFactory, coverage: BTreeSet<NodeKey>) -> Self {
        Self {
            direction,
            factory,
            coverage,
            filter: Box::new(NullSelectionCriteria),
            selected: Vec::new(),
            copied: Vec::new(),
        }
    }

    pub fn inbound(factory: NodeFactory, coverage: BTreeSet<NodeKey>) -> Self {
        Self::new(Direction::Inbound, factory, coverage)
    }

    pub fn outbound(factory: NodeFactory, coverage: BTreeSet<NodeKey>) -> Self {
        Self::new(Direction::Outbound, factory, coverage)
    }

    pub fn with_filter(mut self, filter: Box<dyn SelectionCriteria>) -> Self {
        self.filter = filter;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    pub fn set_factory(&mut self, factory: NodeFactory) {
        self.factory = factory;
    }

    pub fn into_factory(self) -> NodeFactory {
        self.factory
    }

    pub fn coverage(&self) -> &BTreeSet<NodeKey> {
        &self.coverage
    }

    pub fn set_coverage(&mut self, coverage: BTreeSet<NodeKey>) {
        self.coverage = coverage;
    }

    pub fn add_coverage(&mut self, keys: impl IntoIterator<Item = NodeKey>) {
        self.coverage.extend(keys);
    }

    /// Neighbors reached this round, source-side keys: the next layer.
    pub fn selected_nodes(&self) -> &[NodeKey] {
        &self.selected
    }

    /// Neighbor copies materialized this round.
    pub fn copied_nodes(&self) -> &[NodeKey] {
        &self.copied
    }

    /// Clear the per-round results, leaving factory and coverage alone.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.copied.clear();
    }

    /// Expand one layer from `inputs`. Results replace the previous round's.
    pub fn traverse_nodes(&mut self, graph: &NodeFactory, inputs: &[NodeKey]) {
        self.reset();
        let mut seen = BTreeSet::new();
        let mut ordered = inputs.to_vec();
        ordered.sort();
        for key in &ordered {
            let Some(node) = graph.get(key) else {
                continue;
            };
            let source_copy = copy_node(&mut self.factory, graph, node);
            let neighbors: Vec<NodeKey> = match self.direction {
                Direction::Outbound => node.outbound().iter().cloned().collect(),
                Direction::Inbound => node.inbound().iter().cloned().collect(),
            };
            for neighbor_key in neighbors {
                if self.coverage.contains(&neighbor_key) {
                    continue;
                }
                let Some(neighbor) = graph.get(&neighbor_key) else {
                    continue;
                };
                if !self.filter.matches(neighbor) {
                    continue;
                }
                let copy = copy_node(&mut self.factory, graph, neighbor);
                if seen.insert(neighbor_key.clone()) {
                    self.selected.push(neighbor_key.clone());
                    self.copied.push(copy.clone());
                }
                match self.direction {
                    Direction::Outbound => self.factory.add_dependency(&source_copy, &copy),
                    Direction::Inbound => self.factory.add_dependency(&copy, &source_copy),
                }
            }
        }
    }
}
