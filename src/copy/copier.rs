use crate::graph::{Node, NodeFactory, NodeKey};
use crate::traversal::{SelectiveTraversalStrategy, TraversalState, Visitor};

use super::copy_node;

/// Copies the in-scope part of a graph into a fresh factory.
///
/// Every in-scope node is materialized with its ancestor chain; every
/// dependency neighbor passing the filter is materialized too and the edge
/// recorded, so an edge in the result always has both endpoints present.
pub struct GraphCopier {
    strategy: SelectiveTraversalStrategy,
    state: TraversalState,
    factory: NodeFactory,
    copied: Vec<NodeKey>,
}

impl GraphCopier {
    pub fn new(strategy: SelectiveTraversalStrategy) -> Self {
        Self {
            strategy,
            state: TraversalState::default(),
            factory: NodeFactory::new(),
            copied: Vec::new(),
        }
    }

    pub fn comprehensive() -> Self {
        Self::new(SelectiveTraversalStrategy::comprehensive())
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    pub fn into_factory(self) -> NodeFactory {
        self.factory
    }

    /// In-scope nodes materialized so far, in visiting order.
    pub fn copied_nodes(&self) -> &[NodeKey] {
        &self.copied
    }

    fn copy_scope(&mut self, graph: &NodeFactory, node: &Node) -> NodeKey {
        let key = copy_node(&mut self.factory, graph, node);
        self.copied.push(key.clone());
        key
    }

    fn record_outbound(&mut self, graph: &NodeFactory, node: &Node) {
        let Some(from) = self.state.current().cloned() else {
            return;
        };
        if self.strategy.in_filter(node) {
            let to = copy_node(&mut self.factory, graph, node);
            self.factory.add_dependency(&from, &to);
        }
    }

    fn record_inbound(&mut self, graph: &NodeFactory, node: &Node) {
        let Some(to) = self.state.current().cloned() else {
            return;
        };
        if self.strategy.in_filter(node) {
            let from = copy_node(&mut self.factory, graph, node);
            self.factory.add_dependency(&from, &to);
        }
    }
}

impl Visitor for GraphCopier {
    fn strategy(&self) -> &SelectiveTraversalStrategy {
        &self.strategy
    }

    fn state(&self) -> &TraversalState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut TraversalState {
        &mut self.state
    }

    fn preprocess_package(&mut self, graph: &NodeFactory, node: &Node) {
        let key = self.copy_scope(graph, node);
        self.state.push(key);
    }

    fn preprocess_class(&mut self, graph: &NodeFactory, node: &Node) {
        let key = self.copy_scope(graph, node);
        self.state.push(key);
    }

    fn preprocess_feature(&mut self, graph: &NodeFactory, node: &Node) {
        let key = self.copy_scope(graph, node);
        self.state.push(key);
    }

    fn visit_outbound_package(&mut self, graph: &NodeFactory, node: &Node) {
        self.record_outbound(graph, node);
    }

    fn visit_outbound_class(&mut self, graph: &NodeFactory, node: &Node) {
        self.record_outbound(graph, node);
    }

    fn visit_outbound_feature(&mut self, graph: &NodeFactory, node: &Node) {
        self.record_outbound(graph, node);
    }

    fn visit_inbound_package(&mut self, graph: &NodeFactory, node: &Node) {
        self.record_inbound(graph, node);
    }

    fn visit_inbound_class(&mut self, graph: &NodeFactory, node: &Node) {
        self.record_inbound(graph, node);
    }

    fn visit_inbound_feature(&mut self, graph: &NodeFactory, node: &Node) {
        self.record_inbound(graph, node);
    }
}
