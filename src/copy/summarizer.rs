use crate::criteria::SelectionCriteria;
use crate::graph::{Node, NodeFactory, NodeKey, NodeKind};
use crate::traversal::{SelectiveTraversalStrategy, TraversalState, Visitor};

use super::copy_node;

/// Rolls a graph up to a coarser granularity.
///
/// Two destination factories: the scope factory receives copies of the
/// nodes being reported on, the filter factory receives the rolled-up
/// dependency targets. A dependency on a node whose kind the filter
/// excludes is re-attached to the nearest enclosing ancestor whose kind is
/// enabled (feature → class → package); fine edges collapsing onto the same
/// coarse pair merge into one. Edges may span the two factories.
pub struct GraphSummarizer {
    strategy: SelectiveTraversalStrategy,
    state: TraversalState,
    scope_factory: NodeFactory,
    filter_factory: NodeFactory,
}

impl GraphSummarizer {
    pub fn new(scope: Box<dyn SelectionCriteria>, filter: Box<dyn SelectionCriteria>) -> Self {
        Self {
            strategy: SelectiveTraversalStrategy::new(scope, filter),
            state: TraversalState::default(),
            scope_factory: NodeFactory::new(),
            filter_factory: NodeFactory::new(),
        }
    }

    pub fn scope_factory(&self) -> &NodeFactory {
        &self.scope_factory
    }

    pub fn filter_factory(&self) -> &NodeFactory {
        &self.filter_factory
    }

    /// Nearest ancestor-or-self of `node` whose kind the filter criteria
    /// enables, or None when every granularity on the chain is excluded.
    fn rollup_target<'g>(&self, graph: &'g NodeFactory, node: &'g Node) -> Option<&'g Node> {
        let criteria = self.strategy.filter_criteria();
        let class_of = |n: &'g Node| n.parent().and_then(|key| graph.get(key));
        match node.kind() {
            NodeKind::Feature => {
                if criteria.matches_features() {
                    Some(node)
                } else if criteria.matches_classes() {
                    class_of(node)
                } else if criteria.matches_packages() {
                    class_of(node).and_then(class_of)
                } else {
                    None
                }
            }
            NodeKind::Class => {
                if criteria.matches_classes() {
                    Some(node)
                } else if criteria.matches_packages() {
                    class_of(node)
                } else {
                    None
                }
            }
            NodeKind::Package => criteria.matches_packages().then_some(node),
        }
    }

    fn record_outbound(&mut self, graph: &NodeFactory, node: &Node) {
        let Some(current) = self.state.current().cloned() else {
            return;
        };
        if !self
            .strategy
            .filter_criteria()
            .matches_name(node.kind(), node.name())
        {
            return;
        }
        let Some(target) = self.rollup_target(graph, node) else {
            return;
        };
        let to = copy_node(&mut self.filter_factory, graph, target);
        self.scope_factory.add_outbound_half(&current, to.clone());
        self.filter_factory.add_inbound_half(&to, current);
    }

    fn record_inbound(&mut self, graph: &NodeFactory, node: &Node) {
        let Some(current) = self.state.current().cloned() else {
            return;
        };
        if !self
            .strategy
            .filter_criteria()
            .matches_name(node.kind(), node.name())
        {
            return;
        }
        let Some(source) = self.rollup_target(graph, node) else {
            return;
        };
        let from = copy_node(&mut self.filter_factory, graph, source);
        self.filter_factory.add_outbound_half(&from, current.clone());
        self.scope_factory.add_inbound_half(&current, from);
    }

    fn scope_kind_enabled(&self, kind: NodeKind) -> bool {
        let criteria = self.strategy.scope_criteria();
        match kind {
            NodeKind::Package => criteria.matches_packages(),
            NodeKind::Class => criteria.matches_classes(),
            NodeKind::Feature => criteria.matches_features(),
        }
    }

    fn copy_scope(&mut self, graph: &NodeFactory, node: &Node) {
        if self.scope_kind_enabled(node.kind()) {
            let key = copy_node(&mut self.scope_factory, graph, node);
            self.state.push(key);
        }
    }
}

impl Visitor for GraphSummarizer {
    fn strategy(&self) -> &SelectiveTraversalStrategy {
        &self.strategy
    }

    fn state(&self) -> &TraversalState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut TraversalState {
        &mut self.state
    }

    // Scope membership for descending uses name matching only; the kind
    // switches gate materialization in copy_scope.
    fn is_in_scope(&self, node: &Node) -> bool {
        self.strategy
            .scope_criteria()
            .matches_name(node.kind(), node.name())
    }

    fn preprocess_package(&mut self, graph: &NodeFactory, node: &Node) {
        self.copy_scope(graph, node);
    }

    fn preprocess_class(&mut self, graph: &NodeFactory, node: &Node) {
        self.copy_scope(graph, node);
    }

    fn preprocess_feature(&mut self, graph: &NodeFactory, node: &Node) {
        self.copy_scope(graph, node);
    }

    fn postprocess_package(&mut self, _graph: &NodeFactory, node: &Node) {
        self.state.pop_if(node.key());
    }

    fn postprocess_class(&mut self, _graph: &NodeFactory, node: &Node) {
        self.state.pop_if(node.key());
    }

    fn postprocess_feature(&mut self, _graph: &NodeFactory, node: &Node) {
        self.state.pop_if(node.key());
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
