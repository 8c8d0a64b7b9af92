use std::collections::BTreeSet;

use crate::graph::{Node, NodeFactory, NodeKey, NodeKind};

use super::SelectiveTraversalStrategy;

/// Book-keeping shared by visitor implementations: the current-node stack
/// and the guard set that keeps traversal over cyclic graphs finite.
#[derive(Debug, Default)]
pub struct TraversalState {
    current: Vec<NodeKey>,
    visiting: BTreeSet<NodeKey>,
}

impl TraversalState {
    pub fn push(&mut self, key: NodeKey) {
        self.current.push(key);
    }

    /// Pop the stack only when `key` is on top. Keeps unbalanced overrides
    /// from corrupting the stack.
    pub fn pop_if(&mut self, key: &NodeKey) {
        if self.current.last() == Some(key) {
            self.current.pop();
        }
    }

    pub fn current(&self) -> Option<&NodeKey> {
        self.current.last()
    }

    /// Returns false when `key` is already being visited.
    pub fn begin_visit(&mut self, key: &NodeKey) -> bool {
        self.visiting.insert(key.clone())
    }

    pub fn end_visit(&mut self, key: &NodeKey) {
        self.visiting.remove(key);
    }
}

/// Template-method walk over the graph: containment drives the recursion,
/// dependency edges are visited around it according to the strategy flags,
/// and the per-kind hooks do the actual work.
///
/// Implementors provide the strategy and a [`TraversalState`]; every hook
/// defaults to a no-op apart from the pre/post hooks maintaining the
/// current-node stack.
pub trait Visitor {
    fn strategy(&self) -> &SelectiveTraversalStrategy;

    fn state(&self) -> &TraversalState;

    fn state_mut(&mut self) -> &mut TraversalState;

    fn traverse_nodes(&mut self, graph: &NodeFactory, keys: &[NodeKey]) {
        for key in self.strategy().order(keys) {
            self.visit(graph, &key);
        }
    }

    fn visit(&mut self, graph: &NodeFactory, key: &NodeKey) {
        if !self.state_mut().begin_visit(key) {
            return;
        }
        if let Some(node) = graph.get(key) {
            match node.kind() {
                NodeKind::Package => self.visit_package(graph, node),
                NodeKind::Class => self.visit_class(graph, node),
                NodeKind::Feature => self.visit_feature(graph, node),
            }
        }
        self.state_mut().end_visit(key);
    }

    fn is_in_scope(&self, node: &Node) -> bool {
        self.strategy().in_scope(node)
    }

    fn visit_package(&mut self, graph: &NodeFactory, node: &Node) {
        let in_scope = self.is_in_scope(node);
        if in_scope {
            self.preprocess_package(graph, node);
            if self.strategy().do_pre_outbound() {
                self.traverse_outbound(graph, node);
            }
            if self.strategy().do_pre_inbound() {
                self.traverse_inbound(graph, node);
            }
        }
        let children: Vec<NodeKey> = node.children().iter().cloned().collect();
        self.traverse_nodes(graph, &children);
        if in_scope {
            if self.strategy().do_post_outbound() {
                self.traverse_outbound(graph, node);
            }
            if self.strategy().do_post_inbound() {
                self.traverse_inbound(graph, node);
            }
            self.postprocess_package(graph, node);
        }
    }

    fn visit_class(&mut self, graph: &NodeFactory, node: &Node) {
        let in_scope = self.is_in_scope(node);
        if in_scope {
            self.preprocess_class(graph, node);
            if self.strategy().do_pre_outbound() {
                self.traverse_outbound(graph, node);
            }
            if self.strategy().do_pre_inbound() {
                self.traverse_inbound(graph, node);
            }
        }
        let children: Vec<NodeKey> = node.children().iter().cloned().collect();
        self.traverse_nodes(graph, &children);
        if in_scope {
            if self.strategy().do_post_outbound() {
                self.traverse_outbound(graph, node);
            }
            if self.strategy().do_post_inbound() {
                self.traverse_inbound(graph, node);
            }
            self.postprocess_class(graph, node);
        }
    }

    fn visit_feature(&mut self, graph: &NodeFactory, node: &Node) {
        if !self.is_in_scope(node) {
            return;
        }
        self.preprocess_feature(graph, node);
        if self.strategy().do_pre_outbound() {
            self.traverse_outbound(graph, node);
        }
        if self.strategy().do_pre_inbound() {
            self.traverse_inbound(graph, node);
        }
        if self.strategy().do_post_outbound() {
            self.traverse_outbound(graph, node);
        }
        if self.strategy().do_post_inbound() {
            self.traverse_inbound(graph, node);
        }
        self.postprocess_feature(graph, node);
    }

    fn traverse_outbound(&mut self, graph: &NodeFactory, node: &Node) {
        for key in self.strategy().order(node.outbound()) {
            if let Some(dependency) = graph.get(&key) {
                match dependency.kind() {
                    NodeKind::Package => self.visit_outbound_package(graph, dependency),
                    NodeKind::Class => self.visit_outbound_class(graph, dependency),
                    NodeKind::Feature => self.visit_outbound_feature(graph, dependency),
                }
            }
        }
    }

    fn traverse_inbound(&mut self, graph: &NodeFactory, node: &Node) {
        for key in self.strategy().order(node.inbound()) {
            if let Some(dependency) = graph.get(&key) {
                match dependency.kind() {
                    NodeKind::Package => self.visit_inbound_package(graph, dependency),
                    NodeKind::Class => self.visit_inbound_class(graph, dependency),
                    NodeKind::Feature => self.visit_inbound_feature(graph, dependency),
                }
            }
        }
    }

    fn preprocess_package(&mut self, _graph: &NodeFactory, node: &Node) {
        self.state_mut().push(node.key().clone());
    }

    fn postprocess_package(&mut self, _graph: &NodeFactory, node: &Node) {
        self.state_mut().pop_if(node.key());
    }

    fn preprocess_class(&mut self, _graph: &NodeFactory, node: &Node) {
        self.state_mut().push(node.key().clone());
    }

    fn postprocess_class(&mut self, _graph: &NodeFactory, node: &Node) {
        self.state_mut().pop_if(node.key());
    }

    fn preprocess_feature(&mut self, _graph: &NodeFactory, node: &Node) {
        self.state_mut().push(node.key().clone());
    }

    fn postprocess_feature(&mut self, _graph: &NodeFactory, node: &Node) {
        self.state_mut().pop_if(node.key());
    }

    fn visit_outbound_package(&mut self, _graph: &NodeFactory, _node: &Node) {}

    fn visit_outbound_class(&mut self, _graph: &NodeFactory, _node: &Node) {}

    fn visit_outbound_feature(&mut self, _graph: &NodeFactory, _node: &Node) {}

    fn visit_inbound_package(&mut self, _graph: &NodeFactory, _node: &Node) {}

    fn visit_inbound_class(&mut self, _graph: &NodeFactory, _node: &Node) {}

    fn visit_inbound_feature(&mut self, _graph: &NodeFactory, _node: &Node) {}
}
