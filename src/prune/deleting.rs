use log::debug;

use crate::graph::{NodeFactory, NodeKey};

/// Removes nodes and cascades the removal through the graph.
///
/// Removing a node removes its members first, then unlinks every edge on
/// both ends, drops the node from its container and registry, and
/// downgrades it to unconfirmed. Former outbound targets are then
/// re-examined so that referenced-only nodes kept alive solely by the
/// removed edge get pruned too. Containers emptied by a removal are removed
/// in turn unless they are independently confirmed.
pub struct DeletingVisitor<'a> {
    factory: &'a mut NodeFactory,
}

impl<'a> DeletingVisitor<'a> {
    pub fn new(factory: &'a mut NodeFactory) -> Self {
        Self { factory }
    }

    /// Remove `key` and run the full cascade.
    pub fn visit(&mut self, key: &NodeKey) {
        if !self.factory.contains(key) {
            return;
        }
        debug!("removing {} \"{}\"", key.kind.label(), key.name);

        let children: Vec<NodeKey> = match self.factory.get(key) {
            Some(node) => node.children().iter().cloned().collect(),
            None => return,
        };
        for child in &children {
            self.visit(child);
        }

        // Removing the last member may already have cascaded this node away.
        let Some(node) = self.factory.get(key) else {
            return;
        };
        let inbound: Vec<NodeKey> = node.inbound().iter().cloned().collect();
        let outbound: Vec<NodeKey> = node.outbound().iter().cloned().collect();
        let container = node.parent().cloned();

        for source in &inbound {
            self.factory.remove_dependency(source, key);
        }
        for target in &outbound {
            self.factory.remove_dependency(key, target);
        }

        self.factory.demote(key);
        self.factory.remove_node(key);

        for target in &outbound {
            self.visit_orphan_candidate(target);
        }

        if let Some(container) = container {
            self.cascade(&container);
        }
    }

    /// Re-examine a node that just lost an inbound edge. Referenced-only
    /// leaves with nothing pointing at them go away; anything confirmed,
    /// still depended on, or still holding children stays.
    fn visit_orphan_candidate(&mut self, key: &NodeKey) {
        let Some(node) = self.factory.get(key) else {
            return;
        };
        if node.is_confirmed() || !node.inbound().is_empty() || !node.children().is_empty() {
            return;
        }
        self.visit(key);
    }

    /// Remove a container emptied by a removal, recursively up the chain.
    fn cascade(&mut self, key: &NodeKey) {
        let Some(node) = self.factory.get(key) else {
            return;
        };
        if node.is_confirmed() || !node.children().is_empty() {
            return;
        }
        self.visit(key);
    }
}
