use crate::criteria::{NullSelectionCriteria, SelectionCriteria};
use crate::graph::{Node, NodeKey};

/// Composes a scope criteria (which nodes a traversal reports on) with a
/// filter criteria (which dependency targets it follows), plus the four
/// flags deciding when dependency edges are walked relative to a node's
/// children.
pub struct SelectiveTraversalStrategy {
    scope: Box<dyn SelectionCriteria>,
    filter: Box<dyn SelectionCriteria>,
    pre_outbound: bool,
    pre_inbound: bool,
    post_outbound: bool,
    post_inbound: bool,
}

impl SelectiveTraversalStrategy {
    pub fn new(scope: Box<dyn SelectionCriteria>, filter: Box<dyn SelectionCriteria>) -> Self {
        Self {
            scope,
            filter,
            pre_outbound: true,
            pre_inbound: true,
            post_outbound: false,
            post_inbound: false,
        }
    }

    /// Everything in scope, everything in filter.
    pub fn comprehensive() -> Self {
        Self::new(
            Box::new(NullSelectionCriteria),
            Box::new(NullSelectionCriteria),
        )
    }

    pub fn in_scope(&self, node: &Node) -> bool {
        self.scope.matches(node)
    }

    pub fn in_filter(&self, node: &Node) -> bool {
        self.filter.matches(node)
    }

    pub fn scope_criteria(&self) -> &dyn SelectionCriteria {
        self.scope.as_ref()
    }

    pub fn filter_criteria(&self) -> &dyn SelectionCriteria {
        self.filter.as_ref()
    }

    pub fn do_pre_outbound(&self) -> bool {
        self.pre_outbound
    }

    pub fn do_pre_inbound(&self) -> bool {
        self.pre_inbound
    }

    pub fn do_post_outbound(&self) -> bool {
        self.post_outbound
    }

    pub fn do_post_inbound(&self) -> bool {
        self.post_inbound
    }

    pub fn set_pre_outbound(&mut self, value: bool) {
        self.pre_outbound = value;
    }

    pub fn set_pre_inbound(&mut self, value: bool) {
        self.pre_inbound = value;
    }

    pub fn set_post_outbound(&mut self, value: bool) {
        self.post_outbound = value;
    }

    pub fn set_post_inbound(&mut self, value: bool) {
        self.post_inbound = value;
    }

    /// Deterministic visiting order: natural name order.
    pub fn order<'a, I>(&self, keys: I) -> Vec<NodeKey>
    where
        I: IntoIterator<Item = &'a NodeKey>,
    {
        let mut ordered: Vec<NodeKey> = keys.into_iter().cloned().collect();
        ordered.sort();
        ordered
    }
}

impl Default for SelectiveTraversalStrategy {
    fn default() -> Self {
        Self::comprehensive()
    }
}

impl std::fmt::Debug for SelectiveTraversalStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectiveTraversalStrategy")
            .field("pre_outbound", &self.pre_outbound)
            .field("pre_inbound", &self.pre_inbound)
            .field("post_outbound", &self.post_outbound)
            .field("post_inbound", &self.post_inbound)
            .finish_non_exhaustive()
    }
}
