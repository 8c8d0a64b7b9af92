//! Layered transitive closure: one-hop selectors, the per-direction engine
//! and the two-direction facade.

mod engine;
mod selector;

pub use engine::TransitiveClosureEngine;
pub use selector::{ClosureSelector, Direction};

use crate::criteria::SelectionCriteria;
use crate::graph::{NodeFactory, NodeKey};

/// How far a closure follows one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Skip the direction entirely; not even the start set is contributed.
    DoNotFollow,
    /// Up to this many hops. `Limit(0)` contributes the start set alone.
    Limit(usize),
    /// Follow until saturation.
    Unbounded,
}

/// Depth-bounded closure in both directions from one start set.
///
/// Runs an inbound and an outbound engine, each to its own maximum depth,
/// and unions their factories into a single result.
pub struct TransitiveClosure {
    start: Box<dyn SelectionCriteria>,
    stop: Box<dyn SelectionCriteria>,
    maximum_inbound_depth: Depth,
    maximum_outbound_depth: Depth,
    factory: NodeFactory,
}

impl TransitiveClosure {
    pub const DO_NOT_FOLLOW: Depth = Depth::DoNotFollow;
    pub const UNBOUNDED_DEPTH: Depth = Depth::Unbounded;

    pub fn new(start: Box<dyn SelectionCriteria>, stop: Box<dyn SelectionCriteria>) -> Self {
        Self {
            start,
            stop,
            maximum_inbound_depth: Depth::DoNotFollow,
            maximum_outbound_depth: Depth::DoNotFollow,
            factory: NodeFactory::new(),
        }
    }

    pub fn set_maximum_inbound_depth(&mut self, depth: Depth) {
        self.maximum_inbound_depth = depth;
    }

    pub fn set_maximum_outbound_depth(&mut self, depth: Depth) {
        self.maximum_outbound_depth = depth;
    }

    /// Run both engines from the containment subtrees of `roots`,
    /// accumulating into the result factory.
    pub fn traverse_nodes(&mut self, graph: &NodeFactory, roots: &[NodeKey]) {
        self.run(graph, roots, Direction::Inbound, self.maximum_inbound_depth);
        self.run(graph, roots, Direction::Outbound, self.maximum_outbound_depth);
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    fn run(&mut self, graph: &NodeFactory, roots: &[NodeKey], direction: Direction, depth: Depth) {
        if depth == Depth::DoNotFollow {
            return;
        }
        let mut engine = TransitiveClosureEngine::new(
            graph,
            roots,
            self.start.as_ref(),
            self.stop.as_ref(),
            direction,
        );
        match depth {
            Depth::DoNotFollow => {}
            Depth::Limit(hops) => engine.compute_layers(hops),
            Depth::Unbounded => engine.compute_all_layers(),
        }
        self.factory.merge(engine.factory());
    }
}
