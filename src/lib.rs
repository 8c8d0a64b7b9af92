// Export modules for library usage
pub mod cli;
pub mod closure;
pub mod cohesion;
pub mod copy;
pub mod criteria;
pub mod cycles;
pub mod graph;
pub mod io;
pub mod metrics;
pub mod prune;
pub mod traversal;

// Re-export commonly used types
pub use crate::graph::{Node, NodeFactory, NodeKey, NodeKind};

pub use crate::criteria::{
    CollectionSelectionCriteria, NullSelectionCriteria, RegularExpressionSelectionCriteria,
    SelectionCriteria,
};

pub use crate::traversal::{SelectiveTraversalStrategy, TraversalState, Visitor};

pub use crate::closure::{
    ClosureSelector, Depth, Direction, TransitiveClosure, TransitiveClosureEngine,
};

pub use crate::copy::{GraphCopier, GraphSummarizer};

pub use crate::prune::{DeletingVisitor, LinkMinimizer};

pub use crate::cohesion::Lcom4Gatherer;

pub use crate::cycles::{Cycle, CycleDetector};

pub use crate::metrics::MetricsGatherer;

pub use crate::io::{
    read_document, read_document_with_listener, write_document, DependencyEvent,
    DependencyListener, XmlError,
};
