//! Selective traversal: strategy flags plus the template-method visitor.

mod strategy;
mod visitor;

pub use strategy::SelectiveTraversalStrategy;
pub use visitor::{TraversalState, Visitor};
