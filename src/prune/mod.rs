//! In-place graph mutation: cascade deletion and redundant-edge removal.

mod deleting;
mod minimizer;

pub use deleting::DeletingVisitor;
pub use minimizer::LinkMinimizer;
