//! Core graph model: nodes, keys and the interning factory.

mod factory;
mod node;

pub use factory::NodeFactory;
pub use node::{Node, NodeKey, NodeKind};
