//! Selective subgraph copying and granularity rollup.

mod copier;
mod summarizer;

pub use copier::GraphCopier;
pub use summarizer::GraphSummarizer;

use crate::graph::{Node, NodeFactory, NodeKey, NodeKind};

/// Materialize `node` and its containment ancestors into `dest`, each copy
/// keeping the flag the source node itself carries.
pub(crate) fn copy_node(dest: &mut NodeFactory, source: &NodeFactory, node: &Node) -> NodeKey {
    if let Some(parent) = node.parent().and_then(|key| source.get(key)) {
        copy_node(dest, source, parent);
    }
    match node.kind() {
        NodeKind::Package => dest.create_package(node.name(), node.is_confirmed()),
        NodeKind::Class => dest.create_class(node.name(), node.is_confirmed()),
        NodeKind::Feature => dest.create_feature(node.name(), node.is_confirmed()),
    }
}
