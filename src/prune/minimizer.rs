use log::debug;

use crate::graph::{NodeFactory, NodeKey};

/// Drops dependency edges made redundant by finer-grained ones.
///
/// An edge (s, t) is redundant when some other edge connects the same two
/// lineages at a finer point: a source in {s} ∪ descendants(s) and a target
/// in {t} ∪ descendants(t). Only the finest surviving edge of each lineage
/// pair remains; edges with no finer counterpart are untouched. The
/// descendant walk is hard-wired to the package ⊃ class ⊃ feature triple.
pub struct LinkMinimizer;

impl LinkMinimizer {
    pub fn new() -> Self {
        Self
    }

    pub fn traverse(&self, factory: &mut NodeFactory) {
        let edges = collect_edges(factory);
        for (from, to) in &edges {
            if covered_by_finer(factory, from, to) {
                debug!("minimizing edge \"{from}\" -> \"{to}\"");
                factory.remove_dependency(from, to);
            }
        }
    }
}

impl Default for LinkMinimizer {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_edges(factory: &NodeFactory) -> Vec<(NodeKey, NodeKey)> {
    factory
        .nodes()
        .flat_map(|node| {
            node.outbound()
                .iter()
                .map(|to| (node.key().clone(), to.clone()))
        })
        .collect()
}

/// Self plus containment descendants, two levels deep at most.
fn lineage(factory: &NodeFactory, key: &NodeKey) -> Vec<NodeKey> {
    let mut keys = vec![key.clone()];
    if let Some(node) = factory.get(key) {
        for child in node.children() {
            keys.push(child.clone());
            if let Some(child_node) = factory.get(child) {
                keys.extend(child_node.children().iter().cloned());
            }
        }
    }
    keys
}

fn covered_by_finer(factory: &NodeFactory, from: &NodeKey, to: &NodeKey) -> bool {
    let sources = lineage(factory, from);
    let targets = lineage(factory, to);
    for s in &sources {
        let Some(source) = factory.get(s) else {
            continue;
        };
        for t in &targets {
            if s == from && t == to {
                continue;
            }
            if source.outbound().contains(t) {
                return true;
            }
        }
    }
    false
}
