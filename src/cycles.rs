//! Elementary cycle detection over outbound dependency edges.

use std::collections::BTreeSet;

use crate::graph::{NodeFactory, NodeKey};

/// An elementary dependency cycle, stored as the path rotated to start at
/// its smallest node so each cycle has one canonical form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cycle {
    path: Vec<NodeKey>,
}

impl Cycle {
    pub fn new(path: Vec<NodeKey>) -> Self {
        let rotated = match path.iter().enumerate().min_by_key(|(_, key)| *key) {
            Some((start, _)) => {
                let mut rotated = Vec::with_capacity(path.len());
                rotated.extend_from_slice(&path[start..]);
                rotated.extend_from_slice(&path[..start]);
                rotated
            }
            None => path,
        };
        Self { path: rotated }
    }

    pub fn path(&self) -> &[NodeKey] {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Finds every elementary cycle up to a maximum length, each reported once.
pub struct CycleDetector {
    maximum_length: usize,
    cycles: BTreeSet<Cycle>,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self {
            maximum_length: usize::MAX,
            cycles: BTreeSet::new(),
        }
    }

    pub fn with_maximum_length(maximum_length: usize) -> Self {
        Self {
            maximum_length,
            cycles: BTreeSet::new(),
        }
    }

    pub fn cycles(&self) -> &BTreeSet<Cycle> {
        &self.cycles
    }

    /// Search the whole graph, every granularity included.
    pub fn traverse(&mut self, graph: &NodeFactory) {
        for node in graph.nodes() {
            let mut path = Vec::new();
            self.search(graph, node.key(), &mut path);
        }
    }

    fn search(&mut self, graph: &NodeFactory, key: &NodeKey, path: &mut Vec<NodeKey>) {
        if path.len() >= self.maximum_length {
            return;
        }
        path.push(key.clone());
        if let Some(node) = graph.get(key) {
            for neighbor in node.outbound() {
                if let Some(start) = path.iter().position(|k| k == neighbor) {
                    self.cycles.insert(Cycle::new(path[start..].to_vec()));
                } else {
                    self.search(graph, neighbor, path);
                }
            }
        }
        path.pop();
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}
