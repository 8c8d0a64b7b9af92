//! Node model for the three-level dependency graph.
//!
//! Nodes are identified by `(kind, name)` keys, so a key resolves in any
//! factory holding a node of that name. Edge sets store keys rather than
//! references, which keeps the cyclic dependency structure representable
//! without ownership cycles.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Granularity of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Package,
    Class,
    Feature,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Package => "package",
            NodeKind::Class => "class",
            NodeKind::Feature => "feature",
        }
    }
}

/// Value identity of a node: its kind plus its fully qualified name.
///
/// Keys order by name first so that mixed-kind collections iterate in
/// natural name order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub name: String,
}

impl NodeKey {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self { kind, name: name.into() }
    }

    pub fn package(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Package, name)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Class, name)
    }

    pub fn feature(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Feature, name)
    }
}

impl Ord for NodeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name).then(self.kind.cmp(&other.kind))
    }
}

impl PartialOrd for NodeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A package, class or feature node.
///
/// `confirmed` distinguishes nodes observed as defined in analyzed code from
/// inferred placeholders that exist only because something depends on them.
/// The flag only ever goes up through [`NodeFactory`](super::NodeFactory);
/// deletion is the sole downgrade path.
#[derive(Debug, Clone)]
pub struct Node {
    key: NodeKey,
    confirmed: bool,
    inbound: BTreeSet<NodeKey>,
    outbound: BTreeSet<NodeKey>,
    parent: Option<NodeKey>,
    children: BTreeSet<NodeKey>,
    parent_classes: BTreeSet<NodeKey>,
    child_classes: BTreeSet<NodeKey>,
}

impl Node {
    pub(crate) fn new(key: NodeKey, confirmed: bool, parent: Option<NodeKey>) -> Self {
        Self {
            key,
            confirmed,
            inbound: BTreeSet::new(),
            outbound: BTreeSet::new(),
            parent,
            children: BTreeSet::new(),
            parent_classes: BTreeSet::new(),
            child_classes: BTreeSet::new(),
        }
    }

    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    pub fn kind(&self) -> NodeKind {
        self.key.kind
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    /// Name without the container prefix: the segment after the final dot
    /// for a class, the part after the owning class for a feature, the full
    /// name for a package.
    pub fn simple_name(&self) -> &str {
        match self.key.kind {
            NodeKind::Package => self.name(),
            NodeKind::Class => match self.name().rfind('.') {
                Some(pos) => &self.name()[pos + 1..],
                None => self.name(),
            },
            NodeKind::Feature => match &self.parent {
                Some(parent)
                    if self.name().len() > parent.name.len()
                        && self.name().starts_with(&parent.name)
                        && self.name().as_bytes()[parent.name.len()] == b'.' =>
                {
                    &self.name()[parent.name.len() + 1..]
                }
                _ => self.name(),
            },
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub(crate) fn set_confirmed(&mut self, confirmed: bool) {
        self.confirmed = confirmed;
    }

    pub fn inbound(&self) -> &BTreeSet<NodeKey> {
        &self.inbound
    }

    pub fn outbound(&self) -> &BTreeSet<NodeKey> {
        &self.outbound
    }

    pub fn parent(&self) -> Option<&NodeKey> {
        self.parent.as_ref()
    }

    /// Contained members: classes of a package, features of a class.
    pub fn children(&self) -> &BTreeSet<NodeKey> {
        &self.children
    }

    /// Inheritance parents; classes only, empty otherwise.
    pub fn parent_classes(&self) -> &BTreeSet<NodeKey> {
        &self.parent_classes
    }

    /// Inheritance children; classes only, empty otherwise.
    pub fn child_classes(&self) -> &BTreeSet<NodeKey> {
        &self.child_classes
    }

    pub(crate) fn add_inbound(&mut self, key: NodeKey) {
        self.inbound.insert(key);
    }

    pub(crate) fn add_outbound(&mut self, key: NodeKey) {
        self.outbound.insert(key);
    }

    pub(crate) fn remove_inbound(&mut self, key: &NodeKey) {
        self.inbound.remove(key);
    }

    pub(crate) fn remove_outbound(&mut self, key: &NodeKey) {
        self.outbound.remove(key);
    }

    pub(crate) fn add_child(&mut self, key: NodeKey) {
        self.children.insert(key);
    }

    pub(crate) fn remove_child(&mut self, key: &NodeKey) {
        self.children.remove(key);
    }

    pub(crate) fn add_parent_class(&mut self, key: NodeKey) {
        self.parent_classes.insert(key);
    }

    pub(crate) fn add_child_class(&mut self, key: NodeKey) {
        self.child_classes.insert(key);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
