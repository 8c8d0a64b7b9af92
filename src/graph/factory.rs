//! Interning registry for graph nodes.
//!
//! One factory owns one graph. Each of the three kinds has its own
//! name-keyed registry; creating a node materializes its whole containment
//! chain, derived from the name.

use std::collections::BTreeMap;

use log::debug;

use super::{Node, NodeKey, NodeKind};

/// Name-keyed registries for packages, classes and features.
///
/// `create_*` interns: a second call with the same name returns the key of
/// the existing node. Passing `confirmed = true` for an existing node
/// upgrades it and its ancestors; `confirmed = false` never downgrades.
#[derive(Debug, Default, Clone)]
pub struct NodeFactory {
    packages: BTreeMap<String, Node>,
    classes: BTreeMap<String, Node>,
    features: BTreeMap<String, Node>,
}

impl NodeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_package(&mut self, name: &str, confirmed: bool) -> NodeKey {
        debug!("create package \"{name}\"");
        let key = NodeKey::package(name);
        if !self.packages.contains_key(name) {
            self.packages
                .insert(name.to_string(), Node::new(key.clone(), confirmed, None));
            debug!("added package \"{name}\"");
        }
        if confirmed {
            self.confirm(&key);
        }
        key
    }

    pub fn create_class(&mut self, name: &str, confirmed: bool) -> NodeKey {
        debug!("create class \"{name}\"");
        let key = NodeKey::class(name);
        if !self.classes.contains_key(name) {
            let parent = self.create_package(parent_package_name(name), confirmed);
            if let Some(package) = self.get_mut(&parent) {
                package.add_child(key.clone());
            }
            self.classes
                .insert(name.to_string(), Node::new(key.clone(), confirmed, Some(parent)));
            debug!("added class \"{name}\"");
        }
        if confirmed {
            self.confirm(&key);
        }
        key
    }

    pub fn create_feature(&mut self, name: &str, confirmed: bool) -> NodeKey {
        debug!("create feature \"{name}\"");
        let key = NodeKey::feature(name);
        if !self.features.contains_key(name) {
            let parent = self.create_class(parent_class_name(name), confirmed);
            if let Some(class) = self.get_mut(&parent) {
                class.add_child(key.clone());
            }
            self.features
                .insert(name.to_string(), Node::new(key.clone(), confirmed, Some(parent)));
            debug!("added feature \"{name}\"");
        }
        if confirmed {
            self.confirm(&key);
        }
        key
    }

    /// Upgrade a node and its containment ancestors to confirmed. Upgrades
    /// never travel down: members keep their own flag.
    pub(crate) fn confirm(&mut self, key: &NodeKey) {
        let mut current = Some(key.clone());
        while let Some(k) = current.take() {
            match self.get_mut(&k) {
                Some(node) if !node.is_confirmed() => {
                    node.set_confirmed(true);
                    debug!("{} \"{}\" is confirmed", k.kind.label(), k.name);
                    current = node.parent().cloned();
                }
                _ => {}
            }
        }
    }

    pub(crate) fn demote(&mut self, key: &NodeKey) {
        if let Some(node) = self.get_mut(key) {
            node.set_confirmed(false);
        }
    }

    pub fn get(&self, key: &NodeKey) -> Option<&Node> {
        self.registry(key.kind).get(&key.name)
    }

    pub(crate) fn get_mut(&mut self, key: &NodeKey) -> Option<&mut Node> {
        self.registry_mut(key.kind).get_mut(&key.name)
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.get(key).is_some()
    }

    pub fn packages(&self) -> &BTreeMap<String, Node> {
        &self.packages
    }

    pub fn classes(&self) -> &BTreeMap<String, Node> {
        &self.classes
    }

    pub fn features(&self) -> &BTreeMap<String, Node> {
        &self.features
    }

    /// Keys of all packages, in name order. The usual traversal entry point.
    pub fn package_keys(&self) -> Vec<NodeKey> {
        self.packages.values().map(|n| n.key().clone()).collect()
    }

    /// All nodes across the three registries, packages first, name order
    /// within each registry.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.packages
            .values()
            .chain(self.classes.values())
            .chain(self.features.values())
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.classes.is_empty() && self.features.is_empty()
    }

    /// Record `from` depending on `to`. Both endpoints must already exist in
    /// this factory. Symmetric: `to` gains the inbound half. Duplicate adds
    /// are no-ops; self edges are permitted.
    pub fn add_dependency(&mut self, from: &NodeKey, to: &NodeKey) {
        assert!(self.contains(from), "unknown dependency source \"{from}\"");
        assert!(self.contains(to), "unknown dependency target \"{to}\"");
        if let Some(source) = self.get_mut(from) {
            source.add_outbound(to.clone());
        }
        if let Some(target) = self.get_mut(to) {
            target.add_inbound(from.clone());
        }
    }

    /// Remove the `from` → `to` edge from both endpoints. Missing nodes or
    /// edges are tolerated.
    pub fn remove_dependency(&mut self, from: &NodeKey, to: &NodeKey) {
        if let Some(source) = self.get_mut(from) {
            source.remove_outbound(to);
        }
        if let Some(target) = self.get_mut(to) {
            target.remove_inbound(from);
        }
    }

    // Half edges let GraphSummarizer record a dependency whose endpoints
    // live in two different factories.
    pub(crate) fn add_outbound_half(&mut self, from: &NodeKey, to: NodeKey) {
        if let Some(source) = self.get_mut(from) {
            source.add_outbound(to);
        }
    }

    pub(crate) fn add_inbound_half(&mut self, to: &NodeKey, from: NodeKey) {
        if let Some(target) = self.get_mut(to) {
            target.add_inbound(from);
        }
    }

    /// Record an inheritance relation between two classes, maintained on
    /// both ends.
    pub fn add_class_parent(&mut self, child: &NodeKey, parent: &NodeKey) {
        assert!(
            child.kind == NodeKind::Class && parent.kind == NodeKind::Class,
            "inheritance links classes, got \"{child}\" and \"{parent}\""
        );
        assert!(self.contains(child), "unknown class \"{child}\"");
        assert!(self.contains(parent), "unknown class \"{parent}\"");
        if let Some(node) = self.get_mut(child) {
            node.add_parent_class(parent.clone());
        }
        if let Some(node) = self.get_mut(parent) {
            node.add_child_class(child.clone());
        }
    }

    /// Drop a node from its registry and its container's child set. Used by
    /// the deleting visitor; edges must have been unlinked beforehand.
    pub(crate) fn remove_node(&mut self, key: &NodeKey) {
        debug!("delete {} \"{}\"", key.kind.label(), key.name);
        if let Some(node) = self.registry_mut(key.kind).remove(&key.name) {
            if let Some(parent) = node.parent().cloned() {
                if let Some(container) = self.get_mut(&parent) {
                    container.remove_child(key);
                }
            }
        }
    }

    /// Copy every node and edge of `other` into this factory. Existing
    /// nodes are upgraded where `other`'s are confirmed.
    pub fn merge(&mut self, other: &NodeFactory) {
        for node in other.nodes() {
            match node.kind() {
                NodeKind::Package => self.create_package(node.name(), node.is_confirmed()),
                NodeKind::Class => self.create_class(node.name(), node.is_confirmed()),
                NodeKind::Feature => self.create_feature(node.name(), node.is_confirmed()),
            };
        }
        for node in other.nodes() {
            let from = node.key().clone();
            for to in node.outbound().iter().cloned().collect::<Vec<_>>() {
                if self.contains(&to) {
                    self.add_dependency(&from, &to);
                }
            }
        }
    }

    fn registry(&self, kind: NodeKind) -> &BTreeMap<String, Node> {
        match kind {
            NodeKind::Package => &self.packages,
            NodeKind::Class => &self.classes,
            NodeKind::Feature => &self.features,
        }
    }

    fn registry_mut(&mut self, kind: NodeKind) -> &mut BTreeMap<String, Node> {
        match kind {
            NodeKind::Package => &mut self.packages,
            NodeKind::Class => &mut self.classes,
            NodeKind::Feature => &mut self.features,
        }
    }
}

/// Package a class name belongs to: everything before the last dot, or the
/// default package for undotted names.
pub(crate) fn parent_package_name(class_name: &str) -> &str {
    match class_name.rfind('.') {
        Some(pos) => &class_name[..pos],
        None => "",
    }
}

/// Class a feature name belongs to. Signatures may carry dots inside the
/// parenthesized parameter list, so the split happens at the last dot before
/// the argument list when one is present.
pub(crate) fn parent_class_name(feature_name: &str) -> &str {
    let scan_end = match feature_name.find('(') {
        Some(open) if feature_name.ends_with(')') => open,
        _ => feature_name.len(),
    };
    if let Some(pos) = feature_name[..scan_end].rfind('.') {
        return &feature_name[..pos];
    }
    match feature_name.rfind('.') {
        Some(pos) => &feature_name[..pos],
        None => "",
    }
}
