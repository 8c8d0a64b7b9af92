//! Node selection predicates used as traversal scope and filter.

use std::collections::BTreeSet;

use regex::Regex;

use crate::graph::{Node, NodeKind};

/// Predicate over graph nodes: three independent kind switches plus a name
/// predicate per kind. A node matches when its kind switch is on and its
/// name passes.
pub trait SelectionCriteria {
    fn matches_packages(&self) -> bool {
        true
    }

    fn matches_classes(&self) -> bool {
        true
    }

    fn matches_features(&self) -> bool {
        true
    }

    fn matches_package_name(&self, name: &str) -> bool;

    fn matches_class_name(&self, name: &str) -> bool;

    fn matches_feature_name(&self, name: &str) -> bool;

    fn matches_name(&self, kind: NodeKind, name: &str) -> bool {
        match kind {
            NodeKind::Package => self.matches_package_name(name),
            NodeKind::Class => self.matches_class_name(name),
            NodeKind::Feature => self.matches_feature_name(name),
        }
    }

    fn matches(&self, node: &Node) -> bool {
        let switch = match node.kind() {
            NodeKind::Package => self.matches_packages(),
            NodeKind::Class => self.matches_classes(),
            NodeKind::Feature => self.matches_features(),
        };
        switch && self.matches_name(node.kind(), node.name())
    }
}

/// Matches every node unconditionally.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSelectionCriteria;

impl SelectionCriteria for NullSelectionCriteria {
    fn matches_package_name(&self, _name: &str) -> bool {
        true
    }

    fn matches_class_name(&self, _name: &str) -> bool {
        true
    }

    fn matches_feature_name(&self, _name: &str) -> bool {
        true
    }
}

/// Regex-based criteria with global and per-kind include/exclude lists.
///
/// A name matches when at least one applicable include matches it (global
/// plus the kind-specific list) and no applicable exclude does. Regexes are
/// unanchored. The default carries a single global include matching
/// everything; replacing the global includes with an empty list yields a
/// criteria matching nothing.
#[derive(Debug, Clone)]
pub struct RegularExpressionSelectionCriteria {
    matching_packages: bool,
    matching_classes: bool,
    matching_features: bool,
    global_includes: Vec<Regex>,
    global_excludes: Vec<Regex>,
    package_includes: Vec<Regex>,
    package_excludes: Vec<Regex>,
    class_includes: Vec<Regex>,
    class_excludes: Vec<Regex>,
    feature_includes: Vec<Regex>,
    feature_excludes: Vec<Regex>,
}

impl Default for RegularExpressionSelectionCriteria {
    fn default() -> Self {
        Self {
            matching_packages: true,
            matching_classes: true,
            matching_features: true,
            global_includes: vec![match_all()],
            global_excludes: Vec::new(),
            package_includes: Vec::new(),
            package_excludes: Vec::new(),
            class_includes: Vec::new(),
            class_excludes: Vec::new(),
            feature_includes: Vec::new(),
            feature_excludes: Vec::new(),
        }
    }
}

fn match_all() -> Regex {
    Regex::new("").expect("empty pattern is a valid regex")
}

fn compile<I, S>(patterns: I) -> Result<Vec<Regex>, regex::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns.into_iter().map(|p| Regex::new(p.as_ref())).collect()
}

impl RegularExpressionSelectionCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: match only names accepted by `pattern`.
    pub fn from_pattern(pattern: &str) -> Result<Self, regex::Error> {
        let mut criteria = Self::new();
        criteria.set_global_includes([pattern])?;
        Ok(criteria)
    }

    pub fn set_matching_packages(&mut self, value: bool) {
        self.matching_packages = value;
    }

    pub fn set_matching_classes(&mut self, value: bool) {
        self.matching_classes = value;
    }

    pub fn set_matching_features(&mut self, value: bool) {
        self.matching_features = value;
    }

    pub fn set_global_includes<I, S>(&mut self, patterns: I) -> Result<(), regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.global_includes = compile(patterns)?;
        Ok(())
    }

    pub fn set_global_excludes<I, S>(&mut self, patterns: I) -> Result<(), regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.global_excludes = compile(patterns)?;
        Ok(())
    }

    pub fn set_package_includes<I, S>(&mut self, patterns: I) -> Result<(), regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.package_includes = compile(patterns)?;
        Ok(())
    }

    pub fn set_package_excludes<I, S>(&mut self, patterns: I) -> Result<(), regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.package_excludes = compile(patterns)?;
        Ok(())
    }

    pub fn set_class_includes<I, S>(&mut self, patterns: I) -> Result<(), regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.class_includes = compile(patterns)?;
        Ok(())
    }

    pub fn set_class_excludes<I, S>(&mut self, patterns: I) -> Result<(), regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.class_excludes = compile(patterns)?;
        Ok(())
    }

    pub fn set_feature_includes<I, S>(&mut self, patterns: I) -> Result<(), regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.feature_includes = compile(patterns)?;
        Ok(())
    }

    pub fn set_feature_excludes<I, S>(&mut self, patterns: I) -> Result<(), regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.feature_excludes = compile(patterns)?;
        Ok(())
    }

    fn matches_lists(includes: &[&[Regex]; 2], excludes: &[&[Regex]; 2], name: &str) -> bool {
        let included = includes.iter().flat_map(|l| l.iter()).any(|re| re.is_match(name));
        let excluded = excludes.iter().flat_map(|l| l.iter()).any(|re| re.is_match(name));
        included && !excluded
    }
}

impl SelectionCriteria for RegularExpressionSelectionCriteria {
    fn matches_packages(&self) -> bool {
        self.matching_packages
    }

    fn matches_classes(&self) -> bool {
        self.matching_classes
    }

    fn matches_features(&self) -> bool {
        self.matching_features
    }

    fn matches_package_name(&self, name: &str) -> bool {
        Self::matches_lists(
            &[&self.global_includes, &self.package_includes],
            &[&self.global_excludes, &self.package_excludes],
            name,
        )
    }

    fn matches_class_name(&self, name: &str) -> bool {
        Self::matches_lists(
            &[&self.global_includes, &self.class_includes],
            &[&self.global_excludes, &self.class_excludes],
            name,
        )
    }

    fn matches_feature_name(&self, name: &str) -> bool {
        Self::matches_lists(
            &[&self.global_includes, &self.feature_includes],
            &[&self.global_excludes, &self.feature_excludes],
            name,
        )
    }
}

/// Criteria over explicit name sets, kind-agnostic: the same sets answer
/// every kind. `include = None` accepts every name; an empty set accepts
/// none; excludes always win.
#[derive(Debug, Clone)]
pub struct CollectionSelectionCriteria {
    matching_packages: bool,
    matching_classes: bool,
    matching_features: bool,
    include: Option<BTreeSet<String>>,
    exclude: BTreeSet<String>,
}

impl CollectionSelectionCriteria {
    pub fn new(include: Option<BTreeSet<String>>, exclude: Option<BTreeSet<String>>) -> Self {
        Self {
            matching_packages: true,
            matching_classes: true,
            matching_features: true,
            include,
            exclude: exclude.unwrap_or_default(),
        }
    }

    /// Accepts every name.
    pub fn everything() -> Self {
        Self::new(None, None)
    }

    /// Accepts no name at all.
    pub fn nothing() -> Self {
        Self::new(Some(BTreeSet::new()), None)
    }

    pub fn set_matching_packages(&mut self, value: bool) {
        self.matching_packages = value;
    }

    pub fn set_matching_classes(&mut self, value: bool) {
        self.matching_classes = value;
    }

    pub fn set_matching_features(&mut self, value: bool) {
        self.matching_features = value;
    }

    fn matches_entry(&self, name: &str) -> bool {
        let included = match &self.include {
            Some(names) => names.contains(name),
            None => true,
        };
        included && !self.exclude.contains(name)
    }
}

impl SelectionCriteria for CollectionSelectionCriteria {
    fn matches_packages(&self) -> bool {
        self.matching_packages
    }

    fn matches_classes(&self) -> bool {
        self.matching_classes
    }

    fn matches_features(&self) -> bool {
        self.matching_features
    }

    fn matches_package_name(&self, name: &str) -> bool {
        self.matches_entry(name)
    }

    fn matches_class_name(&self, name: &str) -> bool {
        self.matches_entry(name)
    }

    fn matches_feature_name(&self, name: &str) -> bool {
        self.matches_entry(name)
    }
}
