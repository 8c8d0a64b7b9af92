//! XML interchange format for dependency graphs.
//!
//! The document nests `<package>` / `<class>` / `<feature>` elements, each
//! carrying a `<name>`, a `confirmed` attribute and `<inbound>`/`<outbound>`
//! dependency elements. One asymmetry to keep in mind: an absent
//! `confirmed` attribute means confirmed in this format, while a freshly
//! created factory node defaults to unconfirmed.

mod reader;
mod writer;

pub use reader::{read_document, read_document_with_listener};
pub use writer::write_document;

use thiserror::Error;

use crate::graph::NodeKey;

/// Failures while reading a dependency document.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed document: {0}")]
    Parse(#[from] quick_xml::Error),
    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("unexpected element <{element}>")]
    UnexpectedElement { element: String },
    #[error("<{element}> element without a preceding <name>")]
    DanglingDependency { element: String },
    #[error("unknown dependency type \"{value}\"")]
    UnknownDependencyType { value: String },
}

/// Observation points fired while a document loads.
pub trait DependencyListener {
    fn begin_session(&mut self) {}

    fn begin_class(&mut self, _class_name: &str) {}

    fn dependency(&mut self, _dependent: &NodeKey, _dependable: &NodeKey) {}

    fn end_class(&mut self, _class_name: &str) {}

    fn end_session(&mut self) {}
}

/// A recorded listener callback; `Vec<DependencyEvent>` is itself a
/// listener, handy for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyEvent {
    BeginSession,
    BeginClass { name: String },
    Dependency { dependent: NodeKey, dependable: NodeKey },
    EndClass { name: String },
    EndSession,
}

impl DependencyListener for Vec<DependencyEvent> {
    fn begin_session(&mut self) {
        self.push(DependencyEvent::BeginSession);
    }

    fn begin_class(&mut self, class_name: &str) {
        self.push(DependencyEvent::BeginClass {
            name: class_name.to_string(),
        });
    }

    fn dependency(&mut self, dependent: &NodeKey, dependable: &NodeKey) {
        self.push(DependencyEvent::Dependency {
            dependent: dependent.clone(),
            dependable: dependable.clone(),
        });
    }

    fn end_class(&mut self, class_name: &str) {
        self.push(DependencyEvent::EndClass {
            name: class_name.to_string(),
        });
    }

    fn end_session(&mut self) {
        self.push(DependencyEvent::EndSession);
    }
}
