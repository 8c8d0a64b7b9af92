use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::graph::{NodeFactory, NodeKey, NodeKind};

use super::{DependencyListener, XmlError};

struct NoopListener;

impl DependencyListener for NoopListener {}

/// Parse a dependency document into a fresh factory.
pub fn read_document(xml: &str) -> Result<NodeFactory, XmlError> {
    read_document_with_listener(xml, &mut NoopListener)
}

/// Parse a dependency document, firing load events at `listener`.
pub fn read_document_with_listener(
    xml: &str,
    listener: &mut dyn DependencyListener,
) -> Result<NodeFactory, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut factory = NodeFactory::new();
    let mut loader = Loader::new(listener);
    loader.listener.begin_session();

    loop {
        match reader.read_event()? {
            Event::Start(element) => loader.open(&element)?,
            Event::Text(text) => loader.text.push_str(&text.unescape()?),
            Event::End(element) => loader.close(&mut factory, element.name().as_ref())?,
            Event::Eof => break,
            _ => {}
        }
    }

    loader.listener.end_session();
    Ok(factory)
}

#[derive(Clone, Copy)]
enum EdgeDirection {
    Inbound,
    Outbound,
}

struct PendingEdge {
    direction: EdgeDirection,
    kind: NodeKind,
    confirmed: bool,
}

struct Loader<'l> {
    listener: &'l mut dyn DependencyListener,
    // Innermost open node element; the key is filled once <name> closes.
    nodes: Vec<(NodeKind, bool, Option<NodeKey>)>,
    edge: Option<PendingEdge>,
    text: String,
}

impl<'l> Loader<'l> {
    fn new(listener: &'l mut dyn DependencyListener) -> Self {
        Self {
            listener,
            nodes: Vec::new(),
            edge: None,
            text: String::new(),
        }
    }

    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), XmlError> {
        match element.name().as_ref() {
            b"dependencies" => {}
            b"package" => self.open_node(NodeKind::Package, element)?,
            b"class" => self.open_node(NodeKind::Class, element)?,
            b"feature" => self.open_node(NodeKind::Feature, element)?,
            b"name" => self.text.clear(),
            b"inbound" => self.open_edge(EdgeDirection::Inbound, element)?,
            b"outbound" => self.open_edge(EdgeDirection::Outbound, element)?,
            other => {
                return Err(XmlError::UnexpectedElement {
                    element: String::from_utf8_lossy(other).into_owned(),
                })
            }
        }
        Ok(())
    }

    fn open_node(&mut self, kind: NodeKind, element: &BytesStart<'_>) -> Result<(), XmlError> {
        let confirmed = confirmed_attribute(element)?;
        self.nodes.push((kind, confirmed, None));
        Ok(())
    }

    fn open_edge(
        &mut self,
        direction: EdgeDirection,
        element: &BytesStart<'_>,
    ) -> Result<(), XmlError> {
        let confirmed = confirmed_attribute(element)?;
        let kind = dependency_type(element)?;
        self.edge = Some(PendingEdge {
            direction,
            kind,
            confirmed,
        });
        self.text.clear();
        Ok(())
    }

    fn close(&mut self, factory: &mut NodeFactory, name: &[u8]) -> Result<(), XmlError> {
        match name {
            b"name" => self.close_name(factory),
            b"inbound" | b"outbound" => self.close_edge(factory, name),
            b"package" | b"class" | b"feature" => {
                if let Some((kind, _, Some(key))) = self.nodes.pop() {
                    if kind == NodeKind::Class {
                        self.listener.end_class(&key.name);
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn close_name(&mut self, factory: &mut NodeFactory) -> Result<(), XmlError> {
        let name = std::mem::take(&mut self.text);
        let Some((kind, confirmed, slot)) = self.nodes.last_mut() else {
            return Err(XmlError::DanglingDependency {
                element: "name".to_string(),
            });
        };
        let key = match kind {
            NodeKind::Package => factory.create_package(&name, *confirmed),
            NodeKind::Class => factory.create_class(&name, *confirmed),
            NodeKind::Feature => factory.create_feature(&name, *confirmed),
        };
        if key.kind == NodeKind::Class {
            self.listener.begin_class(&key.name);
        }
        *slot = Some(key);
        Ok(())
    }

    fn close_edge(&mut self, factory: &mut NodeFactory, element: &[u8]) -> Result<(), XmlError> {
        let Some(edge) = self.edge.take() else {
            return Ok(());
        };
        let other_name = std::mem::take(&mut self.text);
        let Some(current) = self.nodes.last().and_then(|(_, _, key)| key.clone()) else {
            return Err(XmlError::DanglingDependency {
                element: String::from_utf8_lossy(element).into_owned(),
            });
        };
        let other = match edge.kind {
            NodeKind::Package => factory.create_package(&other_name, edge.confirmed),
            NodeKind::Class => factory.create_class(&other_name, edge.confirmed),
            NodeKind::Feature => factory.create_feature(&other_name, edge.confirmed),
        };
        let (dependent, dependable) = match edge.direction {
            EdgeDirection::Inbound => (other, current),
            EdgeDirection::Outbound => (current, other),
        };
        factory.add_dependency(&dependent, &dependable);
        self.listener.dependency(&dependent, &dependable);
        Ok(())
    }
}

/// An absent `confirmed` attribute means confirmed in this format.
fn confirmed_attribute(element: &BytesStart<'_>) -> Result<bool, XmlError> {
    for attribute in element.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == b"confirmed" {
            let value = attribute.unescape_value()?;
            return Ok(value.eq_ignore_ascii_case("yes"));
        }
    }
    Ok(true)
}

fn dependency_type(element: &BytesStart<'_>) -> Result<NodeKind, XmlError> {
    for attribute in element.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == b"type" {
            let value = attribute.unescape_value()?;
            return match value.as_ref() {
                "package" => Ok(NodeKind::Package),
                "class" => Ok(NodeKind::Class),
                "feature" => Ok(NodeKind::Feature),
                other => Err(XmlError::UnknownDependencyType {
                    value: other.to_string(),
                }),
            };
        }
    }
    Err(XmlError::UnknownDependencyType {
        value: String::new(),
    })
}
