use crate::graph::{Node, NodeFactory};

/// Serialize a factory to the nested dependency document.
///
/// Nodes appear in name order, `confirmed` attributes are always written,
/// and both edge lists are emitted, so reading the output back reproduces
/// the graph exactly.
pub fn write_document(factory: &NodeFactory) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<dependencies>\n");
    for package in factory.packages().values() {
        write_node(&mut xml, factory, package, "package", 1);
    }
    xml.push_str("</dependencies>\n");
    xml
}

fn write_node(xml: &mut String, factory: &NodeFactory, node: &Node, tag: &str, depth: usize) {
    let pad = "    ".repeat(depth);
    xml.push_str(&format!(
        "{pad}<{tag} confirmed=\"{}\">\n",
        yes_no(node.is_confirmed())
    ));
    xml.push_str(&format!(
        "{pad}    <name>{}</name>\n",
        escape_xml(node.name())
    ));
    write_edges(xml, factory, node, &pad);
    let child_tag = match tag {
        "package" => "class",
        _ => "feature",
    };
    for child in node.children() {
        if let Some(child_node) = factory.get(child) {
            write_node(xml, factory, child_node, child_tag, depth + 1);
        }
    }
    xml.push_str(&format!("{pad}</{tag}>\n"));
}

fn write_edges(xml: &mut String, factory: &NodeFactory, node: &Node, pad: &str) {
    for key in node.inbound() {
        let confirmed = factory.get(key).is_some_and(Node::is_confirmed);
        xml.push_str(&format!(
            "{pad}    <inbound type=\"{}\" confirmed=\"{}\">{}</inbound>\n",
            key.kind.label(),
            yes_no(confirmed),
            escape_xml(&key.name)
        ));
    }
    for key in node.outbound() {
        let confirmed = factory.get(key).is_some_and(Node::is_confirmed);
        xml.push_str(&format!(
            "{pad}    <outbound type=\"{}\" confirmed=\"{}\">{}</outbound>\n",
            key.kind.label(),
            yes_no(confirmed),
            escape_xml(&key.name)
        ));
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
