//! HTML Serialization
//!
//! `innerHTML` / `outerHTML` for the light tree. Shadow roots are not
//! serialized through their hosts.

use crate::{DomTree, NodeData, NodeId};

/// Elements that never have a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "source", "track", "wbr",
];

/// Serialize the children of a node
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for (child, _) in tree.children(id) {
        write_node(tree, child, &mut out);
    }
    out
}

/// Serialize a node and its children
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else { return };
    match &node.data {
        NodeData::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for attr in element.attrs.iter() {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape_into(&attr.value, true, out);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                return;
            }
            // <style> and <script> contents are raw text
            let raw = matches!(element.tag.as_str(), "style" | "script");
            for (child, child_node) in tree.children(id) {
                match child_node.as_text() {
                    Some(text) if raw => out.push_str(text),
                    _ => write_node(tree, child, out),
                }
            }
            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
        NodeData::Text(text) => escape_into(text, false, out),
        NodeData::Document | NodeData::ShadowRoot(_) => {
            for (child, _) in tree.children(id) {
                write_node(tree, child, out);
            }
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
