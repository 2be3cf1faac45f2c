//! Markup serialization of a realized tree.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Output is deterministic: children in insertion order, attributes in
//! insertion order, a fixed `<!DOCTYPE html>` line before a whole document.
//!
//! # Pretty mode
//!
//! Indentation is decided per node rather than per depth:
//! - an element child starts on a new line, indented one level deeper,
//!   unless it directly follows text (then it stays inline);
//! - text, comments and raw content stay inline where they occur;
//! - the close tag goes on its own line at the element's indent only if the
//!   element has at least one element child.
//!
//! So `<div>content<span>yo</span></div>` inside `<body>` becomes
//!
//! ```text
//!     <div>content<span>yo</span>
//!     </div>
//! ```

use trellis_common::warning::warn_once;
use trellis_dom::{Document, Namespace, NodeId, NodeType};

use crate::vocabulary;

/// The doctype line written before a whole document.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Output configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Insert newlines and indentation.
    pub pretty: bool,
    /// Write [`DOCTYPE`] and a newline before a whole document.
    pub doctype: bool,
    /// Spaces per nesting level in pretty mode.
    pub indent: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            doctype: true,
            indent: 2,
        }
    }
}

impl SerializeOptions {
    /// Default options with `pretty` set.
    #[must_use]
    pub fn pretty(pretty: bool) -> Self {
        Self {
            pretty,
            ..Self::default()
        }
    }
}

/// Serialize the whole document: doctype line, then the document's children.
#[must_use]
pub fn serialize(doc: &Document, pretty: bool) -> String {
    serialize_with(doc, NodeId::ROOT, SerializeOptions::pretty(pretty))
}

/// Serialize one node and its subtree (no doctype unless `id` is the root).
#[must_use]
pub fn serialize_node(doc: &Document, id: NodeId, pretty: bool) -> String {
    serialize_with(doc, id, SerializeOptions::pretty(pretty))
}

/// Serialize `id` with explicit options.
#[must_use]
pub fn serialize_with(doc: &Document, id: NodeId, options: SerializeOptions) -> String {
    let mut out = String::new();
    let writer = TreeWriter {
        doc,
        options,
    };
    if id == NodeId::ROOT {
        if options.doctype {
            out.push_str(DOCTYPE);
            out.push('\n');
        }
        if doc.document_element().is_none() {
            warn_once("Serializer", "document has no document element");
        }
        for (i, &child) in doc.children(NodeId::ROOT).iter().enumerate() {
            if i > 0 && options.pretty {
                out.push('\n');
            }
            writer.write_node(child, 0, Namespace::Html, &mut out);
        }
    } else {
        let parent_ns = doc
            .parent(id)
            .map_or(Namespace::Html, |p| doc.inherited_namespace(p));
        writer.write_node(id, 0, parent_ns, &mut out);
    }
    out
}

struct TreeWriter<'a> {
    doc: &'a Document,
    options: SerializeOptions,
}

impl TreeWriter<'_> {
    fn write_node(&self, id: NodeId, depth: usize, parent_ns: Namespace, out: &mut String) {
        let Some(node) = self.doc.get(id) else {
            return;
        };
        match &node.node_type {
            NodeType::Element(data) => {
                write_start_tag(
                    out,
                    &data.tag_name,
                    data.attrs.iter(),
                    data.namespace,
                    parent_ns,
                );

                let children = self.doc.children(id);
                let void = data.namespace == Namespace::Html && vocabulary::is_void(&data.tag_name);
                if void && children.is_empty() {
                    return;
                }

                let raw_text = vocabulary::is_raw_text(&data.tag_name);
                let mut after_text = false;
                let mut has_element_child = false;
                for &child in children {
                    let is_element = self.doc.as_element(child).is_some();
                    if is_element {
                        if self.options.pretty && !after_text {
                            newline_indent(out, depth + 1, self.options.indent);
                        }
                        self.write_node(child, depth + 1, data.namespace, out);
                        has_element_child = true;
                    } else {
                        self.write_content(child, raw_text, out);
                    }
                    after_text = !is_element;
                }

                if self.options.pretty && has_element_child {
                    newline_indent(out, depth, self.options.indent);
                }
                write_end_tag(out, &data.tag_name);
            }
            NodeType::Document => {
                for &child in self.doc.children(id) {
                    self.write_node(child, depth, Namespace::Html, out);
                }
            }
            NodeType::Text(_) | NodeType::Comment(_) | NodeType::Raw(_) => {
                self.write_content(id, false, out);
            }
        }
    }

    fn write_content(&self, id: NodeId, raw_text_parent: bool, out: &mut String) {
        match self.doc.get(id).map(|n| &n.node_type) {
            Some(NodeType::Text(text)) if raw_text_parent => out.push_str(text),
            Some(NodeType::Text(text)) => escape_text(text, out),
            Some(NodeType::Comment(text)) => write_comment(out, text),
            Some(NodeType::Raw(text)) => out.push_str(text),
            _ => {}
        }
    }
}

pub(crate) fn newline_indent(out: &mut String, depth: usize, indent: usize) {
    out.push('\n');
    out.extend(std::iter::repeat_n(' ', depth * indent));
}

/// Write `<name attr="value"...>` for an element in `namespace` whose parent
/// is in `parent_ns`.
///
/// `xmlns` comes first when the namespace changes and no `xmlns` attribute
/// is present. Empty boolean attributes are written name-only on HTML
/// elements only.
pub(crate) fn write_start_tag<'a>(
    out: &mut String,
    name: &str,
    attrs: impl Iterator<Item = (&'a str, &'a str)> + Clone,
    namespace: Namespace,
    parent_ns: Namespace,
) {
    out.push('<');
    out.push_str(name);
    if namespace != parent_ns && !attrs.clone().any(|(n, _)| n == "xmlns") {
        write_attribute(out, "xmlns", namespace.uri(), false);
    }
    let html = namespace == Namespace::Html;
    for (attr_name, value) in attrs {
        write_attribute(out, attr_name, value, html);
    }
    out.push('>');
}

fn write_attribute(out: &mut String, name: &str, value: &str, html: bool) {
    out.push(' ');
    out.push_str(name);
    if html && value.is_empty() && vocabulary::is_boolean_attribute(name) {
        return;
    }
    out.push_str("=\"");
    escape_attribute(value, out);
    out.push('"');
}

pub(crate) fn write_end_tag(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

pub(crate) fn write_comment(out: &mut String, text: &str) {
    out.push_str("<!--");
    out.push_str(text);
    out.push_str("-->");
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
/// in text mode: `&`, `<`, `>`.
pub fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Attribute-mode escaping: text mode plus `"`.
pub fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
