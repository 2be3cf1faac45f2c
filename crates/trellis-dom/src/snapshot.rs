//! Owned, nested snapshots of a subtree.
//!
//! The arena layout is convenient for building but awkward to compare or dump.
//! A [`NodeSnapshot`] is a plain recursive value: it derives `Serialize` for
//! JSON output and `PartialEq` for structural comparisons in tests.
//!
//! Normalization rules:
//! - Adjacent text nodes are merged, empty text nodes are dropped.
//! - Raw content counts as text.
//! - Element names are compared as stored (case preserved).

use serde::Serialize;

use crate::{Attributes, Document, Namespace, NodeId, NodeType};

/// A detached, recursive copy of one node and its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeSnapshot {
    /// The document node.
    Document {
        /// Top-level children.
        children: Vec<NodeSnapshot>,
    },
    /// An element.
    Element {
        /// Tag name as stored.
        name: String,
        /// Element namespace.
        namespace: Namespace,
        /// Attributes in insertion order.
        attributes: Attributes,
        /// Child nodes.
        children: Vec<NodeSnapshot>,
    },
    /// Merged character data.
    Text {
        /// The text.
        data: String,
    },
    /// A comment.
    Comment {
        /// The comment body.
        data: String,
    },
}

impl NodeSnapshot {
    /// Snapshot `id` and everything below it. `None` if `id` is not allocated.
    #[must_use]
    pub fn capture(doc: &Document, id: NodeId) -> Option<Self> {
        let node = doc.get(id)?;
        let snapshot = match &node.node_type {
            NodeType::Document => Self::Document {
                children: capture_children(doc, id),
            },
            NodeType::Element(data) => Self::Element {
                name: data.tag_name.clone(),
                namespace: data.namespace,
                attributes: data.attrs.clone(),
                children: capture_children(doc, id),
            },
            NodeType::Text(data) | NodeType::Raw(data) => Self::Text { data: data.clone() },
            NodeType::Comment(data) => Self::Comment { data: data.clone() },
        };
        Some(snapshot)
    }

    /// Number of element nodes in this snapshot, including itself.
    #[must_use]
    pub fn element_count(&self) -> usize {
        let own = usize::from(matches!(self, Self::Element { .. }));
        own + self.children().iter().map(Self::element_count).sum::<usize>()
    }

    /// Child snapshots (empty for text and comments).
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Document { children } | Self::Element { children, .. } => children,
            Self::Text { .. } | Self::Comment { .. } => &[],
        }
    }
}

fn capture_children(doc: &Document, id: NodeId) -> Vec<NodeSnapshot> {
    let mut out: Vec<NodeSnapshot> = Vec::new();
    for snapshot in doc
        .children(id)
        .iter()
        .filter_map(|&child| NodeSnapshot::capture(doc, child))
    {
        if let NodeSnapshot::Text { data } = &snapshot {
            if data.is_empty() {
                continue;
            }
            if let Some(NodeSnapshot::Text { data: previous }) = out.last_mut() {
                previous.push_str(data);
                continue;
            }
        }
        out.push(snapshot);
    }
    out
}
