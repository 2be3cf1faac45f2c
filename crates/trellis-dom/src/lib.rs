//! Document tree for the Trellis tree builder.
//!
//! This crate provides the arena-based node model the builder realizes into,
//! following the shape of the [DOM Living Standard](https://dom.spec.whatwg.org/)
//! closely enough for construction and serialization.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Nodes
//! allocated with the `create_*` methods start detached; they only become part
//! of the document once appended or inserted under an attached node.

mod attributes;
mod error;
mod namespace;
pub mod snapshot;

pub use attributes::Attributes;
pub use error::HierarchyError;
pub use namespace::Namespace;

use serde::Serialize;
use strum_macros::IntoStaticStr;
use trellis_common::warning::warn_once;

/// A type-safe index into the document arena.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// The node immediately following this one in its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately preceding this one in its parent's children.
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    /// Lowercase name of the node's kind: `"document"`, `"element"`,
    /// `"text"`, `"comment"` or `"raw"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        (&self.node_type).into()
    }
}

/// The kind of a node together with its kind-specific data.
#[derive(Debug, Clone, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum NodeType {
    /// The document itself. Only [`NodeId::ROOT`] has this type.
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// Character data, escaped when serialized.
    Text(String),
    /// Comment data, emitted verbatim between comment delimiters.
    Comment(String),
    /// Pre-formatted markup inserted verbatim (inline script bodies and
    /// other "unsafe" content).
    Raw(String),
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "Elements have an associated namespace, namespace prefix, local name..."
///
/// The local name is stored exactly as given; comparisons go through
/// [`ElementData::has_tag_name`], which ignores ASCII case.
#[derive(Debug, Clone, Serialize)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element's namespace"
    pub namespace: Namespace,
    /// "An element has an associated attribute list", kept in insertion order.
    pub attrs: Attributes,
}

impl ElementData {
    /// Create element data with no attributes.
    pub fn new(tag_name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            tag_name: tag_name.into(),
            namespace,
            attrs: Attributes::new(),
        }
    }

    /// Case-insensitive tag name comparison.
    #[must_use]
    pub fn has_tag_name(&self, name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(name)
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }

    /// Returns the class names from the class attribute, in source order.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.attrs
            .get("class")
            .map(|list| list.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }
}

/// An arena-backed document: the host document the builder realizes into.
///
/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
///
/// All nodes live in a contiguous vector and refer to each other by
/// [`NodeId`]. The Document node is always at index 0 ([`NodeId::ROOT`]).
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document holding only the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
                next_sibling: None,
                prev_sibling: None,
            }],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of allocated nodes, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the Document node is allocated on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new detached node and return its ID.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.5 createElementNS](https://dom.spec.whatwg.org/#dom-document-createelementns)
    pub fn create_element(&mut self, tag_name: &str, namespace: Namespace) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(tag_name, namespace)))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()))
    }

    /// Allocate a detached comment node.
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    /// Allocate a detached raw-content node.
    pub fn create_raw(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Raw(data.to_string()))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// A child that already has a parent is removed from it first.
    ///
    /// # Errors
    ///
    /// As for [`Document::insert_before`].
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HierarchyError> {
        self.insert_before(parent, child, None)
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `child` into `parent` before `reference`, or at the end when
    /// `reference` is `None`. A child that already has a parent is removed
    /// from it first.
    ///
    /// # Errors
    ///
    /// A [`HierarchyError`] when the insertion would not leave a tree: unknown
    /// IDs, a parent that cannot have children, a cycle, a reference that is
    /// not a child of `parent`, or a second element or text directly under
    /// the document. Nothing is changed in that case.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), HierarchyError> {
        self.ensure_pre_insert_validity(parent, child, reference)?;

        // "If child is node, set child to node's next sibling."
        let reference = if reference == Some(child) {
            self.next_sibling(child)
        } else {
            reference
        };
        self.detach(child);

        let children = &mut self.nodes[parent.0].children;
        let position = reference
            .and_then(|r| children.iter().position(|&c| c == r))
            .unwrap_or(children.len());
        children.insert(position, child);
        self.nodes[child.0].parent = Some(parent);
        self.relink_siblings(parent);
        Ok(())
    }

    /// [§ 4.2.3 Ensure pre-insert validity](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    fn ensure_pre_insert_validity(
        &self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), HierarchyError> {
        let parent_node = self.get(parent).ok_or(HierarchyError::UnknownNode(parent))?;
        let child_node = self.get(child).ok_or(HierarchyError::UnknownNode(child))?;

        let parent_is_document = match parent_node.node_type {
            NodeType::Document => true,
            NodeType::Element(_) => false,
            _ => {
                return Err(HierarchyError::NotAParent {
                    kind: parent_node.kind(),
                });
            }
        };
        if child == parent || self.ancestors(parent).any(|a| a == child) {
            return Err(HierarchyError::Cycle { parent, child });
        }
        if let Some(reference) = reference
            && self.parent(reference) != Some(parent)
        {
            return Err(HierarchyError::NotAChild { parent, reference });
        }

        let insertable = match child_node.node_type {
            NodeType::Document => false,
            NodeType::Text(_) | NodeType::Raw(_) => !parent_is_document,
            NodeType::Element(_) | NodeType::Comment(_) => true,
        };
        if !insertable {
            return Err(HierarchyError::NotInsertable {
                kind: child_node.kind(),
            });
        }
        if parent_is_document
            && self.as_element(child).is_some()
            && self
                .children(parent)
                .iter()
                .any(|&c| c != child && self.as_element(c).is_some())
        {
            return Err(HierarchyError::SecondDocumentElement);
        }
        Ok(())
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `child` from `parent`. Does nothing if `child` is not a child
    /// of `parent`. The removed node stays allocated and can be re-inserted.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) == Some(parent) {
            self.detach(child);
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(old_parent) = self.nodes[child.0].parent.take() else {
            return;
        };
        self.nodes[old_parent.0].children.retain(|&c| c != child);
        self.nodes[child.0].next_sibling = None;
        self.nodes[child.0].prev_sibling = None;
        self.relink_siblings(old_parent);
    }

    fn relink_siblings(&mut self, parent: NodeId) {
        let children = self.nodes[parent.0].children.clone();
        for (i, &id) in children.iter().enumerate() {
            let node = &mut self.nodes[id.0];
            node.prev_sibling = i.checked_sub(1).map(|p| children[p]);
            node.next_sibling = children.get(i + 1).copied();
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Whether the node is reachable from [`NodeId::ROOT`].
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.ancestors(id).any(|a| a == NodeId::ROOT)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 4.4 namespaceURI](https://dom.spec.whatwg.org/#dom-element-namespaceuri)
    ///
    /// `None` for anything that is not an element.
    #[must_use]
    pub fn namespace_uri(&self, id: NodeId) -> Option<&'static str> {
        self.as_element(id).map(|e| e.namespace.uri())
    }

    /// The namespace new children of `id` inherit: the element's own
    /// namespace, or HTML for the document and non-element nodes.
    #[must_use]
    pub fn inherited_namespace(&self, id: NodeId) -> Namespace {
        self.as_element(id).map_or(Namespace::Html, |e| e.namespace)
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Concatenation of all text and raw descendants, in tree order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.get(id).map(|n| &n.node_type) {
            Some(NodeType::Text(s) | NodeType::Raw(s)) => out.push_str(s),
            Some(NodeType::Comment(_)) | None => {}
            Some(_) => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Attached descendants of `id` in tree order (pre-order, excluding `id`).
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.document_child_named("body")
    }

    /// [§ 3.1.4 The head element](https://html.spec.whatwg.org/multipage/dom.html#dom-document-head)
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.document_child_named("head")
    }

    fn document_child_named(&self, name: &str) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .find(|&&id| self.as_element(id).is_some_and(|e| e.has_tag_name(name)))
            .copied()
    }

    /// [§ 4.2.4 getElementById](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// "returns the first element, in tree order, within this's descendants,
    /// whose ID is elementId"
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut matches = self
            .descendants(NodeId::ROOT)
            .into_iter()
            .filter(|&n| self.as_element(n).and_then(ElementData::id) == Some(id));
        let first = matches.next();
        if first.is_some() && matches.next().is_some() {
            warn_once("DOM", &format!("duplicate id '{id}'; returning the first match"));
        }
        first
    }

    /// [§ 4.4 getElementsByTagName](https://dom.spec.whatwg.org/#dom-document-getelementsbytagname)
    ///
    /// Attached elements whose tag name matches `name` ignoring ASCII case,
    /// in tree order.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, name: &str) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT)
            .into_iter()
            .filter(|&n| self.as_element(n).is_some_and(|e| e.has_tag_name(name)))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
