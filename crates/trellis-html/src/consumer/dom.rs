//! Realization of protocol events into a live [`Document`].

use trellis_dom::{Document, HierarchyError, Namespace, NodeId};

use super::{OpenTags, TagConsumer};
use crate::error::{BuildError, Result};
use crate::tag::Tag;

/// Where the top-level nodes of a build go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Append to the document node itself (whole-document construction).
    Document,
    /// Append after the existing children of the node.
    Append(NodeId),
    /// Insert before the existing children of the node, keeping build order.
    Prepend(NodeId),
    /// Attach nowhere; the caller places the roots.
    Detached,
}

/// Creates nodes in a [`Document`] as events arrive.
///
/// Every node is attached to its parent at creation time. The consumer keeps
/// an explicit stack of open tags and the element created for each, and
/// records the nodes created at the top level so `finalize` can report
/// exactly what was added.
///
/// Attachment goes through the document's pre-insert checks, so a build at
/// the document level may produce one element and any number of comments.
/// Whitespace-only text there is dropped; other text is refused.
///
/// Namespaces follow the open-tag stack: a tag that declares one (`svg`,
/// `math`) uses it, anything else takes its parent's. Top-level tags inherit
/// from the anchor node, so building into an existing `<svg>` stays in SVG.
pub struct DomConsumer<'d> {
    doc: &'d mut Document,
    anchor: Anchor,
    /// Original first child of a prepend target; new roots go before it.
    insert_before: Option<NodeId>,
    open: OpenTags<NodeId>,
    roots: Vec<NodeId>,
    finalized: bool,
}

impl<'d> DomConsumer<'d> {
    /// A consumer building into `doc` at `anchor`.
    ///
    /// # Errors
    ///
    /// [`BuildError::MissingAnchor`] if an append/prepend target is not a node
    /// of `doc`, and [`BuildError::Hierarchy`] if it is a node that cannot
    /// have children (text, comment or raw content).
    pub fn new(doc: &'d mut Document, anchor: Anchor) -> Result<Self> {
        let (base, insert_before) = match anchor {
            Anchor::Append(target) | Anchor::Prepend(target) => {
                let Some(node) = doc.get(target) else {
                    return Err(BuildError::MissingAnchor(target));
                };
                if target != NodeId::ROOT && doc.as_element(target).is_none() {
                    return Err(HierarchyError::NotAParent { kind: node.kind() }.into());
                }
                let namespace = doc.inherited_namespace(target);
                match anchor {
                    Anchor::Prepend(_) => (namespace, doc.first_child(target)),
                    _ => (namespace, None),
                }
            }
            Anchor::Document | Anchor::Detached => (Namespace::Html, None),
        };
        Ok(Self {
            doc,
            anchor,
            insert_before,
            open: OpenTags::new(base),
            roots: Vec::new(),
            finalized: false,
        })
    }

    /// Top-level nodes created so far, in build order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    fn attach(&mut self, node: NodeId) -> Result<()> {
        if let Some(parent) = self.open.top() {
            self.doc.append_child(parent.data, node)?;
            return Ok(());
        }
        match self.anchor {
            Anchor::Document => self.doc.append_child(NodeId::ROOT, node)?,
            Anchor::Append(target) => self.doc.append_child(target, node)?,
            Anchor::Prepend(target) => self.doc.insert_before(target, node, self.insert_before)?,
            Anchor::Detached => {}
        }
        self.roots.push(node);
        Ok(())
    }

    /// Whether new top-level nodes land directly under the document node.
    fn at_document_level(&self) -> bool {
        self.open.is_empty()
            && matches!(
                self.anchor,
                Anchor::Document | Anchor::Append(NodeId::ROOT) | Anchor::Prepend(NodeId::ROOT)
            )
    }

    fn check_open(&self) -> Result<()> {
        if self.finalized {
            return Err(BuildError::AlreadyFinalized);
        }
        Ok(())
    }
}

impl TagConsumer for DomConsumer<'_> {
    type Handle = NodeId;
    type Output = Vec<NodeId>;

    fn on_tag_start(&mut self, tag: &Tag) -> Result<()> {
        self.check_open()?;
        let (namespace, void) = self.open.resolve(tag)?;
        let node = self.doc.create_element(tag.name(), namespace);
        if let Some(element) = self.doc.as_element_mut(node) {
            for (name, value) in tag.attributes().iter() {
                let _ = element.attrs.set(name, value);
            }
        }
        self.attach(node)?;
        self.open.push(tag, namespace, void, node);
        Ok(())
    }

    fn on_tag_attribute_change(
        &mut self,
        tag: &Tag,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        self.check_open()?;
        if self.open.is_empty() {
            return Err(BuildError::AttributeOnClosedTag {
                name: name.to_string(),
            });
        }
        let node = self.open.check_top(tag)?.data;
        if let Some(element) = self.doc.as_element_mut(node) {
            let _ = match value {
                Some(value) => element.attrs.set(name, value),
                None => element.attrs.remove(name),
            };
        }
        Ok(())
    }

    fn on_tag_content(&mut self, content: &str) -> Result<()> {
        self.check_open()?;
        self.open.check_can_contain("text")?;
        if self.at_document_level() && content.trim().is_empty() {
            return Ok(());
        }
        let node = self.doc.create_text(content);
        self.attach(node)
    }

    fn on_tag_comment(&mut self, content: &str) -> Result<()> {
        self.check_open()?;
        self.open.check_can_contain("a comment")?;
        let node = self.doc.create_comment(content);
        self.attach(node)
    }

    fn on_tag_raw(&mut self, content: &str) -> Result<()> {
        self.check_open()?;
        self.open.check_can_contain("raw content")?;
        let node = self.doc.create_raw(content);
        self.attach(node)
    }

    fn on_tag_end(&mut self, tag: &Tag) -> Result<NodeId> {
        self.check_open()?;
        Ok(self.open.pop(tag)?.data)
    }

    fn finalize(&mut self) -> Result<Vec<NodeId>> {
        self.check_open()?;
        if let Some(top) = self.open.top() {
            return Err(BuildError::MismatchedClose {
                expected: Some(top.name.clone()),
                found: String::from("end of build"),
            });
        }
        self.finalized = true;
        Ok(std::mem::take(&mut self.roots))
    }
}
