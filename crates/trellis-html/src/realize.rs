//! Building straight into a [`Document`].
//!
//! These are the entry points most callers want: whole-document
//! construction, appending or prepending under an existing node, and
//! detached creation.

use trellis_dom::{Document, NodeId};

use crate::builder::{Builder, build};
use crate::consumer::{Anchor, DomConsumer};
use crate::error::{BuildError, Result};

/// Builder type handed to the blocks of this module.
pub type DomBuilder<'c, 'd> = Builder<'c, DomConsumer<'d>>;

/// Build a new document from scratch.
///
/// # Errors
///
/// Any construction error raised inside `block`, including
/// [`BuildError::Hierarchy`] for a second top-level element or for
/// non-whitespace text at the top level.
///
/// # Example
/// ```
/// use trellis_html::build_document;
///
/// let doc = build_document(|b| {
///     b.div(|b| {
///         b.id("test-node")?;
///         b.text("content")
///     })?;
///     Ok(())
/// })
/// .unwrap();
///
/// let node = doc.get_element_by_id("test-node").unwrap();
/// assert!(doc.as_element(node).unwrap().has_tag_name("div"));
/// ```
pub fn build_document<F>(block: F) -> Result<Document>
where
    F: FnOnce(&mut DomBuilder<'_, '_>) -> Result<()>,
{
    let mut doc = Document::new();
    let mut consumer = DomConsumer::new(&mut doc, Anchor::Document)?;
    let _roots = build(&mut consumer, block)?;
    Ok(doc)
}

/// Build under `target`, after its existing children.
///
/// Returns the newly created top-level nodes in build order.
///
/// # Errors
///
/// [`BuildError::MissingAnchor`] if `target` is not a node of `doc`, or
/// [`BuildError::Hierarchy`] if it cannot have children, both before anything
/// is created; otherwise any construction error.
pub fn append<F>(doc: &mut Document, target: NodeId, block: F) -> Result<Vec<NodeId>>
where
    F: FnOnce(&mut DomBuilder<'_, '_>) -> Result<()>,
{
    let mut consumer = DomConsumer::new(doc, Anchor::Append(target))?;
    build(&mut consumer, block)
}

/// Build under `target`, before its existing children.
///
/// # Errors
///
/// As for [`append`].
pub fn prepend<F>(doc: &mut Document, target: NodeId, block: F) -> Result<Vec<NodeId>>
where
    F: FnOnce(&mut DomBuilder<'_, '_>) -> Result<()>,
{
    let mut consumer = DomConsumer::new(doc, Anchor::Prepend(target))?;
    build(&mut consumer, block)
}

/// Build a detached subtree owned by `doc` and return its root.
///
/// If the block produces several top-level nodes, the first is returned;
/// the others stay allocated and detached.
///
/// # Errors
///
/// [`BuildError::EmptyFragment`] if nothing was built; otherwise any
/// construction error.
pub fn create<F>(doc: &mut Document, block: F) -> Result<NodeId>
where
    F: FnOnce(&mut DomBuilder<'_, '_>) -> Result<()>,
{
    let mut consumer = DomConsumer::new(doc, Anchor::Detached)?;
    build(&mut consumer, block)?
        .first()
        .copied()
        .ok_or(BuildError::EmptyFragment)
}
