//! Tree mutation errors.

use thiserror::Error;

use crate::NodeId;

/// Why an insertion was refused.
///
/// [§ 4.2.3 Ensure pre-insert validity](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
/// The tree is left untouched when any of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// An ID that was never allocated in this document.
    #[error("node {0:?} does not exist in the document")]
    UnknownNode(NodeId),

    /// "If parent is not a Document, DocumentFragment, or Element node, then
    /// throw a HierarchyRequestError"
    #[error("a {kind} node cannot have children")]
    NotAParent {
        /// Kind of the would-be parent.
        kind: &'static str,
    },

    /// "If node is a host-including inclusive ancestor of parent, then throw
    /// a HierarchyRequestError"
    #[error("node {child:?} is an inclusive ancestor of {parent:?}")]
    Cycle {
        /// Where the insertion was attempted.
        parent: NodeId,
        /// The node being inserted.
        child: NodeId,
    },

    /// "If child is non-null and its parent is not parent, then throw a
    /// NotFoundError"
    #[error("reference node {reference:?} is not a child of {parent:?}")]
    NotAChild {
        /// Where the insertion was attempted.
        parent: NodeId,
        /// The node the insertion was positioned against.
        reference: NodeId,
    },

    /// The document node itself, or character data directly under it.
    #[error("a {kind} node cannot be inserted there")]
    NotInsertable {
        /// Kind of the rejected node.
        kind: &'static str,
    },

    /// "parent has an element child" when inserting an element into a document.
    #[error("the document already has a document element")]
    SecondDocumentElement,
}
