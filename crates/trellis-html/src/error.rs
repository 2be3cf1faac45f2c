//! Construction errors.

use std::io;

use thiserror::Error;
use trellis_dom::{HierarchyError, NodeId};

/// Result alias used throughout the crate.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// Every way a build can fail.
///
/// All variants are fatal: the error is returned to whoever drove the builder
/// block, and whatever was realized before the failure stays attached.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A close event that does not match the innermost open tag.
    #[error(
        "mismatched close tag </{found}>: innermost open tag is {}",
        .expected.as_deref().unwrap_or("<none>")
    )]
    MismatchedClose {
        /// Innermost open tag, if any.
        expected: Option<String>,
        /// Tag the close event named.
        found: String,
    },

    /// Content or a nested tag inside a void element.
    #[error("<{parent}> is a void element and cannot contain {child}")]
    IllegalChildOfVoidElement {
        /// The void element.
        parent: String,
        /// What was offered as a child.
        child: String,
    },

    /// `finalize()` called twice on the same consumer.
    #[error("consumer was already finalized")]
    AlreadyFinalized,

    /// `append`/`prepend` target that is not a node of the document.
    #[error("anchor node {0:?} does not exist in the document")]
    MissingAnchor(NodeId),

    /// A node the document cannot hold where it was going: a second document
    /// element, text directly under the document, or an anchor that cannot
    /// have children.
    #[error("hierarchy request error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// Attribute change issued while no tag is open.
    #[error("attribute '{name}' set with no open tag")]
    AttributeOnClosedTag {
        /// Attribute name.
        name: String,
    },

    /// Attribute change after the start tag was already written out.
    #[error("attribute '{name}' of <{tag}> changed after its content was emitted")]
    AttributeAfterContent {
        /// Tag being built.
        tag: String,
        /// Attribute name.
        name: String,
    },

    /// Entity shorthand with a name missing from the entity table.
    #[error("unknown entity &{0};")]
    UnknownEntity(String),

    /// `create` whose block produced no node.
    #[error("builder block produced no root node")]
    EmptyFragment,

    /// Markup the re-parser could not make sense of.
    #[error("parse error at byte {offset}: {message}")]
    Parse {
        /// Byte offset into the input.
        offset: usize,
        /// What went wrong.
        message: String,
    },

    /// Trace sink failure.
    #[error("trace output failed: {0}")]
    Io(#[from] io::Error),
}
