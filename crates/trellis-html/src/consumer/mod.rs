//! The tag consumer protocol and its implementations.
//!
//! A builder call sequence is reported to a [`TagConsumer`] as a strictly
//! nested stream of events:
//!
//! ```text
//! on_tag_start(div)
//!   on_tag_attribute_change(div, "id", Some("main"))
//!   on_tag_content("hello")
//!   on_tag_start(span) ... on_tag_end(span)
//! on_tag_end(div)
//! finalize()
//! ```
//!
//! Every output mode is a consumer: [`DomConsumer`] realizes nodes in a
//! [`trellis_dom::Document`], [`HtmlStreamConsumer`] writes markup text
//! directly, and [`FilterConsumer`] / [`TraceConsumer`] decorate another
//! consumer.

mod dom;
mod filter;
mod stream;
mod trace;

pub use dom::{Anchor, DomConsumer};
pub use filter::{FilterConsumer, FilterDecision};
pub use stream::HtmlStreamConsumer;
pub use trace::TraceConsumer;

use std::io;

use trellis_dom::Namespace;

use crate::error::{BuildError, Result};
use crate::serializer::SerializeOptions;
use crate::tag::Tag;

/// Receiver of tree-construction events.
///
/// Start and end events nest like a stack: `on_tag_start` pushes,
/// `on_tag_end` pops, and every event in between applies to the top.
pub trait TagConsumer {
    /// What closing a tag yields (the created node, nothing, ...).
    type Handle;
    /// What `finalize` yields.
    type Output;

    /// An element is opening. Attributes on `tag` are those known so far.
    fn on_tag_start(&mut self, tag: &Tag) -> Result<()>;

    /// Set (`Some`) or remove (`None`) an attribute of the innermost open tag.
    fn on_tag_attribute_change(&mut self, tag: &Tag, name: &str, value: Option<&str>)
    -> Result<()>;

    /// Append escaped character content to the innermost open tag.
    fn on_tag_content(&mut self, content: &str) -> Result<()>;

    /// Append a comment to the innermost open tag.
    fn on_tag_comment(&mut self, content: &str) -> Result<()>;

    /// Append verbatim, never escaped content to the innermost open tag.
    fn on_tag_raw(&mut self, content: &str) -> Result<()>;

    /// Close the innermost open tag, which must be `tag`.
    fn on_tag_end(&mut self, tag: &Tag) -> Result<Self::Handle>;

    /// Produce the result. A second call fails with
    /// [`BuildError::AlreadyFinalized`].
    fn finalize(&mut self) -> Result<Self::Output>;
}

impl<C: TagConsumer + ?Sized> TagConsumer for &mut C {
    type Handle = C::Handle;
    type Output = C::Output;

    fn on_tag_start(&mut self, tag: &Tag) -> Result<()> {
        (**self).on_tag_start(tag)
    }

    fn on_tag_attribute_change(
        &mut self,
        tag: &Tag,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        (**self).on_tag_attribute_change(tag, name, value)
    }

    fn on_tag_content(&mut self, content: &str) -> Result<()> {
        (**self).on_tag_content(content)
    }

    fn on_tag_comment(&mut self, content: &str) -> Result<()> {
        (**self).on_tag_comment(content)
    }

    fn on_tag_raw(&mut self, content: &str) -> Result<()> {
        (**self).on_tag_raw(content)
    }

    fn on_tag_end(&mut self, tag: &Tag) -> Result<Self::Handle> {
        (**self).on_tag_end(tag)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        (**self).finalize()
    }
}

/// Decorator constructors available on every consumer.
pub trait TagConsumerExt: TagConsumer + Sized {
    /// Wrap in a [`FilterConsumer`] that asks `predicate` about every tag.
    fn filter<P>(self, predicate: P) -> FilterConsumer<Self, P>
    where
        P: FnMut(&Tag) -> FilterDecision,
    {
        FilterConsumer::new(self, predicate)
    }

    /// Wrap in a [`TraceConsumer`] that logs every event to `sink`.
    fn trace<W: io::Write>(self, sink: W) -> TraceConsumer<Self, W> {
        TraceConsumer::new(self, sink)
    }
}

impl<C: TagConsumer> TagConsumerExt for C {}

/// Stream consumer writing compact markup with a doctype.
#[must_use]
pub fn html_stream() -> HtmlStreamConsumer {
    HtmlStreamConsumer::new(SerializeOptions::default())
}

/// One open tag as tracked by a consumer.
#[derive(Debug)]
pub(crate) struct OpenTag<T> {
    pub(crate) name: String,
    pub(crate) namespace: Namespace,
    pub(crate) void: bool,
    pub(crate) data: T,
}

/// The stack of open tags every realizing consumer keeps.
///
/// Enforces the protocol's nesting rules: nothing opens inside a void
/// element, and a close event must name the innermost open tag.
#[derive(Debug)]
pub(crate) struct OpenTags<T> {
    base: Namespace,
    entries: Vec<OpenTag<T>>,
}

impl<T> OpenTags<T> {
    /// An empty stack whose top-level tags inherit `base`.
    pub(crate) const fn new(base: Namespace) -> Self {
        Self {
            base,
            entries: Vec::new(),
        }
    }

    /// Namespace a tag opened now would inherit.
    pub(crate) fn current_namespace(&self) -> Namespace {
        self.entries.last().map_or(self.base, |top| top.namespace)
    }

    pub(crate) fn top(&self) -> Option<&OpenTag<T>> {
        self.entries.last()
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut OpenTag<T>> {
        self.entries.last_mut()
    }

    pub(crate) const fn depth(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails if the innermost open tag is void.
    pub(crate) fn check_can_contain(&self, child: &str) -> Result<()> {
        match self.entries.last() {
            Some(top) if top.void => Err(BuildError::IllegalChildOfVoidElement {
                parent: top.name.clone(),
                child: child.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Resolve `tag`'s namespace and void-ness without pushing.
    pub(crate) fn resolve(&self, tag: &Tag) -> Result<(Namespace, bool)> {
        self.check_can_contain(&format!("<{}>", tag.name()))?;
        let namespace = tag.resolve_namespace(self.current_namespace());
        Ok((namespace, tag.is_void_in(namespace)))
    }

    pub(crate) fn push(&mut self, tag: &Tag, namespace: Namespace, void: bool, data: T) {
        self.entries.push(OpenTag {
            name: tag.name().to_string(),
            namespace,
            void,
            data,
        });
    }

    /// Fails unless the innermost open tag is `tag`.
    pub(crate) fn check_top(&self, tag: &Tag) -> Result<&OpenTag<T>> {
        match self.entries.last() {
            Some(top) if tag.is(&top.name) => Ok(top),
            top => Err(BuildError::MismatchedClose {
                expected: top.map(|t| t.name.clone()),
                found: tag.name().to_string(),
            }),
        }
    }

    /// Pop the innermost open tag, which must be `tag`.
    pub(crate) fn pop(&mut self, tag: &Tag) -> Result<OpenTag<T>> {
        let _ = self.check_top(tag)?;
        self.entries
            .pop()
            .ok_or_else(|| BuildError::MismatchedClose {
                expected: None,
                found: tag.name().to_string(),
            })
    }
}
