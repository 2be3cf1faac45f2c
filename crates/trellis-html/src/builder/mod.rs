//! The builder DSL: nested closures that become protocol events.
//!
//! Each open call emits a start event, runs its block against the same
//! builder, and emits the matching end event. Attribute and content calls
//! inside the block apply to the innermost open tag.
//!
//! ```
//! use trellis_html::builder::build;
//! use trellis_html::consumer::html_stream;
//!
//! let mut consumer = html_stream();
//! let html = build(&mut consumer, |b| {
//!     b.html(|b| {
//!         b.body(|b| {
//!             b.div(|b| {
//!                 b.id("main")?;
//!                 b.text("hello")
//!             })?;
//!             Ok(())
//!         })?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(html, "<!DOCTYPE html>\n<html><body><div id=\"main\">hello</div></body></html>");
//! ```

mod tags;
mod values;

pub use values::{AttributeValue, InputType, ScriptType};

use crate::consumer::TagConsumer;
use crate::entities;
use crate::error::{BuildError, Result};
use crate::tag::Tag;

/// Drives a [`TagConsumer`] from nested builder calls.
pub struct Builder<'c, C: TagConsumer> {
    consumer: &'c mut C,
    open: Vec<Tag>,
}

/// Run `block` against a fresh builder over `consumer`, then finalize.
///
/// # Errors
///
/// Whatever the block or the consumer reports. On error the consumer is not
/// finalized and anything it realized so far stays where it is.
pub fn build<C, F>(consumer: &mut C, block: F) -> Result<C::Output>
where
    C: TagConsumer,
    F: FnOnce(&mut Builder<'_, C>) -> Result<()>,
{
    let mut builder = Builder::new(consumer);
    block(&mut builder)?;
    builder.finish()
}

impl<'c, C: TagConsumer> Builder<'c, C> {
    /// A builder reporting to `consumer`.
    pub const fn new(consumer: &'c mut C) -> Self {
        Self {
            consumer,
            open: Vec::new(),
        }
    }

    /// Finalize the consumer.
    ///
    /// # Errors
    ///
    /// [`BuildError::MismatchedClose`] if a tag is still open, or whatever
    /// the consumer's `finalize` reports.
    pub fn finish(self) -> Result<C::Output> {
        if let Some(tag) = self.open.last() {
            return Err(BuildError::MismatchedClose {
                expected: Some(tag.name().to_string()),
                found: String::from("end of build"),
            });
        }
        self.consumer.finalize()
    }

    /// Name of the innermost open tag.
    #[must_use]
    pub fn current(&self) -> Option<&Tag> {
        self.open.last()
    }

    /// Open `tag`, run `block` inside it, close it.
    ///
    /// # Errors
    ///
    /// Propagates the first error from the consumer or the block; the close
    /// event is not emitted after an error.
    pub fn tag<F>(&mut self, tag: Tag, block: F) -> Result<C::Handle>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.consumer.on_tag_start(&tag)?;
        self.open.push(tag);
        block(self)?;
        let tag = self.open.pop().ok_or_else(|| BuildError::MismatchedClose {
            expected: None,
            found: String::from("end of block"),
        })?;
        self.consumer.on_tag_end(&tag)
    }

    /// Open and immediately close `tag` (void elements and empty tags).
    ///
    /// # Errors
    ///
    /// Whatever the consumer reports.
    pub fn empty_tag(&mut self, tag: Tag) -> Result<C::Handle> {
        self.consumer.on_tag_start(&tag)?;
        self.consumer.on_tag_end(&tag)
    }

    /// Open an element by name; see [`Builder::tag`].
    ///
    /// # Errors
    ///
    /// As for [`Builder::tag`].
    pub fn element<F>(&mut self, name: &str, block: F) -> Result<C::Handle>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.tag(Tag::new(name), block)
    }

    /// Set an attribute on the innermost open tag. Values that convert to
    /// `None` (such as `false`) remove the attribute instead.
    ///
    /// # Errors
    ///
    /// [`BuildError::AttributeOnClosedTag`] outside any open tag.
    pub fn attr(&mut self, name: &str, value: impl AttributeValue) -> Result<()> {
        let value = value.to_attribute_value();
        let Some(tag) = self.open.last_mut() else {
            return Err(BuildError::AttributeOnClosedTag {
                name: name.to_string(),
            });
        };
        tag.set_attribute(name, value.as_deref());
        self.consumer
            .on_tag_attribute_change(tag, name, value.as_deref())
    }

    /// Remove an attribute from the innermost open tag.
    ///
    /// # Errors
    ///
    /// As for [`Builder::attr`].
    pub fn remove_attr(&mut self, name: &str) -> Result<()> {
        self.attr(name, None::<&str>)
    }

    /// Set the `id` attribute.
    ///
    /// # Errors
    ///
    /// As for [`Builder::attr`].
    pub fn id(&mut self, id: &str) -> Result<()> {
        self.attr("id", id)
    }

    /// Replace the `class` attribute with the space-joined `classes`.
    ///
    /// # Errors
    ///
    /// As for [`Builder::attr`].
    pub fn classes<I, S>(&mut self, classes: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = classes
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.attr("class", joined)
    }

    /// Add one class to the existing `class` list, if not already present.
    ///
    /// # Errors
    ///
    /// As for [`Builder::attr`].
    pub fn add_class(&mut self, class: &str) -> Result<()> {
        let existing = self
            .current()
            .and_then(|tag| tag.attributes().get("class"))
            .unwrap_or_default()
            .to_string();
        if existing.split_ascii_whitespace().any(|c| c == class) {
            return Ok(());
        }
        let updated = if existing.is_empty() {
            class.to_string()
        } else {
            format!("{existing} {class}")
        };
        self.attr("class", updated)
    }

    /// Append escaped text to the innermost open tag.
    ///
    /// # Errors
    ///
    /// Whatever the consumer reports.
    pub fn text(&mut self, text: impl AsRef<str>) -> Result<()> {
        self.consumer.on_tag_content(text.as_ref())
    }

    /// Append a comment.
    ///
    /// # Errors
    ///
    /// Whatever the consumer reports.
    pub fn comment(&mut self, text: impl AsRef<str>) -> Result<()> {
        self.consumer.on_tag_comment(text.as_ref())
    }

    /// Append content verbatim, without escaping.
    ///
    /// # Errors
    ///
    /// Whatever the consumer reports.
    pub fn raw(&mut self, markup: impl AsRef<str>) -> Result<()> {
        self.consumer.on_tag_raw(markup.as_ref())
    }

    /// Append the character a named entity stands for, as text.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownEntity`] if `name` is not in the entity table.
    pub fn entity(&mut self, name: &str) -> Result<()> {
        let c = entities::lookup(name).ok_or_else(|| BuildError::UnknownEntity(name.to_string()))?;
        self.consumer.on_tag_content(c.encode_utf8(&mut [0; 4]))
    }
}
