//! Direct markup output, no tree in between.

use trellis_dom::{Attributes, Namespace};

use super::{OpenTags, TagConsumer};
use crate::error::{BuildError, Result};
use crate::serializer::{
    self, DOCTYPE, SerializeOptions, newline_indent, write_comment, write_end_tag,
    write_start_tag,
};
use crate::tag::Tag;
use crate::vocabulary;

/// Per-open-tag layout state.
#[derive(Debug, Default)]
struct Frame {
    has_content: bool,
    has_element_child: bool,
    after_text: bool,
    raw_text: bool,
}

/// A start tag whose attributes may still change.
#[derive(Debug)]
struct PendingStart {
    name: String,
    attrs: Attributes,
    namespace: Namespace,
    parent_ns: Namespace,
}

/// Writes markup text as events arrive and returns it from `finalize`.
///
/// Produces the same bytes the tree serializer would for the realized tree,
/// in both compact and pretty mode. A start tag is held back until its first
/// child or its end, so attribute changes issued right after the start event
/// still land in it; changing an attribute after that fails with
/// [`BuildError::AttributeAfterContent`].
#[derive(Debug)]
pub struct HtmlStreamConsumer {
    options: SerializeOptions,
    out: String,
    open: OpenTags<Frame>,
    pending: Option<PendingStart>,
    started: bool,
    finalized: bool,
}

impl HtmlStreamConsumer {
    /// A stream consumer with the given output options.
    #[must_use]
    pub const fn new(options: SerializeOptions) -> Self {
        Self {
            options,
            out: String::new(),
            open: OpenTags::new(Namespace::Html),
            pending: None,
            started: false,
            finalized: false,
        }
    }

    /// Text written so far (the pending start tag excluded).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    fn check_open(&self) -> Result<()> {
        if self.finalized {
            return Err(BuildError::AlreadyFinalized);
        }
        Ok(())
    }

    fn flush_pending(&mut self) {
        if let Some(start) = self.pending.take() {
            write_start_tag(
                &mut self.out,
                &start.name,
                start.attrs.iter(),
                start.namespace,
                start.parent_ns,
            );
        }
    }

    /// Position the output for a new child of the innermost open tag.
    fn begin_child(&mut self, is_element: bool) {
        self.flush_pending();
        let depth = self.open.depth();
        let pretty = self.options.pretty;
        let indent = self.options.indent;
        match self.open.top_mut() {
            Some(parent) => {
                let frame = &mut parent.data;
                if is_element {
                    if pretty && !frame.after_text {
                        newline_indent(&mut self.out, depth, indent);
                    }
                    frame.has_element_child = true;
                }
                frame.has_content = true;
                frame.after_text = !is_element;
            }
            None if !self.started => {
                self.started = true;
                if self.options.doctype {
                    self.out.push_str(DOCTYPE);
                    self.out.push('\n');
                }
            }
            None => {
                if pretty {
                    self.out.push('\n');
                }
            }
        }
    }

    fn in_raw_text(&self) -> bool {
        self.open.top().is_some_and(|top| top.data.raw_text)
    }
}

impl Default for HtmlStreamConsumer {
    fn default() -> Self {
        Self::new(SerializeOptions::default())
    }
}

impl TagConsumer for HtmlStreamConsumer {
    type Handle = ();
    type Output = String;

    fn on_tag_start(&mut self, tag: &Tag) -> Result<()> {
        self.check_open()?;
        let (namespace, void) = self.open.resolve(tag)?;
        let parent_ns = self.open.current_namespace();
        self.begin_child(true);
        self.pending = Some(PendingStart {
            name: tag.name().to_string(),
            attrs: tag.attributes().clone(),
            namespace,
            parent_ns,
        });
        let frame = Frame {
            raw_text: vocabulary::is_raw_text(tag.name()),
            ..Frame::default()
        };
        self.open.push(tag, namespace, void, frame);
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
        let _ = self.open.check_top(tag)?;
        let Some(start) = self.pending.as_mut() else {
            return Err(BuildError::AttributeAfterContent {
                tag: tag.name().to_string(),
                name: name.to_string(),
            });
        };
        let _ = match value {
            Some(value) => start.attrs.set(name, value),
            None => start.attrs.remove(name),
        };
        Ok(())
    }

    fn on_tag_content(&mut self, content: &str) -> Result<()> {
        self.check_open()?;
        self.open.check_can_contain("text")?;
        self.begin_child(false);
        if self.in_raw_text() {
            self.out.push_str(content);
        } else {
            serializer::escape_text(content, &mut self.out);
        }
        Ok(())
    }

    fn on_tag_comment(&mut self, content: &str) -> Result<()> {
        self.check_open()?;
        self.open.check_can_contain("a comment")?;
        self.begin_child(false);
        write_comment(&mut self.out, content);
        Ok(())
    }

    fn on_tag_raw(&mut self, content: &str) -> Result<()> {
        self.check_open()?;
        self.open.check_can_contain("raw content")?;
        self.begin_child(false);
        self.out.push_str(content);
        Ok(())
    }

    fn on_tag_end(&mut self, tag: &Tag) -> Result<()> {
        self.check_open()?;
        let closed = self.open.pop(tag)?;
        self.flush_pending();
        if closed.void && !closed.data.has_content {
            return Ok(());
        }
        if self.options.pretty && closed.data.has_element_child {
            newline_indent(&mut self.out, self.open.depth(), self.options.indent);
        }
        write_end_tag(&mut self.out, &closed.name);
        Ok(())
    }

    fn finalize(&mut self) -> Result<String> {
        self.check_open()?;
        if let Some(top) = self.open.top() {
            return Err(BuildError::MismatchedClose {
                expected: Some(top.name.clone()),
                found: String::from("end of build"),
            });
        }
        self.finalized = true;
        Ok(std::mem::take(&mut self.out))
    }
}
