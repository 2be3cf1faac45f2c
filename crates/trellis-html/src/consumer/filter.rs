//! Subtree filtering as a consumer decorator.

use strum_macros::{Display, EnumString};

use super::TagConsumer;
use crate::error::{BuildError, Result};
use crate::tag::Tag;

/// What a filter predicate decides about one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FilterDecision {
    /// Forward the tag. Its nested tags are asked again, one by one.
    Pass,
    /// Suppress the tag, everything inside it, and its close.
    Skip,
    /// Suppress only the tag itself; its children go to its parent.
    Drop,
}

/// Wraps a consumer and forwards or suppresses tags according to a
/// predicate evaluated at each start event.
///
/// Suppression is purely on the event side: the builder still runs the
/// nested blocks of a skipped tag, their events just never reach the
/// wrapped consumer. Nesting is still checked for suppressed tags, so an
/// unbalanced build is reported whether or not its tags were forwarded.
pub struct FilterConsumer<C, P> {
    downstream: C,
    predicate: P,
    /// Names of all open tags, forwarded or not.
    open: Vec<String>,
    /// Decisions for the open tags that were not skipped.
    decisions: Vec<FilterDecision>,
    /// Open tags inside (and including) the outermost skipped one.
    skip_depth: usize,
}

impl<C, P> FilterConsumer<C, P>
where
    C: TagConsumer,
    P: FnMut(&Tag) -> FilterDecision,
{
    /// Filter the events reaching `downstream` with `predicate`.
    pub const fn new(downstream: C, predicate: P) -> Self {
        Self {
            downstream,
            predicate,
            open: Vec::new(),
            decisions: Vec::new(),
            skip_depth: 0,
        }
    }

    /// Unwrap, returning the wrapped consumer.
    pub fn into_inner(self) -> C {
        self.downstream
    }

    const fn skipping(&self) -> bool {
        self.skip_depth > 0
    }
}

impl<C, P> TagConsumer for FilterConsumer<C, P>
where
    C: TagConsumer,
    P: FnMut(&Tag) -> FilterDecision,
{
    type Handle = Option<C::Handle>;
    type Output = C::Output;

    fn on_tag_start(&mut self, tag: &Tag) -> Result<()> {
        self.open.push(tag.name().to_string());
        if self.skipping() {
            self.skip_depth += 1;
            return Ok(());
        }
        match (self.predicate)(tag) {
            FilterDecision::Skip => {
                self.skip_depth = 1;
                Ok(())
            }
            FilterDecision::Drop => {
                self.decisions.push(FilterDecision::Drop);
                Ok(())
            }
            FilterDecision::Pass => {
                self.decisions.push(FilterDecision::Pass);
                self.downstream.on_tag_start(tag)
            }
        }
    }

    fn on_tag_attribute_change(
        &mut self,
        tag: &Tag,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        if self.skipping() || self.decisions.last() == Some(&FilterDecision::Drop) {
            return Ok(());
        }
        self.downstream.on_tag_attribute_change(tag, name, value)
    }

    fn on_tag_content(&mut self, content: &str) -> Result<()> {
        if self.skipping() {
            return Ok(());
        }
        self.downstream.on_tag_content(content)
    }

    fn on_tag_comment(&mut self, content: &str) -> Result<()> {
        if self.skipping() {
            return Ok(());
        }
        self.downstream.on_tag_comment(content)
    }

    fn on_tag_raw(&mut self, content: &str) -> Result<()> {
        if self.skipping() {
            return Ok(());
        }
        self.downstream.on_tag_raw(content)
    }

    fn on_tag_end(&mut self, tag: &Tag) -> Result<Option<C::Handle>> {
        match self.open.pop() {
            Some(open) if tag.is(&open) => {}
            expected => {
                return Err(BuildError::MismatchedClose {
                    expected,
                    found: tag.name().to_string(),
                });
            }
        }
        if self.skipping() {
            self.skip_depth -= 1;
            return Ok(None);
        }
        match self.decisions.pop() {
            Some(FilterDecision::Drop) => Ok(None),
            _ => self.downstream.on_tag_end(tag).map(Some),
        }
    }

    fn finalize(&mut self) -> Result<C::Output> {
        if let Some(open) = self.open.last() {
            return Err(BuildError::MismatchedClose {
                expected: Some(open.clone()),
                found: String::from("end of build"),
            });
        }
        self.downstream.finalize()
    }
}
