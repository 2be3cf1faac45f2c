//! Event tracing as a consumer decorator.

use std::io;

use super::TagConsumer;
use crate::error::Result;
use crate::tag::Tag;

/// Forwards every event unchanged and writes one line per event to a sink,
/// indented by nesting depth.
///
/// ```text
/// start <div>
///   attr div.id = "main"
///   text "hello"
/// end </div>
/// finalize
/// ```
pub struct TraceConsumer<C, W> {
    downstream: C,
    sink: W,
    depth: usize,
}

impl<C: TagConsumer, W: io::Write> TraceConsumer<C, W> {
    /// Trace the events reaching `downstream` into `sink`.
    pub const fn new(downstream: C, sink: W) -> Self {
        Self {
            downstream,
            sink,
            depth: 0,
        }
    }

    /// Unwrap, returning the wrapped consumer and the sink.
    pub fn into_parts(self) -> (C, W) {
        (self.downstream, self.sink)
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.sink, "{:width$}{text}", "", width = self.depth * 2)?;
        Ok(())
    }
}

impl<C: TagConsumer, W: io::Write> TagConsumer for TraceConsumer<C, W> {
    type Handle = C::Handle;
    type Output = C::Output;

    fn on_tag_start(&mut self, tag: &Tag) -> Result<()> {
        self.line(&format!("start <{}>", tag.name()))?;
        self.depth += 1;
        self.downstream.on_tag_start(tag)
    }

    fn on_tag_attribute_change(
        &mut self,
        tag: &Tag,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        let line = match value {
            Some(value) => format!("attr {}.{name} = {value:?}", tag.name()),
            None => format!("attr {}.{name} removed", tag.name()),
        };
        self.line(&line)?;
        self.downstream.on_tag_attribute_change(tag, name, value)
    }

    fn on_tag_content(&mut self, content: &str) -> Result<()> {
        self.line(&format!("text {content:?}"))?;
        self.downstream.on_tag_content(content)
    }

    fn on_tag_comment(&mut self, content: &str) -> Result<()> {
        self.line(&format!("comment {content:?}"))?;
        self.downstream.on_tag_comment(content)
    }

    fn on_tag_raw(&mut self, content: &str) -> Result<()> {
        self.line(&format!("raw {content:?}"))?;
        self.downstream.on_tag_raw(content)
    }

    fn on_tag_end(&mut self, tag: &Tag) -> Result<C::Handle> {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("end </{}>", tag.name()))?;
        self.downstream.on_tag_end(tag)
    }

    fn finalize(&mut self) -> Result<C::Output> {
        self.line("finalize")?;
        self.sink.flush()?;
        self.downstream.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::HtmlStreamConsumer;

    #[test]
    fn test_trace_lines() {
        let mut trace = TraceConsumer::new(HtmlStreamConsumer::default(), Vec::new());
        let div = Tag::new("div");
        trace.on_tag_start(&div).unwrap();
        trace
            .on_tag_attribute_change(&div, "id", Some("main"))
            .unwrap();
        trace.on_tag_content("hello").unwrap();
        trace.on_tag_end(&div).unwrap();
        let html = trace.finalize().unwrap();
        let (_, sink) = trace.into_parts();

        assert_eq!(html, "<!DOCTYPE html>\n<div id=\"main\">hello</div>");
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "start <div>\n  attr div.id = \"main\"\n  text \"hello\"\nend </div>\nfinalize\n"
        );
    }
}
