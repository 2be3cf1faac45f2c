//! A lenient markup reader that replays documents as protocol events.
//!
//! This is not the WHATWG tree construction algorithm. It reads the markup
//! this crate writes (and well-formed hand-written HTML) back into events:
//!
//! - [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state):
//!   text up to the next `<`, with named and numeric character references decoded
//! - [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state):
//!   start tags, end tags, comments, and a skipped `<!DOCTYPE ...>`
//! - [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state):
//!   quoted, unquoted and bare attributes
//! - [§ 13.2.5.2 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state):
//!   `script` and `style` bodies up to their end tag
//!
//! There are no implied tags and no adoption agency. An end tag closes the
//! nearest open tag of that name (closing anything above it), a stray end tag
//! is ignored, and unclosed tags are closed at end of input, each with a warning.

use trellis_common::warning::warn_once;
use trellis_dom::{Document, Namespace};

use crate::consumer::{Anchor, DomConsumer, TagConsumer};
use crate::entities;
use crate::error::{BuildError, Result};
use crate::tag::Tag;
use crate::vocabulary;

/// Parse a whole document into a new [`Document`].
///
/// # Errors
///
/// [`BuildError::Parse`] for unterminated tags, comments or attribute values.
pub fn parse_document(input: &str) -> Result<Document> {
    let mut doc = Document::new();
    let mut consumer = DomConsumer::new(&mut doc, Anchor::Document)?;
    let _roots = parse_into(input, &mut consumer)?;
    Ok(doc)
}

/// Replay `input` as events into `consumer`, then finalize it.
///
/// # Errors
///
/// [`BuildError::Parse`] for malformed markup, or whatever the consumer reports.
pub fn parse_into<C: TagConsumer>(input: &str, consumer: &mut C) -> Result<C::Output> {
    let mut parser = MarkupParser {
        input,
        pos: 0,
        consumer,
        open: Vec::new(),
    };
    parser.run()?;
    parser.consumer.finalize()
}

struct MarkupParser<'a, C> {
    input: &'a str,
    pos: usize,
    consumer: &'a mut C,
    open: Vec<(Tag, Namespace)>,
}

impl<'a, C: TagConsumer> MarkupParser<'a, C> {
    fn run(&mut self) -> Result<()> {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            if rest.starts_with("<!--") {
                self.comment()?;
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_declaration()?;
            } else if rest.starts_with("</") {
                self.end_tag()?;
            } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                self.start_tag()?;
            } else {
                self.text()?;
            }
        }
        while let Some((tag, _)) = self.open.pop() {
            warn_once(
                "Parser",
                &format!("unclosed <{}> closed at end of input", tag.name()),
            );
            let _ = self.consumer.on_tag_end(&tag)?;
        }
        Ok(())
    }

    fn error(&self, message: &str) -> BuildError {
        BuildError::Parse {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn find_from(&self, offset: usize, needle: &str) -> Option<usize> {
        self.input[offset..].find(needle).map(|i| offset + i)
    }

    fn current_namespace(&self) -> Namespace {
        self.open.last().map_or(Namespace::Html, |(_, ns)| *ns)
    }

    fn comment(&mut self) -> Result<()> {
        let body_start = self.pos + "<!--".len();
        let end = self
            .find_from(body_start, "-->")
            .ok_or_else(|| self.error("unterminated comment"))?;
        self.consumer.on_tag_comment(&self.input[body_start..end])?;
        self.pos = end + "-->".len();
        Ok(())
    }

    fn skip_declaration(&mut self) -> Result<()> {
        let end = self
            .find_from(self.pos, ">")
            .ok_or_else(|| self.error("unterminated declaration"))?;
        self.pos = end + 1;
        Ok(())
    }

    fn text(&mut self) -> Result<()> {
        let first = self.input[self.pos..].chars().next().map_or(1, char::len_utf8);
        let end = self
            .find_from(self.pos + first, "<")
            .unwrap_or(self.input.len());
        let raw = &self.input[self.pos..end];
        self.pos = end;
        if self.open.is_empty() && raw.trim().is_empty() {
            return Ok(());
        }
        self.consumer.on_tag_content(&decode_entities(raw))
    }

    fn end_tag(&mut self) -> Result<()> {
        let name_start = self.pos + "</".len();
        let end = self
            .find_from(name_start, ">")
            .ok_or_else(|| self.error("unterminated end tag"))?;
        let name = self.input[name_start..end].trim().to_string();
        self.pos = end + 1;

        let Some(index) = self.open.iter().rposition(|(tag, _)| tag.is(&name)) else {
            warn_once("Parser", &format!("stray </{name}> ignored"));
            return Ok(());
        };
        while self.open.len() > index {
            let Some((tag, _)) = self.open.pop() else {
                break;
            };
            if self.open.len() > index {
                warn_once(
                    "Parser",
                    &format!("<{}> implicitly closed by </{name}>", tag.name()),
                );
            }
            let _ = self.consumer.on_tag_end(&tag)?;
        }
        Ok(())
    }

    fn start_tag(&mut self) -> Result<()> {
        let tag_start = self.pos;
        self.pos += 1;
        let name = self.take_while(|c| !c.is_ascii_whitespace() && c != '/' && c != '>');
        let mut tag = Tag::new(name);
        let mut self_closing = false;

        loop {
            let _ = self.take_while(|c| c.is_ascii_whitespace());
            let rest = &self.input[self.pos..];
            if rest.is_empty() {
                self.pos = tag_start;
                return Err(self.error("unterminated start tag"));
            }
            if rest.starts_with("/>") {
                self_closing = true;
                self.pos += 2;
                break;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break;
            }
            let attr_name = self
                .take_while(|c| !c.is_ascii_whitespace() && c != '=' && c != '>' && c != '/')
                .to_string();
            if attr_name.is_empty() {
                self.pos += 1;
                continue;
            }
            let _ = self.take_while(|c| c.is_ascii_whitespace());
            let value = if self.input[self.pos..].starts_with('=') {
                self.pos += 1;
                let _ = self.take_while(|c| c.is_ascii_whitespace());
                self.attribute_value()?
            } else {
                String::new()
            };
            // A known namespace declaration becomes the tag's namespace; the
            // serializer writes it back wherever the namespace changes.
            if attr_name.eq_ignore_ascii_case("xmlns")
                && let Some(namespace) = Namespace::from_uri(&value)
            {
                tag = tag.in_namespace(namespace);
                continue;
            }
            tag = tag.with_attr(&attr_name, &value);
        }

        let namespace = tag.resolve_namespace(self.current_namespace());
        self.consumer.on_tag_start(&tag)?;
        if tag.is_void_in(namespace) || (self_closing && namespace != Namespace::Html) {
            let _ = self.consumer.on_tag_end(&tag)?;
            return Ok(());
        }
        if namespace == Namespace::Html && vocabulary::is_raw_text(tag.name()) {
            self.raw_text(tag.name())?;
        }
        self.open.push((tag, namespace));
        Ok(())
    }

    fn attribute_value(&mut self) -> Result<String> {
        let rest = &self.input[self.pos..];
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let start = self.pos + 1;
                let end = self
                    .find_from(start, quote.encode_utf8(&mut [0; 4]))
                    .ok_or_else(|| self.error("unterminated attribute value"))?;
                self.pos = end + 1;
                Ok(decode_entities(&self.input[start..end]))
            }
            _ => {
                let value = self.take_while(|c| !c.is_ascii_whitespace() && c != '>');
                Ok(decode_entities(value))
            }
        }
    }

    /// Emit everything up to `</name` as one text event.
    fn raw_text(&mut self, name: &str) -> Result<()> {
        let needle = format!("</{}", name.to_ascii_lowercase());
        let end = self.input[self.pos..]
            .to_ascii_lowercase()
            .find(&needle)
            .map_or(self.input.len(), |i| self.pos + i);
        let body = &self.input[self.pos..end];
        self.pos = end;
        if body.is_empty() {
            return Ok(());
        }
        self.consumer.on_tag_content(body)
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        let len = input[start..]
            .find(|c: char| !keep(c))
            .unwrap_or(input.len() - start);
        self.pos = start + len;
        &input[start..self.pos]
    }
}

/// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
///
/// Replace `&name;`, `&#N;` and `&#xN;` with their characters. Unknown or
/// unterminated references are kept literally.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let resolved = rest
            .find(';')
            .filter(|&semi| semi > 1 && semi <= 32)
            .and_then(|semi| {
                let body = &rest[1..semi];
                let c = if body.starts_with('#') {
                    entities::lookup_numeric(body)
                } else {
                    entities::lookup(body)
                };
                c.map(|c| (c, semi + 1))
            });
        match resolved {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
