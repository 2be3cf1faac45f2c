//! Typed HTML construction for Trellis.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tag consumer protocol** ([`consumer::TagConsumer`])
//!   - Start, attribute change, text, comment, raw and end events, then `finalize`
//!   - Filtering, tracing and direct-to-markup consumers
//!   - DOM realization into a [`trellis_dom::Document`] at a document, append,
//!     prepend or detached anchor
//!
//! - **Builder DSL** ([`builder::Builder`])
//!   - Nested closures per tag, typed attribute values, entities
//!
//! - **Serializer** ([§ 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments))
//!   - Compact and pretty output, void elements, boolean attributes, `xmlns` on foreign roots
//!
//! - **Lenient parser** ([`parser`]) that replays markup as protocol events
//!
//! # Not Yet Implemented
//!
//! - Full WHATWG tree construction (implied tags, adoption agency)
//! - MathML-specific vocabulary

pub mod builder;
pub mod consumer;
pub mod entities;
mod error;
pub mod parser;
mod realize;
pub mod serializer;
mod tag;
pub mod vocabulary;

pub use error::{BuildError, Result};
pub use parser::{parse_document, parse_into};
pub use realize::{DomBuilder, append, build_document, create, prepend};
pub use serializer::{SerializeOptions, serialize, serialize_node};
pub use tag::Tag;
