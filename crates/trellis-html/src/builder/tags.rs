//! Named shortcuts for common tags.
//!
//! The vocabulary is deliberately small; [`Builder::element`] and
//! [`Builder::tag`] open anything else.

use super::{Builder, ScriptType};
use crate::consumer::TagConsumer;
use crate::error::Result;
use crate::tag::Tag;

macro_rules! tag_methods {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Open a `<", stringify!($name), ">` element around `block`.")]
            ///
            /// # Errors
            ///
            /// As for [`Builder::tag`].
            pub fn $name<F>(&mut self, block: F) -> Result<C::Handle>
            where
                F: FnOnce(&mut Self) -> Result<()>,
            {
                self.tag(Tag::new(stringify!($name)), block)
            }
        )*
    };
}

impl<C: TagConsumer> Builder<'_, C> {
    // Document structure
    tag_methods!(html, head, body, title, style);
    // Sectioning and grouping
    tag_methods!(div, span, p, section, article, header, footer, nav, main, pre, code);
    tag_methods!(h1, h2, h3, h4, h5, h6);
    tag_methods!(ul, ol, li, table, tr, td, th);
    tag_methods!(a, em, strong, form, button, label);
    // Void elements: the block may set attributes, not add children
    tag_methods!(br, hr, img, input, meta, link);
    // Foreign-markup roots
    tag_methods!(svg, math);

    /// Open a `<script>` of the given type around `block`.
    ///
    /// # Errors
    ///
    /// As for [`Builder::tag`].
    pub fn script<F>(&mut self, script_type: ScriptType, block: F) -> Result<C::Handle>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let tag = Tag::new("script").with_attr("type", &script_type.to_string());
        self.tag(tag, block)
    }

    /// Open and close an element with no attributes and no content.
    ///
    /// # Errors
    ///
    /// As for [`Builder::empty_tag`].
    pub fn void(&mut self, name: &str) -> Result<C::Handle> {
        self.empty_tag(Tag::new(name))
    }
}
