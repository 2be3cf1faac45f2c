//! Element and attribute tables the builder, consumers and serializer share.
//!
//! These are immutable statics; nothing writes to them after compilation.

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr". `param` and `keygen` are obsolete but still void.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// [§ 13.1.2.1 Raw text elements](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements)
///
/// Their text children are serialized without escaping.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// [§ 2.3.2 Boolean attributes](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#boolean-attributes)
///
/// Attributes whose presence is the value. Serialized name-only when empty.
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "inert",
    "ismap",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "readonly",
    "required",
    "reversed",
    "selected",
];

fn contains_ignore_case(table: &[&str], name: &str) -> bool {
    table.iter().any(|entry| entry.eq_ignore_ascii_case(name))
}

/// Whether `name` is an HTML void element.
#[must_use]
pub fn is_void(name: &str) -> bool {
    contains_ignore_case(VOID_ELEMENTS, name)
}

/// Whether `name` is a raw text element.
#[must_use]
pub fn is_raw_text(name: &str) -> bool {
    contains_ignore_case(RAW_TEXT_ELEMENTS, name)
}

/// Whether `name` is a boolean attribute.
#[must_use]
pub fn is_boolean_attribute(name: &str) -> bool {
    contains_ignore_case(BOOLEAN_ATTRIBUTES, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_ignore_case() {
        assert!(is_void("BR"));
        assert!(!is_void("div"));
        assert!(is_raw_text("Script"));
        assert!(is_boolean_attribute("disabled"));
        assert!(!is_boolean_attribute("alt"));
    }
}
