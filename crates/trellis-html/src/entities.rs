//! Named character reference table.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! The full table defines 2,231 entities; this one carries the common subset.
//! It is built once on first use and never written to afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Entity names (no `&`, no `;`) mapped to the character they stand for.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, char>> = LazyLock::new(|| {
    HashMap::from([
        // Markup-significant characters
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("nbsp", '\u{00A0}'),
        // Punctuation and symbols
        ("copy", '\u{00A9}'),   // ©
        ("reg", '\u{00AE}'),    // ®
        ("trade", '\u{2122}'),  // ™
        ("mdash", '\u{2014}'),  // —
        ("ndash", '\u{2013}'),  // –
        ("hellip", '\u{2026}'), // …
        ("bull", '\u{2022}'),   // •
        ("middot", '\u{00B7}'), // ·
        ("sect", '\u{00A7}'),   // §
        ("para", '\u{00B6}'),   // ¶
        ("lsquo", '\u{2018}'),
        ("rsquo", '\u{2019}'),
        ("ldquo", '\u{201C}'),
        ("rdquo", '\u{201D}'),
        ("laquo", '\u{00AB}'), // «
        ("raquo", '\u{00BB}'), // »
        ("shy", '\u{00AD}'),
        ("zwj", '\u{200D}'),
        ("zwnj", '\u{200C}'),
        // Currency
        ("cent", '\u{00A2}'),
        ("pound", '\u{00A3}'),
        ("euro", '\u{20AC}'),
        ("yen", '\u{00A5}'),
        // Math
        ("times", '\u{00D7}'),
        ("divide", '\u{00F7}'),
        ("plusmn", '\u{00B1}'),
        ("minus", '\u{2212}'),
        ("ne", '\u{2260}'),
        ("le", '\u{2264}'),
        ("ge", '\u{2265}'),
        ("deg", '\u{00B0}'),
        ("infin", '\u{221E}'),
        ("frac12", '\u{00BD}'),
        ("frac14", '\u{00BC}'),
        ("frac34", '\u{00BE}'),
        // Arrows
        ("larr", '\u{2190}'),
        ("rarr", '\u{2192}'),
        ("uarr", '\u{2191}'),
        ("darr", '\u{2193}'),
        ("harr", '\u{2194}'),
        // Greek
        ("alpha", '\u{03B1}'),
        ("beta", '\u{03B2}'),
        ("gamma", '\u{03B3}'),
        ("delta", '\u{03B4}'),
        ("lambda", '\u{03BB}'),
        ("mu", '\u{03BC}'),
        ("pi", '\u{03C0}'),
        ("sigma", '\u{03C3}'),
        ("omega", '\u{03C9}'),
        // Accented letters
        ("Agrave", '\u{00C0}'),
        ("Aacute", '\u{00C1}'),
        ("Auml", '\u{00C4}'),
        ("agrave", '\u{00E0}'),
        ("aacute", '\u{00E1}'),
        ("auml", '\u{00E4}'),
        ("Eacute", '\u{00C9}'),
        ("eacute", '\u{00E9}'),
        ("egrave", '\u{00E8}'),
        ("iacute", '\u{00ED}'),
        ("oacute", '\u{00F3}'),
        ("ouml", '\u{00F6}'),
        ("Ouml", '\u{00D6}'),
        ("uacute", '\u{00FA}'),
        ("uuml", '\u{00FC}'),
        ("Uuml", '\u{00DC}'),
        ("ntilde", '\u{00F1}'),
        ("ccedil", '\u{00E7}'),
        ("szlig", '\u{00DF}'),
    ])
});

/// Look up a named character reference.
///
/// `name` excludes the leading `&`; a trailing `;` is accepted and ignored.
///
/// # Example
/// ```
/// use trellis_html::entities::lookup;
///
/// assert_eq!(lookup("amp"), Some('&'));
/// assert_eq!(lookup("nbsp;"), Some('\u{a0}'));
/// assert_eq!(lookup("xyz"), None);
/// ```
#[must_use]
pub fn lookup(name: &str) -> Option<char> {
    let name = name.strip_suffix(';').unwrap_or(name);
    NAMED_ENTITIES.get(name).copied()
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Resolves the body of a numeric reference (`#65`, `#x41`). NUL, surrogates
/// and out-of-range code points map to U+FFFD as the parser does.
#[must_use]
pub fn lookup_numeric(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    Some(match code {
        0 => '\u{FFFD}',
        _ => char::from_u32(code).unwrap_or('\u{FFFD}'),
    })
}
