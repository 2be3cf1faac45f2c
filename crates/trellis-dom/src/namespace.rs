//! Element namespaces.
//!
//! [§ 2.1.3 Namespaces](https://infra.spec.whatwg.org/#namespaces)

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// The namespace an element is created in.
///
/// Everything defaults to HTML. `svg` and `math` are foreign-markup roots:
/// they open a subtree whose elements live in the root's namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// "The HTML namespace is `http://www.w3.org/1999/xhtml`."
    #[default]
    Html,
    /// "The SVG namespace is `http://www.w3.org/2000/svg`."
    Svg,
    /// "The MathML namespace is `http://www.w3.org/1998/Math/MathML`."
    #[strum(serialize = "mathml")]
    MathMl,
}

impl Namespace {
    /// The namespace URI.
    #[must_use]
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Html => "http://www.w3.org/1999/xhtml",
            Self::Svg => "http://www.w3.org/2000/svg",
            Self::MathMl => "http://www.w3.org/1998/Math/MathML",
        }
    }

    /// Namespace for a URI, if it is one of ours.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        [Self::Html, Self::Svg, Self::MathMl]
            .into_iter()
            .find(|ns| ns.uri() == uri)
    }

    /// The namespace a foreign-markup root tag opens, if `tag_name` is one.
    #[must_use]
    pub fn for_foreign_root(tag_name: &str) -> Option<Self> {
        if tag_name.eq_ignore_ascii_case("svg") {
            Some(Self::Svg)
        } else if tag_name.eq_ignore_ascii_case("math") {
            Some(Self::MathMl)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_roots() {
        assert_eq!(Namespace::for_foreign_root("svg"), Some(Namespace::Svg));
        assert_eq!(Namespace::for_foreign_root("MATH"), Some(Namespace::MathMl));
        assert_eq!(Namespace::for_foreign_root("div"), None);
    }

    #[test]
    fn test_uri_round_trip() {
        assert_eq!(
            Namespace::from_uri("http://www.w3.org/2000/svg"),
            Some(Namespace::Svg)
        );
        assert_eq!(Namespace::from_uri("urn:other"), None);
    }

    #[test]
    fn test_parse_from_name() {
        assert_eq!("mathml".parse::<Namespace>(), Ok(Namespace::MathMl));
        assert_eq!(Namespace::Svg.to_string(), "svg");
    }
}
