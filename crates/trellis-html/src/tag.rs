//! The tag descriptor carried by every protocol event.

use trellis_dom::{Attributes, Namespace};

use crate::vocabulary;

/// A builder-level handle to an element under construction.
///
/// The name and namespace are final when the start event is emitted. The
/// attributes hold whatever was known at that point plus every change issued
/// since; consumers that need the live value read it from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    namespace: Option<Namespace>,
    attributes: Attributes,
}

impl Tag {
    /// A tag named `name`.
    ///
    /// `svg` and `math` declare their foreign namespace; every other tag
    /// inherits the namespace of whatever it is opened in.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let namespace = Namespace::for_foreign_root(&name);
        Self {
            name,
            namespace,
            attributes: Attributes::new(),
        }
    }

    /// Declare the namespace explicitly instead of inheriting it.
    #[must_use]
    pub fn in_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Add an attribute that is present from the start event on.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        let _ = self.attributes.set(name, value);
        self
    }

    /// Tag name as given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Explicitly declared namespace; `None` means inherited.
    #[must_use]
    pub const fn namespace(&self) -> Option<Namespace> {
        self.namespace
    }

    /// Namespace after inheritance from `parent`.
    #[must_use]
    pub fn resolve_namespace(&self, parent: Namespace) -> Namespace {
        self.namespace.unwrap_or(parent)
    }

    /// Attributes known so far.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether this tag is void once opened in `namespace`.
    #[must_use]
    pub fn is_void_in(&self, namespace: Namespace) -> bool {
        namespace == Namespace::Html && vocabulary::is_void(&self.name)
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        let _ = match value {
            Some(value) => self.attributes.set(name, value),
            None => self.attributes.remove(name),
        };
    }
}
