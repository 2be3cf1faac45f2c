//! Insertion-ordered attribute list.

use serde::{Serialize, Serializer};

/// [§ 4.9.2 Interface NamedNodeMap](https://dom.spec.whatwg.org/#interface-namednodemap)
///
/// An element's attribute list. Entries keep the order in which their names
/// were first set; setting an existing name replaces the value in place.
/// An empty value is how a boolean (name-only) attribute is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// An empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Value of the attribute named `name`, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether an attribute named `name` is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to `value`, returning the previous value.
    pub fn set(&mut self, name: &str, value: &str) -> Option<String> {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            return Some(std::mem::replace(existing, value.to_string()));
        }
        self.entries.push((name.to_string(), value.to_string()));
        None
    }

    /// Remove `name`, returning its value if it was set.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let position = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(position).1)
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + Clone {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            let _ = attrs.set(name, value);
        }
        attrs
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_first_insertion_position() {
        let mut attrs = Attributes::new();
        assert_eq!(attrs.set("id", "a"), None);
        assert_eq!(attrs.set("class", "x"), None);
        assert_eq!(attrs.set("id", "b"), Some("a".to_string()));

        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("id", "b"), ("class", "x")]);
    }

    #[test]
    fn test_remove() {
        let mut attrs: Attributes = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(attrs.remove("a"), Some("1".to_string()));
        assert_eq!(attrs.remove("a"), None);
        assert_eq!(attrs.len(), 1);
        assert!(attrs.contains("b"));
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let attrs: Attributes = [("z", "1"), ("a", "2")].into_iter().collect();
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }
}
