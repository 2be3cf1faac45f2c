//! Typed attribute values.
//!
//! Conversion to strings happens here, in the builder layer; the protocol
//! only ever carries string values.

use strum_macros::{Display, EnumString};

/// A value that can be assigned to an attribute.
pub trait AttributeValue {
    /// The string to store, or `None` to remove the attribute.
    fn to_attribute_value(&self) -> Option<String>;
}

impl AttributeValue for &str {
    fn to_attribute_value(&self) -> Option<String> {
        Some((*self).to_string())
    }
}

impl AttributeValue for String {
    fn to_attribute_value(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl AttributeValue for &String {
    fn to_attribute_value(&self) -> Option<String> {
        Some((*self).clone())
    }
}

/// `true` sets a name-only boolean attribute, `false` removes it.
impl AttributeValue for bool {
    fn to_attribute_value(&self) -> Option<String> {
        self.then(String::new)
    }
}

impl<T: AttributeValue> AttributeValue for Option<T> {
    fn to_attribute_value(&self) -> Option<String> {
        self.as_ref().and_then(AttributeValue::to_attribute_value)
    }
}

macro_rules! numeric_attribute_values {
    ($($ty:ty),*) => {
        $(
            impl AttributeValue for $ty {
                fn to_attribute_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

numeric_attribute_values!(i32, i64, u8, u16, u32, u64, usize);

/// [§ 4.12.1 The script element](https://html.spec.whatwg.org/multipage/scripting.html#attr-script-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ScriptType {
    /// Classic script.
    #[strum(serialize = "text/javascript")]
    TextJavaScript,
    /// Module script.
    #[strum(serialize = "module")]
    Module,
    /// Import map.
    #[strum(serialize = "importmap")]
    ImportMap,
    /// Inline JSON data block.
    #[strum(serialize = "application/json")]
    ApplicationJson,
}

/// [§ 4.10.5 The input element](https://html.spec.whatwg.org/multipage/input.html#attr-input-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum InputType {
    /// `text`
    Text,
    /// `password`
    Password,
    /// `checkbox`
    Checkbox,
    /// `radio`
    Radio,
    /// `email`
    Email,
    /// `number`
    Number,
    /// `hidden`
    Hidden,
    /// `submit`
    Submit,
}

impl AttributeValue for ScriptType {
    fn to_attribute_value(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl AttributeValue for InputType {
    fn to_attribute_value(&self) -> Option<String> {
        Some(self.to_string())
    }
}
