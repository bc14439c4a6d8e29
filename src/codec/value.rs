//! Tagged primitive values carried through the codec.

use std::fmt;

/// The type tag a caller expects when reading a value back.
///
/// Stored bytes never carry their own tag, so the tag used on read must be
/// the one used on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTag {
    Double,
    Float,
    Int32,
    Int64,
    Bool,
    String,
}

impl ValueTag {
    /// All tags that can be encoded.
    pub const ALL: [ValueTag; 6] = [
        ValueTag::Double,
        ValueTag::Float,
        ValueTag::Int32,
        ValueTag::Int64,
        ValueTag::Bool,
        ValueTag::String,
    ];

    /// Lowercase name used in logs, errors, and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            ValueTag::Double => "double",
            ValueTag::Float => "float",
            ValueTag::Int32 => "int32",
            ValueTag::Int64 => "int64",
            ValueTag::Bool => "bool",
            ValueTag::String => "string",
        }
    }

    /// Look a tag up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A primitive value together with its type tag.
///
/// Tag and payload are one enum variant, so they can only be set together.
/// `None` is what [`Default`] produces; it marks an uninitialized value and
/// is rejected by [`encode`](super::encode).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TaggedValue {
    #[default]
    None,
    Double(f64),
    Float(f32),
    Int32(i32),
    Int64(i64),
    Bool(bool),
    String(String),
}

impl TaggedValue {
    /// The tag of this value, or `None` for the uninitialized sentinel.
    pub fn tag(&self) -> Option<ValueTag> {
        match self {
            TaggedValue::None => None,
            TaggedValue::Double(_) => Some(ValueTag::Double),
            TaggedValue::Float(_) => Some(ValueTag::Float),
            TaggedValue::Int32(_) => Some(ValueTag::Int32),
            TaggedValue::Int64(_) => Some(ValueTag::Int64),
            TaggedValue::Bool(_) => Some(ValueTag::Bool),
            TaggedValue::String(_) => Some(ValueTag::String),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TaggedValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            TaggedValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            TaggedValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TaggedValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TaggedValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TaggedValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Consume the value, returning the owned string payload if present.
    pub fn into_string(self) -> Option<String> {
        match self {
            TaggedValue::String(v) => Some(v),
            _ => None,
        }
    }
}

/// Shows the payload only; `None` renders as an empty string.
impl fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaggedValue::None => Ok(()),
            TaggedValue::Double(v) => write!(f, "{v}"),
            TaggedValue::Float(v) => write!(f, "{v}"),
            TaggedValue::Int32(v) => write!(f, "{v}"),
            TaggedValue::Int64(v) => write!(f, "{v}"),
            TaggedValue::Bool(v) => write!(f, "{v}"),
            TaggedValue::String(v) => f.write_str(v),
        }
    }
}

impl From<f64> for TaggedValue {
    fn from(value: f64) -> Self {
        TaggedValue::Double(value)
    }
}

impl From<f32> for TaggedValue {
    fn from(value: f32) -> Self {
        TaggedValue::Float(value)
    }
}

impl From<i32> for TaggedValue {
    fn from(value: i32) -> Self {
        TaggedValue::Int32(value)
    }
}

impl From<i64> for TaggedValue {
    fn from(value: i64) -> Self {
        TaggedValue::Int64(value)
    }
}

impl From<bool> for TaggedValue {
    fn from(value: bool) -> Self {
        TaggedValue::Bool(value)
    }
}

impl From<String> for TaggedValue {
    fn from(value: String) -> Self {
        TaggedValue::String(value)
    }
}

impl From<&str> for TaggedValue {
    fn from(value: &str) -> Self {
        TaggedValue::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_untagged() {
        let value = TaggedValue::default();
        assert_eq!(value, TaggedValue::None);
        assert_eq!(value.tag(), None);
    }

    #[test]
    fn test_from_sets_matching_tag() {
        assert_eq!(TaggedValue::from(1.5f64).tag(), Some(ValueTag::Double));
        assert_eq!(TaggedValue::from(1.5f32).tag(), Some(ValueTag::Float));
        assert_eq!(TaggedValue::from(7i32).tag(), Some(ValueTag::Int32));
        assert_eq!(TaggedValue::from(7i64).tag(), Some(ValueTag::Int64));
        assert_eq!(TaggedValue::from(true).tag(), Some(ValueTag::Bool));
        assert_eq!(TaggedValue::from("x").tag(), Some(ValueTag::String));
    }

    #[test]
    fn test_accessors_only_match_own_variant() {
        let value = TaggedValue::Int32(42);
        assert_eq!(value.as_i32(), Some(42));
        assert_eq!(value.as_i64(), None);
        assert_eq!(value.as_str(), None);
    }

    #[test]
    fn test_tag_names() {
        for tag in ValueTag::ALL {
            assert_eq!(ValueTag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(ValueTag::from_name("uint8"), None);
        assert_eq!(ValueTag::Int64.to_string(), "int64");
    }

    #[test]
    fn test_display_shows_payload() {
        assert_eq!(TaggedValue::Bool(true).to_string(), "true");
        assert_eq!(TaggedValue::Double(2.5).to_string(), "2.5");
        assert_eq!(TaggedValue::from("abc").to_string(), "abc");
        assert_eq!(TaggedValue::None.to_string(), "");
    }
}
