//! Conversion between tagged values and the byte strings stored in the engine.
//!
//! The stored form is plain text and does not describe its own type:
//!
//! | Tag | Stored bytes |
//! |---|---|
//! | `Double`, `Float` | shortest decimal text that parses back to the same value |
//! | `Int32`, `Int64` | signed decimal text |
//! | `Bool` | `"1"` or `"0"` |
//! | `String` | the UTF-8 bytes, unmodified |
//!
//! Reading requires the caller to name the tag that was used for writing.
//! Reading a `String` that happens to look like a number with a numeric tag
//! succeeds with that number; reading non-numeric text with a numeric tag is a
//! [`CodecError::Decode`].
//!
//! # Module Organization
//!
//! - [`value`]: [`TaggedValue`] and [`ValueTag`]
//! - [`error`]: [`CodecError`]

mod error;
mod value;

pub use error::CodecError;
pub use value::{TaggedValue, ValueTag};

use std::str::FromStr;

const TRUE_BYTES: &[u8] = b"1";
const FALSE_BYTES: &[u8] = b"0";

/// Encode a tagged value into its stored byte form.
///
/// # Errors
///
/// Returns [`CodecError::Untagged`] for [`TaggedValue::None`].
pub fn encode(value: &TaggedValue) -> Result<Vec<u8>, CodecError> {
    let bytes = match value {
        TaggedValue::None => return Err(CodecError::Untagged),
        TaggedValue::Double(v) => v.to_string().into_bytes(),
        TaggedValue::Float(v) => v.to_string().into_bytes(),
        TaggedValue::Int32(v) => v.to_string().into_bytes(),
        TaggedValue::Int64(v) => v.to_string().into_bytes(),
        TaggedValue::Bool(true) => TRUE_BYTES.to_vec(),
        TaggedValue::Bool(false) => FALSE_BYTES.to_vec(),
        TaggedValue::String(v) => v.as_bytes().to_vec(),
    };
    Ok(bytes)
}

/// Decode stored bytes as a value of the expected tag.
///
/// # Example
///
/// ```
/// use kvbridge::codec::{decode, TaggedValue, ValueTag};
///
/// assert_eq!(decode(b"42", ValueTag::Int32)?, TaggedValue::Int32(42));
/// assert!(decode(b"forty-two", ValueTag::Int32).is_err());
/// # Ok::<(), kvbridge::codec::CodecError>(())
/// ```
pub fn decode(bytes: &[u8], tag: ValueTag) -> Result<TaggedValue, CodecError> {
    let text = as_text(bytes, tag.name())?;
    let value = match tag {
        ValueTag::Double => TaggedValue::Double(parse(text, tag.name())?),
        ValueTag::Float => TaggedValue::Float(parse(text, tag.name())?),
        ValueTag::Int32 => TaggedValue::Int32(parse(text, tag.name())?),
        ValueTag::Int64 => TaggedValue::Int64(parse(text, tag.name())?),
        ValueTag::Bool => match text.as_bytes() {
            TRUE_BYTES => TaggedValue::Bool(true),
            FALSE_BYTES => TaggedValue::Bool(false),
            _ => return Err(CodecError::decode(tag.name(), text)),
        },
        ValueTag::String => TaggedValue::String(text.to_string()),
    };
    Ok(value)
}

/// Encode an unsigned 64-bit integer as decimal text.
///
/// Values up to `i64::MAX` produce the same bytes as [`TaggedValue::Int64`].
pub fn encode_unsigned(value: u64) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// Decode decimal text as an unsigned 64-bit integer.
pub fn decode_unsigned(bytes: &[u8]) -> Result<u64, CodecError> {
    let text = as_text(bytes, "uint64")?;
    parse(text, "uint64")
}

fn as_text<'a>(bytes: &'a [u8], tag: &'static str) -> Result<&'a str, CodecError> {
    std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 { tag })
}

fn parse<T: FromStr>(text: &str, tag: &'static str) -> Result<T, CodecError> {
    text.parse().map_err(|_| CodecError::decode(tag, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: TaggedValue) -> TaggedValue {
        let tag = value.tag().unwrap_or(ValueTag::String);
        let bytes = encode(&value).unwrap_or_default();
        decode(&bytes, tag).unwrap_or_default()
    }

    #[test]
    fn test_encoded_forms() {
        assert_eq!(encode(&TaggedValue::Int32(-42)).ok(), Some(b"-42".to_vec()));
        assert_eq!(encode(&TaggedValue::Int64(i64::MAX)).ok(), Some(b"9223372036854775807".to_vec()));
        assert_eq!(encode(&TaggedValue::Bool(true)).ok(), Some(b"1".to_vec()));
        assert_eq!(encode(&TaggedValue::Bool(false)).ok(), Some(b"0".to_vec()));
        assert_eq!(encode(&TaggedValue::Double(1.5)).ok(), Some(b"1.5".to_vec()));
        assert_eq!(encode(&TaggedValue::Float(0.25)).ok(), Some(b"0.25".to_vec()));
        assert_eq!(encode(&TaggedValue::from("héllo")).ok(), Some("héllo".as_bytes().to_vec()));
    }

    #[test]
    fn test_encode_untagged_is_rejected() {
        assert_eq!(encode(&TaggedValue::None), Err(CodecError::Untagged));
    }

    #[test]
    fn test_roundtrip_each_tag() {
        let values = [
            TaggedValue::Double(std::f64::consts::PI),
            TaggedValue::Float(-3.25),
            TaggedValue::Int32(i32::MIN),
            TaggedValue::Int64(-1_234_567_890_123),
            TaggedValue::Bool(true),
            TaggedValue::Bool(false),
            TaggedValue::String("not a number".to_string()),
            TaggedValue::String(String::new()),
        ];
        for value in values {
            assert_eq!(roundtrip(value.clone()), value);
        }
    }

    #[test]
    fn test_float_text_is_exact() {
        let value = 0.1f64 + 0.2f64;
        assert_eq!(roundtrip(TaggedValue::Double(value)), TaggedValue::Double(value));
        let value = f32::MIN_POSITIVE;
        assert_eq!(roundtrip(TaggedValue::Float(value)), TaggedValue::Float(value));
    }

    #[test]
    fn test_non_finite_doubles() {
        assert_eq!(roundtrip(TaggedValue::Double(f64::INFINITY)), TaggedValue::Double(f64::INFINITY));
        assert_eq!(
            roundtrip(TaggedValue::Double(f64::NEG_INFINITY)),
            TaggedValue::Double(f64::NEG_INFINITY)
        );
        let nan = decode(b"NaN", ValueTag::Double).ok().and_then(|v| v.as_f64());
        assert!(nan.is_some_and(f64::is_nan));
    }

    #[test]
    fn test_malformed_numbers_fail() {
        for input in [&b"not-a-number"[..], b"42abc", b" 42", b"", b"1.5"] {
            let err = decode(input, ValueTag::Int32);
            assert!(err.as_ref().is_err_and(CodecError::is_decode), "{input:?}: {err:?}");
        }
        assert!(decode(b"abc", ValueTag::Double).is_err());
        assert!(decode(b"2147483648", ValueTag::Int32).is_err());
        assert_eq!(decode(b"2147483648", ValueTag::Int64).ok(), Some(TaggedValue::Int64(2_147_483_648)));
    }

    #[test]
    fn test_numeric_looking_string_reads_as_number() {
        let bytes = encode(&TaggedValue::from("123")).unwrap_or_default();
        assert_eq!(decode(&bytes, ValueTag::Int32).ok(), Some(TaggedValue::Int32(123)));
    }

    #[test]
    fn test_bool_accepts_only_digits() {
        assert_eq!(decode(b"1", ValueTag::Bool).ok(), Some(TaggedValue::Bool(true)));
        assert_eq!(decode(b"0", ValueTag::Bool).ok(), Some(TaggedValue::Bool(false)));
        assert!(decode(b"true", ValueTag::Bool).is_err());
        assert!(decode(b"2", ValueTag::Bool).is_err());
    }

    #[test]
    fn test_invalid_utf8() {
        let err = decode(&[0xff, 0xfe], ValueTag::String);
        assert_eq!(err, Err(CodecError::InvalidUtf8 { tag: "string" }));
    }

    #[test]
    fn test_unsigned() {
        assert_eq!(encode_unsigned(u64::MAX), b"18446744073709551615".to_vec());
        assert_eq!(decode_unsigned(b"18446744073709551615"), Ok(u64::MAX));
        assert!(decode_unsigned(b"-1").is_err());
        // Interoperates with Int64 for values that fit.
        let signed = encode(&TaggedValue::Int64(99)).unwrap_or_default();
        assert_eq!(signed, encode_unsigned(99));
        assert_eq!(decode_unsigned(&signed), Ok(99));
    }

    #[test]
    fn test_error_messages() {
        let err = decode(b"xyz", ValueTag::Int64).err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("Cannot decode \"xyz\" as int64".to_string())
        );
    }
}
