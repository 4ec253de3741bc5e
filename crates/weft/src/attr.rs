//! Attribute values and their coercion to attribute text.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::RenderError;

/// Value of an element attribute.
///
/// Primitive values are formatted directly. Anything else goes through
/// [`AttrValue::json`] and is serialized with `serde_json` at render time.
#[derive(Clone, Debug)]
pub enum AttrValue {
    /// Text value.
    Str(String),
    /// Raw bytes, written as-is.
    Bytes(Vec<u8>),
    /// Sequence of characters.
    Runes(Vec<char>),
    /// Signed integer of any width.
    Int(i128),
    /// Unsigned integer of any width.
    Uint(u128),
    /// 32-bit float, formatted with the shortest 32-bit representation.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// Presence-only attribute: `true` emits the bare key, `false` omits it.
    Bool(bool),
    /// Structured value rendered as JSON text.
    Json(Arc<dyn JsonValue>),
}

/// A structured attribute value that serializes to JSON.
///
/// Implemented for every `Serialize` type that can be shared across threads.
pub trait JsonValue: fmt::Debug + Send + Sync {
    /// Serialize the value to a JSON string.
    fn to_json(&self) -> serde_json::Result<String>;
}

impl<T> JsonValue for T
where
    T: Serialize + fmt::Debug + Send + Sync,
{
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl AttrValue {
    /// Wrap a structured value that will be rendered as JSON.
    pub fn json<T>(value: T) -> Self
    where
        T: Serialize + fmt::Debug + Send + Sync + 'static,
    {
        Self::Json(Arc::new(value))
    }

    /// Coerce the value into the text placed between the quotes.
    ///
    /// `key` is only used to label serialization errors.
    pub(crate) fn coerce(&self, key: &str) -> Result<Coerced<'_>, RenderError> {
        let text: Cow<'_, [u8]> = match self {
            Self::Str(s) => Cow::Borrowed(s.as_bytes()),
            Self::Bytes(b) => Cow::Borrowed(b.as_slice()),
            Self::Runes(r) => Cow::Owned(r.iter().collect::<String>().into_bytes()),
            Self::Int(n) => Cow::Owned(n.to_string().into_bytes()),
            Self::Uint(n) => Cow::Owned(n.to_string().into_bytes()),
            Self::F32(f) => Cow::Owned(format_f32(*f).into_bytes()),
            Self::F64(f) => Cow::Owned(format_f64(*f).into_bytes()),
            Self::Bool(true) => return Ok(Coerced::Bare),
            Self::Bool(false) => return Ok(Coerced::Omit),
            Self::Json(v) => {
                let json = v.to_json().map_err(|source| RenderError::Json {
                    key: key.to_owned(),
                    source,
                })?;
                Cow::Owned(json.into_bytes())
            }
        };

        if text.is_empty() {
            return Ok(Coerced::Omit);
        }
        Ok(Coerced::Value(text))
    }

    /// Borrow the value as a string, if it holds text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Outcome of coercing an attribute value.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Coerced<'a> {
    /// Attribute is left out of the output.
    Omit,
    /// Attribute is written as a bare key.
    Bare,
    /// Attribute is written as `key='value'`.
    Value(Cow<'a, [u8]>),
}

fn format_f64(f: f64) -> String {
    if f.is_finite() {
        f.to_string()
    } else {
        format_non_finite(f.is_nan(), f.is_sign_positive())
    }
}

fn format_f32(f: f32) -> String {
    if f.is_finite() {
        f.to_string()
    } else {
        format_non_finite(f.is_nan(), f.is_sign_positive())
    }
}

fn format_non_finite(nan: bool, positive: bool) -> String {
    let s = match (nan, positive) {
        (true, _) => "NaN",
        (false, true) => "+Inf",
        (false, false) => "-Inf",
    };
    s.to_owned()
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<&String> for AttrValue {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl From<Cow<'_, str>> for AttrValue {
    fn from(v: Cow<'_, str>) -> Self {
        Self::Str(v.into_owned())
    }
}

impl From<Vec<u8>> for AttrValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for AttrValue {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<Vec<char>> for AttrValue {
    fn from(v: Vec<char>) -> Self {
        Self::Runes(v)
    }
}

impl From<&[char]> for AttrValue {
    fn from(v: &[char]) -> Self {
        Self::Runes(v.to_vec())
    }
}

impl From<char> for AttrValue {
    fn from(v: char) -> Self {
        Self::Runes(vec![v])
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

macro_rules! impl_from_int {
    ($variant:ident => $($t:ty),*) => {
        $(
            impl From<$t> for AttrValue {
                fn from(v: $t) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_int!(Int => i8, i16, i32, i64, i128);
impl_from_int!(Uint => u8, u16, u32, u64, u128);

impl From<isize> for AttrValue {
    fn from(v: isize) -> Self {
        Self::Int(v as i128)
    }
}

impl From<usize> for AttrValue {
    fn from(v: usize) -> Self {
        Self::Uint(v as u128)
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(v: serde_json::Value) -> Self {
        Self::json(v)
    }
}
