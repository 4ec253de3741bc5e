//! Escaping routines for attribute values and text content.
//!
//! The two routines are not interchangeable:
//! - [`escape_attr`] only replaces `'` with `&#39;`. Attribute values are
//!   always wrapped in single quotes, so `&`, `<`, `>` and `"` pass through.
//! - [`escape_text`] escapes the five HTML special characters and is applied
//!   once, when a text node is built. Quotes become the numeric entities
//!   `&#34;` and `&#39;`.

use std::borrow::Cow;

const APOS_ENTITY: &[u8] = b"&#39;";
const QUOT_ENTITY: &str = "&#34;";

/// Escape a string for use inside a single-quoted attribute value.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains('\'') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace('\'', "&#39;"))
}

/// Escape text content for use between tags.
pub fn escape_text(s: &str) -> Cow<'_, str> {
    let encoded = html_escape::encode_text(s);
    if !encoded.contains(['"', '\'']) {
        return encoded;
    }
    let mut out = String::with_capacity(encoded.len() + 8);
    for c in encoded.chars() {
        match c {
            '"' => out.push_str(QUOT_ENTITY),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Append `bytes` to `buf`, replacing every `'` with `&#39;`.
pub(crate) fn push_attr_escaped(buf: &mut Vec<u8>, bytes: &[u8]) {
    let mut rest = bytes;
    while let Some(pos) = rest.iter().position(|&b| b == b'\'') {
        buf.extend_from_slice(&rest[..pos]);
        buf.extend_from_slice(APOS_ENTITY);
        rest = &rest[pos + 1..];
    }
    buf.extend_from_slice(rest);
}
