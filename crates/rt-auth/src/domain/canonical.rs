//! # Canonical Request Bodies
//!
//! The signature covers the body bytes, so both sides must serialize a
//! logically-equal payload to the same string. The canonical form is:
//!
//! - compact JSON, no insignificant whitespace
//! - object keys sorted by byte order at every depth
//! - strings and numbers formatted by `serde_json`
//!
//! Keys are sorted here, independent of `serde_json`'s `preserve_order`
//! feature.

use serde::Serialize;
use serde_json::Value;

use super::errors::AuthError;
use crate::ports::outbound::Canonicalizer;

/// Sorted-key compact JSON canonicalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCanonicalizer;

impl Canonicalizer for JsonCanonicalizer {
    fn canonicalize(&self, body: &Value) -> Result<String, AuthError> {
        let mut out = String::new();
        write_value(&mut out, body)?;
        Ok(out)
    }
}

/// Canonicalize any serializable body with [`JsonCanonicalizer`].
///
/// Fails with [`AuthError::Serialization`] if the value cannot be
/// represented as JSON (e.g. a map with non-string keys, or a `Serialize`
/// impl that errors).
pub fn canonicalize<T: Serialize + ?Sized>(body: &T) -> Result<String, AuthError> {
    let value = serde_json::to_value(body)?;
    JsonCanonicalizer.canonicalize(&value)
}

fn write_value(out: &mut String, value: &Value) -> Result<(), AuthError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s)?,
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key)?;
                out.push(':');
                write_value(out, item)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_string(out: &mut String, s: &str) -> Result<(), AuthError> {
    out.push_str(&serde_json::to_string(s)?);
    Ok(())
}
