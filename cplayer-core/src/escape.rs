//! Literal encoding for the Clusterpoint query language.
//!
//! The functions here decide how values, field names and identifiers are spelled in
//! compiled query text. Two policies coexist and must not be mixed up:
//!
//! - [`escape_text`] backslash-escapes special characters but never adds quotes.
//! - [`encode_value`] produces a complete literal: quoted text, JSON for everything
//!   else, or raw text when the operand asks for it.

use serde_json::Value;

use crate::{error::ClientResult, value::Operand};

/// Characters rewritten by [`escape_text`], in replacement order.
const ESCAPES: [(char, &str); 7] = [
    ('\\', "\\\\"),
    ('\0', "\\0"),
    ('\n', "\\n"),
    ('\r', "\\r"),
    ('\'', "\\'"),
    ('"', "\\\""),
    ('\x1a', "\\Z"),
];

/// Escapes backslash, NUL, newline, carriage return, both quote characters and `0x1A`.
///
/// The result is not quoted. Applying this twice double-escapes.
pub fn escape_text(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() + input.len() / 4);
    for c in input.chars() {
        match ESCAPES.iter().find(|(target, _)| *target == c) {
            Some((_, replacement)) => escaped.push_str(replacement),
            None => escaped.push(c),
        }
    }
    escaped
}

/// Casts a scalar to text the way the server-side client always has.
///
/// `true` becomes `"1"`, `false` and `null` become `""`, integral floats drop their
/// fraction (`1.0` becomes `"1"`). Arrays and objects have no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) | Value::Null => Some(String::new()),
        Value::Number(number) => Some(match number.as_f64() {
            Some(float)
                if !number.is_i64() && !number.is_u64() && float.fract() == 0.0 && float.abs() < 1e15 =>
            {
                format!("{}", float as i64)
            }
            _ => number.to_string(),
        }),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Escapes a scalar through its text cast (see [`scalar_text`]). No quotes are added.
///
/// Composite values fall back to their JSON text.
pub fn escape_scalar(value: &Value) -> String {
    match scalar_text(value) {
        Some(text) => escape_text(&text),
        None => escape_text(&value.to_string()),
    }
}

/// Encodes an operand as a complete literal for the right-hand side of a predicate.
///
/// Raw expressions are emitted verbatim, text is escaped and wrapped in double quotes,
/// field references resolve to accessor syntax and any other value is JSON-encoded.
pub fn encode_value(operand: &Operand) -> ClientResult<String> {
    Ok(match operand {
        Operand::Raw(text) => text.clone(),
        Operand::Field(name) => resolve_field(name),
        Operand::Literal(Value::String(text)) => format!("\"{}\"", escape_text(text)),
        Operand::Literal(value) => serde_json::to_string(value)?,
    })
}

/// Resolves a field name against the current record: `this["<name>"]`.
pub fn resolve_field(name: &str) -> String {
    format!("this[\"{name}\"]")
}

/// Percent-encodes an identifier for use inside a `[<id>]` path selector.
///
/// ASCII alphanumerics and `-_.` pass through, a space becomes `+` and every other
/// byte is written as `%XX`.
pub fn url_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => encoded.push(byte as char),
            b' ' => encoded.push('+'),
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}
