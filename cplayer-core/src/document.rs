//! Single-document encoding for insert and replace payloads.
//!
//! Keys and values follow different policies: keys go through
//! [`escape_text`](crate::escape::escape_text) and are quoted by hand, values are
//! JSON-encoded. Servers parse the output as an object literal, so both spellings
//! are accepted; the exact bytes still matter to anyone comparing payloads.

use serde_json::Value;

use crate::{
    error::{ClientError, ClientResult},
    escape::escape_text,
};

/// Encodes a document as an object literal: `{"<key>" : <json>,...}`.
///
/// A mapping is encoded in key order. A sequence is accepted too and keyed by
/// element index.
pub fn encode_document(document: &Value) -> ClientResult<String> {
    let entries = match document {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| encode_entry(key, value))
            .collect::<ClientResult<Vec<_>>>()?,
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| encode_entry(&index.to_string(), value))
            .collect::<ClientResult<Vec<_>>>()?,
        other => return Err(invalid_document(other)),
    };

    Ok(format!("{{{}}}", entries.join(",")))
}

fn encode_entry(key: &str, value: &Value) -> ClientResult<String> {
    Ok(format!("\"{}\" : {}", escape_text(key), serde_json::to_string(value)?))
}

pub(crate) fn invalid_document(document: &Value) -> ClientError {
    ClientError::invalid_argument(
        "->insert()",
        format!("parameter passed {document} is not in valid document format."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_value_uses_json_escaping() {
        assert_eq!(
            encode_document(&json!({"k": "v\"v"})).unwrap(),
            r#"{"k" : "v\"v"}"#
        );
    }

    #[rstest]
    fn test_key_uses_text_escaping() {
        assert_eq!(
            encode_document(&json!({"it's": 1})).unwrap(),
            r#"{"it\'s" : 1}"#
        );
    }

    #[rstest]
    fn test_entries_keep_insertion_order() {
        assert_eq!(
            encode_document(&json!({"b": 1, "a": [true, null], "c": {"d": "e"}})).unwrap(),
            r#"{"b" : 1,"a" : [true,null],"c" : {"d":"e"}}"#
        );
    }

    #[rstest]
    fn test_sequence_is_keyed_by_index() {
        assert_eq!(
            encode_document(&json!(["x", 2])).unwrap(),
            r#"{"0" : "x","1" : 2}"#
        );
    }

    #[rstest]
    fn test_empty_mapping() {
        assert_eq!(encode_document(&json!({})).unwrap(), "{}");
    }

    #[rstest]
    #[case(json!("text"))]
    #[case(json!(5))]
    #[case(json!(null))]
    fn test_scalar_is_rejected(#[case] document: Value) {
        let err = encode_document(&document).unwrap_err();
        assert_eq!(err.code(), Some(9002));
    }
}
