//! Update path compilation.
//!
//! A partial update document is flattened into a sequence of JavaScript-like assignment
//! statements that the server evaluates against the stored record:
//!
//! ```text
//! {"a": {"b": 1}}
//!
//! if (typeof a === 'undefined' || !(a instanceof Object)) {a = {}};
//! if (typeof a === 'undefined' || !(a instanceof Object)) {a = {}};
//! a["b"] = 1;
//! ```
//!
//! Guards come before the assignments they protect so that intermediate objects exist
//! when nested properties are written. Statement order follows the document's key order.

use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    error::{ClientError, ClientResult},
    escape::{escape_scalar, escape_text},
};

/// Flattens an update document into ordered assignment statements.
pub fn compile_update(document: &Map<String, Value>) -> ClientResult<Vec<String>> {
    let mut statements = Vec::new();
    flatten(document, "", 1, &mut statements)?;
    trace!(count = statements.len(), "compiled update statements");
    Ok(statements)
}

/// Compiles an update document into the body of a `SET` clause.
pub fn update_clause(document: &Map<String, Value>) -> ClientResult<String> {
    Ok(compile_update(document)?.join(" "))
}

/// Guard that turns `path` into an empty object unless it already is one.
pub fn guard_statement(path: &str) -> String {
    format!("if (typeof {path} === 'undefined' || !({path} instanceof Object)) {{{path} = {{}}}};")
}

fn flatten(
    node: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    statements: &mut Vec<String>,
) -> ClientResult<()> {
    if !prefix.is_empty() {
        statements.push(guard_statement(prefix));
    }

    for (key, value) in node {
        let path = if depth > 1 {
            format!("{prefix}[\"{key}\"]")
        } else {
            statements.push(guard_statement(key));
            key.clone()
        };

        match value {
            Value::Object(child) if !child.is_empty() => {
                flatten(child, &path, depth + 1, statements)?;
            }
            Value::Array(_) | Value::Object(_) => {
                statements.push(format!("{path} = {};", serde_json::to_string(value)?));
            }
            Value::String(text) => {
                statements.push(format!("{path} = \"{}\";", escape_text(text)));
            }
            scalar => {
                statements.push(format!("{path} = {};", escape_scalar(scalar)));
            }
        }
    }

    Ok(())
}

/// Unwraps the top level of an update document, rejecting anything but a mapping.
pub(crate) fn as_update_document(document: &Value) -> ClientResult<&Map<String, Value>> {
    document.as_object().ok_or_else(|| {
        ClientError::invalid_argument(
            "->update()",
            format!("parameter passed {document} is not in valid format."),
        )
    })
}
