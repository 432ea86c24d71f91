//! Tagged operands accepted by the clause compilers.
//!
//! A plain string handed to a compiler is ambiguous: it could be a literal value, the
//! name of a field on the current record, or a fragment of query text that must not be
//! quoted. [`Operand`] makes the intent explicit so every compiler can match on it.
//!
//! # Example
//!
//! ```ignore
//! use cplayer::value::{Operand, key, raw};
//!
//! let literal: Operand = "active".into();
//! let field = key("age");
//! let expr = raw("this.price * 2");
//! ```

use serde_json::Value;

/// A value passed to a clause compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// An ordinary value, quoted or JSON-encoded when emitted.
    Literal(Value),
    /// The name of a field on the current record, resolved to `this["<name>"]`.
    Field(String),
    /// Query text emitted verbatim.
    Raw(String),
}

/// Creates a field reference operand.
pub fn key(name: impl Into<String>) -> Operand {
    Operand::Field(name.into())
}

/// Creates a raw expression operand.
pub fn raw(text: impl Into<String>) -> Operand {
    Operand::Raw(text.into())
}

impl Operand {
    /// Returns the literal value if this operand is one.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Operand::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for literal arrays and objects.
    pub fn is_composite(&self) -> bool {
        matches!(self, Operand::Literal(Value::Array(_) | Value::Object(_)))
    }

    /// Renders the operand as bare text, without resolving or quoting it.
    ///
    /// Field references render as their name and non-string literals as their JSON text.
    pub fn to_plain_text(&self) -> String {
        match self {
            Operand::Literal(Value::String(text)) => text.clone(),
            Operand::Literal(value) => value.to_string(),
            Operand::Field(name) => name.clone(),
            Operand::Raw(text) => text.clone(),
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Literal(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Literal(Value::String(value))
    }
}

impl From<&String> for Operand {
    fn from(value: &String) -> Self {
        Operand::Literal(Value::String(value.clone()))
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Operand::Literal(Value::Bool(value))
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Literal(Value::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize, f64);

/// The projection handed to a `SELECT` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A projection that is already composed, emitted unchanged.
    Expr(String),
    /// An ordered list of projection terms joined with `", "`.
    Terms(Vec<Operand>),
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::Expr(value.to_string())
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Selection::Expr(value)
    }
}

impl<T: Into<Operand>> From<Vec<T>> for Selection {
    fn from(terms: Vec<T>) -> Self {
        Selection::Terms(terms.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Operand>, const N: usize> From<[T; N]> for Selection {
    fn from(terms: [T; N]) -> Self {
        Selection::Terms(terms.into_iter().map(Into::into).collect())
    }
}
