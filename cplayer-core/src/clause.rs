//! Clause compilers for `SELECT`, `WHERE`, `ORDER BY`, `GROUP BY` and `LIMIT`.
//!
//! Each compiler validates one clause input and returns the text fragment the
//! [`Scope`](crate::scope::Scope) stores. Fragments are concatenated later by the
//! [`Statement`](crate::statement::Statement) assembler, so the exact spacing of every
//! fragment is part of the wire format.

use serde_json::Value;

use crate::{
    error::{ClientError, ClientResult},
    escape::{encode_value, resolve_field},
    value::{Operand, Selection},
};

/// Equality operator used when a predicate is given without one.
pub const DEFAULT_OPERATOR: &str = "==";

/// Sort direction for `ORDER BY` terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Parses an order keyword case-insensitively. An empty keyword means [`SortOrder::Desc`].
    pub fn parse(order: &str) -> ClientResult<Self> {
        match order.to_uppercase().as_str() {
            "" | "DESC" => Ok(SortOrder::Desc),
            "ASC" => Ok(SortOrder::Asc),
            _ => Err(ClientError::invalid_argument(
                "->order()",
                "ordering should be DESC or ASC.",
            )),
        }
    }

    /// Returns the keyword as written in query text.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Compiles a projection into the text following `SELECT`.
///
/// Field references are resolved and aliased back to their own name so the result
/// still carries the original field name: `this["age"] as "age"`.
pub fn compile_select(selection: &Selection) -> ClientResult<String> {
    match selection {
        Selection::Expr(expr) => Ok(expr.clone()),
        Selection::Terms(terms) => Ok(terms
            .iter()
            .map(|term| match term {
                Operand::Field(name) => Ok(format!("{} as \"{}\"", resolve_field(name), name)),
                term if term.is_composite() => Err(ClientError::invalid_argument(
                    "->select()",
                    "passed parameter is not in valid format.",
                )),
                term => Ok(term.to_plain_text()),
            })
            .collect::<ClientResult<Vec<_>>>()?
            .join(", ")),
    }
}

/// Compiles one predicate of a `WHERE` clause.
///
/// - With no `operator`, `field` is a raw continuation and is emitted as `"<logical> <field> "`.
/// - With no `value`, the `operator` argument is the compared text and equality is implied.
///
/// The result always ends with a single space so consecutive predicates concatenate.
pub fn compile_where(
    field: &Operand,
    operator: Option<&str>,
    value: Option<&Operand>,
    logical: &str,
) -> ClientResult<String> {
    if field.is_composite() {
        return Err(ClientError::invalid_argument(
            "->where()",
            "passed field selector is not in valid format.",
        ));
    }

    let Some(operator) = operator else {
        return Ok(format!("{logical} {} ", field.to_plain_text()));
    };

    let (operator, value) = match value {
        Some(value) => (operator, encode_value(value)?),
        None => (DEFAULT_OPERATOR, encode_value(&Operand::from(operator))?),
    };

    Ok(format!("{logical} {}{operator}{value} ", field_text(field)))
}

/// Compiles the `LIMIT` row count.
pub fn compile_limit(limit: &Value) -> ClientResult<u64> {
    coerce_count(limit).ok_or_else(|| {
        ClientError::invalid_argument("->limit()", "passed parameter is not in valid format.")
    })
}

/// Compiles the `LIMIT` offset.
pub fn compile_offset(offset: &Value) -> ClientResult<u64> {
    coerce_count(offset).ok_or_else(|| {
        ClientError::invalid_argument("->offset()", "passed parameter is not in valid format.")
    })
}

/// Compiles one `ORDER BY` term. A missing order means descending.
pub fn compile_order_by(field: &Operand, order: Option<&str>) -> ClientResult<String> {
    let order = SortOrder::parse(order.unwrap_or_default())?;
    let field = selector_text(field).ok_or_else(|| {
        ClientError::invalid_argument("->order()", "passed field selector is not in valid format.")
    })?;

    Ok(format!("{field} {}", order.as_str()))
}

/// Compiles one `GROUP BY` term.
pub fn compile_group_by(field: &Operand) -> ClientResult<String> {
    selector_text(field).ok_or_else(|| {
        ClientError::invalid_argument("->group()", "passed field selector is not in valid format.")
    })
}

fn field_text(field: &Operand) -> String {
    match field {
        Operand::Field(name) => resolve_field(name),
        other => other.to_plain_text(),
    }
}

/// Field selectors for ordering and grouping: text, field references or raw text only.
fn selector_text(field: &Operand) -> Option<String> {
    match field {
        Operand::Literal(Value::String(text)) => Some(text.clone()),
        Operand::Field(name) => Some(resolve_field(name)),
        Operand::Raw(text) => Some(text.clone()),
        Operand::Literal(_) => None,
    }
}

/// Coerces a number or numeric text into a non-negative count, truncating fractions.
fn coerce_count(value: &Value) -> Option<u64> {
    let number = match value {
        Value::Number(number) => {
            if let Some(count) = number.as_u64() {
                return Some(count);
            }
            number.as_f64()?
        }
        Value::String(text) => {
            let text = text.trim();
            if let Ok(count) = text.parse::<u64>() {
                return Some(count);
            }
            text.parse::<f64>().ok()?
        }
        _ => return None,
    };

    if !number.is_finite() || number < 0.0 {
        return None;
    }
    Some(number.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{key, raw};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_select_expression_passes_through() {
        let selection = Selection::from("name, COUNT(*) as total");
        assert_eq!(compile_select(&selection).unwrap(), "name, COUNT(*) as total");
    }

    #[rstest]
    fn test_select_aliases_field_references() {
        let selection = Selection::from(vec![Operand::from("name"), key("age")]);
        assert_eq!(
            compile_select(&selection).unwrap(),
            r#"name, this["age"] as "age""#
        );
    }

    #[rstest]
    fn test_select_rejects_composite_terms() {
        let selection = Selection::from(vec![Operand::from(json!(["a"]))]);
        let err = compile_select(&selection).unwrap_err();
        assert_eq!(err.code(), Some(9002));
    }

    #[rstest]
    fn test_where_defaults_to_equality() {
        let fragment = compile_where(&"status".into(), Some("active"), None, "AND").unwrap();
        assert_eq!(fragment, r#"AND status=="active" "#);
    }

    #[rstest]
    fn test_where_numeric_value_is_unquoted() {
        let fragment = compile_where(&"age".into(), Some(">"), Some(&5.into()), "AND").unwrap();
        assert_eq!(fragment, "AND age>5 ");
    }

    #[rstest]
    fn test_where_resolves_field_reference() {
        let fragment = compile_where(&key("age"), Some(">="), Some(&18.into()), "&&").unwrap();
        assert_eq!(fragment, r#"&& this["age"]>=18 "#);
    }

    #[rstest]
    fn test_where_raw_value_is_verbatim() {
        let fragment = compile_where(&"a".into(), Some("<"), Some(&raw("this.b")), "||").unwrap();
        assert_eq!(fragment, "|| a<this.b ");
    }

    #[rstest]
    fn test_where_escapes_text_value() {
        let fragment = compile_where(&"name".into(), Some("=="), Some(&"O'Neil \"x\"".into()), "").unwrap();
        assert_eq!(fragment, r#" name=="O\'Neil \"x\"" "#);
    }

    #[rstest]
    fn test_where_without_operator_is_a_continuation() {
        let fragment = compile_where(&raw("(a == 1 || b == 2)"), None, None, "&&").unwrap();
        assert_eq!(fragment, "&& (a == 1 || b == 2) ");
    }

    #[rstest]
    fn test_where_rejects_composite_field() {
        let err = compile_where(&json!(["a", "b"]).into(), Some("=="), None, "&&").unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument { operation: "->where()", .. }));
    }

    #[rstest]
    #[case(json!("10"), 10)]
    #[case(json!(10), 10)]
    #[case(json!(7.9), 7)]
    #[case(json!(" 12 "), 12)]
    #[case(json!("1e2"), 100)]
    #[case(json!("3.5"), 3)]
    fn test_limit_coercion(#[case] input: Value, #[case] expected: u64) {
        assert_eq!(compile_limit(&input).unwrap(), expected);
        assert_eq!(compile_offset(&input).unwrap(), expected);
    }

    #[rstest]
    #[case(json!("abc"))]
    #[case(json!(""))]
    #[case(json!(-1))]
    #[case(json!("inf"))]
    #[case(json!(true))]
    #[case(json!(null))]
    #[case(json!([1]))]
    fn test_limit_rejects_non_numeric(#[case] input: Value) {
        let err = compile_limit(&input).unwrap_err();
        assert_eq!(err.code(), Some(9002));
    }

    #[rstest]
    #[case(Operand::from("name"), None, "name DESC")]
    #[case(Operand::from("name"), Some("asc"), "name ASC")]
    #[case(Operand::from("name"), Some(""), "name DESC")]
    #[case(key("age"), Some("Desc"), r#"this["age"] DESC"#)]
    #[case(raw("RAND()"), Some("ASC"), "RAND() ASC")]
    fn test_order_by(#[case] field: Operand, #[case] order: Option<&str>, #[case] expected: &str) {
        assert_eq!(compile_order_by(&field, order).unwrap(), expected);
    }

    #[rstest]
    fn test_order_by_rejects_unknown_direction() {
        let err = compile_order_by(&"name".into(), Some("sideways")).unwrap_err();
        assert!(err.to_string().contains("DESC or ASC"));
    }

    #[rstest]
    fn test_order_by_rejects_numeric_field() {
        assert!(compile_order_by(&5.into(), None).is_err());
    }

    #[rstest]
    #[case(Operand::from("category"), "category")]
    #[case(key("category"), r#"this["category"]"#)]
    #[case(raw("YEAR(created)"), "YEAR(created)")]
    fn test_group_by(#[case] field: Operand, #[case] expected: &str) {
        assert_eq!(compile_group_by(&field).unwrap(), expected);
    }

    #[rstest]
    fn test_group_by_rejects_non_text() {
        assert!(compile_group_by(&json!({"a": 1}).into()).is_err());
    }
}
