//! The immutable accumulator for one pending read operation.
//!
//! A [`Scope`] holds compiled clause fragments. Every builder step validates its input
//! through the [`clause`](crate::clause) compilers and returns a new scope, so a scope
//! can be kept, cloned and compiled any number of times.
//!
//! # Example
//!
//! ```ignore
//! use cplayer::{scope::Scope, value::key};
//!
//! let scope = Scope::new()
//!     .select(vec!["name".into(), key("age")])?
//!     .filter("status", "==", "active")?
//!     .or_filter(key("age"), ">", 30)?
//!     .order_by("name", "asc")?
//!     .limit(10)?;
//! ```

use serde_json::Value;

use crate::{
    clause::{
        compile_group_by, compile_limit, compile_offset, compile_order_by, compile_select,
        compile_where,
    },
    error::ClientResult,
    value::{Operand, Selection},
};

/// Connective joining predicates with logical AND.
pub const AND: &str = "&&";
/// Connective joining predicates with logical OR.
pub const OR: &str = "||";

/// Row count used when no limit is given.
pub const DEFAULT_LIMIT: u64 = 20;

/// Compiled clause fragments for one read operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    /// Projection following `SELECT`.
    pub select: String,
    /// Predicate fragments, each starting with its own connective.
    pub where_clause: String,
    /// `GROUP BY` terms in call order.
    pub group_by: Vec<String>,
    /// `ORDER BY` terms in call order.
    pub order_by: Vec<String>,
    /// Maximum number of records.
    pub limit: u64,
    /// Number of records to skip.
    pub offset: u64,
    /// Join fragment placed after the source.
    pub join: Option<String>,
    /// Text prefixed verbatim to the whole query.
    pub prepend: String,
    /// Field for the `LIST_WORDS` view. An empty string lists the whole collection.
    pub list_words_field: Option<String>,
    /// Field for the `ALTERNATIVES` view. An empty string covers the whole collection.
    pub alternatives_field: Option<String>,
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            select: "*".to_string(),
            where_clause: String::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: DEFAULT_LIMIT,
            offset: 0,
            join: None,
            prepend: String::new(),
            list_words_field: None,
            alternatives_field: None,
        }
    }
}

impl Scope {
    /// Creates an empty scope selecting everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scope with the given pagination defaults.
    pub fn with_defaults(limit: u64, offset: u64) -> Self {
        Self {
            limit,
            offset,
            ..Self::default()
        }
    }

    /// Sets the projection, replacing any previous one.
    pub fn select(mut self, selection: impl Into<Selection>) -> ClientResult<Self> {
        self.select = compile_select(&selection.into())?;
        Ok(self)
    }

    /// Appends a predicate joined with AND.
    pub fn filter(
        self,
        field: impl Into<Operand>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> ClientResult<Self> {
        self.push_where(field.into(), Some(operator), Some(value.into()), AND)
    }

    /// Appends a predicate joined with OR.
    pub fn or_filter(
        self,
        field: impl Into<Operand>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> ClientResult<Self> {
        self.push_where(field.into(), Some(operator), Some(value.into()), OR)
    }

    /// Appends an equality predicate joined with AND.
    pub fn filter_eq(self, field: impl Into<Operand>, value: impl Into<Operand>) -> ClientResult<Self> {
        self.filter(field, crate::clause::DEFAULT_OPERATOR, value)
    }

    /// Appends an equality predicate joined with OR.
    pub fn or_filter_eq(self, field: impl Into<Operand>, value: impl Into<Operand>) -> ClientResult<Self> {
        self.or_filter(field, crate::clause::DEFAULT_OPERATOR, value)
    }

    /// Appends a raw predicate fragment joined with AND.
    pub fn filter_raw(self, fragment: impl Into<String>) -> ClientResult<Self> {
        self.push_where(Operand::Raw(fragment.into()), None, None, AND)
    }

    /// Appends a raw predicate fragment joined with OR.
    pub fn or_filter_raw(self, fragment: impl Into<String>) -> ClientResult<Self> {
        self.push_where(Operand::Raw(fragment.into()), None, None, OR)
    }

    /// Appends a parenthesized group of predicates joined with AND.
    ///
    /// The closure receives the scope with the group opened; its first predicate
    /// carries no connective.
    pub fn filter_group<F>(self, build: F) -> ClientResult<Self>
    where
        F: FnOnce(Scope) -> ClientResult<Scope>,
    {
        self.push_group(build, AND)
    }

    /// Appends a parenthesized group of predicates joined with OR.
    pub fn or_filter_group<F>(self, build: F) -> ClientResult<Self>
    where
        F: FnOnce(Scope) -> ClientResult<Scope>,
    {
        self.push_group(build, OR)
    }

    /// Sets the maximum number of records. Accepts numbers and numeric text.
    pub fn limit(mut self, limit: impl Into<Value>) -> ClientResult<Self> {
        self.limit = compile_limit(&limit.into())?;
        Ok(self)
    }

    /// Sets the number of records to skip. Accepts numbers and numeric text.
    pub fn offset(mut self, offset: impl Into<Value>) -> ClientResult<Self> {
        self.offset = compile_offset(&offset.into())?;
        Ok(self)
    }

    /// Appends an ordering term. An empty `order` means descending.
    pub fn order_by(mut self, field: impl Into<Operand>, order: &str) -> ClientResult<Self> {
        self.order_by.push(compile_order_by(&field.into(), Some(order))?);
        Ok(self)
    }

    /// Appends a grouping term.
    pub fn group_by(mut self, field: impl Into<Operand>) -> ClientResult<Self> {
        self.group_by.push(compile_group_by(&field.into())?);
        Ok(self)
    }

    /// Sets the join fragment placed after the source.
    pub fn join(mut self, join: impl Into<String>) -> Self {
        self.join = Some(join.into());
        self
    }

    /// Sets text prefixed verbatim to the compiled query.
    pub fn prepend(mut self, prefix: impl Into<String>) -> Self {
        self.prepend = prefix.into();
        self
    }

    /// Reads from the `LIST_WORDS` view of `field`, or of the whole collection when empty.
    pub fn list_words(mut self, field: impl Into<String>) -> Self {
        self.list_words_field = Some(field.into());
        self
    }

    /// Reads from the `ALTERNATIVES` view of `field`, or of the whole collection when empty.
    pub fn alternatives(mut self, field: impl Into<String>) -> Self {
        self.alternatives_field = Some(field.into());
        self
    }

    fn push_where(
        mut self,
        field: Operand,
        operator: Option<&str>,
        value: Option<Operand>,
        logical: &str,
    ) -> ClientResult<Self> {
        let fragment = compile_where(&field, operator, value.as_ref(), self.connective(logical))?;
        self.where_clause.push_str(&fragment);
        Ok(self)
    }

    fn push_group<F>(mut self, build: F, logical: &str) -> ClientResult<Self>
    where
        F: FnOnce(Scope) -> ClientResult<Scope>,
    {
        let opener = match self.connective(logical) {
            "" => " (".to_string(),
            logical => format!("{logical} ("),
        };
        self.where_clause.push_str(&opener);

        let mut scope = build(self)?;
        scope.where_clause.push(')');
        Ok(scope)
    }

    /// Connective for the next predicate: none at the start of a clause or group.
    fn connective<'a>(&self, logical: &'a str) -> &'a str {
        if self.where_clause.trim().is_empty() || self.where_clause.ends_with('(') {
            ""
        } else {
            logical
        }
    }
}
