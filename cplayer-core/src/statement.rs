//! Statement assembly.
//!
//! [`Statement`] is bound to one configured collection path and turns scopes and
//! documents into [`RequestDescriptor`]s. Reads compile to
//!
//! ```text
//! <prepend>SELECT <select> FROM <source> [<join> ][WHERE<where>][GROUP BY <terms> ][ORDER BY <terms> ]LIMIT <offset>, <limit>
//! ```
//!
//! and every other operation maps to a fixed method and path suffix. All input is
//! validated before a descriptor is produced.

use serde_json::Value;
use tracing::warn;

use crate::{
    document::{encode_document, invalid_document},
    error::{ClientError, ClientResult},
    escape::{scalar_text, url_encode},
    request::{Method, QUERY_ACTION, RequestDescriptor, STATUS_ACTION},
    scope::Scope,
    update::{as_update_document, update_clause},
};

/// Body that opens a transaction.
pub const BEGIN_TRANSACTION: &str = "BEGIN_TRANSACTION";
/// Body that rolls back the open transaction.
pub const ROLLBACK: &str = "ROLLBACK";
/// Body that commits the open transaction.
pub const COMMIT: &str = "COMMIT";

/// Assembles requests against one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    database: String,
}

impl Statement {
    /// Creates an assembler for a collection path such as `"account.database"`.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
        }
    }

    /// Returns the configured collection path.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Returns the source name: the last dot-separated segment of the collection path.
    pub fn source(&self) -> &str {
        self.database
            .rsplit('.')
            .next()
            .unwrap_or(self.database.as_str())
    }

    /// Compiles a scope into query text without building a request.
    pub fn compile_query(&self, scope: &Scope) -> String {
        let mut query = format!(
            "{}SELECT {} FROM {} ",
            scope.prepend,
            scope.select,
            self.view_source(scope)
        );

        if let Some(join) = &scope.join {
            query.push_str(join);
            query.push(' ');
        }
        if !scope.where_clause.is_empty() {
            query.push_str("WHERE");
            query.push_str(&scope.where_clause);
        }
        if !scope.group_by.is_empty() {
            query.push_str(&format!("GROUP BY {} ", scope.group_by.join(", ")));
        }
        if !scope.order_by.is_empty() {
            query.push_str(&format!("ORDER BY {} ", scope.order_by.join(", ")));
        }
        query.push_str(&format!("LIMIT {}, {}", scope.offset, scope.limit));

        query
    }

    /// Builds a query request for a scope.
    pub fn select(&self, scope: &Scope, multiple: bool) -> RequestDescriptor {
        RequestDescriptor::query(self.compile_query(scope)).multiple(multiple)
    }

    /// Builds a query request returning only the first matching record.
    pub fn first(&self, scope: &Scope) -> RequestDescriptor {
        let scope = Scope {
            limit: 1,
            ..scope.clone()
        };
        self.select(&scope, false)
    }

    /// Builds a request retrieving one record by id.
    pub fn find(&self, id: &Value) -> ClientResult<RequestDescriptor> {
        let id = record_id("->find()", id)?;
        Ok(RequestDescriptor::new(Method::Get, selector(&id), ""))
    }

    /// Builds a request deleting one record by id.
    pub fn delete(&self, id: &Value) -> ClientResult<RequestDescriptor> {
        let id = record_id("->delete()", id)?;
        Ok(RequestDescriptor::new(Method::Delete, selector(&id), ""))
    }

    /// Builds a request deleting several records.
    ///
    /// Ids are cast to text: `true` becomes `"1"`, `false` and `null` become `""`.
    pub fn delete_many(&self, ids: &Value) -> ClientResult<RequestDescriptor> {
        let invalid = || ClientError::invalid_argument("->deleteMany()", "\"_id\" is not in valid format.");

        let ids = ids
            .as_array()
            .ok_or_else(invalid)?
            .iter()
            .map(|id| scalar_text(id).map(Value::String).ok_or_else(invalid))
            .collect::<ClientResult<Vec<_>>>()?;

        Ok(RequestDescriptor::new(
            Method::Delete,
            "",
            serde_json::to_string(&ids)?,
        ))
    }

    /// Builds a request inserting one document.
    pub fn insert_one(&self, document: &Value) -> ClientResult<RequestDescriptor> {
        Ok(RequestDescriptor::new(Method::Post, "", encode_document(document)?))
    }

    /// Builds a request inserting several documents.
    ///
    /// A mapping of documents is reduced to its values in key order.
    pub fn insert_many(&self, documents: &Value) -> ClientResult<RequestDescriptor> {
        let documents = match documents {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            Value::Object(map) => map.values().collect::<Vec<_>>(),
            other => return Err(invalid_document(other)),
        };
        if let Some(invalid) = documents.iter().find(|document| !document.is_object()) {
            return Err(invalid_document(invalid));
        }

        Ok(RequestDescriptor::new(Method::Post, "", serde_json::to_string(&documents)?).multiple(true))
    }

    /// Builds a request updating one record.
    ///
    /// Text is sent verbatim as a `PATCH`. A mapping is compiled into an `UPDATE`
    /// statement executed through the query endpoint.
    pub fn update(&self, id: &Value, document: &Value) -> ClientResult<RequestDescriptor> {
        let id = record_id("->update()", id)?;

        match document {
            Value::String(text) => Ok(RequestDescriptor::new(Method::Patch, selector(&id), text.clone())),
            document => {
                let clause = update_clause(as_update_document(document)?)?;
                Ok(RequestDescriptor::query(format!(
                    "UPDATE {}[\"{id}\"] SET {clause}",
                    self.source()
                )))
            }
        }
    }

    /// Builds a request replacing one record entirely.
    pub fn replace(&self, id: &Value, document: &Value) -> ClientResult<RequestDescriptor> {
        let id = record_id("->replace()", id)?;
        Ok(RequestDescriptor::new(Method::Put, selector(&id), encode_document(document)?))
    }

    /// Builds a request executing query text verbatim.
    pub fn raw(&self, query: impl Into<String>) -> RequestDescriptor {
        RequestDescriptor::query(query).multiple(true)
    }

    /// Builds a request opening a transaction.
    pub fn begin_transaction(&self) -> RequestDescriptor {
        RequestDescriptor::query(BEGIN_TRANSACTION)
    }

    /// Builds a request rolling back the open transaction.
    pub fn rollback_transaction(&self) -> RequestDescriptor {
        RequestDescriptor::query(ROLLBACK)
    }

    /// Builds a request committing the open transaction.
    pub fn commit_transaction(&self) -> RequestDescriptor {
        RequestDescriptor::query(COMMIT)
    }

    /// Builds a request for the collection status.
    pub fn status(&self) -> RequestDescriptor {
        RequestDescriptor::new(Method::Get, STATUS_ACTION, "").multiple(true)
    }

    /// Source wrapped in at most one view. `LIST_WORDS` takes precedence over `ALTERNATIVES`.
    fn view_source(&self, scope: &Scope) -> String {
        let (view, field) = match (&scope.list_words_field, &scope.alternatives_field) {
            (Some(field), alternatives) => {
                if alternatives.is_some() {
                    warn!(
                        collection = %self.database,
                        "both LIST_WORDS and ALTERNATIVES requested, using LIST_WORDS"
                    );
                }
                ("LIST_WORDS", field)
            }
            (None, Some(field)) => ("ALTERNATIVES", field),
            (None, None) => return self.source().to_string(),
        };

        if field.is_empty() {
            format!("{view}({})", self.source())
        } else {
            format!("{view}({}.{field})", self.source())
        }
    }
}

/// Renders a record id, which must be text or a number.
fn record_id(operation: &'static str, id: &Value) -> ClientResult<String> {
    match id {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        _ => Err(ClientError::invalid_argument(operation, "\"_id\" is not in valid format.")),
    }
}

fn selector(id: &str) -> String {
    format!("[{}]", url_encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{update::guard_statement, value::key};
    use rstest::rstest;
    use serde_json::json;

    fn statement() -> Statement {
        Statement::new("100.books")
    }

    #[rstest]
    #[case("books", "books")]
    #[case("100.books", "books")]
    #[case("a.b.c", "c")]
    fn test_source_takes_last_segment(#[case] database: &str, #[case] expected: &str) {
        assert_eq!(Statement::new(database).source(), expected);
    }

    #[rstest]
    fn test_compile_default_scope() {
        assert_eq!(
            statement().compile_query(&Scope::new()),
            "SELECT * FROM books LIMIT 0, 20"
        );
    }

    #[rstest]
    fn test_compile_full_scope() {
        let scope = Scope::new()
            .select(vec!["title".into(), key("year")])
            .unwrap()
            .filter_eq("author", "Tolkien")
            .unwrap()
            .filter(key("year"), "<", 1960)
            .unwrap()
            .group_by("author")
            .unwrap()
            .order_by(key("year"), "asc")
            .unwrap()
            .order_by("title", "")
            .unwrap()
            .limit(5)
            .unwrap()
            .offset(10)
            .unwrap()
            .join("JOIN authors ON author")
            .prepend("/* trace */ ");

        assert_eq!(
            statement().compile_query(&scope),
            concat!(
                r#"/* trace */ SELECT title, this["year"] as "year" FROM books JOIN authors ON author "#,
                r#"WHERE author=="Tolkien" && this["year"]<1960 "#,
                "GROUP BY author ",
                r#"ORDER BY this["year"] ASC, title DESC "#,
                "LIMIT 10, 5",
            )
        );
    }

    #[rstest]
    #[case(Scope::new().list_words(""), "SELECT * FROM LIST_WORDS(books) LIMIT 0, 20")]
    #[case(Scope::new().list_words("title"), "SELECT * FROM LIST_WORDS(books.title) LIMIT 0, 20")]
    #[case(Scope::new().alternatives(""), "SELECT * FROM ALTERNATIVES(books) LIMIT 0, 20")]
    #[case(Scope::new().alternatives("title"), "SELECT * FROM ALTERNATIVES(books.title) LIMIT 0, 20")]
    #[case(
        Scope::new().alternatives("author").list_words("title"),
        "SELECT * FROM LIST_WORDS(books.title) LIMIT 0, 20"
    )]
    fn test_view_wrappers(#[case] scope: Scope, #[case] expected: &str) {
        assert_eq!(statement().compile_query(&scope), expected);
    }

    #[rstest]
    fn test_compiling_twice_is_identical() {
        let scope = Scope::new().filter_eq("a", json!({"b": [1, 2]})).unwrap();
        let statement = statement();

        assert_eq!(statement.compile_query(&scope), statement.compile_query(&scope));
    }

    #[rstest]
    fn test_select_request() {
        let request = statement().select(&Scope::new(), true);

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.action, "/_query");
        assert_eq!(request.query, "SELECT * FROM books LIMIT 0, 20");
        assert!(request.multiple);
    }

    #[rstest]
    fn test_first_limits_to_one() {
        let request = statement().first(&Scope::new().offset(3).unwrap());

        assert_eq!(request.query, "SELECT * FROM books LIMIT 3, 1");
        assert!(!request.multiple);
    }

    #[rstest]
    #[case(json!("abc"), "[abc]")]
    #[case(json!(42), "[42]")]
    #[case(json!("a b/c"), "[a+b%2Fc]")]
    fn test_find(#[case] id: Value, #[case] action: &str) {
        let request = statement().find(&id).unwrap();

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.action, action);
        assert!(!request.multiple);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(true))]
    #[case(json!(["a"]))]
    fn test_find_rejects_invalid_id(#[case] id: Value) {
        let err = statement().find(&id).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument { operation: "->find()", .. }));
    }

    #[rstest]
    fn test_delete() {
        let request = statement().delete(&json!("x1")).unwrap();

        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.action, "[x1]");
        assert!(statement().delete(&json!({})).is_err());
    }

    #[rstest]
    fn test_delete_many_forces_text_ids() {
        let request = statement().delete_many(&json!([1, "2", 3.5])).unwrap();

        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.action, "");
        assert_eq!(request.query, r#"["1","2","3.5"]"#);
    }

    #[rstest]
    fn test_delete_many_casts_booleans_and_null() {
        let request = statement().delete_many(&json!([true, false, null, 2.0])).unwrap();
        assert_eq!(request.query, r#"["1","","","2"]"#);
    }

    #[rstest]
    #[case(json!("1,2"))]
    #[case(json!([[1]]))]
    #[case(json!([{"id": 1}]))]
    fn test_delete_many_rejects_invalid_ids(#[case] ids: Value) {
        assert!(statement().delete_many(&ids).is_err());
    }

    #[rstest]
    fn test_insert_one() {
        let request = statement().insert_one(&json!({"title": "It's"})).unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.action, "");
        assert_eq!(request.query, r#"{"title" : "It's"}"#);
        assert!(!request.multiple);
    }

    #[rstest]
    fn test_insert_many_from_sequence() {
        let request = statement()
            .insert_many(&json!([{"a": 1}, {"a": 2}]))
            .unwrap();

        assert_eq!(request.query, r#"[{"a":1},{"a":2}]"#);
        assert!(request.multiple);
    }

    #[rstest]
    fn test_insert_many_from_keyed_mapping() {
        let request = statement()
            .insert_many(&json!({"first": {"a": 1}, "second": {"a": 2}}))
            .unwrap();

        assert_eq!(request.query, r#"[{"a":1},{"a":2}]"#);
    }

    #[rstest]
    #[case(json!("doc"))]
    #[case(json!([1, 2]))]
    fn test_insert_many_rejects_non_documents(#[case] documents: Value) {
        assert!(statement().insert_many(&documents).is_err());
    }

    #[rstest]
    fn test_update_with_text_is_patch() {
        let request = statement()
            .update(&json!("7"), &json!("{\"a\": 1}"))
            .unwrap();

        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.action, "[7]");
        assert_eq!(request.query, "{\"a\": 1}");
    }

    #[rstest]
    fn test_update_with_mapping_compiles_statement() {
        let request = statement()
            .update(&json!("7"), &json!({"price": 10}))
            .unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.action, "/_query");
        assert_eq!(
            request.query,
            format!("UPDATE books[\"7\"] SET {} price = 10;", guard_statement("price"))
        );
    }

    #[rstest]
    fn test_update_rejects_other_documents() {
        let err = statement().update(&json!("7"), &json!(5)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument { operation: "->update()", .. }));
    }

    #[rstest]
    fn test_replace() {
        let request = statement()
            .replace(&json!(3), &json!({"k": "v\"v"}))
            .unwrap();

        assert_eq!(request.method, Method::Put);
        assert_eq!(request.action, "[3]");
        assert_eq!(request.query, r#"{"k" : "v\"v"}"#);
    }

    #[rstest]
    fn test_raw() {
        let request = statement().raw("SELECT * FROM books");

        assert_eq!(request.action, "/_query");
        assert_eq!(request.query, "SELECT * FROM books");
        assert!(request.multiple);
    }

    #[rstest]
    #[case(statement().begin_transaction(), "BEGIN_TRANSACTION")]
    #[case(statement().rollback_transaction(), "ROLLBACK")]
    #[case(statement().commit_transaction(), "COMMIT")]
    fn test_transactions(#[case] request: RequestDescriptor, #[case] body: &str) {
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.action, "/_query");
        assert_eq!(request.query, body);
    }

    #[rstest]
    fn test_status() {
        let request = statement().status();

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.action, "/_status");
        assert_eq!(request.query, "");
        assert!(request.multiple);
    }
}
