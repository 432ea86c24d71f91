//! Request descriptors handed to the transport.
//!
//! A [`RequestDescriptor`] is everything the REST layer needs to dispatch one
//! operation: the HTTP method, the path suffix appended to the collection URL, the
//! request body and whether the response holds a list of records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path suffix of the query execution endpoint.
pub const QUERY_ACTION: &str = "/_query";
/// Path suffix of the status endpoint.
pub const STATUS_ACTION: &str = "/_status";

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled request, consumed once by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Path suffix: empty, `/_query`, `/_status` or a `[<id>]` selector.
    pub action: String,
    /// Request body: query text or a JSON payload.
    pub query: String,
    /// Whether the response represents a collection of records.
    pub multiple: bool,
}

impl RequestDescriptor {
    /// Creates a descriptor returning a single record.
    pub fn new(method: Method, action: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            method,
            action: action.into(),
            query: query.into(),
            multiple: false,
        }
    }

    /// Creates a `POST /_query` descriptor carrying `query`.
    pub fn query(query: impl Into<String>) -> Self {
        Self::new(Method::Post, QUERY_ACTION, query)
    }

    /// Sets whether the response represents a collection of records.
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_query_descriptor() {
        let request = RequestDescriptor::query("COMMIT");

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.action, "/_query");
        assert_eq!(request.query, "COMMIT");
        assert!(!request.multiple);
    }

    #[rstest]
    fn test_serializes_method_upper_case() {
        let request = RequestDescriptor::new(Method::Patch, "[1]", "{}").multiple(true);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"method": "PATCH", "action": "[1]", "query": "{}", "multiple": true})
        );
    }

    #[rstest]
    #[case(Method::Get, "GET")]
    #[case(Method::Delete, "DELETE")]
    fn test_method_display(#[case] method: Method, #[case] expected: &str) {
        assert_eq!(method.to_string(), expected);
    }
}
