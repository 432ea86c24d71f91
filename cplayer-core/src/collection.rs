//! Collection handle executing assembled requests.
//!
//! A [`Collection`] pairs a [`Statement`] assembler with a borrowed [`Transport`]. Every
//! operation validates and assembles its request first, then hands it to the transport
//! exactly once. Nothing is sent when validation fails.
//!
//! # Example
//!
//! ```ignore
//! use cplayer::prelude::*;
//! use serde_json::json;
//!
//! let books = client.collection("100.books");
//!
//! books.insert_one(&json!({"title": "The Hobbit", "year": 1937})).await?;
//!
//! let scope = books.scope().filter("year", "<", 1960)?.order_by("year", "asc")?;
//! let response = books.get(&scope).await?;
//! ```

use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    error::ClientResult,
    request::RequestDescriptor,
    scope::Scope,
    statement::Statement,
    transport::Transport,
};

/// A collection bound to a transport.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the transport reference
/// * `T` - The transport type
#[derive(Debug)]
pub struct Collection<'a, T: Transport> {
    statement: Statement,
    defaults: Scope,
    transport: &'a T,
}

impl<'a, T: Transport> Collection<'a, T> {
    /// Creates a new collection handle (internal use).
    pub(crate) fn new(statement: Statement, defaults: Scope, transport: &'a T) -> Self {
        Self {
            statement,
            defaults,
            transport,
        }
    }

    /// Returns the collection path this handle targets.
    pub fn name(&self) -> &str {
        self.statement.database()
    }

    /// Returns the statement assembler used by this handle.
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Returns a fresh scope carrying the configured pagination defaults.
    pub fn scope(&self) -> Scope {
        self.defaults.clone()
    }

    /// Compiles a scope into query text without sending anything.
    pub fn to_query(&self, scope: &Scope) -> String {
        self.statement.compile_query(scope)
    }

    /// Runs the query described by `scope` and returns all matching records.
    pub async fn get(&self, scope: &Scope) -> ClientResult<Value> {
        self.send(self.statement.select(scope, true)).await
    }

    /// Runs the query described by `scope` and returns the first matching record.
    pub async fn first(&self, scope: &Scope) -> ClientResult<Value> {
        self.send(self.statement.first(scope)).await
    }

    /// Retrieves one record by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`](crate::error::ClientError::InvalidArgument)
    /// if `id` is neither text nor a number.
    pub async fn find(&self, id: impl Into<Value>) -> ClientResult<Value> {
        self.send(self.statement.find(&id.into())?).await
    }

    /// Inserts one document.
    pub async fn insert_one(&self, document: &Value) -> ClientResult<Value> {
        self.send(self.statement.insert_one(document)?).await
    }

    /// Inserts a sequence (or keyed mapping) of documents.
    pub async fn insert_many(&self, documents: &Value) -> ClientResult<Value> {
        self.send(self.statement.insert_many(documents)?).await
    }

    /// Updates one record with a partial document or a verbatim patch body.
    pub async fn update(&self, id: impl Into<Value>, document: &Value) -> ClientResult<Value> {
        self.send(self.statement.update(&id.into(), document)?).await
    }

    /// Replaces one record entirely.
    pub async fn replace(&self, id: impl Into<Value>, document: &Value) -> ClientResult<Value> {
        self.send(self.statement.replace(&id.into(), document)?).await
    }

    /// Deletes one record by id.
    pub async fn delete(&self, id: impl Into<Value>) -> ClientResult<Value> {
        self.send(self.statement.delete(&id.into())?).await
    }

    /// Deletes several records by id.
    pub async fn delete_many(&self, ids: &Value) -> ClientResult<Value> {
        self.send(self.statement.delete_many(ids)?).await
    }

    /// Executes query text verbatim.
    pub async fn raw(&self, query: impl Into<String>) -> ClientResult<Value> {
        self.send(self.statement.raw(query)).await
    }

    /// Opens a transaction.
    pub async fn begin_transaction(&self) -> ClientResult<Value> {
        self.send(self.statement.begin_transaction()).await
    }

    /// Rolls back the open transaction.
    pub async fn rollback_transaction(&self) -> ClientResult<Value> {
        self.send(self.statement.rollback_transaction()).await
    }

    /// Commits the open transaction.
    pub async fn commit_transaction(&self) -> ClientResult<Value> {
        self.send(self.statement.commit_transaction()).await
    }

    /// Retrieves the collection status.
    pub async fn status(&self) -> ClientResult<Value> {
        self.send(self.statement.status()).await
    }

    async fn send(&self, request: RequestDescriptor) -> ClientResult<Value> {
        debug!(
            collection = %self.name(),
            method = %request.method,
            action = %request.action,
            multiple = request.multiple,
            "executing request"
        );
        trace!(query = %request.query, "request body");

        self.transport.execute(request).await
    }
}
