//! Main cplayer crate providing a typed client for the Clusterpoint REST API.
//!
//! This crate is the primary entry point for users of the cplayer project. It
//! re-exports the query compilers and request model from `cplayer-core` and the
//! in-memory transport from `cplayer-memory`.
//!
//! # Features
//!
//! - **Fluent scopes** - Build `SELECT` queries from validated clause fragments
//! - **Update compilation** - Nested partial documents become guarded `UPDATE ... SET` scripts
//! - **Exact literal encoding** - Escaping and quoting match the server's query language
//! - **Pluggable transport** - Bring any HTTP stack by implementing one async trait
//!
//! # Quick Start
//!
//! ```ignore
//! use cplayer::{prelude::*, memory::RecordingTransport, value::key};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> ClientResult<()> {
//!     let client = Client::new(
//!         RecordingTransport::new(),
//!         ClientConfig::builder("100.books").build()?,
//!     );
//!     let books = client.default_collection();
//!
//!     // Partial update of a nested document
//!     books.update("42", &json!({"stock": {"warehouse": 3}})).await?;
//!
//!     // Query with a field reference and ordering
//!     let scope = books
//!         .scope()
//!         .select(vec!["title".into(), key("year")])?
//!         .filter(key("year"), "<", 1960)?
//!         .order_by("title", "asc")?;
//!
//!     println!("{}", books.to_query(&scope));
//!     books.get(&scope).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Transports
//!
//! - [`memory`] - Recording transport for dry runs and testing

pub mod prelude;

pub use cplayer_core::{
    clause, client, collection, config, document, error, escape, request, scope, statement,
    transport, update, value,
};

// Re-export JSON types for convenience
pub use serde_json;

/// In-memory transport implementations.
pub mod memory {
    pub use cplayer_memory::{RecordingTransport, RecordingTransportBuilder};
}
