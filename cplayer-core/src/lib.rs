//! Query and update compiler for the Clusterpoint document database REST API.
//!
//! This crate is the core of the cplayer project and provides:
//!
//! - **Tagged operands** ([`value`]) - Literal values, field references and raw expressions
//! - **Literal encoding** ([`escape`]) - Escaping, quoting and field accessor syntax
//! - **Clause compilers** ([`clause`]) - `SELECT`, `WHERE`, `ORDER BY`, `GROUP BY` and `LIMIT` fragments
//! - **Update compilation** ([`update`]) - Nested update documents flattened into guarded assignments
//! - **Document encoding** ([`document`]) - Object literals for insert and replace payloads
//! - **Scopes** ([`scope`]) - Immutable builder accumulating one read operation
//! - **Statement assembly** ([`statement`]) - Query text and request descriptors for every operation
//! - **Requests and transport** ([`request`], [`transport`]) - The seam to the REST layer
//! - **Collections and clients** ([`collection`], [`client`], [`config`]) - Async execution surface
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use cplayer::{statement::Statement, scope::Scope, value::key};
//!
//! let scope = Scope::new()
//!     .select(vec!["title".into(), key("year")])?
//!     .filter("year", "<", 1960)?;
//!
//! assert_eq!(
//!     Statement::new("100.books").compile_query(&scope),
//!     r#"SELECT title, this["year"] as "year" FROM books WHERE year<1960 LIMIT 0, 20"#,
//! );
//! ```

#[allow(unused_extern_crates)]
extern crate self as cplayer_core;

pub mod clause;
pub mod client;
pub mod collection;
pub mod config;
pub mod document;
pub mod error;
pub mod escape;
pub mod request;
pub mod scope;
pub mod statement;
pub mod transport;
pub mod update;
pub mod value;
