//! In-memory transport for cplayer.
//!
//! This crate provides a thread-safe [`Transport`](cplayer_core::transport::Transport)
//! that never touches the network. It records every request it receives and answers
//! with queued canned responses, which makes it suitable for dry runs and tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use cplayer::{prelude::*, memory::RecordingTransport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> ClientResult<()> {
//!     let transport = RecordingTransport::builder()
//!         .response(json!({"results": []}))
//!         .build()
//!         .await?;
//!     let client = Client::new(transport, ClientConfig::builder("100.books").build()?);
//!
//!     client.default_collection().status().await?;
//!     assert_eq!(client.transport().requests().await.len(), 1);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as cplayer_memory;

pub mod transport;

pub use transport::{RecordingTransport, RecordingTransportBuilder};
