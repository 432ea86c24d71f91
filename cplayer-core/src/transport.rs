//! The seam between request assembly and the REST layer.
//!
//! A [`Transport`] receives one fully assembled [`RequestDescriptor`] and returns the
//! parsed response. This crate never looks inside the response; it only forwards the
//! descriptor. Connection setup, authentication and retries all belong to the
//! implementation.
//!
//! # Example
//!
//! ```ignore
//! use cplayer::{transport::Transport, request::RequestDescriptor};
//!
//! let response = transport
//!     .execute(RequestDescriptor::query("SELECT * FROM books LIMIT 0, 20"))
//!     .await?;
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::{error::ClientResult, request::RequestDescriptor};

/// Dispatches assembled requests to the database.
///
/// Implementations must be thread-safe. Each descriptor is consumed exactly once.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Sends `request` and returns the parsed response body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`](crate::error::ClientError::Transport) when the
    /// request could not be delivered or the server rejected it.
    async fn execute(&self, request: RequestDescriptor) -> ClientResult<Value>;
}

#[async_trait]
impl<T> Transport for &T
where
    T: Transport,
{
    async fn execute(&self, request: RequestDescriptor) -> ClientResult<Value> {
        (*self).execute(request).await
    }
}

#[async_trait]
impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    async fn execute(&self, request: RequestDescriptor) -> ClientResult<Value> {
        (**self).execute(request).await
    }
}

/// Factory trait for creating transport instances.
#[async_trait]
pub trait TransportBuilder {
    /// The transport type produced by this builder.
    type Transport: Transport;

    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport could not be initialized.
    async fn build(self) -> ClientResult<Self::Transport>;
}
