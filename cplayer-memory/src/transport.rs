//! Recording transport implementation.
//!
//! Requests are appended to a log and answered from a FIFO queue of responses,
//! both guarded by async-aware read-write locks.

use std::{collections::VecDeque, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use serde_json::Value;
use tracing::debug;

use cplayer_core::{
    error::{ClientError, ClientResult},
    request::RequestDescriptor,
    transport::{Transport, TransportBuilder},
};

/// A queued answer: a response body or a transport failure.
type Reply = ClientResult<Value>;

/// Thread-safe transport that records requests instead of sending them.
///
/// `RecordingTransport` is cloneable and uses `Arc`-wrapped state, so clones share the
/// same request log and response queue. When the queue is empty every request is
/// answered with `null`.
#[derive(Default, Clone, Debug)]
pub struct RecordingTransport {
    /// Every request received, in arrival order
    requests: Arc<RwLock<Vec<RequestDescriptor>>>,
    /// Pending replies, consumed front to back
    replies: Arc<RwLock<VecDeque<Reply>>>,
}

impl RecordingTransport {
    /// Creates a transport with an empty log and no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for a transport with pre-queued responses.
    pub fn builder() -> RecordingTransportBuilder {
        RecordingTransportBuilder::default()
    }

    /// Queues a response body for a future request.
    pub async fn push_response(&self, response: Value) {
        self.replies.write().await.push_back(Ok(response));
    }

    /// Queues a transport failure for a future request.
    pub async fn push_failure(&self, message: impl Into<String>) {
        self.replies
            .write()
            .await
            .push_back(Err(ClientError::Transport(message.into())));
    }

    /// Returns a copy of every request received so far.
    pub async fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.read().await.clone()
    }

    /// Returns the most recent request, if any.
    pub async fn last_request(&self) -> Option<RequestDescriptor> {
        self.requests.read().await.last().cloned()
    }

    /// Forgets all recorded requests and queued responses.
    pub async fn clear(&self) {
        self.requests.write().await.clear();
        self.replies.write().await.clear();
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: RequestDescriptor) -> ClientResult<Value> {
        debug!(method = %request.method, action = %request.action, "recording request");
        self.requests.write().await.push(request);

        self.replies
            .write()
            .await
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}

/// Builder for constructing [`RecordingTransport`] instances.
///
/// # Example
///
/// ```ignore
/// use cplayer_memory::RecordingTransport;
/// use cplayer_core::transport::TransportBuilder;
///
/// let transport = RecordingTransport::builder()
///     .response(serde_json::json!({"ok": true}))
///     .build()
///     .await?;
/// ```
#[derive(Default, Debug)]
pub struct RecordingTransportBuilder {
    replies: VecDeque<Reply>,
}

impl RecordingTransportBuilder {
    /// Queues a response body.
    pub fn response(mut self, response: Value) -> Self {
        self.replies.push_back(Ok(response));
        self
    }

    /// Queues a transport failure.
    pub fn failure(mut self, message: impl Into<String>) -> Self {
        self.replies
            .push_back(Err(ClientError::Transport(message.into())));
        self
    }
}

#[async_trait]
impl TransportBuilder for RecordingTransportBuilder {
    type Transport = RecordingTransport;

    /// Builds a transport answering with the queued replies in order.
    async fn build(self) -> ClientResult<Self::Transport> {
        Ok(RecordingTransport {
            requests: Arc::new(RwLock::new(Vec::new())),
            replies: Arc::new(RwLock::new(self.replies)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cplayer_core::request::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_records_requests_in_order() {
        let transport = RecordingTransport::new();

        transport.execute(RequestDescriptor::query("BEGIN_TRANSACTION")).await.unwrap();
        transport.execute(RequestDescriptor::query("COMMIT")).await.unwrap();

        let bodies = transport
            .requests()
            .await
            .into_iter()
            .map(|request| request.query)
            .collect::<Vec<_>>();
        assert_eq!(bodies, vec!["BEGIN_TRANSACTION", "COMMIT"]);
    }

    #[tokio::test]
    async fn test_replies_are_consumed_fifo() {
        let transport = RecordingTransport::builder()
            .response(json!(1))
            .failure("connection reset")
            .build()
            .await
            .unwrap();
        transport.push_response(json!(3)).await;

        let request = RequestDescriptor::new(Method::Get, "/_status", "");
        assert_eq!(transport.execute(request.clone()).await.unwrap(), json!(1));
        assert_eq!(
            transport.execute(request.clone()).await.unwrap_err(),
            ClientError::Transport("connection reset".into())
        );
        assert_eq!(transport.execute(request.clone()).await.unwrap(), json!(3));
        assert_eq!(transport.execute(request).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_clones_share_state_and_clear() {
        let transport = RecordingTransport::new();
        let clone = transport.clone();

        clone.execute(RequestDescriptor::query("ROLLBACK")).await.unwrap();
        assert_eq!(transport.last_request().await.unwrap().query, "ROLLBACK");

        transport.clear().await;
        assert!(clone.requests().await.is_empty());
    }
}
