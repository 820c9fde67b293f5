use crate::domain::ports::{GatewayRequest, HttpTransport};
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Failure(String),
}

/// A scripted in-memory transport.
///
/// Replies are handed out in the order they were queued, and every request is recorded.
/// Clones share the same script and log, so a test can keep one handle while the gateway
/// owns another.
#[derive(Debug, Default, Clone)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<GatewayRequest>>>,
}

impl MockTransport {
    /// Creates a transport with nothing queued; any call fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that answers with `bodies`, one per call.
    pub fn with_responses<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies: VecDeque<Reply> = bodies.into_iter().map(|b| Reply::Body(b.into())).collect();
        Self {
            replies: Arc::new(Mutex::new(replies)),
            requests: Arc::default(),
        }
    }

    pub async fn push_response(&self, body: impl Into<String>) {
        self.replies.lock().await.push_back(Reply::Body(body.into()));
    }

    /// Queues a connection failure.
    pub async fn push_failure(&self, reason: impl Into<String>) {
        self.replies
            .lock()
            .await
            .push_back(Reply::Failure(reason.into()));
    }

    /// Requests sent so far, oldest first.
    pub async fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn pending(&self) -> usize {
        self.replies.lock().await.len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: GatewayRequest) -> Result<String> {
        self.requests.lock().await.push(request);
        match self.replies.lock().await.pop_front() {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Failure(reason)) => Err(GatewayError::TransportError(reason)),
            None => Err(GatewayError::TransportError(
                "no scripted response left".to_string(),
            )),
        }
    }
}
