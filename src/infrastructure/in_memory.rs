use crate::domain::ports::Transport;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory transport that replays queued response bodies.
///
/// Every requested URL is recorded, so callers can check what would have
/// been sent. Cloning shares the queue and the request log.
#[derive(Default, Clone)]
pub struct CannedTransport {
    responses: Arc<RwLock<VecDeque<Result<Vec<u8>>>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl CannedTransport {
    /// Creates a new transport with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that answers the first call with `body`.
    pub fn replying(body: impl Into<Vec<u8>>) -> Self {
        Self {
            responses: Arc::new(RwLock::new(VecDeque::from([Ok(body.into())]))),
            requests: Arc::default(),
        }
    }

    pub async fn push_response(&self, body: impl Into<Vec<u8>>) {
        self.responses.write().await.push_back(Ok(body.into()));
    }

    pub async fn push_failure(&self, reason: impl Into<String>) {
        self.responses
            .write()
            .await
            .push_back(Err(GatewayError::Transport(reason.into())));
    }

    /// URLs requested so far, oldest first.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.write().await.push(url.to_string());
        self.responses
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no canned response queued".to_string())))
    }
}
