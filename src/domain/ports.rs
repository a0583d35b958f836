use crate::error::Result;
use async_trait::async_trait;

/// Outbound HTTPS access to the processor.
///
/// Implementations own connections, TLS and timeouts. A returned body is
/// handed to the XML parser untouched.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}

pub type TransportBox = Box<dyn Transport>;
