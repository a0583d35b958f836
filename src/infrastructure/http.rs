use crate::domain::ports::Transport;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTPS transport backed by a pooled `reqwest` client.
///
/// Any non-2xx status is reported as a transport failure; the body is only
/// returned for successful responses.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a 30s request timeout and a 10s connect timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeouts(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .https_only(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    // The URL carries the merchant token, so it is never recorded on the span.
    #[instrument(skip_all)]
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await.map_err(without_url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Transport(format!(
                "processor answered with HTTP {status}"
            )));
        }
        let body = response.bytes().await.map_err(without_url)?;
        debug!(status = %status, bytes = body.len(), "received processor response");
        Ok(body.to_vec())
    }
}

// reqwest errors quote the request URL, which carries the merchant token.
fn without_url(err: reqwest::Error) -> GatewayError {
    GatewayError::Http(err.without_url())
}
