use crate::domain::ports::{GatewayRequest, HttpMethod, HttpTransport};
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Production transport over `reqwest`.
///
/// Cloning is cheap; clones share the client's connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeouts(CONNECT_TIMEOUT, REQUEST_TIMEOUT)
    }

    pub fn with_timeouts(connect: Duration, request: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect)
            .timeout(request)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: GatewayRequest) -> Result<String> {
        let builder = match request.method {
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value));

        let response = builder
            .body(serde_json::to_string(&request.body)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }

        debug!(status = status.as_u16(), url = %request.url, "gateway answered with an error status");
        // Declines arrive as JSON with a 4xx/5xx status. A server error without a JSON body
        // comes from something in front of the gateway.
        if status.is_server_error() && serde_json::from_str::<serde_json::Value>(&body).is_err() {
            return Err(GatewayError::TransportError(format!(
                "{} answered {status} without a gateway response",
                request.url
            )));
        }
        Ok(body)
    }
}
