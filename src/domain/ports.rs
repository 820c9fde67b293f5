use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Post => f.write_str("POST"),
            HttpMethod::Put => f.write_str("PUT"),
        }
    }
}

/// A fully built call to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Value,
    pub headers: Vec<(String, String)>,
}

/// Sends requests to the gateway and hands back the raw response body.
///
/// Implementations must return the body for any HTTP status: the gateway reports declines
/// as HTTP 400 with a JSON body. Only connectivity problems are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: GatewayRequest) -> Result<String>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

pub type HttpTransportBox = Box<dyn HttpTransport>;
pub type ClockBox = Box<dyn Clock>;
