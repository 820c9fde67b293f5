use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Invalid gateway response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Invalid authorization: {0}")]
    InvalidAuthorization(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl GatewayError {
    /// True for failures of the underlying connection rather than of the adapter itself.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::TransportError(_))
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
