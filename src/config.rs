use crate::error::{GatewayError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::str::FromStr;

pub const TEST_URL: &str = "https://devapi.vnforapps.com/api.tokenization/api/v2/merchant";
pub const LIVE_URL: &str = "https://api.vnforapps.com/api.tokenization/api/v2/merchant";

pub const ENV_MERCHANT_ID: &str = "VISANET_MERCHANT_ID";
pub const ENV_ACCESS_KEY_ID: &str = "VISANET_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "VISANET_SECRET_ACCESS_KEY";
pub const ENV_ENVIRONMENT: &str = "VISANET_ENVIRONMENT";

/// Which VisaNet deployment the adapter talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Test,
    Live,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Test => TEST_URL,
            Environment::Live => LIVE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "test" | "sandbox" => Ok(Environment::Test),
            "live" | "production" => Ok(Environment::Live),
            other => Err(GatewayError::ConfigError(format!(
                "unknown environment '{other}', expected 'test' or 'live'"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Test => f.write_str("test"),
            Environment::Live => f.write_str("live"),
        }
    }
}

/// Merchant credentials and endpoint selection.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    merchant_id: String,
    access_key_id: String,
    secret_access_key: String,
    environment: Environment,
    base_url: Option<String>,
}

impl GatewayConfig {
    pub fn new(
        merchant_id: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        environment: Environment,
    ) -> Result<Self> {
        let config = Self {
            merchant_id: merchant_id.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            environment,
            base_url: None,
        };

        for (name, value) in [
            ("merchant_id", &config.merchant_id),
            ("access_key_id", &config.access_key_id),
            ("secret_access_key", &config.secret_access_key),
        ] {
            if value.trim().is_empty() {
                return Err(GatewayError::ConfigError(format!("{name} must not be empty")));
            }
        }
        Ok(config)
    }

    /// Reads the configuration from `VISANET_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`GatewayConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| GatewayError::ConfigError(format!("{key} is not set")))
        };
        let environment = match lookup(ENV_ENVIRONMENT) {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        Self::new(
            required(ENV_MERCHANT_ID)?,
            required(ENV_ACCESS_KEY_ID)?,
            required(ENV_SECRET_ACCESS_KEY)?,
            environment,
        )
    }

    /// Sends requests to `base_url` instead of the environment's default host.
    /// The `test` flag on results still follows the environment.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn is_test(&self) -> bool {
        self.environment == Environment::Test
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    /// `{base_url}/{merchant_id}`, the root of every operation's URL.
    pub fn merchant_url(&self) -> String {
        format!("{}/{}", self.base_url(), self.merchant_id)
    }

    pub fn headers(&self) -> Vec<(String, String)> {
        let credentials = STANDARD.encode(format!(
            "{}:{}",
            self.access_key_id, self.secret_access_key
        ));
        vec![
            ("Authorization".to_string(), format!("Basic {credentials}")),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("merchant_id", &self.merchant_id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[FILTERED]")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url())
            .finish()
    }
}
