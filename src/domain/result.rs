use super::authorization::AuthRef;
use serde::Serialize;
use serde_json::Value;

/// Normalized outcome of one logical payment operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionResult {
    /// True iff the gateway answered with `errorCode` 0.
    pub success: bool,
    pub message: String,
    /// The gateway's `errorCode`, only present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    /// Reference to feed into capture, void or refund.
    pub authorization: AuthRef,
    /// The complete response body, untouched.
    pub params: Value,
    /// Whether the gateway used was the test environment.
    pub test: bool,
}

impl TransactionResult {
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// A string field of the response's `data` block.
    pub fn data_field(&self, key: &str) -> Option<&str> {
        self.params
            .get("data")
            .and_then(|data| data.get(key))
            .and_then(Value::as_str)
    }
}
