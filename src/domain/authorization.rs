use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DELIMITER: char = '|';

/// Reference to a transaction already known to the gateway.
///
/// `Single` carries only the purchase number the transaction was opened with. `Pair` also
/// carries the gateway's own transaction id (`ID_UNICO`), which is what the unsettled-refund
/// fallback needs. The string form is `purchase_number` or `purchase_number|transaction_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AuthRef {
    Single(String),
    Pair(String, String),
}

impl AuthRef {
    /// Builds a reference, collapsing a blank transaction id into `Single`.
    pub fn from_parts(purchase_number: impl Into<String>, transaction_id: Option<&str>) -> Self {
        let purchase_number = purchase_number.into();
        match transaction_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => AuthRef::Pair(purchase_number, id.to_string()),
            None => AuthRef::Single(purchase_number),
        }
    }

    pub fn purchase_number(&self) -> &str {
        match self {
            AuthRef::Single(purchase_number) | AuthRef::Pair(purchase_number, _) => purchase_number,
        }
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            AuthRef::Single(_) => None,
            AuthRef::Pair(_, transaction_id) => Some(transaction_id),
        }
    }
}

impl fmt::Display for AuthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthRef::Single(purchase_number) => f.write_str(purchase_number),
            AuthRef::Pair(purchase_number, transaction_id) => {
                write!(f, "{purchase_number}{DELIMITER}{transaction_id}")
            }
        }
    }
}

impl FromStr for AuthRef {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        let (primary, secondary) = match s.split_once(DELIMITER) {
            Some((primary, secondary)) => (primary.trim(), Some(secondary.trim())),
            None => (s.trim(), None),
        };

        if primary.is_empty() {
            return Err(GatewayError::InvalidAuthorization(format!(
                "missing purchase number in '{s}'"
            )));
        }
        if secondary.is_some_and(|id| id.contains(DELIMITER)) {
            return Err(GatewayError::InvalidAuthorization(format!(
                "too many identifiers in '{s}'"
            )));
        }

        Ok(Self::from_parts(primary, secondary))
    }
}

impl TryFrom<String> for AuthRef {
    type Error = GatewayError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AuthRef> for String {
    fn from(reference: AuthRef) -> Self {
        reference.to_string()
    }
}
