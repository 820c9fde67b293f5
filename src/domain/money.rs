use crate::error::{GatewayError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a positive amount in major currency units (soles, dollars).
///
/// The gateway expects amounts as decimal strings with exactly two fraction digits,
/// see [`Amount::to_gateway_string`]. Values are rounded to the cent on construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Rounds `value` to the cent, half away from zero. The rounded amount must be positive.
    pub fn new(value: Decimal) -> Result<Self> {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded > Decimal::ZERO {
            Ok(Self(rounded))
        } else {
            Err(GatewayError::ValidationError(format!(
                "Amount must be at least 0.01, got {value}"
            )))
        }
    }

    /// Builds an amount from minor units (cents, céntimos).
    pub fn from_minor(units: i64) -> Result<Self> {
        Self::new(Decimal::new(units, 2))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Formats the amount with exactly two fraction digits, e.g. `1.00`.
    pub fn to_gateway_string(&self) -> String {
        let mut value = self.0;
        value.rescale(2);
        value.to_string()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = GatewayError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| GatewayError::ValidationError(format!("Invalid amount '{s}': {e}")))?;
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_gateway_string())
    }
}

/// Currencies accepted by VisaNet Peru.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Pen,
    Usd,
}

impl Currency {
    /// ISO 4217 numeric code, sent as `currencyId`.
    pub fn numeric_code(&self) -> u16 {
        match self {
            Currency::Pen => 604,
            Currency::Usd => 840,
        }
    }
}

impl FromStr for Currency {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PEN" => Ok(Currency::Pen),
            "USD" => Ok(Currency::Usd),
            _ => Err(GatewayError::UnsupportedCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Pen => f.write_str("PEN"),
            Currency::Usd => f.write_str("USD"),
        }
    }
}
