use std::fmt;

/// A payer's card as entered at checkout.
#[derive(Clone, PartialEq, Eq)]
pub struct CreditCard {
    pub first_name: String,
    pub last_name: String,
    pub number: String,
    pub verification_value: Option<String>,
    pub month: u8,
    pub year: u16,
}

impl CreditCard {
    pub fn new(number: impl Into<String>, month: u8, year: u16) -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            number: number.into(),
            verification_value: None,
            month,
            year,
        }
    }

    pub fn with_holder(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub fn with_verification_value(mut self, verification_value: impl Into<String>) -> Self {
        self.verification_value = Some(verification_value.into());
        self
    }

    /// Four-digit expiry year, e.g. `2027`.
    pub fn expiration_year(&self) -> String {
        format!("{:04}", self.year)
    }

    /// Two-digit expiry month, e.g. `09`.
    pub fn expiration_month(&self) -> String {
        format!("{:02}", self.month)
    }

    /// The number with all but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        let visible = self.number.len().saturating_sub(4);
        let last_four = self.number.get(visible..).unwrap_or_default();
        format!("{}{}", "*".repeat(visible), last_four)
    }
}

// Keeps the PAN and CVV out of logs and panic messages.
impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("number", &self.masked_number())
            .field("verification_value", &self.verification_value.as_ref().map(|_| "***"))
            .field("month", &self.month)
            .field("year", &self.year)
            .finish()
    }
}
