use super::money::Currency;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Billing address forwarded to the gateway's antifraud screening.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
}

/// Per-operation options recognized by the adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionOptions {
    /// Caller-chosen order id, echoed by the gateway as `externalTransactionId`.
    pub order_id: Option<String>,
    pub email: Option<String>,
    pub billing_address: Option<BillingAddress>,
    /// Defaults to soles.
    pub currency: Option<Currency>,
    /// Random when absent.
    pub device_fingerprint_id: Option<String>,
    pub merchant_define_data: Option<BTreeMap<String, String>>,
    /// Merchant tax id, required by the gateway's refund endpoint.
    pub ruc: Option<String>,
    /// When a refund by purchase number fails, retry it as a refund of the gateway
    /// transaction id carried in the authorization.
    pub force_full_refund_if_unsettled: bool,
}

impl TransactionOptions {
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_billing_address(mut self, address: BillingAddress) -> Self {
        self.billing_address = Some(address);
        self
    }

    pub fn force_full_refund_if_unsettled(mut self) -> Self {
        self.force_full_refund_if_unsettled = true;
        self
    }
}
