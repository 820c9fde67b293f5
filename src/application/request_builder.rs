use crate::config::GatewayConfig;
use crate::domain::authorization::AuthRef;
use crate::domain::card::CreditCard;
use crate::domain::money::Amount;
use crate::domain::options::TransactionOptions;
use crate::domain::ports::{GatewayRequest, HttpMethod};
use crate::domain::purchase_number::PurchaseNumberGenerator;
use crate::error::Result;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

const DEFAULT_EMAIL: &str = "user@domain.com";

/// Gateway operations, each with its own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Authorize,
    Deposit,
    Void,
    CancelDeposit,
    Refund,
}

impl Action {
    pub fn method(&self) -> HttpMethod {
        match self {
            Action::Authorize | Action::Refund => HttpMethod::Post,
            Action::Deposit | Action::Void | Action::CancelDeposit => HttpMethod::Put,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Authorize => "authorize",
            Action::Deposit => "deposit",
            Action::Void => "void",
            Action::CancelDeposit => "cancelDeposit",
            Action::Refund => "refund",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthorizeBody<'a> {
    amount: String,
    purchase_number: &'a str,
    external_transaction_id: Option<&'a str>,
    currency_id: u16,
    first_name: &'a str,
    last_name: &'a str,
    card_number: &'a str,
    cvv2_code: Option<&'a str>,
    expiration_year: String,
    expiration_month: String,
    email: &'a str,
    antifraud: Antifraud<'a>,
    create_alias: bool,
}

#[derive(Debug, Serialize)]
struct Antifraud<'a> {
    #[serde(rename = "billTo_street1", skip_serializing_if = "Option::is_none")]
    street: Option<&'a str>,
    #[serde(rename = "billTo_city", skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
    #[serde(rename = "billTo_state", skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(rename = "billTo_country", skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
    #[serde(rename = "billTo_postalCode", skip_serializing_if = "Option::is_none")]
    postal_code: Option<&'a str>,
    #[serde(rename = "deviceFingerprintId")]
    device_fingerprint_id: String,
    #[serde(rename = "merchantDefineData", skip_serializing_if = "Option::is_none")]
    merchant_define_data: Option<&'a BTreeMap<String, String>>,
}

/// Body of deposit, void and cancelDeposit, which address a transaction by purchase number.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<String>,
    purchase_number: &'a str,
    external_transaction_id: Option<&'a str>,
}

/// Body of the unsettled refund, which addresses the transaction through the URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefundBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<String>,
    external_reference_id: Option<&'a str>,
    ruc: Option<&'a str>,
}

/// A request ready to send, with the reference of the transaction it concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub action: Action,
    pub request: GatewayRequest,
    pub reference: AuthRef,
}

/// Assembles gateway requests from generic operation inputs.
pub struct RequestBuilder {
    merchant_url: String,
    headers: Vec<(String, String)>,
    purchase_numbers: PurchaseNumberGenerator,
}

impl RequestBuilder {
    pub fn new(config: &GatewayConfig, purchase_numbers: PurchaseNumberGenerator) -> Self {
        Self {
            merchant_url: config.merchant_url(),
            headers: config.headers(),
            purchase_numbers,
        }
    }

    /// Opens a new transaction under a freshly generated purchase number.
    pub fn authorize(
        &self,
        amount: Amount,
        card: &CreditCard,
        options: &TransactionOptions,
    ) -> Result<PreparedRequest> {
        let purchase_number = self.purchase_numbers.next();
        let currency = options.currency.unwrap_or_default();
        let address = options.billing_address.as_ref();

        let body = AuthorizeBody {
            amount: amount.to_gateway_string(),
            purchase_number: &purchase_number,
            external_transaction_id: options.order_id.as_deref(),
            currency_id: currency.numeric_code(),
            first_name: &card.first_name,
            last_name: &card.last_name,
            card_number: &card.number,
            cvv2_code: card.verification_value.as_deref(),
            expiration_year: card.expiration_year(),
            expiration_month: card.expiration_month(),
            email: options.email.as_deref().unwrap_or(DEFAULT_EMAIL),
            antifraud: Antifraud {
                street: address.and_then(|a| a.address1.as_deref()),
                city: address.and_then(|a| a.city.as_deref()),
                state: address.and_then(|a| a.state.as_deref()),
                country: address.and_then(|a| a.country.as_deref()),
                postal_code: address.and_then(|a| a.zip.as_deref()),
                device_fingerprint_id: options
                    .device_fingerprint_id
                    .clone()
                    .unwrap_or_else(random_fingerprint),
                merchant_define_data: options.merchant_define_data.as_ref(),
            },
            create_alias: false,
        };

        let request = self.request(Action::Authorize, None, &body)?;
        Ok(PreparedRequest {
            action: Action::Authorize,
            request,
            reference: AuthRef::Single(purchase_number),
        })
    }

    pub fn deposit(&self, reference: &AuthRef, options: &TransactionOptions) -> Result<PreparedRequest> {
        self.by_purchase_number(Action::Deposit, None, reference, options)
    }

    pub fn void(&self, reference: &AuthRef, options: &TransactionOptions) -> Result<PreparedRequest> {
        self.by_purchase_number(Action::Void, None, reference, options)
    }

    pub fn cancel_deposit(
        &self,
        amount: Option<Amount>,
        reference: &AuthRef,
        options: &TransactionOptions,
    ) -> Result<PreparedRequest> {
        self.by_purchase_number(Action::CancelDeposit, amount, reference, options)
    }

    /// Refunds by the gateway's transaction id rather than by purchase number.
    pub fn refund(
        &self,
        amount: Option<Amount>,
        transaction_id: &str,
        reference: &AuthRef,
        options: &TransactionOptions,
    ) -> Result<PreparedRequest> {
        let body = RefundBody {
            amount: amount.map(|a| a.to_gateway_string()),
            external_reference_id: options.order_id.as_deref(),
            ruc: options.ruc.as_deref(),
        };
        let request = self.request(Action::Refund, Some(transaction_id), &body)?;
        Ok(PreparedRequest {
            action: Action::Refund,
            request,
            reference: reference.clone(),
        })
    }

    fn by_purchase_number(
        &self,
        action: Action,
        amount: Option<Amount>,
        reference: &AuthRef,
        options: &TransactionOptions,
    ) -> Result<PreparedRequest> {
        let purchase_number = reference.purchase_number();
        let body = ReferenceBody {
            amount: amount.map(|a| a.to_gateway_string()),
            purchase_number,
            external_transaction_id: options.order_id.as_deref(),
        };
        let request = self.request(action, Some(purchase_number), &body)?;
        Ok(PreparedRequest {
            action,
            request,
            reference: reference.clone(),
        })
    }

    fn request<T: Serialize>(
        &self,
        action: Action,
        target: Option<&str>,
        body: &T,
    ) -> Result<GatewayRequest> {
        let url = match target {
            Some(id) => format!("{}/{}/{}", self.merchant_url, action, id),
            None => self.merchant_url.clone(),
        };
        Ok(GatewayRequest {
            method: action.method(),
            url,
            body: serde_json::to_value(body)?,
            headers: self.headers.clone(),
        })
    }
}

fn random_fingerprint() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::domain::options::BillingAddress;
    use crate::infrastructure::clock::FixedClock;
    use rust_decimal_macros::dec;
    use serde_json::json;

    const MERCHANT_URL: &str =
        "https://devapi.vnforapps.com/api.tokenization/api/v2/merchant/101266802";

    fn builder() -> RequestBuilder {
        let config =
            GatewayConfig::new("101266802", "AKIA", "secret", Environment::Test).unwrap();
        RequestBuilder::new(
            &config,
            PurchaseNumberGenerator::with_clock(FixedClock::at_unix(1_458_544_860)),
        )
    }

    fn card() -> CreditCard {
        CreditCard::new("4500340090000016", 9, 2017)
            .with_holder("Longbob", "Longsen")
            .with_verification_value("377")
    }

    #[test]
    fn test_authorize_body() {
        let options = TransactionOptions::default()
            .with_order_id("858169315")
            .with_billing_address(BillingAddress {
                address1: Some("456 My Street".to_string()),
                city: Some("Ottawa".to_string()),
                country: Some("CA".to_string()),
                ..Default::default()
            });
        let prepared = builder()
            .authorize(Amount::new(dec!(1)).unwrap(), &card(), &options)
            .unwrap();
        let request = &prepared.request;
        let body = &request.body;

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, MERCHANT_URL);
        assert_eq!(body["amount"], "1.00");
        assert_eq!(body["purchaseNumber"], prepared.reference.purchase_number());
        assert_eq!(body["purchaseNumber"].as_str().unwrap().len(), 12);
        assert_eq!(body["externalTransactionId"], "858169315");
        assert_eq!(body["currencyId"], 604);
        assert_eq!(body["cardNumber"], "4500340090000016");
        assert_eq!(body["cvv2Code"], "377");
        assert_eq!(body["expirationYear"], "2017");
        assert_eq!(body["expirationMonth"], "09");
        assert_eq!(body["email"], DEFAULT_EMAIL);
        assert_eq!(body["createAlias"], false);
        assert_eq!(body["antifraud"]["billTo_street1"], "456 My Street");
        assert_eq!(body["antifraud"]["billTo_country"], "CA");
        assert!(body["antifraud"].get("billTo_state").is_none());
        assert_eq!(
            body["antifraud"]["deviceFingerprintId"].as_str().unwrap().len(),
            32
        );
    }

    #[test]
    fn test_each_authorize_gets_a_new_purchase_number() {
        let builder = builder();
        let amount = Amount::from_minor(100).unwrap();
        let options = TransactionOptions::default();
        let first = builder.authorize(amount, &card(), &options).unwrap();
        let second = builder.authorize(amount, &card(), &options).unwrap();
        assert_ne!(first.reference, second.reference);
    }

    #[test]
    fn test_deposit_reuses_reference() {
        let reference: AuthRef = "858169315|993011".parse().unwrap();
        let options = TransactionOptions::default().with_order_id("de9dc65c");
        let prepared = builder().deposit(&reference, &options).unwrap();

        assert_eq!(prepared.request.method, HttpMethod::Put);
        assert_eq!(prepared.request.url, format!("{MERCHANT_URL}/deposit/858169315"));
        assert_eq!(
            prepared.request.body,
            json!({"purchaseNumber": "858169315", "externalTransactionId": "de9dc65c"})
        );
        assert_eq!(prepared.reference, reference);
    }

    #[test]
    fn test_cancel_deposit_and_refund() {
        let reference: AuthRef = "122333444|444333221".parse().unwrap();
        let options = TransactionOptions {
            ruc: Some("20100047218".to_string()),
            ..Default::default()
        };
        let amount = Some(Amount::from_minor(100).unwrap());
        let builder = builder();

        let cancel = builder.cancel_deposit(amount, &reference, &options).unwrap();
        assert_eq!(cancel.request.method, HttpMethod::Put);
        assert_eq!(cancel.request.url, format!("{MERCHANT_URL}/cancelDeposit/122333444"));
        assert_eq!(cancel.request.body["amount"], "1.00");

        let refund = builder
            .refund(amount, "444333221", &reference, &options)
            .unwrap();
        assert_eq!(refund.request.method, HttpMethod::Post);
        assert_eq!(refund.request.url, format!("{MERCHANT_URL}/refund/444333221"));
        assert_eq!(
            refund.request.body,
            json!({"amount": "1.00", "externalReferenceId": null, "ruc": "20100047218"})
        );
    }
}
