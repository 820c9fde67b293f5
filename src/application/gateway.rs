use super::normalizer::{merge_failures, normalize};
use super::request_builder::{PreparedRequest, RequestBuilder};
use crate::config::GatewayConfig;
use crate::domain::authorization::AuthRef;
use crate::domain::card::CreditCard;
use crate::domain::money::Amount;
use crate::domain::options::TransactionOptions;
use crate::domain::ports::HttpTransportBox;
use crate::domain::purchase_number::PurchaseNumberGenerator;
use crate::domain::response::ParsedResponse;
use crate::domain::result::TransactionResult;
use crate::error::Result;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::scrub::scrub;
use rust_decimal_macros::dec;
use tracing::{debug, info, instrument, warn};

/// Client for the VisaNet Peru card API.
///
/// Each public method is one logical operation. Operations that need several gateway
/// calls make them one after the other, since each call depends on the previous one.
/// Declines come back as unsuccessful [`TransactionResult`]s; only transport and
/// adapter failures are `Err`. Nothing is retried.
pub struct VisanetPeruGateway {
    config: GatewayConfig,
    transport: HttpTransportBox,
    requests: RequestBuilder,
}

impl VisanetPeruGateway {
    /// Creates a gateway with its own purchase-number generator on the system clock.
    ///
    /// # Arguments
    ///
    /// * `config` - Merchant credentials and environment.
    /// * `transport` - Where requests are sent.
    pub fn new(config: GatewayConfig, transport: HttpTransportBox) -> Self {
        Self::with_purchase_numbers(
            config,
            transport,
            PurchaseNumberGenerator::with_clock(SystemClock),
        )
    }

    pub fn with_purchase_numbers(
        config: GatewayConfig,
        transport: HttpTransportBox,
        purchase_numbers: PurchaseNumberGenerator,
    ) -> Self {
        let requests = RequestBuilder::new(&config, purchase_numbers);
        Self {
            config,
            transport,
            requests,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Reserves `amount` on the card without moving funds.
    #[instrument(skip_all, fields(amount = %amount, order_id = ?options.order_id))]
    pub async fn authorize(
        &self,
        amount: Amount,
        card: &CreditCard,
        options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let prepared = self.requests.authorize(amount, card, options)?;
        self.commit(prepared).await
    }

    /// Deposits a previous authorization. The gateway always captures the full
    /// authorized amount, so `amount` is only recorded in the logs.
    #[instrument(skip_all, fields(amount = %amount, authorization = %authorization))]
    pub async fn capture(
        &self,
        amount: Amount,
        authorization: &AuthRef,
        options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let prepared = self.requests.deposit(authorization, options)?;
        self.commit(prepared).await
    }

    /// Authorizes and then captures. A failed authorization is returned as-is and
    /// nothing is captured.
    #[instrument(skip_all, fields(amount = %amount, order_id = ?options.order_id))]
    pub async fn purchase(
        &self,
        amount: Amount,
        card: &CreditCard,
        options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let authorized = self.authorize(amount, card, options).await?;
        if !authorized.success {
            info!(error_code = ?authorized.error_code, "authorization declined, skipping capture");
            return Ok(authorized);
        }

        self.capture(amount, &authorized.authorization, options)
            .await
    }

    /// Cancels an authorization that has not been captured.
    #[instrument(skip_all, fields(authorization = %authorization))]
    pub async fn void(
        &self,
        authorization: &AuthRef,
        options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let prepared = self.requests.void(authorization, options)?;
        self.commit(prepared).await
    }

    /// Reverses a deposit.
    ///
    /// With `force_full_refund_if_unsettled` and an authorization that carries the
    /// gateway's transaction id, a failed cancellation is followed by a refund of that
    /// transaction id. If both fail, the result carries both messages, the refund's
    /// first, and the cancellation's error code.
    #[instrument(skip_all, fields(authorization = %authorization))]
    pub async fn refund(
        &self,
        amount: Option<Amount>,
        authorization: &AuthRef,
        options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let prepared = self.requests.cancel_deposit(amount, authorization, options)?;
        let cancelled = self.commit(prepared).await?;

        let transaction_id = match authorization.transaction_id() {
            Some(id) if !cancelled.success && options.force_full_refund_if_unsettled => id,
            _ => return Ok(cancelled),
        };

        info!(
            transaction_id,
            "deposit cancellation failed, refunding the unsettled transaction"
        );
        let prepared = self
            .requests
            .refund(amount, transaction_id, authorization, options)?;
        let refunded = self.commit(prepared).await?;
        if refunded.success {
            return Ok(refunded);
        }

        Ok(merge_failures(refunded, &cancelled))
    }

    /// Checks the card with a 1.00 authorization that is voided straight away.
    ///
    /// The authorization decides the result. The void is best effort: if it is declined
    /// or cannot be sent, that is logged and the authorization result is still returned.
    #[instrument(skip_all, fields(order_id = ?options.order_id))]
    pub async fn verify(
        &self,
        card: &CreditCard,
        options: &TransactionOptions,
    ) -> Result<TransactionResult> {
        let amount = Amount::new(dec!(1.00))?;
        let authorized = self.authorize(amount, card, options).await?;
        if !authorized.success {
            return Ok(authorized);
        }

        match self.void(&authorized.authorization, options).await {
            Ok(voided) if voided.success => {
                debug!("verification authorization voided");
            }
            Ok(voided) => {
                warn!(
                    error_code = ?voided.error_code,
                    message = %voided.message,
                    "could not void verification authorization"
                );
            }
            Err(e) => {
                warn!(error = %e, "could not void verification authorization");
            }
        }

        Ok(authorized)
    }

    async fn commit(&self, prepared: PreparedRequest) -> Result<TransactionResult> {
        let PreparedRequest {
            action,
            request,
            reference,
        } = prepared;

        debug!(
            %action,
            method = %request.method,
            url = %request.url,
            body = %scrub(&request.body.to_string()),
            "sending gateway request"
        );
        let body = self.transport.send(request).await?;
        let response = ParsedResponse::parse(&body)?;
        let result = normalize(response, &reference, self.config.is_test());

        info!(
            %action,
            purchase_number = reference.purchase_number(),
            success = result.success,
            error_code = ?result.error_code,
            "gateway call completed"
        );
        Ok(result)
    }
}
