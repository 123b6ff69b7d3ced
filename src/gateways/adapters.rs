use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::ProcessorResult;
use crate::domain::{Currency, PaymentRequest, PaymentResult, PaymentStatus, RefundResult, RefundStatus};

use super::legacy::LegacyGateway;
use super::modern::PaymentGateway;

/// Wraps a legacy gateway behind the modern contract. Successful legacy calls
/// synthesize `gateway_transaction_id = "{name}_{transaction_id}"`; `Ok(false)`
/// maps to `Failed`/`LEGACY_GATEWAY_ERROR`/retryable; an `Err` maps to
/// `Failed`/`LEGACY_GATEWAY_EXCEPTION`/retryable. The modern-only operations
/// (`get_payment_status`, `get_refund_status`, `cancel_payment`) are not
/// expressible over the legacy shape and return
/// `Failed`/`NOT_SUPPORTED`/non-retryable.
pub struct ForwardAdapter<G: LegacyGateway> {
    inner: G,
}

impl<G: LegacyGateway> ForwardAdapter<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<G: LegacyGateway> PaymentGateway for ForwardAdapter<G> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn get_commission(&self, currency: Currency) -> Decimal {
        self.inner.get_commission(currency).await
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }

    fn supports_currency(&self, currency: Currency) -> bool {
        self.inner.supports_currency(currency)
    }

    async fn process_payment(&self, request: &PaymentRequest, transaction_id: &str) -> PaymentResult {
        let now = Utc::now();
        match self.inner.process_payment(request).await {
            Ok(true) => PaymentResult {
                is_success: true,
                gateway_transaction_id: Some(format!("{}_{}", self.inner.name(), transaction_id)),
                status: PaymentStatus::Completed,
                error_code: None,
                error_message: None,
                processed_at: now,
                is_retryable: false,
                actual_amount: Some(request.amount),
                provider_reference: None,
            },
            Ok(false) => PaymentResult::failed(
                PaymentStatus::Failed,
                "LEGACY_GATEWAY_ERROR",
                "legacy gateway returned false",
                true,
                now,
            ),
            Err(e) => PaymentResult::failed(
                PaymentStatus::Failed,
                "LEGACY_GATEWAY_EXCEPTION",
                e.to_string(),
                true,
                now,
            ),
        }
    }

    async fn get_payment_status(&self, _transaction_id: &str) -> PaymentResult {
        PaymentResult::failed(
            PaymentStatus::Failed,
            "NOT_SUPPORTED",
            "legacy gateways do not support status lookup",
            false,
            Utc::now(),
        )
    }

    async fn refund(&self, transaction_id: &str, amount: Decimal, _refund_id: &str) -> RefundResult {
        let now = Utc::now();
        match self.inner.refund(transaction_id, amount).await {
            Ok(true) => RefundResult {
                is_success: true,
                gateway_refund_id: Some(format!("{}_{}", self.inner.name(), transaction_id)),
                status: RefundStatus::Completed,
                error_code: None,
                error_message: None,
                processed_at: now,
                refunded_amount: Some(amount),
                original_transaction_id: transaction_id.to_string(),
            },
            Ok(false) => RefundResult::failed(
                transaction_id,
                RefundStatus::Failed,
                "LEGACY_GATEWAY_ERROR",
                "legacy gateway returned false",
                now,
            ),
            Err(e) => RefundResult::failed(
                transaction_id,
                RefundStatus::Failed,
                "LEGACY_GATEWAY_EXCEPTION",
                e.to_string(),
                now,
            ),
        }
    }

    async fn get_refund_status(&self, _refund_id: &str) -> RefundResult {
        RefundResult::failed(
            String::new(),
            RefundStatus::Failed,
            "NOT_SUPPORTED",
            "legacy gateways do not support status lookup",
            Utc::now(),
        )
    }

    async fn cancel_payment(&self, _transaction_id: &str) -> PaymentResult {
        PaymentResult::failed(
            PaymentStatus::Failed,
            "NOT_SUPPORTED",
            "legacy gateways do not support cancellation",
            false,
            Utc::now(),
        )
    }
}

/// Wraps a modern gateway behind the legacy contract, generating a fresh
/// opaque `transaction_id`/`refund_id` per call. Legacy clients lose the
/// modern gateway's idempotency this way — the only place this crate
/// synthesizes operation identifiers on a caller's behalf.
pub struct ReverseAdapter<G: PaymentGateway> {
    inner: G,
}

impl<G: PaymentGateway> ReverseAdapter<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<G: PaymentGateway> LegacyGateway for ReverseAdapter<G> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn get_commission(&self, currency: Currency) -> Decimal {
        self.inner.get_commission(currency).await
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }

    fn supports_currency(&self, currency: Currency) -> bool {
        self.inner.supports_currency(currency)
    }

    async fn process_payment(&self, request: &PaymentRequest) -> ProcessorResult<bool> {
        let transaction_id = Uuid::new_v4().to_string();
        let result = self.inner.process_payment(request, &transaction_id).await;
        Ok(result.is_success)
    }

    async fn refund(&self, transaction_id: &str, amount: Decimal) -> ProcessorResult<bool> {
        let refund_id = Uuid::new_v4().to_string();
        let result = self.inner.refund(transaction_id, amount, &refund_id).await;
        Ok(result.is_success)
    }
}
