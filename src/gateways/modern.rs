use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Currency, PaymentRequest, PaymentResult, RefundResult};

/// Modern gateway contract: every operation is idempotent, keyed on the
/// caller-supplied `transaction_id`/`refund_id`. New gateways should implement
/// this directly rather than the legacy shape.
///
/// Idempotency contract (binding on every implementation): for a given
/// `(gateway instance, transaction_id)` pair, the first completed
/// `process_payment` call fixes the result; every subsequent call — sequential
/// or concurrent — returns the byte-identical `PaymentResult`, including
/// `processed_at`. The same holds for `refund` keyed on `refund_id`.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &str;

    async fn get_commission(&self, currency: Currency) -> Decimal;

    async fn is_available(&self) -> bool;

    fn supports_currency(&self, currency: Currency) -> bool;

    async fn process_payment(
        &self,
        request: &PaymentRequest,
        transaction_id: &str,
    ) -> PaymentResult;

    /// Status query for an unknown `transaction_id` returns `Failed` with
    /// `error_code` `TRANSACTION_NOT_FOUND`.
    async fn get_payment_status(&self, transaction_id: &str) -> PaymentResult;

    async fn refund(
        &self,
        transaction_id: &str,
        amount: Decimal,
        refund_id: &str,
    ) -> RefundResult;

    /// Status query for an unknown `refund_id` returns `Failed` with
    /// `error_code` `REFUND_NOT_FOUND`.
    async fn get_refund_status(&self, refund_id: &str) -> RefundResult;

    /// Only honored when the current status is `Pending` or `Processing`;
    /// otherwise reports `Cancelled` ineffective with `error_code`
    /// `CANNOT_CANCEL`.
    async fn cancel_payment(&self, transaction_id: &str) -> PaymentResult;
}
