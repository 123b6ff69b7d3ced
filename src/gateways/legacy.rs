use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::core::ProcessorResult;
use crate::domain::{Currency, PaymentRequest};

/// Legacy gateway contract: no built-in idempotency, no status lookup.
/// The `Processor` and `Router` operate over this shape directly — the
/// Processor supplies its own idempotency discipline (per-transaction lock
/// plus terminal-state short-circuit), so a gateway's own idempotency is an
/// orthogonal property of the gateway, not something the Processor depends on.
#[async_trait]
pub trait LegacyGateway: Send + Sync {
    fn name(&self) -> &str;

    async fn get_commission(&self, currency: Currency) -> Decimal;

    async fn is_available(&self) -> bool;

    fn supports_currency(&self, currency: Currency) -> bool;

    async fn process_payment(&self, request: &PaymentRequest) -> ProcessorResult<bool>;

    async fn refund(&self, transaction_id: &str, amount: Decimal) -> ProcessorResult<bool>;
}
