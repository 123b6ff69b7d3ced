use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gateway-level payment status, richer than `TransactionStatus` since it
/// reflects what the provider itself reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    RequiresAction,
    PartiallyCompleted,
}

/// Outcome of a modern-contract `process_payment`/`get_payment_status`/
/// `cancel_payment` call. Must be value-equal (including `processed_at`)
/// across every idempotent replay for the same `(gateway, transaction_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub is_success: bool,
    pub gateway_transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub processed_at: DateTime<Utc>,
    pub is_retryable: bool,
    pub actual_amount: Option<Decimal>,
    pub provider_reference: Option<String>,
}

impl PaymentResult {
    pub fn failed(
        status: PaymentStatus,
        error_code: impl Into<String>,
        error_message: impl Into<String>,
        is_retryable: bool,
        processed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            is_success: false,
            gateway_transaction_id: None,
            status,
            error_code: Some(error_code.into()),
            error_message: Some(error_message.into()),
            processed_at,
            is_retryable,
            actual_amount: None,
            provider_reference: None,
        }
    }
}
