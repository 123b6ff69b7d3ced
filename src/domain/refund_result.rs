use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefundStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    PartiallyRefunded,
}

/// Outcome of a modern-contract `refund`/`get_refund_status` call. Value-stable
/// across every replay keyed on the same `refund_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundResult {
    pub is_success: bool,
    pub gateway_refund_id: Option<String>,
    pub status: RefundStatus,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub processed_at: DateTime<Utc>,
    pub refunded_amount: Option<Decimal>,
    pub original_transaction_id: String,
}

impl RefundResult {
    pub fn failed(
        original_transaction_id: impl Into<String>,
        status: RefundStatus,
        error_code: impl Into<String>,
        error_message: impl Into<String>,
        processed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            is_success: false,
            gateway_refund_id: None,
            status,
            error_code: Some(error_code.into()),
            error_message: Some(error_message.into()),
            processed_at,
            refunded_amount: None,
            original_transaction_id: original_transaction_id.into(),
        }
    }
}
