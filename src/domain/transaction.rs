use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PaymentRequest;

/// Lifecycle status of a `Transaction`.
///
/// Transitions only along `Pending -> Processed | Failed`, then
/// `Processed -> Refunded`, except via `Processor::handle_notification`, which
/// is treated as authoritative external truth and may override any status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Processed,
    Failed,
    Refunded,
}

impl TransactionStatus {
    /// A status is terminal for new `process` calls once it leaves `Pending`
    /// for the first time (`Processed`, `Failed`) or once refunded.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TransactionStatus::Processed | TransactionStatus::Failed | TransactionStatus::Refunded
        )
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Processed => "processed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Refunded => "refunded",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "processed" => Ok(TransactionStatus::Processed),
            "failed" => Ok(TransactionStatus::Failed),
            "refunded" => Ok(TransactionStatus::Refunded),
            _ => Err(()),
        }
    }
}

/// A transaction owned exclusively by the `Processor`. `gateway_used` and
/// `commission` are only set once a gateway has actually been selected, and
/// are always written before `status` leaves `Pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub request: PaymentRequest,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
    pub gateway_used: Option<String>,
    pub commission: Option<Decimal>,
    pub error_message: Option<String>,
}

impl Transaction {
    pub fn new_pending(id: impl Into<String>, request: PaymentRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            request,
            status: TransactionStatus::Pending,
            timestamp: now,
            gateway_used: None,
            commission: None,
            error_message: None,
        }
    }
}
