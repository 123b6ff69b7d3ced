use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Currency;

/// Caller-supplied payment request.
///
/// Treated as immutable by contract: the Processor never mutates a caller's
/// request in place. Currency conversion produces a new `PaymentRequest`
/// snapshot that is stored on the `Transaction`, leaving the original
/// untouched even under concurrent replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub currency: Currency,
    pub source_account: String,
    pub destination_account: String,
    pub metadata: HashMap<String, String>,
}

impl PaymentRequest {
    pub fn new(
        amount: Decimal,
        currency: Currency,
        source_account: impl Into<String>,
        destination_account: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency,
            source_account: source_account.into(),
            destination_account: destination_account.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns a new request with `amount` and `currency` replaced, as produced
    /// by currency conversion in `Processor::process`. The receiver is left
    /// untouched.
    pub fn converted(&self, amount: Decimal, currency: Currency) -> Self {
        Self {
            amount,
            currency,
            source_account: self.source_account.clone(),
            destination_account: self.destination_account.clone(),
            metadata: self.metadata.clone(),
        }
    }
}
