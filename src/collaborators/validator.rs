use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::PaymentRequest;

use super::balance::BalanceService;

/// Request-validation collaborator. Synchronous by contract — never a
/// suspension point.
pub trait Validator: Send + Sync {
    fn validate(&self, request: &PaymentRequest) -> bool;
}

/// Default validator: account-format per currency, positive amount within the
/// per-currency maximum, and a sufficient-balance check delegated to a
/// `BalanceService`.
pub struct DefaultValidator {
    balance_service: Arc<dyn BalanceService>,
}

impl DefaultValidator {
    pub fn new(balance_service: Arc<dyn BalanceService>) -> Self {
        Self { balance_service }
    }
}

impl Validator for DefaultValidator {
    fn validate(&self, request: &PaymentRequest) -> bool {
        if request.amount <= Decimal::ZERO {
            return false;
        }
        if request.amount > request.currency.max_amount() {
            return false;
        }
        if !request.currency.account_format_valid(&request.source_account) {
            return false;
        }
        if !request.currency.account_format_valid(&request.destination_account) {
            return false;
        }
        self.balance_service
            .has_sufficient_balance(&request.source_account, request.amount, request.currency)
    }
}
