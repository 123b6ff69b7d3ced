use std::collections::HashMap;
use std::sync::Mutex;

use rust_decimal::Decimal;

use crate::domain::Currency;

/// Balance-checking collaborator. Synchronous by contract — never a
/// suspension point.
pub trait BalanceService: Send + Sync {
    fn has_sufficient_balance(&self, account: &str, amount: Decimal, currency: Currency) -> bool;
}

/// Simple in-memory balance stub used by this crate's own tests. Real balance
/// checking is an external collaborator's concern.
#[derive(Default)]
pub struct InMemoryBalanceService {
    balances: Mutex<HashMap<(String, Currency), Decimal>>,
}

impl InMemoryBalanceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, account: impl Into<String>, currency: Currency, balance: Decimal) {
        self.balances
            .lock()
            .expect("balance table poisoned")
            .insert((account.into(), currency), balance);
    }
}

impl BalanceService for InMemoryBalanceService {
    fn has_sufficient_balance(&self, account: &str, amount: Decimal, currency: Currency) -> bool {
        self.balances
            .lock()
            .expect("balance table poisoned")
            .get(&(account.to_string(), currency))
            .is_some_and(|balance| *balance >= amount)
    }
}
