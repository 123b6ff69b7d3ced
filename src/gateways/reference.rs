use std::collections::{HashMap, HashSet};
use std::sync::Mutex as StdMutex;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use tokio::sync::Mutex as AsyncMutex;
use tokio::time::sleep;
use uuid::Uuid;

use crate::domain::{Currency, PaymentRequest, PaymentResult, PaymentStatus, RefundResult, RefundStatus};

use super::modern::PaymentGateway;

/// Source of randomness for the reference gateway's simulated outcome
/// distribution, injectable so tests can pin the outcome deterministically.
/// `sample` must return a value in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn sample(&self) -> f64;
}

/// Default randomness source, backed by `rand::thread_rng`.
#[derive(Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn sample(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..1.0)
    }
}

const SIMULATED_LATENCY: Duration = Duration::from_millis(5);

/// In-memory idempotent gateway: the canonical implementation of the modern
/// contract, and the model other tests in this crate are built against.
///
/// Idempotency is enforced via double-checked lookup around a per-id
/// `tokio::sync::Mutex`: a cached result is returned if found before
/// acquiring the lock, and checked again immediately after acquiring it, so
/// concurrent callers racing to be first never redo the simulated work.
pub struct ReferenceGateway {
    name: String,
    commission: Decimal,
    supported_currencies: HashSet<Currency>,
    random: Arc<dyn RandomSource>,
    processed_payments: StdMutex<HashMap<String, PaymentResult>>,
    processed_refunds: StdMutex<HashMap<String, RefundResult>>,
    payment_locks: StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
    refund_locks: StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl ReferenceGateway {
    pub fn new(
        name: impl Into<String>,
        commission: Decimal,
        supported_currencies: impl IntoIterator<Item = Currency>,
    ) -> Self {
        Self {
            name: name.into(),
            commission,
            supported_currencies: supported_currencies.into_iter().collect(),
            random: Arc::new(ThreadRngSource),
            processed_payments: StdMutex::new(HashMap::new()),
            processed_refunds: StdMutex::new(HashMap::new()),
            payment_locks: StdMutex::new(HashMap::new()),
            refund_locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Same as `new`, but with an injected randomness source for deterministic
    /// tests.
    pub fn with_random_source(
        name: impl Into<String>,
        commission: Decimal,
        supported_currencies: impl IntoIterator<Item = Currency>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            random,
            ..Self::new(name, commission, supported_currencies)
        }
    }

    fn lock_for(table: &StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>, key: &str) -> Arc<AsyncMutex<()>> {
        let mut table = table.lock().expect("lock table poisoned");
        table
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    fn simulate_outcome(&self, request: &PaymentRequest, transaction_id: &str) -> PaymentResult {
        let now = Utc::now();
        let sample = self.random.sample();
        if sample < 0.85 {
            let commission_amount = request.amount * self.commission;
            PaymentResult {
                is_success: true,
                gateway_transaction_id: Some(format!("{}_{}", self.name, transaction_id)),
                status: PaymentStatus::Completed,
                error_code: None,
                error_message: None,
                processed_at: now,
                is_retryable: false,
                actual_amount: Some(request.amount - commission_amount),
                provider_reference: Some(Uuid::new_v4().to_string()),
            }
        } else if sample < 0.95 {
            PaymentResult::failed(PaymentStatus::Failed, "TEMPORARY_ERROR", "transient gateway failure", true, now)
        } else {
            PaymentResult::failed(PaymentStatus::Failed, "INSUFFICIENT_FUNDS", "insufficient funds", false, now)
        }
    }
}

#[async_trait]
impl PaymentGateway for ReferenceGateway {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_commission(&self, _currency: Currency) -> Decimal {
        sleep(SIMULATED_LATENCY).await;
        self.commission
    }

    async fn is_available(&self) -> bool {
        sleep(SIMULATED_LATENCY).await;
        self.random.sample() < 0.95
    }

    fn supports_currency(&self, currency: Currency) -> bool {
        self.supported_currencies.contains(&currency)
    }

    async fn process_payment(&self, request: &PaymentRequest, transaction_id: &str) -> PaymentResult {
        if let Some(cached) = self.processed_payments.lock().expect("poisoned").get(transaction_id) {
            return cached.clone();
        }

        if !self.supports_currency(request.currency) {
            return PaymentResult::failed(
                PaymentStatus::Failed,
                "UNSUPPORTED_CURRENCY",
                format!("{} does not support {}", self.name, request.currency),
                false,
                Utc::now(),
            );
        }

        let lock = Self::lock_for(&self.payment_locks, transaction_id);
        let _guard = lock.lock().await;

        if let Some(cached) = self.processed_payments.lock().expect("poisoned").get(transaction_id) {
            return cached.clone();
        }

        sleep(SIMULATED_LATENCY).await;
        let result = self.simulate_outcome(request, transaction_id);

        self.processed_payments
            .lock()
            .expect("poisoned")
            .insert(transaction_id.to_string(), result.clone());
        result
    }

    async fn get_payment_status(&self, transaction_id: &str) -> PaymentResult {
        sleep(SIMULATED_LATENCY).await;
        self.processed_payments
            .lock()
            .expect("poisoned")
            .get(transaction_id)
            .cloned()
            .unwrap_or_else(|| {
                PaymentResult::failed(
                    PaymentStatus::Failed,
                    "TRANSACTION_NOT_FOUND",
                    format!("no such transaction: {transaction_id}"),
                    false,
                    Utc::now(),
                )
            })
    }

    async fn refund(&self, transaction_id: &str, amount: Decimal, refund_id: &str) -> RefundResult {
        if let Some(cached) = self.processed_refunds.lock().expect("poisoned").get(refund_id) {
            return cached.clone();
        }

        let lock = Self::lock_for(&self.refund_locks, refund_id);
        let _guard = lock.lock().await;

        if let Some(cached) = self.processed_refunds.lock().expect("poisoned").get(refund_id) {
            return cached.clone();
        }

        sleep(SIMULATED_LATENCY).await;
        let now = Utc::now();
        let result = RefundResult {
            is_success: true,
            gateway_refund_id: Some(format!("{}_{}", self.name, refund_id)),
            status: RefundStatus::Completed,
            error_code: None,
            error_message: None,
            processed_at: now,
            refunded_amount: Some(amount),
            original_transaction_id: transaction_id.to_string(),
        };

        self.processed_refunds
            .lock()
            .expect("poisoned")
            .insert(refund_id.to_string(), result.clone());
        result
    }

    async fn get_refund_status(&self, refund_id: &str) -> RefundResult {
        sleep(SIMULATED_LATENCY).await;
        self.processed_refunds
            .lock()
            .expect("poisoned")
            .get(refund_id)
            .cloned()
            .unwrap_or_else(|| {
                RefundResult::failed(
                    String::new(),
                    RefundStatus::Failed,
                    "REFUND_NOT_FOUND",
                    format!("no such refund: {refund_id}"),
                    Utc::now(),
                )
            })
    }

    async fn cancel_payment(&self, transaction_id: &str) -> PaymentResult {
        sleep(SIMULATED_LATENCY).await;
        let mut payments = self.processed_payments.lock().expect("poisoned");
        match payments.get(transaction_id) {
            Some(existing) if matches!(existing.status, PaymentStatus::Pending | PaymentStatus::Processing) => {
                let cancelled = PaymentResult {
                    status: PaymentStatus::Cancelled,
                    is_success: true,
                    error_code: None,
                    error_message: None,
                    processed_at: Utc::now(),
                    ..existing.clone()
                };
                payments.insert(transaction_id.to_string(), cancelled.clone());
                cancelled
            }
            Some(_) => PaymentResult::failed(
                PaymentStatus::Cancelled,
                "CANNOT_CANCEL",
                "payment is not in a cancellable state",
                false,
                Utc::now(),
            ),
            None => PaymentResult::failed(
                PaymentStatus::Failed,
                "TRANSACTION_NOT_FOUND",
                format!("no such transaction: {transaction_id}"),
                false,
                Utc::now(),
            ),
        }
    }
}
