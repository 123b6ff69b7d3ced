//! Transaction lifecycle: per-id mutual exclusion, idempotent process/refund,
//! notification ingestion and lock-table cleanup.

use std::collections::HashMap;
use std::sync::{Arc, RwLock as StdRwLock, Mutex as StdMutex};

use chrono::Utc;
use tracing::{error, info, warn};

use rust_decimal::Decimal;

use crate::collaborators::{RateService, Validator};
use crate::core::{ProcessorError, ProcessorResult};
use crate::domain::{Currency, PaymentRequest, Transaction, TransactionStatus};
use crate::retry::RetryPolicy;
use crate::router::Router;

type TransactionLog = StdRwLock<HashMap<String, Arc<StdRwLock<Transaction>>>>;
type LockTable = StdMutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>;

/// Owns the lifecycle of every transaction it has seen: the transaction log,
/// the per-id lock table, and the collaborators it coordinates
/// (`Validator`, `Router`, `RateService`) plus the retry policy wrapped
/// around gateway calls.
pub struct Processor {
    transactions: TransactionLog,
    locks: LockTable,
    validator: Arc<dyn Validator>,
    router: Router,
    rate_service: Arc<dyn RateService>,
    retry_policy: RetryPolicy,
}

impl Processor {
    pub fn new(validator: Arc<dyn Validator>, router: Router, rate_service: Arc<dyn RateService>) -> Self {
        Self {
            transactions: StdRwLock::new(HashMap::new()),
            locks: StdMutex::new(HashMap::new()),
            validator,
            router,
            rate_service,
            retry_policy: RetryPolicy::new(),
        }
    }

    fn lock_for(&self, transaction_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().expect("lock table poisoned");
        locks
            .entry(transaction_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Atomically reads or inserts the transaction record, returning the
    /// shared handle either way. Inserts happen while holding the log's write
    /// lock just long enough to add one entry.
    fn get_or_insert(&self, transaction_id: &str, request: &PaymentRequest) -> Arc<StdRwLock<Transaction>> {
        if let Some(existing) = self.transactions.read().expect("log poisoned").get(transaction_id) {
            return existing.clone();
        }
        let mut log = self.transactions.write().expect("log poisoned");
        log.entry(transaction_id.to_string())
            .or_insert_with(|| {
                Arc::new(StdRwLock::new(Transaction::new_pending(
                    transaction_id,
                    request.clone(),
                    Utc::now(),
                )))
            })
            .clone()
    }

    /// Process a payment request under `transaction_id`.
    ///
    /// Idempotent: once the transaction reaches a terminal status
    /// (`Processed`/`Failed`), every subsequent call with the same
    /// `transaction_id` is a pure read — no validation, conversion or gateway
    /// call is repeated. Concurrent callers racing on the same
    /// `transaction_id` are fully serialized by the per-id lock; exactly one
    /// of them performs the actual work.
    ///
    /// Returns the resulting `Transaction` snapshot. Validation failure,
    /// router failure, gateway failure and conversion failure are all caught
    /// here and folded into a `Failed` transaction rather than returned as
    /// `Err` — this function only returns `Err` if acquiring collaborator
    /// state panics, which does not happen in normal operation.
    pub async fn process(
        &self,
        request: PaymentRequest,
        transaction_id: &str,
        target_currency: Option<Currency>,
    ) -> Transaction {
        let lock = self.lock_for(transaction_id);
        let _guard = lock.lock().await;

        let record = self.get_or_insert(transaction_id, &request);

        let already_terminal = {
            let tx = record.read().expect("record poisoned");
            tx.status.is_terminal()
        };
        if already_terminal {
            info!(transaction_id, "idempotent replay, no gateway call issued");
            return record.read().expect("record poisoned").clone();
        }

        if !self.validator.validate(&request) {
            let mut tx = record.write().expect("record poisoned");
            tx.status = TransactionStatus::Failed;
            tx.error_message = Some("Validation failed".to_string());
            warn!(transaction_id, "validation failed");
            return tx.clone();
        }

        let mut working_request = request.clone();
        if let Some(target) = target_currency {
            if target != working_request.currency {
                match self.rate_service.get_rate(working_request.currency, target).await {
                    Ok(rate) => {
                        let converted_amount = working_request.amount * rate;
                        working_request = working_request.converted(converted_amount, target);
                        let mut tx = record.write().expect("record poisoned");
                        tx.request = working_request.clone();
                    }
                    Err(err) => {
                        let mut tx = record.write().expect("record poisoned");
                        tx.status = TransactionStatus::Failed;
                        tx.error_message = Some(err.to_string());
                        error!(transaction_id, error = %err, "currency conversion failed");
                        return tx.clone();
                    }
                }
            }
        }

        let gateway = match self.router.select_optimal(&working_request).await {
            Ok(gateway) => gateway,
            Err(err) => {
                let mut tx = record.write().expect("record poisoned");
                tx.status = TransactionStatus::Failed;
                tx.error_message = Some(err.to_string());
                error!(transaction_id, error = %err, "no gateway available");
                return tx.clone();
            }
        };

        let commission = gateway.get_commission(working_request.currency).await;
        {
            // gateway_used and commission are set before status leaves Pending.
            let mut tx = record.write().expect("record poisoned");
            tx.gateway_used = Some(gateway.name().to_string());
            tx.commission = Some(commission);
        }

        let outcome: ProcessorResult<bool> = self
            .retry_policy
            .execute(|| async { gateway.process_payment(&working_request).await })
            .await;

        let mut tx = record.write().expect("record poisoned");
        match outcome {
            Ok(true) => {
                tx.status = TransactionStatus::Processed;
                info!(transaction_id, gateway = gateway.name(), "payment processed");
            }
            Ok(false) => {
                tx.status = TransactionStatus::Failed;
                error!(transaction_id, gateway = gateway.name(), "gateway declined payment");
            }
            Err(err) => {
                tx.status = TransactionStatus::Failed;
                tx.error_message = Some(err.to_string());
                error!(transaction_id, gateway = gateway.name(), error = %err, "gateway call failed after retries");
            }
        }
        tx.clone()
    }

    /// Refunds a previously processed transaction. Fails with
    /// `CannotRefund` if the transaction is unknown or not `Processed`, and
    /// with `GatewayNotFound` if the transaction's recorded gateway is no
    /// longer registered with the router. The underlying gateway call is not
    /// wrapped by the retry policy (only `process_payment` is, per spec).
    pub async fn refund(&self, transaction_id: &str, amount: Decimal) -> ProcessorResult<Transaction> {
        let record = {
            let log = self.transactions.read().expect("log poisoned");
            log.get(transaction_id)
                .cloned()
                .ok_or_else(|| ProcessorError::CannotRefund(format!("unknown transaction: {transaction_id}")))?
        };

        let lock = self.lock_for(transaction_id);
        let _guard = lock.lock().await;

        let gateway_name = {
            let tx = record.read().expect("record poisoned");
            if tx.status != TransactionStatus::Processed {
                return Err(ProcessorError::CannotRefund(format!(
                    "transaction {transaction_id} is not in Processed status"
                )));
            }
            tx.gateway_used
                .clone()
                .ok_or_else(|| ProcessorError::GatewayNotFound("no gateway recorded on transaction".to_string()))?
        };

        let gateway = self
            .router
            .get_by_name(&gateway_name)
            .ok_or_else(|| ProcessorError::GatewayNotFound(gateway_name.clone()))?;

        let refunded = gateway.refund(transaction_id, amount).await?;

        let mut tx = record.write().expect("record poisoned");
        if refunded {
            tx.status = TransactionStatus::Refunded;
            info!(transaction_id, "refund succeeded");
        } else {
            warn!(transaction_id, "gateway declined refund, transaction unchanged");
        }
        Ok(tx.clone())
    }

    /// Out-of-band status override from the webhook collaborator. Silently
    /// ignored (logged only) if the transaction is unknown or `status_string`
    /// doesn't parse. This is the only path allowed to move a terminal
    /// transaction back to a non-terminal state; the prior status is logged
    /// for audit.
    pub fn handle_notification(&self, transaction_id: &str, status_string: &str) {
        let Some(record) = self.transactions.read().expect("log poisoned").get(transaction_id).cloned() else {
            warn!(transaction_id, "notification for unknown transaction ignored");
            return;
        };

        let Ok(new_status) = status_string.parse::<TransactionStatus>() else {
            warn!(transaction_id, status_string, "notification with unparseable status ignored");
            return;
        };

        let mut tx = record.write().expect("record poisoned");
        let prior = tx.status;
        tx.status = new_status;
        info!(transaction_id, %prior, %new_status, "notification overwrote transaction status");
    }

    /// Returns a snapshot of the transaction, if known.
    pub fn get_transaction(&self, transaction_id: &str) -> Option<Transaction> {
        self.transactions
            .read()
            .expect("log poisoned")
            .get(transaction_id)
            .map(|record| record.read().expect("record poisoned").clone())
    }

    /// Removes per-id lock-table entries for transactions in a terminal
    /// status. Transaction records themselves are retained. Safe to call
    /// concurrently with `process`/`refund`: an entry currently held by
    /// another caller is simply skipped this round.
    pub fn cleanup(&self) {
        let terminal_ids: Vec<String> = self
            .transactions
            .read()
            .expect("log poisoned")
            .iter()
            .filter(|(_, record)| record.read().expect("record poisoned").status.is_terminal())
            .map(|(id, _)| id.clone())
            .collect();

        let mut locks = self.locks.lock().expect("lock table poisoned");
        for id in terminal_ids {
            if let Some(lock) = locks.get(&id) {
                if lock.try_lock().is_ok() {
                    locks.remove(&id);
                }
            }
        }
    }
}
