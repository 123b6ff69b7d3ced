#[path = "../support/mod.rs"]
mod support;

use std::sync::Arc;

use paytrust_core::collaborators::{BalanceService, DefaultRateService, DefaultValidator, InMemoryBalanceService};
use paytrust_core::domain::{Currency, TransactionStatus};
use paytrust_core::{Processor, Router};
use rust_decimal_macros::dec;
use support::{usd_request, AlwaysValid, CountingGateway};

fn processor_with(router: Router, rate_service: Arc<dyn paytrust_core::collaborators::RateService>) -> Processor {
    Processor::new(Arc::new(AlwaysValid), router, rate_service)
}

fn no_conversion_rate_service() -> Arc<dyn paytrust_core::collaborators::RateService> {
    Arc::new(DefaultRateService::new())
}

#[tokio::test]
async fn valid_payment_is_processed_by_the_cheapest_gateway() {
    let mut router = Router::new();
    router.register(Arc::new(CountingGateway::new("Cheap", dec!(0.01), vec![Currency::Usd])));
    router.register(Arc::new(CountingGateway::new("Pricey", dec!(0.05), vec![Currency::Usd])));
    let processor = processor_with(router, no_conversion_rate_service());

    let tx = processor.process(usd_request(dec!(100)), "flow-1", None).await;

    assert_eq!(tx.status, TransactionStatus::Processed);
    assert_eq!(tx.gateway_used.as_deref(), Some("Cheap"));
    assert_eq!(tx.commission, Some(dec!(0.01)));
}

#[tokio::test]
async fn repeated_calls_with_the_same_id_are_idempotent() {
    let gateway = Arc::new(CountingGateway::new("Only", dec!(0.02), vec![Currency::Usd]));
    let mut router = Router::new();
    router.register(gateway.clone());
    let processor = processor_with(router, no_conversion_rate_service());

    let first = processor.process(usd_request(dec!(50)), "flow-2", None).await;
    let second = processor.process(usd_request(dec!(50)), "flow-2", None).await;

    assert_eq!(first.status, TransactionStatus::Processed);
    assert_eq!(second.status, TransactionStatus::Processed);
    assert_eq!(gateway.process_call_count(), 1);
}

#[tokio::test]
async fn transient_gateway_failures_are_retried_until_success() {
    let gateway = Arc::new(
        CountingGateway::new("Flaky", dec!(0.02), vec![Currency::Usd]).with_outcomes(vec![
            Ok(false),
            Ok(false),
            Ok(true),
        ]),
    );
    let mut router = Router::new();
    router.register(gateway.clone());
    let processor = processor_with(router, no_conversion_rate_service());

    let tx = processor.process(usd_request(dec!(75)), "flow-3", None).await;

    assert_eq!(tx.status, TransactionStatus::Processed);
    assert_eq!(gateway.process_call_count(), 3);
}

#[tokio::test]
async fn exhausting_all_retries_leaves_the_transaction_failed() {
    let gateway = Arc::new(CountingGateway::new("AlwaysDown", dec!(0.02), vec![Currency::Usd]).with_outcomes(vec![Ok(false)]));
    let mut router = Router::new();
    router.register(gateway.clone());
    let processor = processor_with(router, no_conversion_rate_service());

    let tx = processor.process(usd_request(dec!(75)), "flow-4", None).await;

    assert_eq!(tx.status, TransactionStatus::Failed);
    assert_eq!(gateway.process_call_count(), 4);
}

#[tokio::test]
async fn currency_conversion_is_applied_before_routing() {
    let mut router = Router::new();
    router.register(Arc::new(CountingGateway::new("Euro", dec!(0.01), vec![Currency::Eur])));
    let processor = processor_with(router, Arc::new(DefaultRateService::new()));

    let tx = processor
        .process(usd_request(dec!(100)), "flow-5", Some(Currency::Eur))
        .await;

    assert_eq!(tx.status, TransactionStatus::Processed);
    assert_eq!(tx.request.currency, Currency::Eur);
    assert_eq!(tx.request.amount, dec!(85.00));
}

#[tokio::test]
async fn a_processed_transaction_can_be_refunded() {
    let gateway = Arc::new(CountingGateway::new("Refundable", dec!(0.01), vec![Currency::Usd]));
    let mut router = Router::new();
    router.register(gateway.clone());
    let processor = processor_with(router, no_conversion_rate_service());

    processor.process(usd_request(dec!(60)), "flow-6", None).await;
    let refunded = processor.refund("flow-6", dec!(60)).await.unwrap();

    assert_eq!(refunded.status, TransactionStatus::Refunded);
    assert_eq!(gateway.refund_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn refunding_a_transaction_that_was_never_processed_fails() {
    let mut router = Router::new();
    router.register(Arc::new(CountingGateway::new("Only", dec!(0.01), vec![Currency::Usd])));
    let processor = processor_with(router, no_conversion_rate_service());

    let result = processor.refund("never-processed", dec!(10)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn validator_rejection_fails_without_touching_the_gateway() {
    let gateway = Arc::new(CountingGateway::new("Only", dec!(0.01), vec![Currency::Usd]));
    let mut router = Router::new();
    router.register(gateway.clone());

    let balances = InMemoryBalanceService::new();
    balances.set_balance("1234567890", Currency::Usd, dec!(0));
    let validator = Arc::new(DefaultValidator::new(Arc::new(balances)));
    let processor = Processor::new(validator, router, no_conversion_rate_service());

    let tx = processor.process(usd_request(dec!(100)), "flow-8", None).await;

    assert_eq!(tx.status, TransactionStatus::Failed);
    assert_eq!(gateway.process_call_count(), 0);
}
