use std::sync::Arc;

use paytrust_core::domain::{Currency, PaymentStatus};
use paytrust_core::gateways::{PaymentGateway, ReferenceGateway};
use rust_decimal_macros::dec;

fn request() -> paytrust_core::domain::PaymentRequest {
    paytrust_core::domain::PaymentRequest::new(dec!(250), Currency::Usd, "1234567890", "0987654321")
}

#[tokio::test]
async fn concurrent_duplicates_produce_one_outcome_and_one_simulated_call() {
    let gw = Arc::new(ReferenceGateway::new("ref", dec!(0.02), [Currency::Usd]));

    let mut handles = Vec::new();
    for _ in 0..10 {
        let gw = gw.clone();
        let req = request();
        handles.push(tokio::spawn(async move { gw.process_payment(&req, "dup-tx").await }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    let first = &results[0];
    assert!(results.iter().all(|r| r == first));
}

#[tokio::test]
async fn cancel_is_ineffective_once_completed() {
    let gw = ReferenceGateway::new("ref", dec!(0.01), [Currency::Usd]);
    let processed = gw.process_payment(&request(), "t1").await;
    assert_eq!(processed.status, PaymentStatus::Completed);

    let cancel_result = gw.cancel_payment("t1").await;
    assert!(!cancel_result.is_success);
    assert_eq!(cancel_result.error_code.as_deref(), Some("CANNOT_CANCEL"));
}

#[tokio::test]
async fn cancel_unknown_transaction_reports_not_found() {
    let gw = ReferenceGateway::new("ref", dec!(0.01), [Currency::Usd]);
    let result = gw.cancel_payment("never-existed").await;
    assert!(!result.is_success);
    assert_eq!(result.error_code.as_deref(), Some("TRANSACTION_NOT_FOUND"));
}
