#[path = "../support/mod.rs"]
mod support;

use std::sync::Arc;

use paytrust_core::domain::Currency;
use paytrust_core::Router;
use rust_decimal_macros::dec;
use support::{usd_request, CountingGateway};

#[tokio::test]
async fn ties_are_broken_by_registration_order() {
    let mut router = Router::new();
    router.register(Arc::new(CountingGateway::new("First", dec!(0.01), vec![Currency::Usd])));
    router.register(Arc::new(CountingGateway::new("Second", dec!(0.01), vec![Currency::Usd])));

    let selected = router.select_optimal(&usd_request(dec!(100))).await.unwrap();
    assert_eq!(selected.name(), "First");
}

#[tokio::test]
async fn currency_mismatch_excludes_a_candidate_entirely() {
    let mut router = Router::new();
    router.register(Arc::new(CountingGateway::new("EurOnly", dec!(0.001), vec![Currency::Eur])));
    router.register(Arc::new(CountingGateway::new("UsdOnly", dec!(0.05), vec![Currency::Usd])));

    let selected = router.select_optimal(&usd_request(dec!(100))).await.unwrap();
    assert_eq!(selected.name(), "UsdOnly");
}

#[tokio::test]
async fn get_by_name_does_not_consult_availability() {
    let mut router = Router::new();
    let gateway = Arc::new(CountingGateway::new("Gw", dec!(0.01), vec![Currency::Usd]));
    gateway.available.store(false, std::sync::atomic::Ordering::SeqCst);
    router.register(gateway);

    assert!(router.get_by_name("Gw").is_some());
}
