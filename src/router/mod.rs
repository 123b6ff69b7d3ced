//! Gateway selection: filter by currency support and live availability, rank
//! by commission.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{ProcessorError, ProcessorResult};
use crate::domain::PaymentRequest;
use crate::gateways::LegacyGateway;

/// Registry of gateways plus the lowest-commission selection algorithm.
///
/// `get_by_name` never suspends (a plain map lookup); `select_optimal` does,
/// since it calls each candidate's `is_available`/`get_commission`.
pub struct Router {
    gateways: Vec<Arc<dyn LegacyGateway>>,
}

impl Router {
    pub fn new() -> Self {
        Self { gateways: Vec::new() }
    }

    /// Registers a gateway. Registration order is the router's tie-break
    /// order for equal commissions.
    pub fn register(&mut self, gateway: Arc<dyn LegacyGateway>) {
        self.gateways.push(gateway);
    }

    /// Exact-match lookup by name. Does not mutate state, never suspends.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn LegacyGateway>> {
        self.gateways.iter().find(|g| g.name() == name).cloned()
    }

    /// Selects the available, currency-supporting gateway with the lowest
    /// commission for `request.currency`, tie-broken by registration order.
    /// Fails with `NoGatewayAvailable` if no candidate qualifies.
    pub async fn select_optimal(&self, request: &PaymentRequest) -> ProcessorResult<Arc<dyn LegacyGateway>> {
        let mut ranked: Vec<(usize, Arc<dyn LegacyGateway>, Decimal)> = Vec::new();

        for (index, gateway) in self.gateways.iter().enumerate() {
            if !gateway.supports_currency(request.currency) {
                continue;
            }
            if !gateway.is_available().await {
                continue;
            }
            let commission = gateway.get_commission(request.currency).await;
            ranked.push((index, gateway.clone(), commission));
        }

        ranked.sort_by(|a, b| a.2.cmp(&b.2).then(a.0.cmp(&b.0)));

        match ranked.into_iter().next() {
            Some((_, gateway, commission)) => {
                debug!(gateway = gateway.name(), %commission, "selected optimal gateway");
                Ok(gateway)
            }
            None => Err(ProcessorError::NoGatewayAvailable),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
