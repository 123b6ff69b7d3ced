use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::ProcessorConfig;
use crate::core::{ProcessorError, ProcessorResult};
use crate::domain::Currency;

/// Exchange-rate lookup collaborator. `get_rate` is a suspension point, per
/// a real implementation calls out to a rate provider.
#[async_trait]
pub trait RateService: Send + Sync {
    async fn get_rate(&self, from: Currency, to: Currency) -> ProcessorResult<Decimal>;
}

/// Default rate service: a static conversion table, with a
/// cache per `(from, to)` pair (TTL from `ProcessorConfig`, 5 minutes by
/// default). Entries are invalidated lazily on lookup rather than by a
/// background eviction task, keeping the collaborator free of any timer
/// responsibilities of its own.
pub struct DefaultRateService {
    table: HashMap<(Currency, Currency), Decimal>,
    cache: Mutex<HashMap<(Currency, Currency), (Decimal, Instant)>>,
    cache_ttl: Duration,
}

impl DefaultRateService {
    pub fn new() -> Self {
        Self::with_config(&ProcessorConfig::default())
    }

    pub fn with_config(config: &ProcessorConfig) -> Self {
        use Currency::*;
        let table = HashMap::from([
            ((Usd, Eur), dec!(0.85)),
            ((Usd, Rub), dec!(90)),
            ((Eur, Usd), dec!(1.18)),
            ((Eur, Rub), dec!(100)),
            ((Rub, Usd), dec!(0.011)),
            ((Rub, Eur), dec!(0.01)),
        ]);
        Self {
            table,
            cache: Mutex::new(HashMap::new()),
            cache_ttl: config.rate_cache_ttl,
        }
    }
}

impl Default for DefaultRateService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateService for DefaultRateService {
    async fn get_rate(&self, from: Currency, to: Currency) -> ProcessorResult<Decimal> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        {
            let mut cache = self.cache.lock().expect("rate cache poisoned");
            if let Some((rate, fetched_at)) = cache.get(&(from, to)) {
                if fetched_at.elapsed() < self.cache_ttl {
                    return Ok(*rate);
                }
                cache.remove(&(from, to));
            }
        }

        let rate = *self
            .table
            .get(&(from, to))
            .ok_or(ProcessorError::UnsupportedConversion { from, to })?;

        self.cache
            .lock()
            .expect("rate cache poisoned")
            .insert((from, to), (rate, Instant::now()));

        Ok(rate)
    }
}
