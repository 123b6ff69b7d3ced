//! Processor-wide configuration. Plain struct with a literal `Default`, no
//! environment-variable loading: this is a library with no process
//! entrypoint, unlike the teacher's `Config::from_env`, which belongs to the
//! embedding application rather than the core (see `DESIGN.md`).

use std::time::Duration;

/// Tunables an embedding application may override. Defaults mirror the rate
/// service's built-in cache window.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// How long a looked-up exchange rate stays cached.
    pub rate_cache_ttl: Duration,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            rate_cache_ttl: Duration::from_secs(5 * 60),
        }
    }
}
