//! Gateway contract: the legacy boolean-result shape, the modern idempotent
//! shape, and the adapters that bridge them.

mod adapters;
mod legacy;
mod modern;
mod reference;

pub use adapters::{ForwardAdapter, ReverseAdapter};
pub use legacy::LegacyGateway;
pub use modern::PaymentGateway;
pub use reference::{RandomSource, ReferenceGateway, ThreadRngSource};
