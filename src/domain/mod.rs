//! Domain model: the value types the rest of the crate operates on.

mod currency;
mod payment_result;
mod refund_result;
mod request;
mod transaction;

pub use currency::Currency;
pub use payment_result::{PaymentResult, PaymentStatus};
pub use refund_result::{RefundResult, RefundStatus};
pub use request::PaymentRequest;
pub use transaction::{Transaction, TransactionStatus};
