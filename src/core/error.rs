use crate::domain::Currency;

/// Result type used throughout the processor core.
pub type ProcessorResult<T> = std::result::Result<T, ProcessorError>;

/// Errors raised by the processor, router and gateway contracts.
///
/// Most of these are folded into a `Transaction`'s `Failed` status by
/// `Processor::process` rather than surfaced to the caller — see `process`'s
/// doc comment for which variants actually propagate as `Err`.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ProcessorError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no gateway available for this request")]
    NoGatewayAvailable,

    #[error("gateway error: {0}")]
    GatewayError(String),

    #[error("transaction cannot be refunded: {0}")]
    CannotRefund(String),

    #[error("gateway not found: {0}")]
    GatewayNotFound(String),

    #[error("unsupported currency conversion: {from} -> {to}")]
    UnsupportedConversion { from: Currency, to: Currency },

    #[error("internal error: {0}")]
    Internal(String),
}
