//! Payment orchestration core.
//!
//! A process-embedded library that accepts payment requests, routes each one
//! to the optimal registered gateway, coordinates retries and currency
//! conversion, and records the outcome under a caller-supplied transaction
//! identifier with at-most-once effective execution under concurrent
//! duplicate submissions.
//!
//! See `Processor` for the public surface this crate exposes.

pub mod collaborators;
pub mod config;
pub mod core;
pub mod domain;
pub mod gateways;
pub mod processor;
pub mod retry;
pub mod router;

pub use config::ProcessorConfig;
pub use core::{ProcessorError, ProcessorResult};
pub use processor::Processor;
pub use router::Router;
