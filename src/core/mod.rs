pub mod error;

pub use error::{ProcessorError, ProcessorResult};
