pub mod error;
pub mod telemetry;

pub use error::{AppError, ProcessorError, ProcessorResult, RemoteOperation, Result};
