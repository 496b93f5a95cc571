//! Engine error types

use thiserror::Error;

use crate::source::SourceError;

/// Errors returned by the detection engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Candidate lookup failed; the evaluation (or whole batch) is abandoned
    #[error("candidate source error: {0}")]
    Source(#[from] SourceError),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The worker pool could not be built
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
