//! Candidate source error types

use thiserror::Error;

/// Errors a candidate source can report.
///
/// These are the only failures the engine propagates: without candidates
/// there is no meaningful verdict.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The backing store cannot be reached
    #[error("candidate source unavailable: {0}")]
    Unavailable(String),

    /// A lookup for one TLD failed
    #[error("candidate lookup failed for TLD '{tld}': {reason}")]
    Lookup { tld: String, reason: String },

    /// Any other backend failure (database, filesystem, etc.)
    #[error("candidate source backend error: {0}")]
    Backend(String),
}

/// Result type for candidate source operations
pub type SourceResult<T> = Result<T, SourceError>;
