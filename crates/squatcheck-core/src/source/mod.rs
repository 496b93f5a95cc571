//! Trusted-domain candidate sources
//!
//! The engine never sees the whole corpus. For each input it asks a
//! [`CandidateSource`] for the trusted domains sharing the input's TLD and
//! compares against those alone.
//!
//! - **Memory**: [`MemorySource`], grouped by TLD in a hash map
//!
//! # Example
//!
//! ```rust
//! use squatcheck_core::source::{CandidateSource, MemorySource};
//!
//! let source = MemorySource::with_domains(["google.com", "example.com", "bbc.co.uk"]);
//!
//! let candidates = source.trusted_domains_for_tld("com").unwrap();
//! assert_eq!(candidates.len(), 2);
//! assert!(source.trusted_domains_for_tld("net").unwrap().is_empty());
//! ```

mod error;
mod memory;
mod traits;

pub use error::{SourceError, SourceResult};
pub use memory::MemorySource;
pub use traits::{CandidateSource, TrustedDomain};
