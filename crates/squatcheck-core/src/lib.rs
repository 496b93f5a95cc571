//! squatcheck Core Engine
//!
//! Detects typosquatting: domains registered to look or sound like a trusted
//! domain. Each input is compared against the trusted domains sharing its
//! TLD, by bounded edit distance and by phonetic code.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use squatcheck_core::{DetectionConfig, MemorySource, TyposquatEngine};
//!
//! let source = Arc::new(MemorySource::with_domains(["google.com", "example.com"]));
//! let engine = TyposquatEngine::with_config(source, DetectionConfig::default()).unwrap();
//!
//! let verdict = engine.evaluate("googel.com").unwrap();
//! assert!(verdict.is_typosquat);
//! assert_eq!(verdict.closest_edit_match.as_deref(), Some("google.com"));
//!
//! let verdicts = engine.evaluate_batch(&["example.com", "exampel.com"]).unwrap();
//! assert!(!verdicts[0].is_typosquat);
//! assert!(verdicts[1].is_typosquat);
//! ```

pub mod arbiter;
pub mod batch;
pub mod config;
pub mod distance;
pub mod domain;
pub mod engine;
pub mod error;
pub mod phonetic;
pub mod source;
pub mod verdict;

// Re-export main types at crate root
pub use batch::{BatchScheduler, WorkerPool};
pub use config::DetectionConfig;
pub use domain::CanonicalDomain;
pub use engine::TyposquatEngine;
pub use error::{EngineError, Result};
pub use phonetic::PhoneticAlgorithm;
pub use source::{CandidateSource, MemorySource, SourceError, SourceResult, TrustedDomain};
pub use verdict::MatchVerdict;
