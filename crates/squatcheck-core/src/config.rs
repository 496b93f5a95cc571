//! Detection configuration

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::phonetic::PhoneticAlgorithm;

/// Settings shared by every evaluation an engine runs.
///
/// Read-only once an engine is built. Field names serialize in camelCase
/// (`editDistanceThreshold`, `maxThreads`, ...) and missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectionConfig {
    /// Largest edit distance that still counts as a typo
    pub edit_distance_threshold: usize,
    /// Master switch for all phonetic checks
    pub enable_phonetic_matching: bool,
    pub enable_soundex: bool,
    pub enable_metaphone: bool,
    pub enable_double_metaphone: bool,
    /// Spread batch chunks across the worker pool
    pub enable_parallel_processing: bool,
    /// Worker pool size
    pub max_threads: usize,
    /// Items per chunk; a chunk finishes before the next one starts
    pub batch_size: usize,
    /// Collect parallel results in input order rather than completion order
    pub preserve_batch_order: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            edit_distance_threshold: 2,
            enable_phonetic_matching: true,
            enable_soundex: true,
            enable_metaphone: true,
            enable_double_metaphone: true,
            enable_parallel_processing: true,
            max_threads: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            batch_size: 100,
            preserve_batch_order: true,
        }
    }
}

impl DetectionConfig {
    /// Phonetic algorithms to try, in arbitration order. Empty when the
    /// master switch is off.
    pub fn enabled_phonetic_algorithms(&self) -> Vec<PhoneticAlgorithm> {
        if !self.enable_phonetic_matching {
            return Vec::new();
        }

        PhoneticAlgorithm::ALL
            .into_iter()
            .filter(|algorithm| match algorithm {
                PhoneticAlgorithm::Soundex => self.enable_soundex,
                PhoneticAlgorithm::Metaphone => self.enable_metaphone,
                PhoneticAlgorithm::DoubleMetaphone => self.enable_double_metaphone,
            })
            .collect()
    }

    /// Reject settings the worker pool and scheduler cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_threads == 0 {
            return Err(EngineError::Config("maxThreads must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(EngineError::Config("batchSize must be at least 1".into()));
        }
        Ok(())
    }
}
