//! Detection settings from the environment
//!
//! Environment variables:
//! - `SQUATCHECK_EDIT_DISTANCE_THRESHOLD`: largest edit distance flagged (default: 2)
//! - `SQUATCHECK_ENABLE_PHONETIC`: master phonetic switch (default: true)
//! - `SQUATCHECK_ENABLE_SOUNDEX`, `SQUATCHECK_ENABLE_METAPHONE`,
//!   `SQUATCHECK_ENABLE_DOUBLE_METAPHONE`: per-algorithm switches (default: true)
//! - `SQUATCHECK_ENABLE_PARALLEL`: evaluate batches on the worker pool (default: true)
//! - `SQUATCHECK_MAX_THREADS`: worker pool size (default: available cores)
//! - `SQUATCHECK_BATCH_SIZE`: domains per chunk (default: 100)
//! - `SQUATCHECK_PRESERVE_ORDER`: keep input order in parallel batches (default: true)

use std::str::FromStr;

use squatcheck_core::DetectionConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Build a config from the process environment.
pub fn from_env() -> Result<DetectionConfig, ConfigError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Build a config from any key lookup, starting from the defaults.
pub fn from_lookup<F>(lookup: F) -> Result<DetectionConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = DetectionConfig::default();

    Ok(DetectionConfig {
        edit_distance_threshold: number(
            &lookup,
            "SQUATCHECK_EDIT_DISTANCE_THRESHOLD",
            defaults.edit_distance_threshold,
        )?,
        enable_phonetic_matching: flag(
            &lookup,
            "SQUATCHECK_ENABLE_PHONETIC",
            defaults.enable_phonetic_matching,
        )?,
        enable_soundex: flag(&lookup, "SQUATCHECK_ENABLE_SOUNDEX", defaults.enable_soundex)?,
        enable_metaphone: flag(&lookup, "SQUATCHECK_ENABLE_METAPHONE", defaults.enable_metaphone)?,
        enable_double_metaphone: flag(
            &lookup,
            "SQUATCHECK_ENABLE_DOUBLE_METAPHONE",
            defaults.enable_double_metaphone,
        )?,
        enable_parallel_processing: flag(
            &lookup,
            "SQUATCHECK_ENABLE_PARALLEL",
            defaults.enable_parallel_processing,
        )?,
        max_threads: number(&lookup, "SQUATCHECK_MAX_THREADS", defaults.max_threads)?,
        batch_size: number(&lookup, "SQUATCHECK_BATCH_SIZE", defaults.batch_size)?,
        preserve_batch_order: flag(
            &lookup,
            "SQUATCHECK_PRESERVE_ORDER",
            defaults.preserve_batch_order,
        )?,
    })
}

fn number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

fn flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}
