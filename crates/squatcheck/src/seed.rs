//! Trusted-domain seed loading
//!
//! Reads a Tranco-style ranking file (`rank,domain` per line) into a
//! [`MemorySource`]. A leading header line is skipped, recognized by a first
//! column that is not a rank number.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use squatcheck_core::MemorySource;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming the seed file when `--trusted` is not given
pub const SEED_PATH_ENV: &str = "TRANCO_FILEPATH";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to open seed file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Counts from one seed load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedStats {
    /// Records read, header and blank lines excluded
    pub records: usize,
    /// New domains added to the source
    pub inserted: usize,
    /// Malformed records and duplicates
    pub skipped: usize,
}

/// Load a seed file into `source`.
pub fn load_file(path: &Path, source: &MemorySource) -> Result<SeedStats, SeedError> {
    let file = File::open(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let stats = load_reader(file, source).map_err(|source| SeedError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    if stats.inserted == 0 {
        warn!(path = %path.display(), "no trusted domains found in seed file");
    } else {
        info!(
            path = %path.display(),
            inserted = stats.inserted,
            skipped = stats.skipped,
            "loaded trusted domains"
        );
    }
    Ok(stats)
}

/// Load `rank,domain` records from any reader.
///
/// Rows may have any number of fields; only the second is used.
pub fn load_reader<R: Read>(reader: R, source: &MemorySource) -> csv::Result<SeedStats> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut stats = SeedStats::default();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());

        if index == 0 && record.get(0).unwrap_or_default().parse::<u64>().is_err() {
            debug!(line, "skipping seed header");
            continue;
        }

        stats.records += 1;
        match record.get(1) {
            Some(domain) if source.insert(domain) => stats.inserted += 1,
            _ => {
                debug!(line, "skipping seed record");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}
