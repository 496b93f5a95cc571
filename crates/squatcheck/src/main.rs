//! squatcheck - typosquatting checker
//!
//! Evaluates domains against a trusted-domain list and prints one JSON
//! verdict per domain.
//!
//! ## Usage
//!
//! ```bash
//! squatcheck --trusted top-1m.csv googel.com exampel.org
//! cat domains.txt | squatcheck --trusted top-1m.csv --pretty
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `TRANCO_FILEPATH`: trusted-domain CSV when `--trusted` is not given
//! - `SQUATCHECK_*`: detection settings (see `config.rs`); flags win
//! - `RUST_LOG`: log filter (default: `--log-level`)

mod config;
mod logging;
mod seed;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use squatcheck_core::{DetectionConfig, MatchVerdict, MemorySource, TyposquatEngine, WorkerPool};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "squatcheck")]
#[command(about = "Detect typosquatting domains against a trusted-domain list")]
#[command(version)]
struct Args {
    /// Domains to check (read one per line from stdin when omitted)
    domains: Vec<String>,

    /// Trusted-domain CSV (rank,domain per line)
    #[arg(short, long)]
    trusted: Option<PathBuf>,

    /// Largest edit distance flagged as a typo
    #[arg(long)]
    threshold: Option<usize>,

    /// Worker pool size
    #[arg(long)]
    threads: Option<usize>,

    /// Domains per chunk
    #[arg(long)]
    batch_size: Option<usize>,

    /// Evaluate on the calling thread only
    #[arg(long)]
    no_parallel: bool,

    /// Emit parallel results in completion order
    #[arg(long)]
    unordered: bool,

    /// Disable all phonetic checks
    #[arg(long)]
    no_phonetic: bool,

    /// Print a single pretty JSON array instead of JSON lines
    #[arg(long)]
    pretty: bool,

    /// Exit with status 1 if any domain is flagged
    #[arg(long)]
    fail_on_match: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    /// Apply flags on top of environment settings.
    fn apply(&self, config: &mut DetectionConfig) {
        if let Some(threshold) = self.threshold {
            config.edit_distance_threshold = threshold;
        }
        if let Some(threads) = self.threads {
            config.max_threads = threads;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if self.no_parallel {
            config.enable_parallel_processing = false;
        }
        if self.unordered {
            config.preserve_batch_order = false;
        }
        if self.no_phonetic {
            config.enable_phonetic_matching = false;
        }
    }

    fn seed_path(&self) -> Option<PathBuf> {
        self.trusted
            .clone()
            .or_else(|| std::env::var_os(seed::SEED_PATH_ENV).map(PathBuf::from))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let mut config = config::from_env()?;
    args.apply(&mut config);
    config.validate()?;

    let source = Arc::new(MemorySource::new());
    match args.seed_path() {
        Some(path) => {
            seed::load_file(&path, &source)?;
        }
        None => warn!(
            "no trusted-domain file given (--trusted or {}), every domain will pass",
            seed::SEED_PATH_ENV
        ),
    }

    let pool = Arc::new(WorkerPool::new(config.max_threads)?);
    info!(
        threads = pool.threads(),
        threshold = config.edit_distance_threshold,
        trusted = source.len(),
        "engine ready"
    );
    let engine = TyposquatEngine::new(source, config, pool)?;

    let domains = if args.domains.is_empty() {
        read_domains(io::stdin().lock())?
    } else {
        args.domains.clone()
    };

    let verdicts = engine.evaluate_batch(&domains)?;
    write_verdicts(&mut io::stdout().lock(), &verdicts, args.pretty)?;

    let flagged = verdicts.iter().filter(|v| v.is_typosquat).count();
    info!(domains = verdicts.len(), flagged, "done");

    if args.fail_on_match && flagged > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// One domain per line; blank lines and `#` comments are ignored.
fn read_domains<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut domains = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() && !line.starts_with('#') {
            domains.push(line.to_string());
        }
    }
    Ok(domains)
}

fn write_verdicts<W: Write>(
    out: &mut W,
    verdicts: &[MatchVerdict],
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, verdicts)?;
        writeln!(out)?;
    } else {
        for verdict in verdicts {
            serde_json::to_writer(&mut *out, verdict)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
