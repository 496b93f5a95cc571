//! Logging setup for the CLI.
//!
//! Stdout is reserved for JSON verdicts so output can be piped straight into
//! `jq` or another tool. All log events are written to stderr.
//!
//! The `--log-level` flag applies to the squatcheck crates only, with other
//! crates held at `warn`. A `RUST_LOG` directive replaces the whole filter.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose events follow `--log-level`.
const OWN_CRATES: &[&str] = &["squatcheck", "squatcheck_core"];

/// Filter directives for a `--log-level` value.
pub fn default_directives(level: &str) -> String {
    let mut directives = String::from("warn");
    for krate in OWN_CRATES {
        directives.push_str(&format!(",{krate}={level}"));
    }
    directives
}

/// Pick `RUST_LOG` when set and parseable, else the `--log-level` directives.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Install the global subscriber: compact events on stderr.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
