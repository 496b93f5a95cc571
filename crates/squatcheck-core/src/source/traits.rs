//! Candidate source trait and the trusted domain record

use serde::{Deserialize, Serialize};

use crate::domain::{extract_tld, normalize};
use crate::source::error::SourceResult;

/// A domain known to be legitimate.
///
/// `domain_name` is canonical (see [`normalize`]) and `tld` is derived from it
/// with [`extract_tld`]. Build through [`TrustedDomain::new`] to keep both in
/// step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedDomain {
    pub domain_name: String,
    pub tld: String,
}

impl TrustedDomain {
    pub fn new(domain: &str) -> Self {
        let domain_name = normalize(domain);
        let tld = extract_tld(&domain_name);
        Self { domain_name, tld }
    }
}

/// Read access to the trusted-domain corpus, scoped by TLD.
///
/// The engine calls this once per evaluated domain, possibly from several
/// worker threads at once, so implementations must be `Send + Sync`. This is
/// the only call in the pipeline that may block.
///
/// Implementations:
/// - **Memory**: [`MemorySource`](crate::source::MemorySource), grouped by TLD
/// - Anything else (databases, remote services) lives outside this crate
pub trait CandidateSource: Send + Sync {
    /// All trusted domains whose TLD equals `tld`, possibly none.
    ///
    /// The returned order is the order the arbitrator scans in, so ties on
    /// edit distance go to whichever candidate comes first.
    fn trusted_domains_for_tld(&self, tld: &str) -> SourceResult<Vec<TrustedDomain>>;
}
