//! In-memory candidate source
//!
//! Trusted domains grouped by TLD, held behind a read-write lock so the
//! corpus can be extended while evaluations are running.

use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;

use crate::source::error::SourceResult;
use crate::source::traits::{CandidateSource, TrustedDomain};

/// In-memory trusted-domain corpus.
///
/// Each TLD group keeps insertion order, which is the order candidates are
/// handed to the arbitrator. Duplicate domains are ignored on insert.
#[derive(Debug, Default)]
pub struct MemorySource {
    inner: RwLock<Corpus>,
}

/// TLD groups plus an index of every stored name, updated together.
#[derive(Debug, Default)]
struct Corpus {
    by_tld: AHashMap<String, Vec<TrustedDomain>>,
    names: AHashSet<String>,
}

impl MemorySource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source seeded with the given domains.
    pub fn with_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let source = Self::new();
        source.extend(domains);
        source
    }

    /// Add a trusted domain. Returns false if it normalizes to nothing or is
    /// already present.
    pub fn insert(&self, domain: &str) -> bool {
        let trusted = TrustedDomain::new(domain);
        if trusted.domain_name.is_empty() {
            return false;
        }

        let mut corpus = self.inner.write();
        if !corpus.names.insert(trusted.domain_name.clone()) {
            return false;
        }
        corpus
            .by_tld
            .entry(trusted.tld.clone())
            .or_default()
            .push(trusted);
        true
    }

    /// Add many domains, returning how many were new.
    pub fn extend<I, S>(&self, domains: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        domains
            .into_iter()
            .filter(|domain| self.insert(domain.as_ref()))
            .count()
    }

    /// Remove a trusted domain. Returns true if it was present.
    pub fn remove(&self, domain: &str) -> bool {
        let trusted = TrustedDomain::new(domain);
        let mut corpus = self.inner.write();

        if !corpus.names.remove(&trusted.domain_name) {
            return false;
        }
        if let Some(group) = corpus.by_tld.get_mut(&trusted.tld) {
            group.retain(|d| d.domain_name != trusted.domain_name);
            if group.is_empty() {
                corpus.by_tld.remove(&trusted.tld);
            }
        }
        true
    }

    pub fn contains(&self, domain: &str) -> bool {
        let trusted = TrustedDomain::new(domain);
        self.inner.read().names.contains(&trusted.domain_name)
    }

    /// Look up the stored record for a domain (matched after normalizing).
    pub fn get(&self, domain: &str) -> Option<TrustedDomain> {
        let trusted = TrustedDomain::new(domain);
        let corpus = self.inner.read();
        if !corpus.names.contains(&trusted.domain_name) {
            return None;
        }
        corpus
            .by_tld
            .get(&trusted.tld)
            .and_then(|group| group.iter().find(|d| d.domain_name == trusted.domain_name))
            .cloned()
    }

    /// Total number of trusted domains across all TLDs.
    pub fn len(&self) -> usize {
        self.inner.read().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct TLD groups.
    pub fn tld_count(&self) -> usize {
        self.inner.read().by_tld.len()
    }

    pub fn clear(&self) {
        let mut corpus = self.inner.write();
        corpus.by_tld.clear();
        corpus.names.clear();
    }
}

impl CandidateSource for MemorySource {
    fn trusted_domains_for_tld(&self, tld: &str) -> SourceResult<Vec<TrustedDomain>> {
        Ok(self.inner.read().by_tld.get(tld).cloned().unwrap_or_default())
    }
}
