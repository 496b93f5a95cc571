//! TyposquatEngine - single and batch evaluation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::arbiter;
use crate::batch::{BatchScheduler, WorkerPool};
use crate::config::DetectionConfig;
use crate::domain::CanonicalDomain;
use crate::error::Result;
use crate::source::CandidateSource;
use crate::verdict::MatchVerdict;

/// Typosquatting detection engine.
///
/// Looks up candidates for each input's TLD in a [`CandidateSource`] and
/// arbitrates between edit-distance and phonetic signals. Safe to share
/// across threads; configuration is fixed at construction.
pub struct TyposquatEngine {
    source: Arc<dyn CandidateSource>,
    config: DetectionConfig,
    scheduler: BatchScheduler,
}

impl std::fmt::Debug for TyposquatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TyposquatEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TyposquatEngine {
    /// Build an engine on an existing worker pool.
    pub fn new(
        source: Arc<dyn CandidateSource>,
        config: DetectionConfig,
        pool: Arc<WorkerPool>,
    ) -> Result<Self> {
        let scheduler = BatchScheduler::new(pool, &config)?;
        Ok(Self {
            source,
            config,
            scheduler,
        })
    }

    /// Build an engine with its own pool of `config.max_threads` workers.
    pub fn with_config(source: Arc<dyn CandidateSource>, config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        let pool = Arc::new(WorkerPool::new(config.max_threads)?);
        Self::new(source, config, pool)
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Evaluate one domain.
    ///
    /// Fails only when the candidate source does.
    pub fn evaluate(&self, domain: &str) -> Result<MatchVerdict> {
        let input = CanonicalDomain::parse(domain);
        let candidates = self.source.trusted_domains_for_tld(&input.tld)?;

        debug!(
            domain = %input.normalized,
            tld = %input.tld,
            candidates = candidates.len(),
            "evaluating domain"
        );

        Ok(arbiter::evaluate_canonical(&input, &candidates, &self.config))
    }

    /// Evaluate many domains, returning one verdict per input.
    ///
    /// Verdicts follow input order unless `preserve_batch_order` is off and
    /// parallel processing is on, in which case each chunk's verdicts come in
    /// completion order. The first candidate source failure aborts the batch.
    pub fn evaluate_batch<S>(&self, domains: &[S]) -> Result<Vec<MatchVerdict>>
    where
        S: AsRef<str> + Sync,
    {
        if domains.is_empty() {
            warn!("empty domain list provided");
            return Ok(Vec::new());
        }

        let verdicts = self
            .scheduler
            .run(domains, |domain| self.evaluate(domain.as_ref()))?;

        info!(
            domains = verdicts.len(),
            flagged = verdicts.iter().filter(|v| v.is_typosquat).count(),
            "batch evaluated"
        );
        Ok(verdicts)
    }
}
