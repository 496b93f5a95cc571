//! Batch evaluation and candidate source failure tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use squatcheck_core::{
    CandidateSource, DetectionConfig, EngineError, MatchVerdict, MemorySource, SourceError,
    SourceResult, TrustedDomain, TyposquatEngine, WorkerPool,
};

const TRUSTED: &[&str] = &["google.com", "example.com", "microsoft.com", "example.org"];

const INPUTS: &[&str] = &[
    "googel.com",
    "example.com",
    "exampel.org",
    "microsft.com",
    "completely-different.com",
    "localhost",
    "eksample.com",
    "www.google.com",
    "gooogle.com",
    "exmaple.com",
    "example.net",
];

fn memory_source() -> Arc<MemorySource> {
    Arc::new(MemorySource::with_domains(TRUSTED.iter().copied()))
}

fn config(parallel: bool, preserve_order: bool, batch_size: usize) -> DetectionConfig {
    DetectionConfig {
        enable_parallel_processing: parallel,
        preserve_batch_order: preserve_order,
        batch_size,
        max_threads: 4,
        ..Default::default()
    }
}

/// Fails every lookup for one TLD, delegates the rest
struct FailingSource {
    inner: MemorySource,
    failing_tld: &'static str,
}

impl CandidateSource for FailingSource {
    fn trusted_domains_for_tld(&self, tld: &str) -> SourceResult<Vec<TrustedDomain>> {
        if tld == self.failing_tld {
            return Err(SourceError::Lookup {
                tld: tld.to_string(),
                reason: "connection reset".to_string(),
            });
        }
        self.inner.trusted_domains_for_tld(tld)
    }
}

/// Records every TLD it is asked for
#[derive(Default)]
struct RecordingSource {
    inner: MemorySource,
    requested: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl CandidateSource for RecordingSource {
    fn trusted_domains_for_tld(&self, tld: &str) -> SourceResult<Vec<TrustedDomain>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(tld.to_string());
        self.inner.trusted_domains_for_tld(tld)
    }
}

#[test]
fn test_batch_matches_single_evaluation() {
    let engine = TyposquatEngine::with_config(memory_source(), config(false, true, 100)).unwrap();

    let batch = engine.evaluate_batch(INPUTS).unwrap();
    let single: Vec<MatchVerdict> = INPUTS.iter().map(|d| engine.evaluate(d).unwrap()).collect();

    assert_eq!(batch, single);
}

#[test]
fn test_parallel_ordered_matches_sequential() {
    let sequential = TyposquatEngine::with_config(memory_source(), config(false, true, 3)).unwrap();
    let parallel = TyposquatEngine::with_config(memory_source(), config(true, true, 3)).unwrap();

    assert_eq!(
        parallel.evaluate_batch(INPUTS).unwrap(),
        sequential.evaluate_batch(INPUTS).unwrap()
    );
}

#[test]
fn test_parallel_unordered_returns_every_verdict() {
    let engine = TyposquatEngine::with_config(memory_source(), config(true, false, 4)).unwrap();

    let verdicts = engine.evaluate_batch(INPUTS).unwrap();
    assert_eq!(verdicts.len(), INPUTS.len());

    let returned: HashSet<&str> = verdicts.iter().map(|v| v.input_domain.as_str()).collect();
    let expected: HashSet<&str> = INPUTS.iter().copied().collect();
    assert_eq!(returned, expected);

    // Each verdict still matches its own single evaluation
    for verdict in &verdicts {
        assert_eq!(verdict, &engine.evaluate(&verdict.input_domain).unwrap());
    }
}

#[test]
fn test_batch_size_larger_than_input() {
    let engine = TyposquatEngine::with_config(memory_source(), config(true, true, 1000)).unwrap();
    assert_eq!(engine.evaluate_batch(INPUTS).unwrap().len(), INPUTS.len());
}

#[test]
fn test_batch_size_one() {
    let engine = TyposquatEngine::with_config(memory_source(), config(true, false, 1)).unwrap();
    let verdicts = engine.evaluate_batch(INPUTS).unwrap();

    // One item per chunk leaves no room for reordering
    let order: Vec<&str> = verdicts.iter().map(|v| v.input_domain.as_str()).collect();
    assert_eq!(order, INPUTS);
}

#[test]
fn test_empty_batch() {
    let engine = TyposquatEngine::with_config(memory_source(), config(true, true, 10)).unwrap();
    assert!(engine.evaluate_batch::<String>(&[]).unwrap().is_empty());
}

#[test]
fn test_source_failure_propagates() {
    let source = Arc::new(FailingSource {
        inner: MemorySource::with_domains(TRUSTED.iter().copied()),
        failing_tld: "org",
    });
    let engine = TyposquatEngine::with_config(source, config(false, true, 10)).unwrap();

    assert!(engine.evaluate("googel.com").unwrap().is_typosquat);

    let err = engine.evaluate("exampel.org").unwrap_err();
    match err {
        EngineError::Source(SourceError::Lookup { tld, .. }) => assert_eq!(tld, "org"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_source_failure_aborts_batch() {
    for (parallel, preserve_order) in [(false, true), (true, true), (true, false)] {
        let source = Arc::new(FailingSource {
            inner: MemorySource::with_domains(TRUSTED.iter().copied()),
            failing_tld: "org",
        });
        let engine =
            TyposquatEngine::with_config(source, config(parallel, preserve_order, 4)).unwrap();

        let result = engine.evaluate_batch(INPUTS);
        assert!(
            matches!(result, Err(EngineError::Source(_))),
            "parallel={parallel} preserve_order={preserve_order}"
        );
    }
}

#[test]
fn test_one_lookup_per_domain() {
    let source = Arc::new(RecordingSource {
        inner: MemorySource::with_domains(TRUSTED.iter().copied()),
        ..Default::default()
    });
    let engine = TyposquatEngine::with_config(source.clone(), config(true, true, 4)).unwrap();

    engine.evaluate_batch(INPUTS).unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), INPUTS.len());
}

#[test]
fn test_lookup_uses_extracted_tld() {
    let source = Arc::new(RecordingSource::default());
    let engine = TyposquatEngine::with_config(source.clone(), config(false, true, 10)).unwrap();

    for domain in ["WWW.Example.COM", "sub.example.co.uk", "mail.google.com", "localhost"] {
        engine.evaluate(domain).unwrap();
    }

    assert_eq!(
        *source.requested.lock(),
        vec!["com", "co.uk", "google.com", ""]
    );
}

#[test]
fn test_engines_share_a_pool() {
    let pool = Arc::new(WorkerPool::new(2).unwrap());
    let a = TyposquatEngine::new(memory_source(), config(true, true, 5), Arc::clone(&pool)).unwrap();
    let b =
        TyposquatEngine::new(memory_source(), config(true, false, 5), Arc::clone(&pool)).unwrap();

    assert_eq!(a.evaluate_batch(INPUTS).unwrap().len(), INPUTS.len());
    assert_eq!(b.evaluate_batch(INPUTS).unwrap().len(), INPUTS.len());
}

#[test]
fn test_invalid_config_rejected() {
    let pool = Arc::new(WorkerPool::new(1).unwrap());
    let result = TyposquatEngine::new(memory_source(), config(true, true, 0), pool);
    assert!(matches!(result, Err(EngineError::Config(_))));
}
