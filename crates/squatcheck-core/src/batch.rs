//! Batch scheduling over a bounded worker pool
//!
//! Inputs are cut into chunks of `batch_size`. Chunks run one after another;
//! items inside a chunk run on the worker pool when parallel processing is
//! on, or on the calling thread otherwise. With order preservation off, a
//! chunk's results arrive in completion order, but chunk boundaries are
//! still respected.

use std::sync::mpsc;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::config::DetectionConfig;
use crate::error::{EngineError, Result};

/// Fixed-size pool of evaluation threads.
///
/// Threads are named `squatcheck-worker-{i}` and live as long as the pool.
/// Share one pool between engines with an `Arc`.
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
    threads: usize,
}

impl WorkerPool {
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(EngineError::Config(
                "worker pool needs at least one thread".into(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("squatcheck-worker-{i}"))
            .build()
            .map_err(|e| EngineError::WorkerPool(format!("failed to create thread pool: {e}")))?;

        debug!(threads, "worker pool started");
        Ok(Self { pool, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

/// Runs a per-item function over a slice in chunks.
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    pool: Arc<WorkerPool>,
    batch_size: usize,
    parallel: bool,
    preserve_order: bool,
}

impl BatchScheduler {
    pub fn new(pool: Arc<WorkerPool>, config: &DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pool,
            batch_size: config.batch_size,
            parallel: config.enable_parallel_processing,
            preserve_order: config.preserve_batch_order,
        })
    }

    /// Apply `f` to every item. The first error aborts the run; results of
    /// items already finished are dropped.
    pub fn run<I, T, F>(&self, items: &[I], f: F) -> Result<Vec<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> Result<T> + Sync,
    {
        let mut results = Vec::with_capacity(items.len());

        for (index, chunk) in items.chunks(self.batch_size).enumerate() {
            debug!(chunk = index, items = chunk.len(), "running chunk");

            let chunk_results = if !self.parallel {
                chunk.iter().map(|item| f(item)).collect::<Result<Vec<_>>>()?
            } else if self.preserve_order {
                self.run_ordered(chunk, &f)?
            } else {
                self.run_unordered(chunk, &f)?
            };
            results.extend(chunk_results);
        }

        Ok(results)
    }

    fn run_ordered<I, T, F>(&self, chunk: &[I], f: &F) -> Result<Vec<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> Result<T> + Sync,
    {
        self.pool
            .pool
            .install(|| chunk.par_iter().map(f).collect())
    }

    fn run_unordered<I, T, F>(&self, chunk: &[I], f: &F) -> Result<Vec<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> Result<T> + Sync,
    {
        let (tx, rx) = mpsc::channel();

        self.pool.pool.scope(|scope| {
            for item in chunk {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let _ = tx.send(f(item));
                });
            }
        });

        // Every task has finished once the scope returns
        drop(tx);
        rx.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn scheduler(threads: usize, config: DetectionConfig) -> BatchScheduler {
        let pool = Arc::new(WorkerPool::new(threads).unwrap());
        BatchScheduler::new(pool, &config).unwrap()
    }

    fn config(parallel: bool, preserve_order: bool, batch_size: usize) -> DetectionConfig {
        DetectionConfig {
            enable_parallel_processing: parallel,
            preserve_batch_order: preserve_order,
            batch_size,
            ..Default::default()
        }
    }

    fn worker_name() -> String {
        std::thread::current().name().unwrap_or_default().to_string()
    }

    #[test]
    fn test_pool_rejects_zero_threads() {
        assert!(matches!(WorkerPool::new(0), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_scheduler_rejects_zero_batch_size() {
        let pool = Arc::new(WorkerPool::new(1).unwrap());
        let result = BatchScheduler::new(pool, &config(true, true, 0));
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_empty_input() {
        let scheduler = scheduler(2, config(true, true, 10));
        let results: Vec<u32> = scheduler.run(&[] as &[u32], |n| Ok(*n)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_sequential_runs_on_caller() {
        let scheduler = scheduler(2, config(false, true, 3));
        let caller = worker_name();

        let items: Vec<u32> = (0..10).collect();
        let results = scheduler.run(&items, |n| Ok((*n * 2, worker_name()))).unwrap();

        let doubled: Vec<u32> = results.iter().map(|(n, _)| *n).collect();
        assert_eq!(doubled, (0..10).map(|n| n * 2).collect::<Vec<_>>());
        assert!(results.iter().all(|(_, name)| *name == caller));
    }

    #[test]
    fn test_parallel_preserves_order() {
        let scheduler = scheduler(4, config(true, true, 7));
        let items: Vec<u32> = (0..50).collect();

        let results = scheduler.run(&items, |n| Ok(*n + 1)).unwrap();
        assert_eq!(results, (1..=50).collect::<Vec<_>>());
    }

    #[test]
    fn test_parallel_runs_on_worker_threads() {
        let scheduler = scheduler(2, config(true, true, 4));
        let items: Vec<u32> = (0..8).collect();

        let names = scheduler.run(&items, |_| Ok(worker_name())).unwrap();
        assert!(names.iter().all(|name| name.starts_with("squatcheck-worker-")));
    }

    #[test]
    fn test_unordered_keeps_chunk_boundaries() {
        let scheduler = scheduler(4, config(true, false, 3));
        let items: Vec<u32> = (0..10).collect();

        let results = scheduler.run(&items, |n| Ok(*n)).unwrap();
        assert_eq!(results.len(), 10);

        for (chunk_results, chunk_items) in results.chunks(3).zip(items.chunks(3)) {
            let got: HashSet<u32> = chunk_results.iter().copied().collect();
            let expected: HashSet<u32> = chunk_items.iter().copied().collect();
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_unordered_runs_on_worker_threads() {
        let scheduler = scheduler(2, config(true, false, 5));
        let items: Vec<u32> = (0..5).collect();

        let names = scheduler.run(&items, |_| Ok(worker_name())).unwrap();
        assert!(names.iter().all(|name| name.starts_with("squatcheck-worker-")));
    }

    #[test]
    fn test_error_aborts_run() {
        for (parallel, preserve_order) in [(false, true), (true, true), (true, false)] {
            let scheduler = scheduler(3, config(parallel, preserve_order, 4));
            let items: Vec<u32> = (0..12).collect();

            let result = scheduler.run(&items, |n| {
                if *n == 6 {
                    Err(EngineError::WorkerPool("boom".into()))
                } else {
                    Ok(*n)
                }
            });
            assert!(
                matches!(result, Err(EngineError::WorkerPool(_))),
                "parallel={parallel} preserve_order={preserve_order}"
            );
        }
    }

    #[test]
    fn test_pool_can_be_shared() {
        let pool = Arc::new(WorkerPool::new(2).unwrap());
        let a = BatchScheduler::new(Arc::clone(&pool), &config(true, true, 5)).unwrap();
        let b = BatchScheduler::new(Arc::clone(&pool), &config(true, false, 5)).unwrap();

        let items: Vec<u32> = (0..20).collect();
        assert_eq!(a.run(&items, |n| Ok(*n)).unwrap().len(), 20);
        assert_eq!(b.run(&items, |n| Ok(*n)).unwrap().len(), 20);
        assert_eq!(pool.threads(), 2);
    }
}
