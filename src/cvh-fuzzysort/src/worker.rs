//! Cooperative, time-sliced batch matching
//!
//! [`Worker`] processes candidates until its slice budget runs out and then
//! hands itself back, so a caller can interleave other work between slices.
//! [`AsyncSearch`] drives a worker on tokio, yielding to the scheduler after
//! every slice. Cancellation is observed at the start of each slice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::batch::{Ranked, Results};
use crate::error::{Error, Result};
use crate::target::{fold_str, Target};
use crate::Fuzzysort;

/// Candidates processed between clock checks
pub const CHECK_EVERY: usize = 1000;

/// Shared flag that cancels a cooperative search
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Outcome of one worker slice
#[derive(Debug)]
pub enum Step<'e, 'a, T> {
    /// Budget ran out; call [`Worker::step`] again to continue
    Pending(Worker<'e, 'a, T>),
    Done(Results<'a, T>),
}

/// Bounded-step matcher over a borrowed collection
#[derive(Debug)]
pub struct Worker<'e, 'a, T> {
    engine: &'e Fuzzysort,
    query: Vec<char>,
    targets: &'a [T],
    next: usize,
    found: Vec<Ranked<'a, T>>,
    cancel: CancelHandle,
}

impl<'e, 'a, T: Target> Worker<'e, 'a, T> {
    fn new(engine: &'e Fuzzysort, search: &str, targets: &'a [T]) -> Self {
        Self {
            engine,
            query: fold_str(search),
            targets,
            next: 0,
            found: Vec::new(),
            cancel: CancelHandle::new(),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Number of candidates examined so far
    pub fn progress(&self) -> usize {
        self.next
    }

    /// Process candidates for about `budget`, checking the clock every
    /// [`CHECK_EVERY`] candidates
    pub fn step(mut self, budget: Duration) -> Result<Step<'e, 'a, T>> {
        if self.cancel.is_canceled() {
            debug!(progress = self.next, "search canceled");
            return Err(Error::Canceled);
        }

        if self.query.is_empty() {
            return Ok(Step::Done(Results::empty()));
        }

        let started = Instant::now();
        while self.next < self.targets.len() {
            let index = self.next;
            self.next += 1;

            if let Some(ranked) = self.engine.rank(&self.query, index, &self.targets[index]) {
                self.found.push(ranked);
            }

            if self.next % CHECK_EVERY == 0
                && self.next < self.targets.len()
                && started.elapsed() >= budget
            {
                debug!(progress = self.next, total = self.targets.len(), "slice budget used");
                return Ok(Step::Pending(self));
            }
        }

        Ok(Step::Done(self.engine.finish(self.found)))
    }
}

/// A cancelable search that yields to the tokio scheduler between slices
#[derive(Debug)]
pub struct AsyncSearch<'e, 'a, T> {
    worker: Worker<'e, 'a, T>,
    budget: Duration,
}

impl<'e, 'a, T: Target> AsyncSearch<'e, 'a, T> {
    pub fn cancel_handle(&self) -> CancelHandle {
        self.worker.cancel_handle()
    }

    /// Run to completion, or to [`Error::Canceled`] if the handle fires
    /// before the last slice starts
    pub async fn run(self) -> Result<Results<'a, T>> {
        let budget = self.budget;
        let mut worker = self.worker;
        loop {
            match worker.step(budget)? {
                Step::Pending(next) => {
                    worker = next;
                    tokio::task::yield_now().await;
                }
                Step::Done(results) => return Ok(results),
            }
        }
    }
}

impl Fuzzysort {
    /// Cooperative worker for driving a search by hand
    pub fn worker<'e, 'a, T: Target>(&'e self, search: &str, targets: &'a [T]) -> Worker<'e, 'a, T> {
        Worker::new(self, search, targets)
    }

    /// Time-sliced search; same results as [`Fuzzysort::match_all`]
    pub fn match_all_async<'e, 'a, T: Target>(
        &'e self,
        search: &str,
        targets: &'a [T],
    ) -> AsyncSearch<'e, 'a, T> {
        AsyncSearch {
            worker: Worker::new(self, search, targets),
            budget: Duration::from_millis(self.options.slice_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    fn corpus(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("src/module_{i}/FuzzySearch.rs")).collect()
    }

    #[test]
    fn test_zero_budget_yields_every_check() {
        let targets = corpus(3500);
        let engine = Fuzzysort::new();
        let mut worker = engine.worker("fs", &targets);
        let mut slices = 0;

        let results = loop {
            slices += 1;
            match worker.step(Duration::ZERO).unwrap() {
                Step::Pending(next) => {
                    assert_eq!(next.progress() % CHECK_EVERY, 0);
                    worker = next;
                }
                Step::Done(results) => break results,
            }
        };

        assert_eq!(slices, 4);
        assert_eq!(results.total(), 3500);
        assert_eq!(results, engine.match_all("fs", &targets));
    }

    #[test]
    fn test_large_budget_finishes_in_one_slice() {
        let targets = corpus(2500);
        let engine = Fuzzysort::new();
        let step = engine
            .worker("fs", &targets)
            .step(Duration::from_secs(60))
            .unwrap();
        assert!(matches!(step, Step::Done(ref r) if r.total() == 2500));
    }

    #[test]
    fn test_cancel_between_slices() {
        let targets = corpus(3000);
        let engine = Fuzzysort::new();
        let worker = engine.worker("fs", &targets);
        let cancel = worker.cancel_handle();

        let worker = match worker.step(Duration::ZERO).unwrap() {
            Step::Pending(worker) => worker,
            Step::Done(_) => panic!("expected a pending slice"),
        };
        cancel.cancel();

        assert!(matches!(worker.step(Duration::ZERO), Err(Error::Canceled)));
    }

    #[test]
    fn test_empty_search_done_immediately() {
        let targets = corpus(10);
        let engine = Fuzzysort::new();
        match engine.worker("", &targets).step(Duration::ZERO).unwrap() {
            Step::Done(results) => {
                assert!(results.is_empty());
                assert_eq!(results.total(), 0);
            }
            Step::Pending(_) => panic!("empty search should finish at once"),
        }
    }

    #[tokio::test]
    async fn test_async_matches_sync() {
        let targets = corpus(5000);
        let engine = Fuzzysort::with_options(Options {
            limit: Some(10),
            slice_ms: 0,
            ..Default::default()
        })
        .unwrap();

        let results = engine.match_all_async("m9fs", &targets).run().await.unwrap();
        assert_eq!(results, engine.match_all("m9fs", &targets));
        assert_eq!(results.len(), 10);
    }

    #[tokio::test]
    async fn test_async_empty_targets() {
        let targets: Vec<String> = Vec::new();
        let engine = Fuzzysort::new();
        let results = engine.match_all_async("fs", &targets).run().await.unwrap();
        assert!(results.is_empty());
        assert_eq!(results.total(), 0);
    }

    #[tokio::test]
    async fn test_async_cancel_before_run() {
        let targets = corpus(100);
        let engine = Fuzzysort::new();
        let search = engine.match_all_async("fs", &targets);
        search.cancel_handle().cancel();

        assert!(matches!(search.run().await, Err(Error::Canceled)));
    }

    #[tokio::test]
    async fn test_async_cancel_while_running() {
        let targets = corpus(20_000);
        let engine = Fuzzysort::with_options(Options {
            slice_ms: 0,
            ..Default::default()
        })
        .unwrap();
        let search = engine.match_all_async("fs", &targets);
        let cancel = search.cancel_handle();

        let (outcome, ()) = tokio::join!(search.run(), async move {
            cancel.cancel();
        });

        assert!(matches!(outcome, Err(Error::Canceled)));
    }
}
