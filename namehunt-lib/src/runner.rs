//! Batch runner: chunked, cancellable availability checking.
//!
//! The runner partitions a domain list into fixed-size chunks, probes each
//! chunk with intra-chunk concurrency, and emits a progress snapshot after
//! every chunk settles. The next chunk does not start until the current one
//! has fully settled; that bound respects third-party rate limits and makes
//! the progress checkpoints coherent.
//!
//! The running accumulators are owned exclusively by the stream state and
//! mutated only at chunk boundaries, so no locking is needed.

use crate::error::NameHuntError;
use crate::probe::{backend_from_config, ProbeBackend};
use crate::types::{AvailabilityResult, BatchProgress, RunConfig, RunEvent, RunOutcome};
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal, settable once per run.
///
/// Checked at chunk boundaries only: a chunk that has already started runs
/// to completion and its results count toward `checked` (the "drain"
/// variant). Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Per-run state carried between stream steps.
struct RunState {
    backend: Arc<dyn ProbeBackend>,
    chunks: std::vec::IntoIter<Vec<String>>,
    cancel: CancelToken,
    checked: usize,
    total: usize,
    available: Vec<String>,
    finished: bool,
}

/// Drives a prober backend over a domain list.
///
/// # Example
///
/// ```rust,no_run
/// use namehunt_lib::{BatchRunner, CancelToken, RunConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runner = BatchRunner::new(RunConfig::default().with_batch_size(10))?;
/// let outcome = runner
///     .run(vec!["example.com".into()], CancelToken::new())
///     .await;
/// println!("{:?}", outcome);
/// # Ok(())
/// # }
/// ```
pub struct BatchRunner {
    backend: Arc<dyn ProbeBackend>,
    config: RunConfig,
}

impl BatchRunner {
    /// Create a runner with the backend selected by the configuration.
    ///
    /// Fails with a configuration error when the selected backend cannot be
    /// constructed (e.g. registrar credentials missing).
    pub fn new(config: RunConfig) -> Result<Self, NameHuntError> {
        let backend = backend_from_config(&config)?;
        Ok(Self { backend, config })
    }

    /// Create a runner with an explicit backend (used by tests and callers
    /// that construct their own prober).
    pub fn with_backend(backend: Arc<dyn ProbeBackend>, config: RunConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run in sequential-chunk mode, yielding a [`RunEvent`] stream.
    ///
    /// Zero or more `Progress` events are followed by exactly one `Done`
    /// event carrying the terminal [`RunOutcome`]. `checked` is monotonically
    /// non-decreasing across snapshots and ends at the input length for an
    /// uncancelled run. The cancellation signal is checked before each chunk;
    /// once set, no further chunk starts.
    pub fn run_stream(
        &self,
        domains: Vec<String>,
        cancel: CancelToken,
    ) -> Pin<Box<dyn Stream<Item = RunEvent> + Send>> {
        let batch_size = self.config.batch_size.max(1);
        let total = domains.len();
        let chunks: Vec<Vec<String>> = domains
            .chunks(batch_size)
            .map(|chunk| chunk.to_vec())
            .collect();

        let state = RunState {
            backend: Arc::clone(&self.backend),
            chunks: chunks.into_iter(),
            cancel,
            checked: 0,
            total,
            available: Vec::new(),
            finished: false,
        };

        let stream = futures::stream::unfold(state, |mut state| async move {
            if state.finished {
                return None;
            }

            if state.cancel.is_cancelled() {
                state.finished = true;
                let partial = std::mem::take(&mut state.available);
                return Some((RunEvent::Done(RunOutcome::Cancelled(partial)), state));
            }

            match state.chunks.next() {
                None => {
                    state.finished = true;
                    let available = std::mem::take(&mut state.available);
                    Some((RunEvent::Done(RunOutcome::Completed(available)), state))
                }
                Some(chunk) => {
                    let results = state.backend.probe_chunk(&chunk).await;
                    for result in &results {
                        if result.status.is_available() {
                            state.available.push(result.domain.clone());
                        }
                    }
                    state.checked = (state.checked + chunk.len()).min(state.total);

                    let progress = BatchProgress {
                        checked: state.checked,
                        total: state.total,
                        available: state.available.clone(),
                    };
                    Some((RunEvent::Progress(progress), state))
                }
            }
        });

        Box::pin(stream)
    }

    /// Run to completion, discarding intermediate progress.
    pub async fn run(&self, domains: Vec<String>, cancel: CancelToken) -> RunOutcome {
        let mut stream = self.run_stream(domains, cancel);
        while let Some(event) = stream.next().await {
            if let RunEvent::Done(outcome) = event {
                return outcome;
            }
        }
        // The stream always ends with a Done event; this is unreachable in practice.
        RunOutcome::Failed(NameHuntError::internal(
            "run stream ended without a terminal event",
        ))
    }

    /// Whole-list mode: probe every domain under a single overall concurrency
    /// cap and collect all results, preserving input order.
    ///
    /// No incremental progress is reported; use [`Self::run_stream`] for
    /// chunk-by-chunk feedback.
    pub async fn check_all(&self, domains: &[String]) -> Vec<AvailabilityResult> {
        let backend = Arc::clone(&self.backend);
        futures::stream::iter(domains.iter().cloned())
            .map(move |domain| {
                let backend = Arc::clone(&backend);
                async move { backend.probe(&domain).await }
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AvailabilityStatus;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;

    /// Backend with a scripted set of available domains and a probe counter.
    struct ScriptedBackend {
        available: HashSet<String>,
        probes: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new<const N: usize>(available: [&str; N]) -> Arc<Self> {
            Arc::new(Self {
                available: available.iter().map(|d| d.to_string()).collect(),
                probes: AtomicUsize::new(0),
            })
        }

        fn probe_count(&self) -> usize {
            self.probes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProbeBackend for ScriptedBackend {
        async fn probe(&self, domain: &str) -> AvailabilityResult {
            self.probes.fetch_add(1, Ordering::SeqCst);
            let status = if self.available.contains(domain) {
                AvailabilityStatus::Available
            } else {
                AvailabilityStatus::Unavailable
            };
            AvailabilityResult::new(domain, status)
        }
    }

    fn domains(names: &[&str]) -> Vec<String> {
        names.iter().map(|d| d.to_string()).collect()
    }

    fn runner(backend: Arc<ScriptedBackend>, batch_size: usize) -> BatchRunner {
        BatchRunner::with_backend(backend, RunConfig::default().with_batch_size(batch_size))
    }

    #[tokio::test]
    async fn covers_every_domain_exactly_once() {
        let input = domains(&[
            "a.com", "b.com", "c.com", "d.com", "e.com", "f.com", "g.com",
        ]);
        let backend = ScriptedBackend::new(["a.com", "d.com", "g.com"]);
        let runner = runner(Arc::clone(&backend), 3);

        match runner.run(input.clone(), CancelToken::new()).await {
            RunOutcome::Completed(available) => {
                assert_eq!(available, vec!["a.com", "d.com", "g.com"]);
            }
            other => panic!("expected Completed, got {:?}", other),
        }
        assert_eq!(backend.probe_count(), input.len());
    }

    #[tokio::test]
    async fn all_available_appear_once_in_input_order() {
        let input = domains(&["x.io", "y.io", "z.io"]);
        let backend = ScriptedBackend::new(["x.io", "y.io", "z.io"]);
        let runner = runner(backend, 2);

        match runner.run(input.clone(), CancelToken::new()).await {
            RunOutcome::Completed(available) => assert_eq!(available, input),
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn progress_is_monotonic_and_ends_at_total() {
        let input = domains(&["a.com", "b.com", "c.com", "d.com", "e.com"]);
        let backend = ScriptedBackend::new(["b.com"]);
        let runner = runner(backend, 2);

        let events: Vec<RunEvent> = runner
            .run_stream(input.clone(), CancelToken::new())
            .collect()
            .await;

        let checked: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                RunEvent::Progress(p) => Some(p.checked),
                RunEvent::Done(_) => None,
            })
            .collect();

        assert_eq!(checked.len(), 3); // ceil(5 / 2)
        assert!(checked.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*checked.last().unwrap(), input.len());

        // Exactly one terminal event, always last.
        assert!(matches!(events.last(), Some(RunEvent::Done(_))));
        let done_count = events
            .iter()
            .filter(|e| matches!(e, RunEvent::Done(_)))
            .count();
        assert_eq!(done_count, 1);
    }

    #[tokio::test]
    async fn cancel_before_start_issues_no_probes() {
        let input = domains(&["a.com", "b.com", "c.com"]);
        let backend = ScriptedBackend::new(["a.com"]);
        let runner = runner(Arc::clone(&backend), 2);

        let cancel = CancelToken::new();
        cancel.cancel();

        let events: Vec<RunEvent> = runner.run_stream(input, cancel).collect().await;
        assert_eq!(events.len(), 1);
        match &events[0] {
            RunEvent::Done(RunOutcome::Cancelled(partial)) => assert!(partial.is_empty()),
            other => panic!("expected Cancelled([]), got {:?}", other),
        }
        assert_eq!(backend.probe_count(), 0);
    }

    #[tokio::test]
    async fn cancel_at_chunk_boundary_keeps_partial_results() {
        let input = domains(&["a.com", "b.com", "c.com", "d.com"]);
        let backend = ScriptedBackend::new(["a.com", "c.com"]);
        let runner = runner(Arc::clone(&backend), 2);

        let cancel = CancelToken::new();
        let mut stream = runner.run_stream(input, cancel.clone());

        // First chunk settles normally.
        match stream.next().await {
            Some(RunEvent::Progress(p)) => {
                assert_eq!(p.checked, 2);
                assert_eq!(p.available, vec!["a.com"]);
            }
            other => panic!("expected first progress event, got {:?}", other),
        }

        // Cancel before the second chunk starts.
        cancel.cancel();
        match stream.next().await {
            Some(RunEvent::Done(RunOutcome::Cancelled(partial))) => {
                assert_eq!(partial, vec!["a.com"]);
            }
            other => panic!("expected Cancelled, got {:?}", other),
        }
        assert!(stream.next().await.is_none());
        assert_eq!(backend.probe_count(), 2); // second chunk never started
    }

    #[tokio::test]
    async fn empty_input_completes_immediately() {
        let backend = ScriptedBackend::new([]);
        let runner = runner(Arc::clone(&backend), 10);

        let events: Vec<RunEvent> = runner.run_stream(Vec::new(), CancelToken::new()).collect().await;
        assert_eq!(events.len(), 1);
        match &events[0] {
            RunEvent::Done(RunOutcome::Completed(available)) => assert!(available.is_empty()),
            other => panic!("expected Completed([]), got {:?}", other),
        }
        assert_eq!(backend.probe_count(), 0);
    }

    #[tokio::test]
    async fn check_all_preserves_input_order() {
        let input = domains(&["a.com", "b.com", "c.com"]);
        let backend = ScriptedBackend::new(["b.com"]);
        let runner = runner(backend, 10);

        let results = runner.check_all(&input).await;
        let names: Vec<&str> = results.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(names, vec!["a.com", "b.com", "c.com"]);
        assert_eq!(results[1].status, AvailabilityStatus::Available);
        assert_eq!(results[0].status, AvailabilityStatus::Unavailable);
    }
}
