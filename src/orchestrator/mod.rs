//! Debounced fetch orchestration with stale-response discard.
//!
//! The orchestrator sits between facet changes and the search gateway. Every
//! change restarts a fixed debounce window; only once the window settles is a
//! single request dispatched, carrying a monotonically increasing sequence
//! number. A completion mutates the shared snapshot only when its sequence is
//! still the highest dispatched, so an older, slower response can never
//! overwrite a newer query's results. Superseded work is aborted at its next
//! await point rather than left running.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::facets::FilterState;
use crate::search::SearchError;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};


/// Debounce window applied to facet and free-text changes.
const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Executes one settled search. Implemented over a gateway plus query
/// composition so the orchestrator stays agnostic of repository versus issue
/// searches.
#[async_trait]
pub trait SearchExecutor: Send + Sync + 'static {
    /// Result list type the executor produces.
    type Output: Clone + Send + Sync + 'static;

    /// Run the search for a settled filter state.
    async fn execute(&self, filter: &FilterState) -> Result<Self::Output, SearchError>;
}

/// Snapshot of the orchestrator's UI-facing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState<T> {
    /// Latest successfully fetched results; `None` until a first success.
    pub results: Option<T>,
    /// True between a dispatch and its (non-stale) completion.
    pub loading: bool,
    /// Error from the most recent completed dispatch, if it failed.
    pub error: Option<SearchError>,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            results: None,
            loading: false,
            error: None,
        }
    }
}

struct Shared<E: SearchExecutor> {
    executor: E,
    debounce: Duration,
    telemetry: Arc<dyn TelemetrySink>,
    /// Highest sequence number handed to a dispatched request.
    dispatched: AtomicU64,
    torn_down: AtomicBool,
    state: Mutex<SearchState<E::Output>>,
    task: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl<E: SearchExecutor> Shared<E> {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, SearchState<E::Output>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn swap_task(
        &self,
        replacement: Option<tokio::task::JoinHandle<()>>,
    ) -> Option<tokio::task::JoinHandle<()>> {
        let mut guard = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut guard, replacement)
    }

    fn apply(&self, sequence: u64, outcome: Result<E::Output, SearchError>) {
        if self.torn_down.load(Ordering::Acquire) {
            return;
        }

        // The sequence comparison happens under the state lock so a newer
        // dispatch cannot interleave between check and apply.
        let mut state = self.lock_state();
        let latest = self.dispatched.load(Ordering::Acquire);
        if sequence != latest {
            drop(state);
            tracing::debug!(sequence, latest, "discarding stale search response");
            self.telemetry
                .record(TelemetryEvent::StaleResponseDiscarded { sequence, latest });
            return;
        }

        state.loading = false;
        match outcome {
            Ok(results) => {
                state.results = Some(results);
                state.error = None;
            }
            Err(error) => {
                state.error = Some(error);
            }
        }
    }
}

/// Debounced, sequence-checked fetch orchestrator.
pub struct FetchOrchestrator<E: SearchExecutor> {
    inner: Arc<Shared<E>>,
}

impl<E: SearchExecutor> FetchOrchestrator<E> {
    /// Creates an orchestrator with the default 500ms debounce window and no
    /// telemetry.
    #[must_use]
    pub fn new(executor: E) -> Self {
        Self::configured(executor, DEFAULT_DEBOUNCE, Arc::new(NoopTelemetrySink))
    }

    /// Creates an orchestrator with an explicit debounce window and
    /// telemetry sink.
    #[must_use]
    pub fn configured(executor: E, debounce: Duration, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            inner: Arc::new(Shared {
                executor,
                debounce,
                telemetry,
                dispatched: AtomicU64::new(0),
                torn_down: AtomicBool::new(false),
                state: Mutex::new(SearchState::default()),
                task: Mutex::new(None),
            }),
        }
    }

    /// Registers a facet or free-text change.
    ///
    /// Restarts the debounce window, cancelling any pending timer and any
    /// in-flight dispatch. Once the window settles with no further change,
    /// exactly one request is dispatched using the most recent filter state.
    /// A no-op after [`teardown`](Self::teardown).
    pub fn schedule(&self, filter: FilterState) {
        if self.inner.torn_down.load(Ordering::Acquire) {
            return;
        }

        let shared = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(shared.debounce).await;

            let sequence = shared.dispatched.fetch_add(1, Ordering::AcqRel) + 1;
            shared
                .telemetry
                .record(TelemetryEvent::SearchDispatched { sequence });
            shared.lock_state().loading = true;

            let outcome = shared.executor.execute(&filter).await;
            shared.apply(sequence, outcome);
        });

        if let Some(previous) = self.inner.swap_task(Some(handle)) {
            previous.abort();
        }
    }

    /// Current UI-facing snapshot.
    #[must_use]
    pub fn state(&self) -> SearchState<E::Output> {
        self.inner.lock_state().clone()
    }

    /// Invalidates any pending timer and in-flight dispatch.
    ///
    /// After teardown no further state mutation is possible; subsequent
    /// [`schedule`](Self::schedule) calls are no-ops.
    pub fn teardown(&self) {
        self.inner.torn_down.store(true, Ordering::Release);
        if let Some(task) = self.inner.swap_task(None) {
            task.abort();
        }
    }
}

impl<E: SearchExecutor> Drop for FetchOrchestrator<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Executor that composes a repository query per settled filter state and
/// runs it through a search gateway.
pub struct RepositorySearchExecutor<G> {
    gateway: G,
}

impl<G> RepositorySearchExecutor<G> {
    /// Wraps a repository search gateway.
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G> SearchExecutor for RepositorySearchExecutor<G>
where
    G: crate::search::RepositorySearchGateway + 'static,
{
    type Output = Vec<crate::search::RepositoryRecord>;

    async fn execute(&self, filter: &FilterState) -> Result<Self::Output, SearchError> {
        let query = crate::query::SearchQuery::for_repositories(filter);
        self.gateway.search_repositories(&query).await
    }
}
