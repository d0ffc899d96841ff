//! Fetch worker: runs page fetches on a tokio runtime.
//!
//! The UI thread owns the [`FetchWorker`]. Each [`FetchRequest`] becomes one
//! task whose `JoinHandle` is kept by generation so it can be aborted when a
//! newer search supersedes it. Completions are posted to a
//! `std::sync::mpsc` channel that the UI loop drains between key presses, so
//! the UI thread never waits on the network.

use crate::api::{PageQuery, ShopSource};
use crate::app::pagination::FetchRequest;
use crate::domain::{FetchError, Shop};
use crate::worker::WorkerResponse;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Default bound on a single fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches one page, giving up after `timeout`.
///
/// # Errors
///
/// Returns the source's error, or [`FetchError::Timeout`] when the deadline
/// passes first.
pub async fn fetch_with_timeout(
    source: &dyn ShopSource,
    query: &PageQuery,
    timeout: Duration,
) -> Result<Vec<Shop>, FetchError> {
    match tokio::time::timeout(timeout, source.fetch_page(query)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis(), "fetch timed out");
            Err(FetchError::Timeout)
        }
    }
}

/// Spawns, tracks and cancels fetch tasks.
pub struct FetchWorker {
    runtime: Handle,
    source: Arc<dyn ShopSource>,
    timeout: Duration,
    tx: Sender<WorkerResponse>,
    tasks: HashMap<u64, JoinHandle<()>>,
}

impl FetchWorker {
    /// Creates a worker and the receiver its responses arrive on.
    #[must_use]
    pub fn new(runtime: Handle, source: Arc<dyn ShopSource>, timeout: Duration) -> (Self, Receiver<WorkerResponse>) {
        let (tx, rx) = mpsc::channel();
        let worker = Self {
            runtime,
            source,
            timeout,
            tx,
            tasks: HashMap::new(),
        };
        (worker, rx)
    }

    /// Starts a task for `request`.
    pub fn spawn(&mut self, request: FetchRequest) {
        self.tasks.retain(|_, handle| !handle.is_finished());

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let timeout = self.timeout;
        let FetchRequest {
            generation,
            append,
            query,
        } = request;

        let span = tracing::debug_span!(
            "fetch_task",
            generation,
            append,
            start = query.start,
            keyword = %query.keyword
        );

        let handle = self.runtime.spawn(
            async move {
                let result = fetch_with_timeout(source.as_ref(), &query, timeout).await;
                tracing::debug!(ok = result.is_ok(), "fetch task finished");

                let response = WorkerResponse::PageLoaded {
                    generation,
                    append,
                    result,
                };
                if tx.send(response).is_err() {
                    tracing::debug!("UI loop gone, dropping response");
                }
            }
            .instrument(span),
        );

        self.tasks.insert(generation, handle);
    }

    /// Aborts the task for `generation`. Returns whether one was running.
    pub fn cancel(&mut self, generation: u64) -> bool {
        match self.tasks.remove(&generation) {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                tracing::debug!(generation, running, "fetch task cancelled");
                running
            }
            None => false,
        }
    }

    /// Forgets the handle of a task whose response has been received.
    pub fn complete(&mut self, generation: u64) {
        self.tasks.remove(&generation);
    }

    /// Number of tracked tasks that have not finished.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|handle| !handle.is_finished()).count()
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
