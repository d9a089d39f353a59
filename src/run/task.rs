//! Per-URL task processing.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;

use crate::config::TASK_PANIC_MESSAGE;
use crate::fetch::{fetch_url, FetchContext};
use crate::models::FetchResult;

/// Completion counters shared with the progress logger.
#[derive(Clone, Default)]
pub(crate) struct BatchCounters {
    /// URLs that finished with `success == true`
    pub succeeded: Arc<AtomicUsize>,
    /// URLs that finished with `success == false`
    pub failed: Arc<AtomicUsize>,
}

impl BatchCounters {
    fn record(&self, result: &FetchResult) {
        if result.success {
            self.succeeded.fetch_add(1, Ordering::SeqCst);
        } else {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Spawns the fetch task for one URL.
///
/// The returned future resolves to that URL's result once the task ends. A
/// task that panics still resolves to a failed result for its URL.
pub(crate) fn spawn_fetch_task(
    url: String,
    ctx: Arc<FetchContext>,
    counters: BatchCounters,
) -> impl Future<Output = FetchResult> {
    let spawned_at = tokio::time::Instant::now();
    let proxy_type = Arc::clone(&ctx.proxy_type);
    let task_url = url.clone();
    let task_counters = counters.clone();

    let handle = tokio::spawn(async move {
        let result = fetch_url(&task_url, &ctx).await;
        task_counters.record(&result);
        result
    });

    async move {
        let outcome = handle.await;
        resolve_task_outcome(&url, &proxy_type, outcome, spawned_at.elapsed(), &counters)
    }
}

fn resolve_task_outcome(
    url: &str,
    proxy_type: &str,
    outcome: Result<FetchResult, JoinError>,
    elapsed: Duration,
    counters: &BatchCounters,
) -> FetchResult {
    match outcome {
        Ok(result) => result,
        Err(join_error) => {
            log::warn!("Fetch task for {} panicked: {:?}", url, join_error);
            let result = FetchResult::task_failure(
                url,
                proxy_type,
                format!("{}: {}", TASK_PANIC_MESSAGE, join_error),
                elapsed,
            );
            counters.record(&result);
            result
        }
    }
}
