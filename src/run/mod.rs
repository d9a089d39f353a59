//! Batch coordinator.
//!
//! [`run_batch`] spawns one fetch task per URL, waits for every one of them and
//! folds their results into a [`BatchReport`]. There is no concurrency ceiling
//! and no batch-level timeout: each URL is bounded only by its own attempt
//! budget.

mod finalize;
mod task;

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::app::log_progress;
use crate::config::{Config, LOGGING_INTERVAL};
use crate::error_handling::{InputError, ProcessingStats};
use crate::fetch::FetchContext;
use crate::models::{BatchReport, FetchResult};

use finalize::finalize_batch;
use task::{spawn_fetch_task, BatchCounters};

/// State handed from the collection loop to finalization.
pub(crate) struct BatchLoopResult {
    /// Every result, in completion order
    pub results: Vec<FetchResult>,
    /// Coordinator wall-clock time from the first spawn to the last result
    pub elapsed: Duration,
    /// Stops the progress logger
    pub cancel: CancellationToken,
    /// Progress logger handle
    pub logging_task: Option<tokio::task::JoinHandle<()>>,
}

/// Fetches every URL of `config` concurrently and reports on the batch.
///
/// Every URL gets exactly one result, whatever happens to its task.
///
/// # Errors
///
/// Returns an [`InputError`] before any network activity when the URL list is
/// empty or the timeout or attempt budget is zero.
///
/// # Examples
///
/// ```no_run
/// use batch_fetch::{run_batch, Config};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config {
///     urls: vec!["https://example.com".to_string()],
///     max_attempts: 3,
///     ..Default::default()
/// };
///
/// let report = run_batch(config).await?;
/// println!("{} of {} succeeded", report.successful, report.total);
/// # Ok(())
/// # }
/// ```
pub async fn run_batch(config: Config) -> Result<BatchReport, InputError> {
    config.validate()?;

    let start_time = std::time::Instant::now();
    let total_urls = config.urls.len();
    info!(
        "Fetching {} URL{} with {} prox{} ({}), timeout {}s, up to {} attempt{}",
        total_urls,
        if total_urls == 1 { "" } else { "s" },
        config.proxies.len(),
        if config.proxies.len() == 1 { "y" } else { "ies" },
        config.proxy_type,
        config.timeout_seconds,
        config.max_attempts,
        if config.max_attempts == 1 { "" } else { "s" }
    );

    let error_stats = Arc::new(ProcessingStats::new());
    let shared_ctx = Arc::new(FetchContext::from_config(&config, Arc::clone(&error_stats)));
    let counters = BatchCounters::default();

    let mut tasks = FuturesUnordered::new();
    for url in config.urls {
        tasks.push(spawn_fetch_task(
            url,
            Arc::clone(&shared_ctx),
            counters.clone(),
        ));
    }

    let cancel = CancellationToken::new();
    let cancel_logging = cancel.child_token();
    let succeeded_urls = Arc::clone(&counters.succeeded);
    let failed_urls = Arc::clone(&counters.failed);
    let logging_task = Some(tokio::task::spawn(async move {
        let period = Duration::from_secs(LOGGING_INTERVAL);
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    log_progress(start_time, &succeeded_urls, &failed_urls, total_urls);
                }
                _ = cancel_logging.cancelled() => {
                    break;
                }
            }
        }
    }));

    let mut results = Vec::with_capacity(total_urls);
    while let Some(result) = tasks.next().await {
        results.push(result);
    }

    let loop_result = BatchLoopResult {
        results,
        elapsed: start_time.elapsed(),
        cancel,
        logging_task,
    };

    Ok(finalize_batch(
        loop_result,
        &config.proxy_type,
        &error_stats,
        &counters,
        start_time,
    )
    .await)
}
