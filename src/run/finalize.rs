//! Batch finalization.

use std::sync::Arc;

use crate::app::{log_progress, print_batch_summary, print_error_statistics, shutdown_gracefully};
use crate::error_handling::ProcessingStats;
use crate::models::BatchReport;

use super::task::BatchCounters;
use super::BatchLoopResult;

/// Stops background tasks, logs final statistics and builds the report.
pub(crate) async fn finalize_batch(
    loop_result: BatchLoopResult,
    proxy_type: &str,
    error_stats: &Arc<ProcessingStats>,
    counters: &BatchCounters,
    start_time: std::time::Instant,
) -> BatchReport {
    let BatchLoopResult {
        results,
        elapsed,
        cancel,
        logging_task,
    } = loop_result;

    shutdown_gracefully(cancel, logging_task).await;

    log_progress(start_time, &counters.succeeded, &counters.failed, results.len());

    let report = BatchReport::from_results(results, elapsed, proxy_type);

    print_error_statistics(error_stats);
    print_batch_summary(&report);

    report
}
