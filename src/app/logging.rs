//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Logs progress information about the running batch.
///
/// # Arguments
///
/// * `start_time` - The start time of the batch
/// * `succeeded_urls` - Atomic counter of URLs that finished successfully
/// * `failed_urls` - Atomic counter of URLs that finished unsuccessfully
/// * `total_urls` - Number of URLs in the batch
pub fn log_progress(
    start_time: std::time::Instant,
    succeeded_urls: &Arc<AtomicUsize>,
    failed_urls: &Arc<AtomicUsize>,
    total_urls: usize,
) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let succeeded = succeeded_urls.load(Ordering::SeqCst);
    let failed = failed_urls.load(Ordering::SeqCst);
    let done = succeeded + failed;
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Finished {}/{} URLs ({} ok, {} failed) in {:.2} seconds (~{:.2} URLs/sec)",
        done, total_urls, succeeded, failed, elapsed_secs, rate
    );
}
