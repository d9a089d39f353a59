//! End-of-batch statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, ProcessingStats};
use crate::models::BatchReport;

/// Prints a one-line summary of a finished batch.
pub fn print_batch_summary(report: &BatchReport) {
    info!(
        "Fetched {} URL{} ({} succeeded, {} failed) in {:.2}s via {}",
        report.total,
        if report.total == 1 { "" } else { "s" },
        report.successful,
        report.failed,
        report.total_time_seconds,
        report.proxy_type_used
    );
}

/// Prints failed-attempt counts per failure kind, plus the retry count.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_failures = error_stats.total_failures();
    if total_failures > 0 {
        info!("Failed attempts ({} total):", total_failures);
        for kind in FailureKind::iter() {
            let count = error_stats.get_failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }

    let retries = error_stats.total_retries();
    if retries > 0 {
        info!("Retried attempts: {}", retries);
    }
}
