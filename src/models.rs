//! Result and report types emitted by a batch run.
//!
//! Field names and omission rules match the JSON contract consumed by the
//! calling service: optional fields are left out entirely when absent.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of fetching one URL.
///
/// Exactly one is produced per input URL. `success` is true only when a
/// response was fully read and its status is in `200..300`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    /// The requested URL, exactly as given
    pub url: String,
    /// Status of the last response received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Response body decoded as text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Human-readable failure summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Rendered per-attempt diagnostic trace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_error: Option<String>,
    /// Response headers, values of repeated headers joined with `", "`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<BTreeMap<String, String>>,
    /// URL after following redirects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    /// Wall-clock seconds from the first attempt to the final outcome
    pub elapsed_seconds: f64,
    /// Whether a 2xx response was received and read
    pub success: bool,
    /// Caller-supplied proxy-type label (never a proxy address)
    pub proxy_used: String,
    /// Number of attempts actually executed
    pub attempts_made: u32,
}

impl FetchResult {
    /// Whether a status code counts as a successful fetch.
    pub fn is_success_status(status: u16) -> bool {
        (200..300).contains(&status)
    }

    /// Result for a URL whose task died before producing an outcome.
    pub(crate) fn task_failure(url: &str, proxy_type: &str, message: String, elapsed: Duration) -> Self {
        Self {
            url: url.to_string(),
            status_code: None,
            content: None,
            error: Some(message),
            detailed_error: None,
            response_headers: None,
            final_url: None,
            elapsed_seconds: elapsed.as_secs_f64(),
            success: false,
            proxy_used: proxy_type.to_string(),
            attempts_made: 1,
        }
    }
}

/// Aggregate over every [`FetchResult`] of one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-URL results in completion order
    pub results: Vec<FetchResult>,
    /// Number of results
    pub total: usize,
    /// Results with `success == true`
    pub successful: usize,
    /// Results with `success == false`
    pub failed: usize,
    /// Wall-clock duration of the whole batch
    pub total_time_seconds: f64,
    /// Proxy-type label applied to the batch
    pub proxy_type_used: String,
}

impl BatchReport {
    /// Builds a report from collected results.
    ///
    /// Counts depend only on the results themselves, never on their order.
    pub fn from_results(results: Vec<FetchResult>, total_time: Duration, proxy_type: &str) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        let total = results.len();
        Self {
            results,
            total,
            successful,
            failed: total - successful,
            total_time_seconds: total_time.as_secs_f64(),
            proxy_type_used: proxy_type.to_string(),
        }
    }
}
