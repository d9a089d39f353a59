//! Failure categorization.
//!
//! Maps per-attempt failures onto [`FailureKind`] and renders error chains
//! into the messages stored in results.

use std::error::Error as StdError;

use super::stats::ProcessingStats;
use super::types::{AttemptError, FailureKind};

/// Categorizes a `reqwest::Error` into a `FailureKind`.
///
/// Timeouts are checked before connection failures because reqwest reports a
/// connect timeout as both.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_connect() {
        FailureKind::Connect
    } else if error.is_redirect() {
        FailureKind::Redirect
    } else if error.is_builder() {
        FailureKind::ClientBuild
    } else if error.is_body() || error.is_decode() {
        FailureKind::Body
    } else if error.is_request() {
        FailureKind::Request
    } else {
        FailureKind::Other
    }
}

/// Categorizes a failed attempt.
pub fn categorize_attempt_error(error: &AttemptError) -> FailureKind {
    match error {
        AttemptError::ProxyParse { .. } => FailureKind::ProxyParse,
        AttemptError::ClientBuild(_) => FailureKind::ClientBuild,
        AttemptError::Transport(e) => categorize_reqwest_error(e),
        AttemptError::RedirectLimit(_) | AttemptError::InvalidRedirect { .. } => {
            FailureKind::Redirect
        }
        AttemptError::Timeout(_) => FailureKind::Timeout,
        AttemptError::BodyRead { source, .. } => {
            if source.is_timeout() {
                FailureKind::Timeout
            } else {
                FailureKind::Body
            }
        }
    }
}

/// Records a failed attempt in the processing statistics.
pub fn update_error_stats(stats: &ProcessingStats, error: &AttemptError) {
    stats.increment_failure(categorize_attempt_error(error));
}

/// Renders an error and all of its sources as `outer: inner: root`.
///
/// reqwest hides the interesting part ("connection refused") in the source
/// chain, so the top-level `Display` alone is not enough for a result message.
pub fn format_error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
