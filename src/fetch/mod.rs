//! Per-URL fetch engine.
//!
//! [`fetch_url`] drives one URL through its attempts:
//!
//! - `Attempting(n)` → transport or body failure with `n < max` → `Attempting(n + 1)`
//! - `Attempting(n)` → transport or body failure with `n == max` → failed result
//! - `Attempting(n)` → body read (any status) → completed result
//!
//! HTTP error statuses complete the fetch; only transport-level failures are
//! retried, and retries start immediately.

mod context;
mod proxy;
mod redirects;
mod request;
mod response;
mod trace;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use tokio::time::Instant;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::Retry;

use crate::error_handling::{format_error_chain, update_error_stats, AttemptError};
use crate::models::FetchResult;
use crate::utils::{sanitize_error_message, Selector};

use request::{run_attempt, AttemptPlan, AttemptResponse};
use trace::{Trace, TraceEventKind};

pub use context::FetchContext;

/// Fetches one URL with retries and returns its single terminal result.
///
/// The task calling this owns a freshly seeded random source, so concurrent
/// fetches never contend on a shared generator.
pub async fn fetch_url(url: &str, ctx: &FetchContext) -> FetchResult {
    let mut selector = Selector::new();
    fetch_url_with_selector(url, ctx, &mut selector).await
}

pub(crate) async fn fetch_url_with_selector(
    url: &str,
    ctx: &FetchContext,
    selector: &mut Selector,
) -> FetchResult {
    let start = Instant::now();
    let max_attempts = ctx.max_attempts.max(1);

    // Zero-delay retries, max_attempts - 1 of them after the first attempt
    let retry_strategy = FixedInterval::from_millis(0).take(max_attempts as usize - 1);

    // The trace is only locked between awaits, to merge one finished attempt
    let trace = Mutex::new(Trace::new(ctx.policy.capture_trace));
    let attempt_count = AtomicU32::new(0);

    let result = Retry::spawn(retry_strategy, {
        let trace = &trace;
        let attempt_count = &attempt_count;
        move || {
            let attempt = attempt_count.fetch_add(1, Ordering::SeqCst) + 1;
            let plan = AttemptPlan {
                proxy: selector.proxy(&ctx.proxies),
                user_agent: selector.user_agent(),
            };

            async move {
                let mut events = Trace::new(ctx.policy.capture_trace);
                let outcome =
                    traced_attempt(url, attempt, max_attempts, ctx, plan, &mut events).await;
                trace
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .append(events);
                outcome
            }
        }
    })
    .await;

    let attempts_made = attempt_count.load(Ordering::SeqCst);
    let trace = trace.into_inner().unwrap_or_else(PoisonError::into_inner);

    match result {
        Ok(response) => completed_result(url, ctx, response, &trace, attempts_made, start),
        Err(error) => {
            log::warn!(
                "Giving up on {} after {} attempt{}",
                url,
                attempts_made,
                if attempts_made == 1 { "" } else { "s" }
            );
            failed_result(url, ctx, &error, &trace, attempts_made, start)
        }
    }
}

/// Runs one attempt and records its start, failure and outcome in `events`.
async fn traced_attempt(
    url: &str,
    attempt: u32,
    max_attempts: u32,
    ctx: &FetchContext,
    plan: AttemptPlan<'_>,
    events: &mut Trace,
) -> Result<AttemptResponse, AttemptError> {
    let attempt_start = Instant::now();
    events.record(
        attempt,
        TraceEventKind::AttemptStarted {
            max_attempts,
            at: Utc::now(),
        },
    );

    let outcome = run_attempt(url, attempt, ctx, plan, events).await;

    match &outcome {
        Ok(response) => {
            log::debug!(
                "Fetched {} with status {} on attempt {}/{}",
                url,
                response.status,
                attempt,
                max_attempts
            );
        }
        Err(error) => {
            update_error_stats(&ctx.error_stats, error);
            record_failure(events, attempt, error);
            log::debug!(
                "Attempt {}/{} for {} failed: {}",
                attempt,
                max_attempts,
                url,
                format_error_chain(error)
            );
            if attempt < max_attempts {
                ctx.error_stats.increment_retry();
            }
        }
    }

    events.record(
        attempt,
        TraceEventKind::AttemptFinished {
            succeeded: outcome.is_ok(),
            elapsed: attempt_start.elapsed(),
        },
    );
    outcome
}

fn record_failure(trace: &mut Trace, attempt: u32, error: &AttemptError) {
    let kind = match error {
        AttemptError::ProxyParse { source, .. } => TraceEventKind::ProxyRejected {
            error: format_error_chain(source),
        },
        AttemptError::BodyRead { source, .. } => TraceEventKind::BodyFailed {
            error: format_error_chain(source),
        },
        other => TraceEventKind::RequestFailed {
            error: format_error_chain(other),
        },
    };
    trace.record(attempt, kind);
}

fn completed_result(
    url: &str,
    ctx: &FetchContext,
    response: AttemptResponse,
    trace: &Trace,
    attempts_made: u32,
    start: Instant,
) -> FetchResult {
    let AttemptResponse {
        status,
        final_url,
        headers,
        body,
    } = response;
    let content = String::from_utf8_lossy(&body).into_owned();

    FetchResult {
        url: url.to_string(),
        status_code: Some(status),
        content: (!content.is_empty()).then_some(content),
        error: None,
        detailed_error: trace.render(),
        response_headers: Some(headers),
        final_url: Some(final_url),
        elapsed_seconds: start.elapsed().as_secs_f64(),
        success: FetchResult::is_success_status(status),
        proxy_used: ctx.proxy_type.to_string(),
        attempts_made,
    }
}

fn failed_result(
    url: &str,
    ctx: &FetchContext,
    error: &AttemptError,
    trace: &Trace,
    attempts_made: u32,
    start: Instant,
) -> FetchResult {
    let partial = error.partial_response();
    let message = match error {
        AttemptError::BodyRead { source, .. } => format!(
            "Failed to read response body: {}",
            format_error_chain(source)
        ),
        other => format!(
            "All {} retry attempts failed: {}",
            attempts_made,
            format_error_chain(other)
        ),
    };

    FetchResult {
        url: url.to_string(),
        status_code: partial.map(|p| p.status),
        content: None,
        error: Some(sanitize_error_message(&message)),
        detailed_error: trace.render(),
        response_headers: partial.map(|p| p.headers.clone()),
        final_url: partial.map(|p| p.final_url.clone()),
        elapsed_seconds: start.elapsed().as_secs_f64(),
        success: false,
        proxy_used: ctx.proxy_type.to_string(),
        attempts_made,
    }
}
