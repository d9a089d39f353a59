//! A single fetch attempt.
//!
//! One attempt uses the proxy and User-Agent drawn for it, builds a fresh client, follows up
//! to [`MAX_REDIRECT_HOPS`] redirects and reads the final body. Any failure on
//! the way is returned as an [`AttemptError`]; the retry decision belongs to
//! the caller.

use std::collections::BTreeMap;

use reqwest::header::{HOST, LOCATION, USER_AGENT};
use reqwest::Url;
use tokio::time::Instant;

use crate::config::MAX_REDIRECT_HOPS;
use crate::error_handling::{AttemptError, PartialResponse};
use crate::initialization::init_attempt_client;

use super::context::FetchContext;
use super::proxy::{build_proxy, mask_proxy_credentials};
use super::redirects::{is_followable_redirect, resolve_location};
use super::response::{canonical_header_name, collect_headers};
use super::trace::{Trace, TraceEventKind};

/// Random choices drawn for one attempt before it starts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AttemptPlan<'a> {
    /// Proxy URI to route through, `None` for a direct connection
    pub proxy: Option<&'a str>,
    pub user_agent: &'static str,
}

/// A response whose body was read completely.
#[derive(Debug)]
pub(crate) struct AttemptResponse {
    pub status: u16,
    pub final_url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

/// Runs attempt number `attempt` for `url`.
///
/// The whole attempt, redirects and body included, is bounded by `ctx.timeout`.
pub(crate) async fn run_attempt(
    url: &str,
    attempt: u32,
    ctx: &FetchContext,
    plan: AttemptPlan<'_>,
    trace: &mut Trace,
) -> Result<AttemptResponse, AttemptError> {
    let proxy = match plan.proxy {
        Some(proxy) => {
            trace.record(
                attempt,
                TraceEventKind::ProxySelected {
                    proxy: mask_proxy_credentials(proxy),
                },
            );
            Some(build_proxy(proxy)?)
        }
        None => {
            trace.record(attempt, TraceEventKind::NoProxy);
            None
        }
    };

    let client = init_attempt_client(ctx.timeout, &ctx.policy, proxy)
        .map_err(AttemptError::ClientBuild)?;

    let user_agent = plan.user_agent;
    trace.record(
        attempt,
        TraceEventKind::UserAgentSelected {
            user_agent: user_agent.to_string(),
        },
    );
    trace.record(
        attempt,
        TraceEventKind::RequestSent {
            url: url.to_string(),
        },
    );
    trace.record(
        attempt,
        TraceEventKind::RequestHeaders {
            headers: request_headers(url, user_agent),
        },
    );

    let deadline = Instant::now() + ctx.timeout;
    let mut current = url.to_string();
    let mut hops = 0usize;

    let response = loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(AttemptError::Timeout(ctx.timeout));
        }

        let response = client
            .get(&current)
            .header(USER_AGENT, user_agent)
            .timeout(remaining)
            .send()
            .await?;

        if !is_followable_redirect(response.status()) {
            break response;
        }
        let location = response
            .headers()
            .get(LOCATION)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        // A redirect status without Location is handed back as the final response
        let Some(location) = location else {
            log::debug!(
                "Redirect status {} for {} but no Location header",
                response.status(),
                current
            );
            break response;
        };
        if hops == MAX_REDIRECT_HOPS {
            return Err(AttemptError::RedirectLimit(MAX_REDIRECT_HOPS));
        }

        let next = resolve_location(response.url(), &location)?;
        trace.record(
            attempt,
            TraceEventKind::Redirect {
                location: next.to_string(),
            },
        );
        current = next.into();
        hops += 1;
    };

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let headers = collect_headers(response.headers());
    trace.record(
        attempt,
        TraceEventKind::ResponseReceived {
            status,
            final_url: final_url.clone(),
        },
    );
    trace.record(
        attempt,
        TraceEventKind::ResponseHeaders {
            headers: headers.clone(),
        },
    );

    match response.bytes().await {
        Ok(body) => {
            trace.record(attempt, TraceEventKind::BodyRead { bytes: body.len() });
            Ok(AttemptResponse {
                status,
                final_url,
                headers,
                body: body.to_vec(),
            })
        }
        Err(source) => Err(AttemptError::BodyRead {
            partial: PartialResponse {
                status,
                final_url,
                headers,
            },
            source,
        }),
    }
}

/// Headers sent with the initial request, as far as they are known up front.
///
/// `Host` is left out when the URL does not parse; the send then fails anyway.
fn request_headers(url: &str, user_agent: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    if let Some(host) = Url::parse(url).ok().as_ref().and_then(host_header) {
        headers.insert(canonical_header_name(HOST.as_str()), host);
    }
    headers.insert(
        canonical_header_name(USER_AGENT.as_str()),
        user_agent.to_string(),
    );
    headers
}

fn host_header(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
