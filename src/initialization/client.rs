//! HTTP client initialization.
//!
//! A fresh client is built for every attempt so proxy choice and connection
//! state never leak from one attempt into the next.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{FetchPolicy, POOL_IDLE_TIMEOUT, POOL_MAX_IDLE_PER_HOST};

/// Builds the HTTP client for one attempt.
///
/// Creates a `reqwest::Client` configured with:
/// - Connect timeout equal to the attempt timeout (covers TCP and TLS handshake)
/// - Redirects disabled (hops are followed and traced by the caller)
/// - Certificate validation per `policy.accept_invalid_certs`
/// - A bounded idle pool
/// - The given proxy, or a direct connection ignoring `HTTP_PROXY` and friends
///
/// The overall per-request deadline is applied on each request, not here.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails (e.g. the TLS backend
/// cannot be initialized).
pub fn init_attempt_client(
    timeout: Duration,
    policy: &FetchPolicy,
    proxy: Option<reqwest::Proxy>,
) -> Result<reqwest::Client, reqwest::Error> {
    let builder = ClientBuilder::new()
        .connect_timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .danger_accept_invalid_certs(policy.accept_invalid_certs)
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT);

    let builder = match proxy {
        Some(proxy) => builder.proxy(proxy),
        None => builder.no_proxy(),
    };

    builder.build()
}
