//! Configuration constants.
//!
//! This module defines the constants used throughout the fetch engine,
//! including CLI defaults, connection pool sizing and redirect limits.

use std::time::Duration;

/// Default proxy-type label echoed back in every result.
pub const DEFAULT_PROXY_TYPE: &str = "datacenter";

/// Default per-attempt timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default maximum number of attempts per URL (including the first one).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

// Redirect handling
/// Maximum number of redirect hops to follow in a single attempt.
/// A response that would require one more hop fails the attempt.
pub const MAX_REDIRECT_HOPS: usize = 10;

// Connection pool sizing for the per-attempt client
/// Maximum idle connections kept per host
pub const POOL_MAX_IDLE_PER_HOST: usize = 10;
/// How long an idle pooled connection is kept open
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Progress logging interval in seconds.
pub const LOGGING_INTERVAL: u64 = 5;

/// Error message used when a spawned fetch task dies without producing a result.
pub const TASK_PANIC_MESSAGE: &str = "Fetch task terminated unexpectedly";

/// Browser User-Agent strings rotated across attempts.
///
/// One is picked uniformly at random for every attempt.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.6 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
];
