//! Shared fetch context.
//!
//! This module defines the `FetchContext` struct that groups the read-only
//! inputs every fetch task of a batch needs.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, FetchPolicy};
use crate::error_handling::ProcessingStats;

/// Read-only inputs shared by every fetch task of a batch.
///
/// Cloning is cheap: the proxy pool, label and statistics are reference counted.
#[derive(Clone)]
pub struct FetchContext {
    /// Proxy URIs to rotate through; empty means direct connections
    pub proxies: Arc<[String]>,
    /// Proxy-type label echoed back in every result
    pub proxy_type: Arc<str>,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Maximum attempts per URL
    pub max_attempts: u32,
    /// Trace capture and TLS behaviour
    pub policy: FetchPolicy,
    /// Failure statistics tracker
    pub error_stats: Arc<ProcessingStats>,
}

impl FetchContext {
    /// Creates a context from a batch configuration.
    pub fn from_config(config: &Config, error_stats: Arc<ProcessingStats>) -> Self {
        Self {
            proxies: Arc::from(config.proxies.clone()),
            proxy_type: Arc::from(config.proxy_type.as_str()),
            timeout: config.timeout(),
            max_attempts: config.max_attempts,
            policy: config.policy.clone(),
            error_stats,
        }
    }
}
