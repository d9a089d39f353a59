//! Configuration types.
//!
//! This module defines the enums and structs used to configure a batch run.
//! None of them depend on the CLI; the binary converts its parsed arguments
//! into a [`Config`].

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_PROXY_TYPE, DEFAULT_TIMEOUT_SECS};
use crate::error_handling::InputError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Per-attempt fetch behaviour that is not part of the retry policy itself.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Record a per-attempt diagnostic trace and attach it as `detailed_error`.
    pub capture_trace: bool,

    /// Skip TLS certificate validation.
    ///
    /// Enabled by default: scrape targets with broken certificate chains must not
    /// fail spuriously. This is a deliberate security trade-off; callers that need
    /// validated connections turn it off.
    pub accept_invalid_certs: bool,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            capture_trace: true,
            accept_invalid_certs: true,
        }
    }
}

/// Batch configuration.
///
/// # Examples
///
/// ```no_run
/// use batch_fetch::Config;
///
/// let config = Config {
///     urls: vec!["https://example.com".to_string()],
///     max_attempts: 3,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// URLs to fetch, in input order (duplicates are fetched independently)
    pub urls: Vec<String>,

    /// Proxy URIs to rotate through; empty means direct connections
    pub proxies: Vec<String>,

    /// Descriptive proxy-type label echoed back in every result
    pub proxy_type: String,

    /// Per-attempt timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum attempts per URL (including the first one)
    pub max_attempts: u32,

    /// Trace capture and TLS behaviour
    pub policy: FetchPolicy,
}

impl Config {
    /// Per-attempt timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Checks the invocation-level preconditions of a batch.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] when there is nothing to fetch or when the
    /// timeout or attempt budget is zero.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.urls.is_empty() {
            return Err(InputError::NoUrls);
        }
        if self.max_attempts == 0 {
            return Err(InputError::ZeroAttempts);
        }
        if self.timeout_seconds == 0 {
            return Err(InputError::ZeroTimeout);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            proxies: Vec::new(),
            proxy_type: DEFAULT_PROXY_TYPE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            policy: FetchPolicy::default(),
        }
    }
}
