//! Error type definitions.
//!
//! This module defines the invocation-level errors and the per-attempt failure
//! type produced by the fetch engine.

use std::collections::BTreeMap;
use std::time::Duration;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors that reject an invocation before any network activity.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// Nothing was left of the URL list after trimming.
    #[error("No URLs provided")]
    NoUrls,

    /// A zero attempt budget can never produce a result.
    #[error("Maximum attempts must be at least 1")]
    ZeroAttempts,

    /// A zero timeout would fail every attempt immediately.
    #[error("Timeout must be greater than zero")]
    ZeroTimeout,
}

/// Response data obtained before the body could be read.
///
/// Carried by [`AttemptError::BodyRead`] so a terminal body failure still reports
/// what the server answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialResponse {
    /// Status code of the response whose body failed
    pub status: u16,
    /// URL after redirects
    pub final_url: String,
    /// Canonicalised response headers
    pub headers: BTreeMap<String, String>,
}

/// Failure of a single fetch attempt.
///
/// Every variant is a transport-level failure and consumes one attempt.
/// HTTP error statuses are not represented here: a fully read non-2xx response
/// completes the fetch.
#[derive(Error, Debug)]
pub enum AttemptError {
    /// The selected proxy URI could not be turned into a proxy.
    #[error("invalid proxy URL {proxy}: {source}")]
    ProxyParse {
        /// Proxy URI with credentials masked
        proxy: String,
        /// Parse failure reported by reqwest
        #[source]
        source: reqwest::Error,
    },

    /// The per-attempt HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection, TLS, timeout or protocol failure while sending the request.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The redirect chain exceeded the hop limit.
    #[error("stopped after {0} redirects")]
    RedirectLimit(usize),

    /// A redirect pointed at a location that is not a valid URL.
    #[error("invalid redirect location {location:?}: {source}")]
    InvalidRedirect {
        /// Raw `Location` header value
        location: String,
        /// Why the location could not be resolved
        #[source]
        source: url::ParseError,
    },

    /// The attempt deadline passed between redirect hops.
    #[error("attempt timed out after {0:?}")]
    Timeout(Duration),

    /// A response arrived but its body could not be read.
    #[error("{source}")]
    BodyRead {
        /// What the server answered before the body failed
        partial: PartialResponse,
        /// Body read failure
        #[source]
        source: reqwest::Error,
    },
}

impl AttemptError {
    /// Response data obtained before the failure, if any.
    pub fn partial_response(&self) -> Option<&PartialResponse> {
        match self {
            AttemptError::BodyRead { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

/// Categories of failed attempts, used for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// The selected proxy URI could not be turned into a `reqwest::Proxy`.
    ProxyParse,
    /// The per-attempt HTTP client failed to build.
    ClientBuild,
    /// TCP connect or TLS handshake failed, including proxy connect failures.
    Connect,
    /// The attempt deadline expired before the body was fully read.
    Timeout,
    /// A redirect had an unusable `Location` or exceeded the hop limit.
    Redirect,
    /// The request failed after the connection was established.
    Request,
    /// The response arrived but its body could not be read.
    Body,
    /// Anything reqwest reports that fits none of the above.
    Other,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// Human-readable label used in statistics output and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ProxyParse => "Proxy parse error",
            FailureKind::ClientBuild => "HTTP client build error",
            FailureKind::Connect => "Connection error",
            FailureKind::Timeout => "Timeout",
            FailureKind::Redirect => "Redirect error",
            FailureKind::Request => "Request error",
            FailureKind::Body => "Body read error",
            FailureKind::Other => "Other transport error",
        }
    }
}
