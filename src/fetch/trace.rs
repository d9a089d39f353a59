//! Per-URL diagnostic trace.
//!
//! Attempts append structured [`TraceEvent`]s in order. The trace is only turned
//! into text when the final result is built, where it becomes `detailed_error`.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

/// What happened at one point of an attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEventKind {
    AttemptStarted {
        max_attempts: u32,
        at: DateTime<Utc>,
    },
    /// Proxy chosen for the attempt, credentials already masked
    ProxySelected {
        proxy: String,
    },
    NoProxy,
    ProxyRejected {
        error: String,
    },
    UserAgentSelected {
        user_agent: String,
    },
    RequestSent {
        url: String,
    },
    /// Headers known before the initial request goes out
    RequestHeaders {
        headers: BTreeMap<String, String>,
    },
    Redirect {
        location: String,
    },
    RequestFailed {
        error: String,
    },
    ResponseReceived {
        status: u16,
        final_url: String,
    },
    ResponseHeaders {
        headers: BTreeMap<String, String>,
    },
    BodyRead {
        bytes: usize,
    },
    BodyFailed {
        error: String,
    },
    AttemptFinished {
        succeeded: bool,
        elapsed: Duration,
    },
}

/// One trace record, tagged with the 1-based attempt it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEvent {
    pub attempt: u32,
    pub kind: TraceEventKind,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TraceEventKind::AttemptStarted { max_attempts, at } => write!(
                f,
                "--- Attempt {}/{} at {} ---",
                self.attempt,
                max_attempts,
                at.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            TraceEventKind::ProxySelected { proxy } => write!(f, "Using proxy: {proxy}"),
            TraceEventKind::NoProxy => f.write_str("No proxy used"),
            TraceEventKind::ProxyRejected { error } => {
                write!(f, "Error parsing proxy URL: {error}")
            }
            TraceEventKind::UserAgentSelected { user_agent } => {
                write!(f, "Using User-Agent: {user_agent}")
            }
            TraceEventKind::RequestSent { url } => write!(f, "Sending request to: {url}"),
            TraceEventKind::RequestHeaders { headers } => {
                f.write_str("Request Headers:")?;
                for (name, value) in headers {
                    write!(f, "\n  {name}: {value}")?;
                }
                Ok(())
            }
            TraceEventKind::Redirect { location } => write!(f, "Redirect to: {location}"),
            TraceEventKind::RequestFailed { error } => write!(f, "Request error: {error}"),
            TraceEventKind::ResponseReceived { status, final_url } => write!(
                f,
                "Response received with status: {status}\nFinal URL after redirects: {final_url}"
            ),
            TraceEventKind::ResponseHeaders { headers } => {
                f.write_str("Response Headers:")?;
                for (name, value) in headers {
                    write!(f, "\n  {name}: {value}")?;
                }
                Ok(())
            }
            TraceEventKind::BodyRead { bytes } => {
                write!(f, "Successfully read response body ({bytes} bytes)")
            }
            TraceEventKind::BodyFailed { error } => {
                write!(f, "Error reading response body: {error}")
            }
            TraceEventKind::AttemptFinished { succeeded, elapsed } => write!(
                f,
                "Attempt {} {} after {:?}",
                self.attempt,
                if *succeeded { "succeeded" } else { "failed" },
                elapsed
            ),
        }
    }
}

/// Append-only event log for one URL.
///
/// A disabled trace drops every event, so callers record unconditionally.
#[derive(Debug, Default)]
pub struct Trace {
    enabled: bool,
    events: Vec<TraceEvent>,
}

impl Trace {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, attempt: u32, kind: TraceEventKind) {
        if self.enabled {
            self.events.push(TraceEvent { attempt, kind });
        }
    }

    /// Moves every event of `other` to the end of this trace.
    pub fn append(&mut self, mut other: Trace) {
        if self.enabled {
            self.events.append(&mut other.events);
        }
    }

    #[cfg(test)]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Renders the trace as text, or `None` when capture is disabled.
    ///
    /// Attempts are separated by a blank line.
    pub fn render(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let mut out = String::new();
        for event in &self.events {
            if matches!(event.kind, TraceEventKind::AttemptStarted { .. }) && !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&event.to_string());
            out.push('\n');
        }
        Some(out)
    }
}
