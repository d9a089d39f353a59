//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for invocation-level and per-attempt failures
//! - Failure categorization and error chain rendering
//! - Thread-safe failure statistics
//!
//! Only [`InputError`] and serialization failures abort an invocation. Every
//! [`AttemptError`] stays inside the result of the URL it belongs to.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_attempt_error, categorize_reqwest_error, format_error_chain, update_error_stats,
};
pub use stats::ProcessingStats;
pub use types::{AttemptError, FailureKind, InitializationError, InputError, PartialResponse};
