//! Application initialization and resource setup.
//!
//! This module provides:
//! - Logger setup (plain or JSON, always on stderr)
//! - Per-attempt HTTP client construction

mod client;
mod logger;

// Re-export public API
pub use client::init_attempt_client;
pub use logger::init_logger_with;
