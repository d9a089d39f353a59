//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, user-agent rotation set)
//! - Batch configuration and fetch policy types
//! - Log level and format options

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, FetchPolicy, LogFormat, LogLevel};
