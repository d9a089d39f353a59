//! Application helpers shared by the batch runner and the binary.
//!
//! This module provides input list parsing, progress logging, shutdown
//! handling and statistics printing.

pub mod input;
pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use input::parse_list;
pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_batch_summary, print_error_statistics};
