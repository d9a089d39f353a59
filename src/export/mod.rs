//! Report export.
//!
//! The batch report is written to stdout as a single JSON document. It is
//! rendered completely before anything is written, so a serialization
//! failure never leaves partial output behind.

mod json;
mod pipe;

pub use json::{render_report, write_report};
