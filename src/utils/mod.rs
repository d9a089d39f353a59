//! Shared utilities for the fetch engine.

mod sanitize;
mod selector;

pub(crate) use sanitize::sanitize_error_message;
pub(crate) use selector::Selector;
