//! Redirect handling.
//!
//! Redirects are followed manually so each hop can be traced and the hop limit
//! enforced as an attempt failure.

use reqwest::{StatusCode, Url};

use crate::error_handling::AttemptError;

/// Whether a status code asks the client to follow a `Location` header.
pub fn is_followable_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Resolves a `Location` header value against the URL that returned it.
///
/// # Errors
///
/// Returns `AttemptError::InvalidRedirect` if the location cannot be joined.
pub fn resolve_location(current: &Url, location: &str) -> Result<Url, AttemptError> {
    current
        .join(location)
        .map_err(|source| AttemptError::InvalidRedirect {
            location: location.to_string(),
            source,
        })
}
