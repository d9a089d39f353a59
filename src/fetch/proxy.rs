//! Proxy parsing and credential masking.

use url::Url;

use crate::error_handling::AttemptError;

const MASK: &str = "***";

/// Hides the credentials of a proxy URI so it can be written to a trace.
///
/// The password is replaced when present, otherwise a bare username (often an
/// API token) is replaced. URIs without a host lose everything before the last `@`.
pub fn mask_proxy_credentials(proxy: &str) -> String {
    match Url::parse(proxy) {
        Ok(mut url) if url.has_host() => {
            if url.password().is_some() {
                if url.set_password(Some(MASK)).is_err() {
                    return mask_userinfo(proxy);
                }
                url.to_string()
            } else if !url.username().is_empty() {
                if url.set_username(MASK).is_err() {
                    return mask_userinfo(proxy);
                }
                url.to_string()
            } else {
                proxy.to_string()
            }
        }
        _ => mask_userinfo(proxy),
    }
}

fn mask_userinfo(proxy: &str) -> String {
    match proxy.rsplit_once('@') {
        Some((_, host)) => format!("{MASK}@{host}"),
        None => proxy.to_string(),
    }
}

/// Builds a `reqwest::Proxy` that routes every scheme through `proxy`.
///
/// # Errors
///
/// Returns `AttemptError::ProxyParse` (with the URI masked) if reqwest rejects it.
pub fn build_proxy(proxy: &str) -> Result<reqwest::Proxy, AttemptError> {
    reqwest::Proxy::all(proxy).map_err(|source| AttemptError::ProxyParse {
        proxy: mask_proxy_credentials(proxy),
        source,
    })
}
