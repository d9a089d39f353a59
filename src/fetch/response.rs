//! Response header extraction.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;

/// Converts a header name to canonical MIME form (`content-type` → `Content-Type`).
///
/// HTTP/2 and hyper hand header names over lowercased; callers of the JSON
/// report expect the canonical spelling.
pub fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    out
}

/// Collects response headers into a name → value map.
///
/// Repeated headers are joined with `", "` in the order received. Values that
/// are not valid UTF-8 are decoded lossily instead of being dropped.
pub fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected = BTreeMap::new();
    for name in headers.keys() {
        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        collected.insert(canonical_header_name(name.as_str()), values.join(", "));
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONTENT_TYPE, SET_COOKIE};

    #[test]
    fn test_canonical_header_name() {
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("x-powered-by"), "X-Powered-By");
        assert_eq!(canonical_header_name("server"), "Server");
        assert_eq!(canonical_header_name("cf-ray"), "Cf-Ray");
        assert_eq!(canonical_header_name("ETAG"), "Etag");
    }

    #[test]
    fn test_collect_headers_joins_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));

        let collected = collect_headers(&headers);
        assert_eq!(collected.len(), 2);
        assert_eq!(collected["Content-Type"], "text/html");
        assert_eq!(collected["Set-Cookie"], "a=1, b=2");
    }

    #[test]
    fn test_collect_headers_empty() {
        assert!(collect_headers(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_collect_headers_non_utf8_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-raw",
            HeaderValue::from_bytes(b"caf\xe9").expect("opaque bytes are a valid header value"),
        );
        let collected = collect_headers(&headers);
        assert_eq!(collected["X-Raw"], "caf\u{fffd}");
    }
}
