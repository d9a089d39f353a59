//! Comma-separated input lists.

/// Splits a comma-separated list into its trimmed, non-empty entries.
///
/// Order and duplicates are preserved. Used for both the URL list and the
/// proxy pool.
///
/// # Examples
///
/// ```
/// use batch_fetch::parse_list;
///
/// assert_eq!(
///     parse_list(" https://a.example , ,https://b.example"),
///     vec!["https://a.example", "https://b.example"]
/// );
/// assert!(parse_list("  ,  ").is_empty());
/// ```
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
