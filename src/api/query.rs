//! Query-string parameter extraction
//!
//! Minimal single-pass lookup over the raw query component. The service only
//! reads one numeric parameter, so there is no decoding table or multi-value
//! handling; the first occurrence of a key wins.

/// Extract the raw value of `key` from an optional query string.
///
/// Pairs are separated by `&`, key and value by the first `=`. A key given
/// without `=` yields an empty value.
///
/// # Examples
/// ```
/// use dayservice::api::query::param;
///
/// assert_eq!(param(Some("number=14.9"), "number"), Some("14.9"));
/// assert_eq!(param(Some("a=1&number=-7"), "number"), Some("-7"));
/// assert_eq!(param(None, "number"), None);
/// ```
pub fn param<'a>(query: Option<&'a str>, key: &str) -> Option<&'a str> {
    let query = query?;

    for pair in query.split('&') {
        let (k, v) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        if k == key {
            return Some(v);
        }
    }

    None
}
