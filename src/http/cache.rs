//! HTTP cache validator module
//!
//! `Last-Modified`/`ETag` generation and conditional request evaluation.
//! Validators come from file metadata only, the file body is never hashed.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an HTTP date
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an HTTP date; obsolete RFC 850 and asctime forms are not accepted
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Generate a weak `ETag` from file size and modification time
///
/// # Returns
/// Quoted weak `ETag`, e.g., `W/"2-17f3a9c2e4b1d800"`
pub fn generate_etag(size: u64, modified: Option<SystemTime>) -> String {
    let stamp = modified
        .and_then(|m| m.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_nanos());
    format!("W/\"{size:x}-{stamp:x}\"")
}

/// Check the client's `If-None-Match` header against our `ETag`
///
/// Supports lists (`"a", "b"`) and the `*` wildcard. Comparison is weak,
/// so a `W/` prefix on either side is ignored.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let ours = opaque_tag(etag);
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .map(str::trim)
            .any(|tag| tag == "*" || opaque_tag(tag) == ours)
    })
}

fn opaque_tag(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}

/// Evaluate `If-Modified-Since`
///
/// Returns true when the file has not changed since the client's date
/// (second granularity). Unknown or epoch modification times never match.
pub fn check_not_modified_since(
    if_modified_since: Option<&str>,
    modified: Option<SystemTime>,
) -> bool {
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    let Some(modified) = modified.filter(|m| *m != UNIX_EPOCH) else {
        return false;
    };
    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}
