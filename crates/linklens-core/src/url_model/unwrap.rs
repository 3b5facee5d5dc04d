//! Redirector and nested-URL unwrapping.
//!
//! Runs before any platform rule so that interstitial links (youtube
//! `/redirect`, tracking wrappers with an embedded absolute URL) resolve to
//! the identity of their target, not of the redirector.

use percent_encoding::percent_decode_str;
use url::Url;

use super::{domain_is, try_parse_url};

/// Recovers the URL wrapped inside `url`, if any.
///
/// Returns `None` both when `url` is not a redirector and when the nested
/// candidate fails to parse; the caller then resolves the outer URL normally.
pub(crate) fn unwrap_nested(url: &Url) -> Option<Url> {
    let host = url.host_str()?;

    // youtube.com/redirect?q=<target>: q is usually scheme-less.
    if domain_is(host, "youtube.com") && url.path() == "/redirect" {
        if let Some((_, q)) = url.query_pairs().find(|(k, _)| k == "q") {
            if !q.starts_with("http:") && !q.starts_with("https:") && q.contains('.') {
                if let Some(nested) = try_parse_url(&format!("http://{q}")) {
                    return Some(nested);
                }
            }
        }
    }

    let href = url.as_str();
    let embedded = href[1..].find("http").map(|i| i + 1)?;

    // Prefer a whole query value that is itself an absolute URL. `ref_url` is
    // a referrer breadcrumb, never the actual target, so it is skipped.
    if let Some(query) = url.query() {
        for piece in query.split('&') {
            if piece.starts_with("ref_url=") {
                continue;
            }
            let Some(eq) = piece.find('=') else { continue };
            let value = percent_decode_str(&piece[eq + 1..]).decode_utf8_lossy();
            if value.starts_with("http:") || value.starts_with("https:") {
                return try_parse_url(&value);
            }
        }
    }

    // Language-switch links embed the destination in the path but are not
    // redirects to it.
    if url.path().starts_with("/intl/") {
        return None;
    }

    try_parse_url(&href[embedded..])
}
