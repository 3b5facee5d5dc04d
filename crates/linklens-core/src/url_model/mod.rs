//! URL canonicalization engine.
//!
//! Maps a profile or content URL to the canonical identity key used as the
//! reputation-filter lookup key. Pure and total over well-formed URLs: every
//! outcome is a value (`Some(Identifier)` or `None`), never an error.

mod identifier;
mod platforms;
mod unwrap;

pub use identifier::{Identifier, PartialPath};

use url::Url;

/// Unwrap at most this many nested redirector levels per canonicalization.
/// Keeps adversarial redirector chains from recursing without bound.
const MAX_UNWRAP_DEPTH: usize = 2;

/// Parses a URL string, accepting only `http` and `https`.
///
/// Any other scheme or a malformed string is an absent value, not an error:
/// such inputs can never carry an identity.
pub fn try_parse_url(s: &str) -> Option<Url> {
    let url = Url::parse(s).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// Derives the canonical identity key for `url`, if it has one.
///
/// Redirector URLs are unwrapped (bounded) and resolution recurses on the
/// inner URL; otherwise the host is normalized and dispatched through the
/// ordered platform rules.
pub fn canonicalize(url: &Url) -> Option<Identifier> {
    canonicalize_at(url, 0)
}

fn canonicalize_at(url: &Url, depth: usize) -> Option<Identifier> {
    if depth < MAX_UNWRAP_DEPTH {
        if let Some(nested) = unwrap::unwrap_nested(url) {
            return canonicalize_at(&nested, depth + 1);
        }
    }
    if url.path().contains("/badge_member_list/") {
        return None;
    }
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    platforms::dispatch(host, url)
}

/// True when the engine fell back to the bare host: the identifier equals the
/// URL's raw host unchanged, meaning no account path was resolved.
pub fn is_bare_host(id: &Identifier, url: &Url) -> bool {
    id.as_key().is_some() && id.as_key() == url.host_str()
}

/// True iff `host` is `base` or ends with `"." + base`.
///
/// The suffix boundary must fall on a label boundary: `evilexample.com` does
/// not match `example.com`.
pub fn domain_is(host: &str, base: &str) -> bool {
    if host.len() < base.len() {
        return false;
    }
    if host.len() == base.len() {
        return host == base;
    }
    host.ends_with(base) && host.as_bytes()[host.len() - base.len() - 1] == b'.'
}

/// First `n` `/`-delimited segments of `path` as `/a[/b...]`.
///
/// At most one trailing empty segment (trailing slash) is dropped; anything
/// short of exactly `n` segments is `Missing`.
pub(crate) fn partial_path(path: &str, n: usize) -> PartialPath {
    let mut segs: Vec<&str> = path.split('/').skip(1).take(n).collect();
    if segs.last().is_some_and(|s| s.is_empty()) {
        segs.pop();
    }
    if segs.len() != n {
        return PartialPath::Missing;
    }
    PartialPath::Path(format!("/{}", segs.join("/")))
}

/// Path segment at `index` (0 = first segment after the leading `/`), or
/// `None` if absent or empty.
pub(crate) fn path_part(path: &str, index: usize) -> Option<&str> {
    path.split('/').nth(index + 1).filter(|s| !s.is_empty())
}
