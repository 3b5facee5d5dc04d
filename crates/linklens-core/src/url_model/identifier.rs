//! Canonical identity keys produced by the URL engine.

use std::fmt;

/// Canonical string key for a social-media account or page.
///
/// `Invalid` marks a URL that matched a platform rule but was missing required
/// path segments. It is a distinct tag rather than a magic string so it can
/// never collide with a legitimate filter entry; membership tests on it always
/// miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Key(String),
    Invalid,
}

impl Identifier {
    pub fn key(s: impl Into<String>) -> Self {
        Identifier::Key(s.into())
    }

    /// The key string, or `None` for the invalid marker.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Identifier::Key(s) => Some(s),
            Identifier::Invalid => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Key(s) => f.write_str(s),
            Identifier::Invalid => f.write_str("(invalid)"),
        }
    }
}

/// Outcome of extracting the first N path segments of an account path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialPath {
    /// `/seg1[/seg2...]` with exactly the requested number of segments.
    Path(String),
    /// Fewer segments than requested were present.
    Missing,
}

impl PartialPath {
    /// Joins a canonical domain prefix with this partial path.
    ///
    /// A missing path propagates as `Identifier::Invalid` so the caller still
    /// gets a value that is guaranteed not to match any filter entry.
    pub(crate) fn prefixed(self, canonical: &str) -> Identifier {
        match self {
            PartialPath::Path(p) => Identifier::key(format!("{canonical}{p}")),
            PartialPath::Missing => Identifier::Invalid,
        }
    }
}
