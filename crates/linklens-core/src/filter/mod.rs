//! Split-filter classification protocol.
//!
//! Two independently-built probabilistic sets are loaded per run, one per
//! reputation category. An identifier is queried against both and a label is
//! asserted only when exactly one set matches.

mod bloom;
mod load;

pub use bloom::FilterPart;
pub use load::{load_classifier, load_filter, FilterLoadError};

use std::fmt;

use url::Url;

use crate::url_model::{self, Identifier};

/// Classification outcome.
///
/// `None` covers both "neither set matched" and "both matched": agreement or
/// silence from both sets is inconclusive, not a default to either label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Transphobic,
    TFriendly,
    None,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Label::Transphobic => "transphobic",
            Label::TFriendly => "t-friendly",
            Label::None => "none",
        })
    }
}

/// A named, ordered sequence of filter parts combined by OR.
///
/// The parts come from corpora of different sizes and are composed rather
/// than merged, keeping each part's false-positive profile independently
/// bounded. Immutable after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct CombinedFilter {
    name: String,
    parts: Vec<FilterPart>,
}

impl CombinedFilter {
    pub fn new(name: impl Into<String>, parts: Vec<FilterPart>) -> Self {
        CombinedFilter {
            name: name.into(),
            parts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Membership across all parts (logical OR).
    pub fn test(&self, key: &str) -> bool {
        self.parts.iter().any(|p| p.contains(key))
    }

    /// Membership with platform aliasing: a youtube handle key that misses is
    /// retried in its legacy `/c/` form, since both URL shapes address the
    /// same account. The invalid marker never matches.
    fn test_identifier(&self, id: &Identifier) -> bool {
        let Some(key) = id.as_key() else { return false };
        if self.test(key) {
            return true;
        }
        if let Some(handle) = key.strip_prefix("youtube.com/@") {
            return self.test(&format!("youtube.com/c/{handle}"));
        }
        false
    }
}

/// Both loaded reputation sets plus the decision rule.
#[derive(Debug, Clone)]
pub struct Classifier {
    transphobic: CombinedFilter,
    t_friendly: CombinedFilter,
}

impl Classifier {
    pub fn new(transphobic: CombinedFilter, t_friendly: CombinedFilter) -> Self {
        Classifier {
            transphobic,
            t_friendly,
        }
    }

    /// Labels `id` only when exactly one of the two sets matches (XOR).
    pub fn classify(&self, id: &Identifier) -> Label {
        let hostile = self.transphobic.test_identifier(id);
        let supportive = self.t_friendly.test_identifier(id);
        match (hostile, supportive) {
            (true, false) => Label::Transphobic,
            (false, true) => Label::TFriendly,
            _ => Label::None,
        }
    }

    /// Full pipeline for one URL: canonicalize, apply Mastodon-mode bare-host
    /// suppression, classify.
    ///
    /// Under `mastodon_mode`, an identifier equal to the URL's raw host means
    /// the engine only saw an instance, not an account; that is too coarse to
    /// label, so classification is skipped.
    pub fn classify_url(&self, url: &Url, mastodon_mode: bool) -> (Option<Identifier>, Label) {
        let Some(id) = url_model::canonicalize(url) else {
            return (None, Label::None);
        };
        if mastodon_mode && url_model::is_bare_host(&id, url) {
            tracing::debug!("bare-host identifier {} suppressed in mastodon mode", id);
            return (Some(id), Label::None);
        }
        let label = self.classify(&id);
        (Some(id), label)
    }
}
