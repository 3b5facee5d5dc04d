//! Account-template mapping.
//!
//! Builds a checkable URL from a well-known platform key plus an account
//! value, so callers holding e.g. a bare Reddit username do not have to
//! assemble profile URLs themselves.

use anyhow::{bail, Result};

/// Keys with a plain `{value}` substitution.
const TEMPLATES: &[(&str, &str)] = &[
    ("Medium_username", "https://medium.com/{value}"),
    ("youtube_channel_id", "https://www.youtube.com/channel/{value}"),
    ("YouTube_handle", "https://www.youtube.com/{value}"),
    ("Facebook_username", "https://www.facebook.com/{value}"),
    ("Facebook_page_ID", "https://www.facebook.com/pages/{value}"),
    ("Facebook_numeric_ID", "https://www.facebook.com/{value}"),
    ("Bluesky_handle", "https://bsky.app/profile/{value}"),
    ("Bluesky_DID", "https://bsky.app/profile/{value}"),
    ("Reddit_username", "https://www.reddit.com/user/{value}"),
    ("subreddit", "https://www.reddit.com/r/{value}"),
    ("tumblr_username", "https://{value}.tumblr.com/"),
];

/// Takes `username@domain` rather than a plain value and implies
/// Mastodon-suppression mode.
pub const MASTODON_ADDRESS_KEY: &str = "mastodon_address";

/// A rendered template, plus whether the key implies Mastodon mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltUrl {
    pub url: String,
    pub mastodon: bool,
}

/// All recognized mapping keys.
pub fn known_keys() -> impl Iterator<Item = &'static str> {
    TEMPLATES
        .iter()
        .map(|(key, _)| *key)
        .chain(std::iter::once(MASTODON_ADDRESS_KEY))
}

/// Renders the URL for `key` and `value`.
pub fn build_url(key: &str, value: &str) -> Result<BuiltUrl> {
    if key == MASTODON_ADDRESS_KEY {
        let Some((user, domain)) = value.split_once('@') else {
            bail!("{MASTODON_ADDRESS_KEY} value must be username@domain, got {value:?}");
        };
        if user.is_empty() || domain.is_empty() {
            bail!("{MASTODON_ADDRESS_KEY} value must be username@domain, got {value:?}");
        }
        return Ok(BuiltUrl {
            url: format!("https://{domain}/@{user}"),
            mastodon: true,
        });
    }
    match TEMPLATES.iter().find(|(k, _)| *k == key) {
        Some((_, template)) => Ok(BuiltUrl {
            url: template.replace("{value}", value),
            mastodon: false,
        }),
        None => {
            let keys: Vec<&str> = known_keys().collect();
            bail!("unknown mapping key {key:?}; valid keys: {}", keys.join(", "));
        }
    }
}
