//! Per-platform identity extraction rules.
//!
//! An ordered table of (predicate, extractor) pairs evaluated first-match-wins.
//! Order matters: several predicates overlap (a blogspot subdomain would also
//! satisfy the generic fallback), so the table keeps the documented precedence.

use percent_encoding::percent_decode_str;
use url::Url;

use super::{domain_is, partial_path, path_part, Identifier, PartialPath};

struct Rule {
    matches: fn(&str, &Url) -> bool,
    extract: fn(&str, &Url) -> Option<Identifier>,
}

static RULES: &[Rule] = &[
    Rule {
        matches: |h, _| domain_is(h, "bsky.social") || domain_is(h, "bsky.app"),
        extract: bluesky,
    },
    Rule {
        matches: |h, _| domain_is(h, "facebook.com"),
        extract: facebook,
    },
    Rule {
        matches: |h, _| domain_is(h, "reddit.com"),
        extract: reddit,
    },
    Rule {
        matches: |h, _| domain_is(h, "twitter.com") || domain_is(h, "x.com"),
        extract: twitter,
    },
    Rule {
        matches: |h, _| domain_is(h, "youtube.com"),
        extract: youtube,
    },
    Rule {
        matches: |h, u| domain_is(h, "disqus.com") && u.path().starts_with("/by/"),
        extract: disqus,
    },
    Rule {
        matches: |h, _| domain_is(h, "medium.com"),
        extract: medium,
    },
    Rule {
        matches: |h, _| domain_is(h, "tumblr.com"),
        extract: tumblr,
    },
    Rule {
        matches: |h, _| domain_is(h, "wikipedia.org") || domain_is(h, "rationalwiki.org"),
        extract: wiki,
    },
    Rule {
        matches: |h, _| h.contains(".blogspot."),
        extract: blogspot,
    },
    Rule {
        matches: |h, _| h.contains("google."),
        extract: google,
    },
    Rule {
        matches: |h, _| domain_is(h, "cohost.org"),
        extract: cohost,
    },
];

/// Runs `host` (already `www.`-stripped) and `url` through the rule table,
/// falling back to the generic handle/host rule when nothing matches.
pub(crate) fn dispatch(host: &str, url: &Url) -> Option<Identifier> {
    for rule in RULES {
        if (rule.matches)(host, url) {
            return (rule.extract)(host, url);
        }
    }
    generic(host, url)
}

/// Non-empty query parameter value, decoded.
fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

fn bluesky(host: &str, url: &Url) -> Option<Identifier> {
    let path = url.path();
    if matches!(path_part(path, 2), Some("lists" | "feed")) {
        return None;
    }
    let username = if path_part(path, 0) == Some("profile") {
        path_part(path, 1).map(|u| u.strip_prefix('@').unwrap_or(u))
    } else if path.starts_with("/@") {
        path_part(path, 0).map(|s| &s[1..])
    } else if host.contains(".bsky.") {
        host.rfind(".bsky").map(|i| &host[..i])
    } else {
        None
    };
    let username = username.filter(|u| !u.is_empty())?;
    // Handles are themselves domains; short names live under the service.
    Some(if username.contains('.') {
        Identifier::key(username)
    } else {
        Identifier::key(format!("{username}.bsky.social"))
    })
}

fn facebook(_host: &str, url: &Url) -> Option<Identifier> {
    if let Some(fb_id) = query_param(url, "id") {
        return Some(Identifier::key(format!("facebook.com/{fb_id}")));
    }
    let path = url.path().replacen("/pg/", "/", 1);
    let n = if path.starts_with("/groups/") { 2 } else { 1 };
    Some(partial_path(&path, n).prefixed("facebook.com"))
}

fn reddit(host: &str, url: &Url) -> Option<Identifier> {
    let path = url.path().replacen("/u/", "/user/", 1);
    if !path.starts_with("/user/") && !path.starts_with("/r/") {
        return None;
    }
    // A thread link on the apex host names a thread, not an account.
    if path.contains("/comments/") && host == "reddit.com" {
        return None;
    }
    Some(partial_path(&path, 2).prefixed("reddit.com"))
}

fn twitter(_host: &str, url: &Url) -> Option<Identifier> {
    Some(partial_path(url.path(), 1).prefixed("twitter.com"))
}

fn youtube(_host: &str, url: &Url) -> Option<Identifier> {
    let path = url.path();
    let n = if path.starts_with("/user/") || path.starts_with("/c/") || path.starts_with("/channel/")
    {
        2
    } else {
        1
    };
    Some(partial_path(path, n).prefixed("youtube.com"))
}

fn disqus(_host: &str, url: &Url) -> Option<Identifier> {
    Some(partial_path(url.path(), 2).prefixed("disqus.com"))
}

fn medium(host: &str, url: &Url) -> Option<Identifier> {
    // A custom subdomain is the publication's identity.
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() == 3 && labels[0] != "www" {
        return Some(Identifier::key(host));
    }
    let path = url.path().replacen("/t/", "/", 1);
    Some(partial_path(&path, 1).prefixed("medium.com"))
}

const TUMBLR_RESERVED: &[&str] = &[
    "new",
    "dashboard",
    "explore",
    "inbox",
    "likes",
    "following",
    "settings",
    "changes",
    "help",
    "about",
    "apps",
    "policy",
    "post",
    "search",
    "tagged",
];

fn tumblr(host: &str, url: &Url) -> Option<Identifier> {
    let path = url.path();
    if path.starts_with("/register/follow/") {
        return path_part(path, 2).map(|name| Identifier::key(format!("{name}.tumblr.com")));
    }
    if path.contains("/tagged/") {
        return None;
    }
    if host == "tumblr.com" || host == "at.tumblr.com" {
        let mut name = path_part(path, 0)?;
        if name == "blog" {
            name = path_part(path, 1)?;
        }
        if TUMBLR_RESERVED.contains(&name) {
            return None;
        }
        let name = name.strip_prefix('@').unwrap_or(name);
        return Some(Identifier::key(format!("{name}.tumblr.com")));
    }
    if host != "assets.tumblr.com" && !host.contains(".media.") {
        return Some(Identifier::key(host));
    }
    None
}

fn wiki(_host: &str, url: &Url) -> Option<Identifier> {
    // A fragment leaves the edit state ambiguous. A bare trailing `#`
    // parses as an empty fragment and is treated as no fragment at all.
    if url.fragment().is_some_and(|f| !f.is_empty()) {
        return None;
    }
    let path = url.path();
    if path == "/w/index.php" && query_param(url, "action").as_deref() == Some("edit") {
        if let Some(title) = query_param(url, "title") {
            if title.starts_with("User:") {
                return Some(Identifier::key(format!("wikipedia.org/wiki/{title}")));
            }
        }
    }
    if path.starts_with("/wiki/Special:Contributions/") {
        return path_part(path, 2)
            .map(|name| Identifier::key(format!("wikipedia.org/wiki/User:{name}")));
    }
    for prefix in ["/wiki/User:", "/wiki/User_talk:"] {
        if path.starts_with(prefix) && path_part(path, 2).is_none() {
            let seg = path_part(path, 1)?;
            let name = seg.split(':').nth(1)?;
            return Some(Identifier::key(format!("wikipedia.org/wiki/User:{name}")));
        }
    }
    // Any remaining namespace page is not an identity.
    if path.contains(':') {
        return None;
    }
    if path.starts_with("/wiki/") {
        return Some(match partial_path(path, 2) {
            PartialPath::Path(p) => {
                let decoded = percent_decode_str(&p).decode_utf8_lossy();
                Identifier::key(format!("wikipedia.org{decoded}"))
            }
            PartialPath::Missing => Identifier::Invalid,
        });
    }
    None
}

fn blogspot(host: &str, _url: &Url) -> Option<Identifier> {
    let idx = host.find(".blogspot.")?;
    let prefix = host[..idx].as_bytes();
    let mut start = prefix.len();
    while start > 0 && (prefix[start - 1].is_ascii_alphanumeric() || prefix[start - 1] == b'-') {
        start -= 1;
    }
    let name = &host[start..idx];
    if name.is_empty() {
        return None;
    }
    Some(Identifier::key(format!("{name}.blogspot.com")))
}

fn google(_host: &str, url: &Url) -> Option<Identifier> {
    // Knowledge-panel ("sticky card") results carry a stick parameter; image
    // tabs (tbm) and later result pages (start) never do.
    if url.path() == "/search"
        && query_param(url, "stick").is_some()
        && query_param(url, "tbm").is_none()
        && query_param(url, "start").is_none()
    {
        if let Some(q) = query_param(url, "q") {
            let topic: String = q
                .chars()
                .map(|c| if c.is_whitespace() { '_' } else { c })
                .collect();
            return Some(Identifier::key(format!("wikipedia.org/wiki/{topic}")));
        }
    }
    None
}

fn cohost(_host: &str, url: &Url) -> Option<Identifier> {
    Some(partial_path(url.path(), 1).prefixed("cohost.org"))
}

/// Fallback for unknown hosts: Mastodon-style handle paths, otherwise the
/// bare host.
fn generic(host: &str, url: &Url) -> Option<Identifier> {
    let host = host.strip_prefix("m.").unwrap_or(host);
    let path = url.path();
    if path.starts_with("/@") || path.starts_with("/web/@") {
        let seg = if path.starts_with("/web/@") {
            path_part(path, 1)
        } else {
            path_part(path, 0)
        };
        match seg {
            Some(seg) => {
                let username = seg.strip_prefix('@').unwrap_or(seg);
                let parts: Vec<&str> = username.split('@').collect();
                if parts.len() == 2 {
                    // user@remote mention: the account lives on the remote host.
                    return Some(Identifier::key(format!("{}/@{}", parts[1], parts[0])));
                }
                if parts.len() == 1 && !username.is_empty() {
                    return Some(Identifier::key(format!("{host}/@{username}")));
                }
            }
            None => return Some(Identifier::key(host)),
        }
    }
    if path.starts_with("/users/") {
        if let Some(username) = path_part(path, 1) {
            return Some(Identifier::key(format!("{host}/@{username}")));
        }
    }
    Some(Identifier::key(host))
}

#[cfg(test)]
mod tests {
    use crate::url_model::{canonicalize, try_parse_url, Identifier};

    fn id(s: &str) -> Option<Identifier> {
        canonicalize(&try_parse_url(s).unwrap())
    }

    fn key(s: &str) -> Option<Identifier> {
        Some(Identifier::key(s))
    }

    #[test]
    fn bluesky_profiles() {
        assert_eq!(id("https://bsky.app/profile/alice.bsky.social"), key("alice.bsky.social"));
        assert_eq!(id("https://bsky.app/profile/@bob"), key("bob.bsky.social"));
        assert_eq!(id("https://bsky.app/profile/custom.example.com"), key("custom.example.com"));
        assert_eq!(id("https://bsky.app/@carol"), key("carol.bsky.social"));
        assert_eq!(id("https://alice.bsky.social/"), key("alice.bsky.social"));
    }

    #[test]
    fn bluesky_lists_and_feeds_rejected() {
        assert_eq!(id("https://bsky.app/profile/alice.bsky.social/lists"), None);
        assert_eq!(id("https://bsky.app/profile/alice.bsky.social/feed"), None);
    }

    #[test]
    fn facebook_id_parameter_wins() {
        assert_eq!(id("https://www.facebook.com/profile.php?id=12345"), key("facebook.com/12345"));
    }

    #[test]
    fn facebook_paths() {
        assert_eq!(id("https://facebook.com/somepage/about"), key("facebook.com/somepage"));
        assert_eq!(id("https://facebook.com/pg/somepage/posts/"), key("facebook.com/somepage"));
        assert_eq!(
            id("https://facebook.com/groups/catgroup/permalink/9"),
            key("facebook.com/groups/catgroup")
        );
        assert_eq!(id("https://facebook.com/"), Some(Identifier::Invalid));
    }

    #[test]
    fn reddit_accounts_and_subreddits() {
        assert_eq!(id("https://www.reddit.com/u/spez"), key("reddit.com/user/spez"));
        assert_eq!(id("https://www.reddit.com/user/spez/posts"), key("reddit.com/user/spez"));
        assert_eq!(id("https://reddit.com/r/rust"), key("reddit.com/r/rust"));
        assert_eq!(id("https://reddit.com/gallery/abc"), None);
    }

    #[test]
    fn reddit_apex_thread_rejected() {
        assert_eq!(id("https://reddit.com/r/rust/comments/abc/title"), None);
        // Same thread through a subdomain still yields the subreddit.
        assert_eq!(
            id("https://old.reddit.com/r/rust/comments/abc/title"),
            key("reddit.com/r/rust")
        );
    }

    #[test]
    fn twitter_and_aliases() {
        assert_eq!(id("https://twitter.com/someuser"), key("twitter.com/someuser"));
        assert_eq!(id("https://x.com/someuser/status/123"), key("twitter.com/someuser"));
        assert_eq!(id("https://twitter.com/"), Some(Identifier::Invalid));
    }

    #[test]
    fn youtube_channel_forms() {
        assert_eq!(id("https://www.youtube.com/user/someone/videos"), key("youtube.com/user/someone"));
        assert_eq!(id("https://www.youtube.com/c/SomeChannel/about"), key("youtube.com/c/SomeChannel"));
        assert_eq!(id("https://www.youtube.com/channel/UC123/videos"), key("youtube.com/channel/UC123"));
        assert_eq!(id("https://www.youtube.com/@handle"), key("youtube.com/@handle"));
        assert_eq!(id("https://www.youtube.com/watch"), key("youtube.com/watch"));
    }

    #[test]
    fn disqus_by_paths_only() {
        assert_eq!(id("https://disqus.com/by/someuser/"), key("disqus.com/by/someuser"));
        // Anything else on disqus falls through to the generic host rule.
        assert_eq!(id("https://disqus.com/home/"), key("disqus.com"));
    }

    #[test]
    fn medium_publications() {
        assert_eq!(id("https://medium.com/@writer/story-123"), key("medium.com/@writer"));
        assert_eq!(id("https://medium.com/t/technology"), key("medium.com/technology"));
        assert_eq!(id("https://someblog.medium.com/post"), key("someblog.medium.com"));
    }

    #[test]
    fn tumblr_blogs() {
        assert_eq!(id("https://example.tumblr.com/post/123"), key("example.tumblr.com"));
        assert_eq!(id("https://www.tumblr.com/example"), key("example.tumblr.com"));
        assert_eq!(id("https://www.tumblr.com/blog/example"), key("example.tumblr.com"));
        assert_eq!(id("https://www.tumblr.com/@example"), key("example.tumblr.com"));
        assert_eq!(id("https://www.tumblr.com/register/follow/cats"), key("cats.tumblr.com"));
    }

    #[test]
    fn tumblr_rejections() {
        assert_eq!(id("https://www.tumblr.com/tagged/foo"), None);
        assert_eq!(id("https://example.tumblr.com/tagged/foo"), None);
        assert_eq!(id("https://www.tumblr.com/dashboard"), None);
        assert_eq!(id("https://assets.tumblr.com/x.css"), None);
        assert_eq!(id("https://64.media.tumblr.com/img.png"), None);
        assert_eq!(id("https://www.tumblr.com/"), None);
    }

    #[test]
    fn wikipedia_user_pages_normalize() {
        assert_eq!(
            id("https://en.wikipedia.org/wiki/User:Example"),
            key("wikipedia.org/wiki/User:Example")
        );
        assert_eq!(
            id("https://en.wikipedia.org/wiki/User_talk:Example"),
            key("wikipedia.org/wiki/User:Example")
        );
        assert_eq!(
            id("https://en.wikipedia.org/wiki/Special:Contributions/Example"),
            key("wikipedia.org/wiki/User:Example")
        );
        assert_eq!(
            id("https://en.wikipedia.org/w/index.php?action=edit&title=User:Example"),
            key("wikipedia.org/wiki/User:Example")
        );
    }

    #[test]
    fn wikipedia_articles_and_rejections() {
        assert_eq!(id("https://en.wikipedia.org/wiki/Some_Article"), key("wikipedia.org/wiki/Some_Article"));
        assert_eq!(id("https://en.wikipedia.org/wiki/Caf%C3%A9"), key("wikipedia.org/wiki/Café"));
        // Fragments leave edit state ambiguous; namespaces are not identities.
        assert_eq!(id("https://en.wikipedia.org/wiki/User:Example#top"), None);
        // A bare trailing # carries no fragment content and does not reject.
        assert_eq!(
            id("https://en.wikipedia.org/wiki/User:Example#"),
            key("wikipedia.org/wiki/User:Example")
        );
        assert_eq!(id("https://en.wikipedia.org/wiki/Category:Things"), None);
        assert_eq!(id("https://en.wikipedia.org/wiki/User:Example/subpage"), None);
        assert_eq!(id("https://rationalwiki.org/wiki/User:Example"), key("wikipedia.org/wiki/User:Example"));
    }

    #[test]
    fn blogspot_subdomains() {
        assert_eq!(id("https://myblog.blogspot.com/2020/01/post.html"), key("myblog.blogspot.com"));
        assert_eq!(id("https://myblog.blogspot.co.uk/"), key("myblog.blogspot.com"));
    }

    #[test]
    fn google_sticky_card() {
        assert_eq!(
            id("https://www.google.com/search?q=Some+Person&stick=xyz"),
            key("wikipedia.org/wiki/Some_Person")
        );
        assert_eq!(id("https://www.google.com/search?q=Some+Person&stick=xyz&tbm=isch"), None);
        assert_eq!(id("https://www.google.com/search?q=Some+Person&stick=xyz&start=10"), None);
        assert_eq!(id("https://www.google.com/search?q=Some+Person"), None);
        assert_eq!(id("https://www.google.com/maps"), None);
    }

    #[test]
    fn cohost_pages() {
        assert_eq!(id("https://cohost.org/someuser/post/123"), key("cohost.org/someuser"));
    }

    #[test]
    fn generic_mastodon_handles() {
        assert_eq!(id("https://mastodon.example/@alice"), key("mastodon.example/@alice"));
        assert_eq!(id("https://mastodon.example/web/@alice"), key("mastodon.example/@alice"));
        assert_eq!(id("https://m.mastodon.example/@alice"), key("mastodon.example/@alice"));
        assert_eq!(id("https://mastodon.example/users/alice"), key("mastodon.example/@alice"));
    }

    #[test]
    fn generic_federation_mention_rewritten() {
        assert_eq!(
            id("https://mastodon.example/@alice@other.example"),
            key("other.example/@alice")
        );
    }

    #[test]
    fn generic_bare_host() {
        assert_eq!(id("https://mastodon.example/about"), key("mastodon.example"));
        assert_eq!(id("https://unknownsite.example/"), key("unknownsite.example"));
    }
}
