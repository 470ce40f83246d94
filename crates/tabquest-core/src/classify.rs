//! Domain classification.
//!
//! Maps the URL of the active tab to a [`Category`]. Classification never
//! fails: internal pages, local files, and anything else `url` cannot parse
//! fall back to [`Category::Neutral`] -- that is expected traffic, not an
//! error.
//!
//! Precedence: user override > productive list > distracting list > neutral.
//! The static lists are disjoint by construction (tested below).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// Category of the domain currently holding the user's attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Productive,
    Neutral,
    Distracting,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Productive => "productive",
            Category::Neutral => "neutral",
            Category::Distracting => "distracting",
        }
    }
}

/// Domains counted as productive out of the box.
pub static PRODUCTIVE_DOMAINS: &[&str] = &[
    "github.com",
    "gitlab.com",
    "stackoverflow.com",
    "stackexchange.com",
    "docs.rs",
    "crates.io",
    "rust-lang.org",
    "developer.mozilla.org",
    "wikipedia.org",
    "leetcode.com",
    "exercism.org",
    "coursera.org",
    "khanacademy.org",
    "edx.org",
    "udemy.com",
    "arxiv.org",
    "scholar.google.com",
    "kaggle.com",
    "notion.so",
    "obsidian.md",
    "overleaf.com",
    "jira.atlassian.com",
    "linear.app",
    "figma.com",
];

/// Domains counted as distracting out of the box.
pub static DISTRACTING_DOMAINS: &[&str] = &[
    "youtube.com",
    "netflix.com",
    "twitch.tv",
    "hulu.com",
    "disneyplus.com",
    "twitter.com",
    "x.com",
    "facebook.com",
    "instagram.com",
    "tiktok.com",
    "snapchat.com",
    "reddit.com",
    "9gag.com",
    "buzzfeed.com",
    "pinterest.com",
    "tumblr.com",
    "imgur.com",
];

/// Extract the normalized host from a URL string.
///
/// Lowercases the host and strips one leading `www.`. Returns `None` for
/// anything without a host (malformed input, `file:` URLs, internal pages).
pub fn extract_domain(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host.is_empty() {
        return None;
    }
    Some(host.to_string())
}

/// True if `host` is `domain` itself or a subdomain of it
/// (`gist.github.com` matches `github.com`).
fn matches_domain(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}

fn in_list(host: &str, list: &[&str]) -> bool {
    list.iter().any(|d| matches_domain(host, d))
}

/// Classify a URL against the static lists plus user overrides.
///
/// Overrides are keyed by normalized domain and win over both static lists,
/// also via suffix match, so an override for `github.com` covers
/// `gist.github.com`.
pub fn classify(raw_url: &str, overrides: &HashMap<String, Category>) -> Category {
    let Some(host) = extract_domain(raw_url) else {
        return Category::Neutral;
    };
    classify_domain(&host, overrides)
}

/// Classify an already-extracted domain.
pub fn classify_domain(host: &str, overrides: &HashMap<String, Category>) -> Category {
    let host = host.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    if let Some(cat) = overrides.get(host) {
        return *cat;
    }
    for (domain, cat) in overrides {
        if matches_domain(host, domain) {
            return *cat;
        }
    }

    if in_list(host, PRODUCTIVE_DOMAINS) {
        Category::Productive
    } else if in_list(host, DISTRACTING_DOMAINS) {
        Category::Distracting
    } else {
        Category::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> HashMap<String, Category> {
        HashMap::new()
    }

    #[test]
    fn productive_exact_match() {
        assert_eq!(
            classify("https://github.com/rust-lang/rust", &no_overrides()),
            Category::Productive
        );
    }

    #[test]
    fn subdomain_suffix_match() {
        assert_eq!(
            classify("https://gist.github.com/someone/abc", &no_overrides()),
            Category::Productive
        );
        assert_eq!(
            classify("https://music.youtube.com/watch?v=x", &no_overrides()),
            Category::Distracting
        );
    }

    #[test]
    fn www_prefix_is_stripped() {
        assert_eq!(
            classify("https://www.reddit.com/r/rust", &no_overrides()),
            Category::Distracting
        );
    }

    #[test]
    fn suffix_match_requires_label_boundary() {
        // notgithub.com must not match github.com
        assert_eq!(
            classify("https://notgithub.com/", &no_overrides()),
            Category::Neutral
        );
    }

    #[test]
    fn unknown_domain_is_neutral() {
        assert_eq!(
            classify("https://example.org/page", &no_overrides()),
            Category::Neutral
        );
    }

    #[test]
    fn malformed_url_is_neutral() {
        assert_eq!(classify("not a url", &no_overrides()), Category::Neutral);
        assert_eq!(classify("about:blank", &no_overrides()), Category::Neutral);
        assert_eq!(classify("", &no_overrides()), Category::Neutral);
    }

    #[test]
    fn override_beats_static_lists() {
        let mut overrides = HashMap::new();
        overrides.insert("youtube.com".to_string(), Category::Productive);
        assert_eq!(
            classify("https://youtube.com/educational", &overrides),
            Category::Productive
        );
        // Suffix match applies to overrides too.
        assert_eq!(
            classify("https://music.youtube.com/", &overrides),
            Category::Productive
        );
    }

    #[test]
    fn override_case_insensitive() {
        let mut overrides = HashMap::new();
        overrides.insert("example.org".to_string(), Category::Distracting);
        assert_eq!(
            classify("https://WWW.EXAMPLE.ORG/", &overrides),
            Category::Distracting
        );
    }

    #[test]
    fn static_lists_are_disjoint() {
        for p in PRODUCTIVE_DOMAINS {
            for d in DISTRACTING_DOMAINS {
                assert!(
                    !matches_domain(p, d) && !matches_domain(d, p),
                    "{p} and {d} overlap"
                );
            }
        }
    }
}
