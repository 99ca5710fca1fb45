//! Extraction of social/external links from free-text channel descriptions.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Best-guess classification of an extracted URL, by substring match against
/// a fixed list of known domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Twitch,
    Twitter,
    Instagram,
    Tiktok,
    Youtube,
    Website,
}

/// A URL found in a channel bio, tagged with the platform it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub platform: LinkKind,
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").expect("static regex compiles"))
}

/// Scans free text for `http(s)://` URLs and classifies each one.
///
/// Unrecognized domains are tagged [`LinkKind::Website`].
#[must_use]
pub fn extract_links(text: &str) -> Vec<Link> {
    url_regex()
        .find_iter(text)
        .map(|m| {
            let url = m.as_str().to_string();
            let platform = classify(&url);
            Link { url, platform }
        })
        .collect()
}

fn classify(url: &str) -> LinkKind {
    let lower = url.to_lowercase();
    if lower.contains("twitch.tv") {
        LinkKind::Twitch
    } else if lower.contains("twitter.com") || lower.contains("x.com") {
        LinkKind::Twitter
    } else if lower.contains("instagram.com") {
        LinkKind::Instagram
    } else if lower.contains("tiktok.com") {
        LinkKind::Tiktok
    } else if lower.contains("youtube.com") || lower.contains("youtu.be") {
        LinkKind::Youtube
    } else {
        LinkKind::Website
    }
}
