// src/classifier.rs
//! Domain / URL classification of free-text asset identifiers

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Optional `*.` or `*` wildcard, dotted labels, alphabetic TLD of 2+ chars
static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\*\.?)?[a-z0-9.-]+\.[a-z]{2,}$").expect("valid domain regex")
});

/// `http://`, `https://` or `www.` followed by a non-empty, non-whitespace run
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://|www\.)[^\s/$.?#]\S*$").expect("valid url regex")
});

/// Kind of an in-scope asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Domain,
    Url,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Domain => "domain",
            AssetKind::Url => "url",
        }
    }
}

/// Check if a token looks like a domain or wildcard domain
pub fn is_domain(s: &str) -> bool {
    !s.is_empty() && DOMAIN_RE.is_match(s)
}

/// Check if a token looks like a URL
pub fn is_url(s: &str) -> bool {
    !s.is_empty() && URL_RE.is_match(s)
}

/// Classify an asset identifier
///
/// The identifier is trimmed first. Domain takes precedence over URL, so a
/// token matching both patterns is a domain. Missing or blank identifiers
/// classify as neither.
pub fn classify(identifier: Option<&str>) -> Option<AssetKind> {
    let token = identifier?.trim();
    if token.is_empty() {
        return None;
    }

    if is_domain(token) {
        Some(AssetKind::Domain)
    } else if is_url(token) {
        Some(AssetKind::Url)
    } else {
        None
    }
}
