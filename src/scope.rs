// src/scope.rs
//! Per-program partition of targets into domains and URLs

use serde::Serialize;

use crate::classifier::{classify, AssetKind};
use crate::types::{Program, Target};

/// Classified scope of a single program, in target order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgramScope {
    pub domains: Vec<String>,
    pub urls: Vec<String>,
}

impl ProgramScope {
    /// Partition targets into domains and URLs
    ///
    /// Identifiers are trimmed. Targets without an identifier, or whose
    /// identifier is neither a domain nor a URL, are dropped.
    pub fn from_targets(targets: &[Target]) -> Self {
        let mut scope = Self::default();

        for target in targets {
            let Some(identifier) = target.asset_identifier.as_deref() else {
                continue;
            };

            match classify(Some(identifier)) {
                Some(AssetKind::Domain) => scope.domains.push(identifier.trim().to_string()),
                Some(AssetKind::Url) => scope.urls.push(identifier.trim().to_string()),
                None => {}
            }
        }

        scope
    }

    /// Partition a program's targets; a program without targets has an empty scope
    pub fn from_program(program: &Program) -> Self {
        program
            .targets
            .as_deref()
            .map(Self::from_targets)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.urls.is_empty()
    }
}

/// Clean an identifier for export
///
/// Domains lose any scheme, `www.` prefix, path and wildcard prefix and are
/// lowercased. URLs get an `https://` scheme when they have none.
/// Examples:
/// - "*.Example.com" -> "example.com"
/// - "https://www.example.com/login" (as domain) -> "example.com"
/// - "www.example.com/app" (as URL) -> "https://www.example.com/app"
pub fn normalize_identifier(identifier: &str, kind: AssetKind) -> String {
    let trimmed = identifier.trim();

    match kind {
        AssetKind::Domain => {
            let without_scheme = trimmed
                .strip_prefix("https://")
                .or_else(|| trimmed.strip_prefix("http://"))
                .unwrap_or(trimmed);
            let without_www = without_scheme
                .strip_prefix("www.")
                .unwrap_or(without_scheme);
            let host = without_www.split('/').next().unwrap_or_default();
            let host = host
                .strip_prefix("*.")
                .or_else(|| host.strip_prefix('*'))
                .unwrap_or(host);
            host.to_lowercase()
        }
        AssetKind::Url => {
            if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                trimmed.to_string()
            } else {
                format!("https://{}", trimmed.trim_start_matches('/'))
            }
        }
    }
}
