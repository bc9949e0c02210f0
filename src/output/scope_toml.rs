// src/output/scope_toml.rs
//! Export of classified, normalized scope as TOML

use serde::Serialize;

use crate::classifier::AssetKind;
use crate::scope::{normalize_identifier, ProgramScope};
use crate::types::Program;

#[derive(Debug, Serialize)]
struct ScopeExport {
    programs: Vec<ExportedProgram>,
}

#[derive(Debug, Serialize)]
struct ExportedProgram {
    name: String,
    handle: String,
    domains: Vec<String>,
    urls: Vec<String>,
}

/// Render every program's scope as `[[programs]]` tables
///
/// Identifiers are normalized and duplicates produced by normalization
/// (e.g. `*.example.com` and `example.com`) are collapsed, keeping order.
pub fn export_scope(programs: &[Program]) -> anyhow::Result<String> {
    let programs = programs
        .iter()
        .map(|program| {
            let scope = ProgramScope::from_program(program);
            ExportedProgram {
                name: program.name.clone(),
                handle: program.handle.clone(),
                domains: normalize_all(&scope.domains, AssetKind::Domain),
                urls: normalize_all(&scope.urls, AssetKind::Url),
            }
        })
        .collect();

    Ok(toml::to_string(&ScopeExport { programs })?)
}

fn normalize_all(identifiers: &[String], kind: AssetKind) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        let normalized = normalize_identifier(identifier, kind);
        if !normalized.is_empty() && !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    out
}
