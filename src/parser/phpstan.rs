//! PHPStan JSON Report Reader
//!
//! Reads the output of `phpstan analyse --error-format=json` into
//! `Diagnostic` records with paths made relative to the project root.

use crate::models::Diagnostic;
use anyhow::{Context, Result};
use serde::{de, Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Suffix PHPStan appends to paths of errors reported inside traits
const TRAIT_CONTEXT_MARKER: &str = " (in context of";

#[derive(Debug, Deserialize)]
struct Report {
    #[serde(default, deserialize_with = "files_map")]
    files: BTreeMap<String, FileEntry>,
}

/// PHPStan encodes an empty `files` object as `[]`
fn files_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, FileEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Files {
        Map(BTreeMap<String, FileEntry>),
        List(Vec<de::IgnoredAny>),
    }

    match Files::deserialize(deserializer)? {
        Files::Map(files) => Ok(files),
        Files::List(entries) if entries.is_empty() => Ok(BTreeMap::new()),
        Files::List(_) => Err(de::Error::custom("expected `files` to be an object keyed by path")),
    }
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    message: String,
    #[serde(default)]
    line: Option<usize>,
    #[serde(default)]
    identifier: Option<String>,
}

/// Parse a PHPStan JSON report
///
/// Diagnostics come out grouped by file, in report order within each file.
/// A message without a line number is attached to line 1.
pub fn parse_report(json: &str, project_root: &Path) -> Result<Vec<Diagnostic>> {
    let report: Report =
        serde_json::from_str(json).context("Failed to parse PHPStan JSON report")?;

    let mut diagnostics = Vec::new();
    for (path, entry) in report.files {
        let file = normalize_path(&path, project_root);
        for message in entry.messages {
            let mut diagnostic =
                Diagnostic::new(file.clone(), message.line.unwrap_or(1), message.message);
            if let Some(identifier) = message.identifier {
                diagnostic = diagnostic.with_identifier(identifier);
            }
            diagnostics.push(diagnostic);
        }
    }

    Ok(diagnostics)
}

/// Read and parse a PHPStan JSON report from disk
pub fn load_report(path: &Path, project_root: &Path) -> Result<Vec<Diagnostic>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read PHPStan report: {}", path.display()))?;
    parse_report(&json, project_root)
}

/// Strip trait context and make the path relative to `project_root` when it
/// lives underneath it
pub fn normalize_path(path: &str, project_root: &Path) -> PathBuf {
    let path = match path.find(TRAIT_CONTEXT_MARKER) {
        Some(index) => &path[..index],
        None => path,
    };

    let path = Path::new(path.trim());
    path.strip_prefix(project_root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
