use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One issue reported by PHPStan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// File the issue belongs to, relative to the project root when possible
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// Message text exactly as PHPStan printed it
    pub message: String,
    /// PHPStan error identifier (e.g. `missingType.return`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Diagnostic {
    pub fn new(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
            identifier: None,
            column: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Capture a named group of `pattern` from the message
    pub fn capture<'a>(&'a self, pattern: &Regex, group: &str) -> Option<&'a str> {
        pattern
            .captures(&self.message)
            .and_then(|caps| caps.name(group))
            .map(|m| m.as_str())
    }

    /// Format for display
    pub fn format(&self) -> String {
        format!("{}:{} - {}", self.file.display(), self.line, self.message)
    }
}
