//! Fix/ignore/report policy
//!
//! Maps a diagnostic message to an action through an ordered rule list.
//! Patterns come in three forms:
//! - `/regex/flags`: a regular expression searched in the message
//! - any other string containing `*`: a wildcard over the whole message
//! - anything else: an exact message
//!
//! Exact rules win over pattern rules, which win over the default.

use crate::models::config::ConfigError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do with a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    Fix,
    Ignore,
    Report,
}

impl FromStr for PolicyAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fix" => Ok(Self::Fix),
            "ignore" => Ok(Self::Ignore),
            "report" => Ok(Self::Report),
            other => Err(format!(
                "unknown action '{}' (expected fix, ignore or report)",
                other
            )),
        }
    }
}

impl fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fix => write!(f, "fix"),
            Self::Ignore => write!(f, "ignore"),
            Self::Report => write!(f, "report"),
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Any,
    Exact(String),
    Wildcard(Regex),
    Regex(Regex),
}

/// A compiled `pattern -> action` rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub action: PolicyAction,
    matcher: Matcher,
}

impl Rule {
    /// Compile a rule, classifying the pattern by its syntax
    pub fn new(pattern: impl Into<String>, action: PolicyAction) -> Result<Self, ConfigError> {
        let pattern = pattern.into();
        let matcher = if let Some((body, flags)) = split_delimited_regex(&pattern) {
            Matcher::Regex(compile_regex(&pattern, body, flags)?)
        } else if pattern.contains('*') {
            Matcher::Wildcard(compile_wildcard(&pattern)?)
        } else {
            Matcher::Exact(pattern.clone())
        };

        Ok(Self {
            pattern,
            action,
            matcher,
        })
    }

    /// Rule that matches every message
    pub fn fallback(action: PolicyAction) -> Self {
        Self {
            pattern: "*".to_string(),
            action,
            matcher: Matcher::Any,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self.matcher, Matcher::Exact(_))
    }

    pub fn matches(&self, message: &str) -> bool {
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Exact(expected) => expected == message,
            Matcher::Wildcard(re) | Matcher::Regex(re) => re.is_match(message),
        }
    }
}

/// Ordered rules plus a default
#[derive(Debug, Clone)]
pub struct PolicyResolver {
    rules: Vec<Rule>,
    default: Rule,
}

impl Default for PolicyResolver {
    fn default() -> Self {
        Self::new(Vec::new(), PolicyAction::Fix)
    }
}

impl PolicyResolver {
    pub fn new(rules: Vec<Rule>, default_action: PolicyAction) -> Self {
        Self {
            rules,
            default: Rule::fallback(default_action),
        }
    }

    /// Rule governing `message`
    pub fn rule_for(&self, message: &str) -> &Rule {
        self.rules
            .iter()
            .find(|rule| rule.is_exact() && rule.matches(message))
            .or_else(|| {
                self.rules
                    .iter()
                    .find(|rule| !rule.is_exact() && rule.matches(message))
            })
            .unwrap_or(&self.default)
    }

    pub fn action_for(&self, message: &str) -> PolicyAction {
        self.rule_for(message).action
    }

    pub fn default_rule(&self) -> &Rule {
        &self.default
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Split `/body/flags` into its parts
fn split_delimited_regex(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    if body.is_empty() || !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((body, flags))
}

fn compile_regex(pattern: &str, body: &str, flags: &str) -> Result<Regex, ConfigError> {
    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'u' => builder.unicode(true),
            other => {
                return Err(ConfigError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: format!("unsupported regex flag '{}'", other),
                })
            }
        };
    }

    builder.build().map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

fn compile_wildcard(pattern: &str) -> Result<Regex, ConfigError> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("(?s)^{}$", body)).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
