//! Project configuration
//!
//! Read from `stanfix.toml` (or `stanfix.yaml|yml`) in the project root.
//! A missing file means defaults: every diagnostic is fixed and every
//! built-in fixer is enabled.
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::policy::{PolicyAction, PolicyResolver, Rule};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: [&str; 3] = ["stanfix.toml", "stanfix.yaml", "stanfix.yml"];

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse YAML config '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid policy action for '{pattern}': {reason}")]
    InvalidAction { pattern: String, reason: String },

    #[error("Invalid policy pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Root of the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StanfixConfig {
    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub fixers: FixersConfig,
}

/// `[policy]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Action when no rule matches: fix | ignore | report
    #[serde(default = "default_action")]
    pub default: String,

    /// Rules in precedence order (`[[policy.rules]]`)
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            default: default_action(),
            rules: Vec::new(),
        }
    }
}

fn default_action() -> String {
    "fix".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub action: String,
}

/// `[fixers]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixersConfig {
    /// When non-empty, only these fixers run
    #[serde(default)]
    pub enabled: Vec<String>,

    /// Fixers to skip (ignored when `enabled` is set)
    #[serde(default)]
    pub disabled: Vec<String>,

    /// Custom fixer names, resolved through the strategy factory
    #[serde(default)]
    pub custom: Vec<String>,

    /// Priority overrides by fixer name
    #[serde(default)]
    pub priorities: HashMap<String, i32>,
}

impl StanfixConfig {
    /// Load config from the first `stanfix.*` file in `project_root`
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        match Self::discover(project_root) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Path of the config file that `load` would read
    pub fn discover(project_root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| path.is_file())
    }

    /// Load config from an explicit path; YAML by extension, TOML otherwise
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );

        if is_yaml {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Apply `--enable` / `--disable` from the command line
    pub fn with_cli_overrides(mut self, enable: &[String], disable: &[String]) -> Self {
        if !enable.is_empty() {
            self.fixers.enabled = enable.to_vec();
        }
        if !disable.is_empty() {
            self.fixers.disabled.extend(disable.iter().cloned());
        }
        self
    }

    /// Validate actions and compile patterns
    pub fn resolve(self) -> Result<Configuration, ConfigError> {
        let default_action = parse_action("<default>", &self.policy.default)?;

        let rules = self
            .policy
            .rules
            .iter()
            .map(|rule| Rule::new(rule.pattern.clone(), parse_action(&rule.pattern, &rule.action)?))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Configuration {
            policy: PolicyResolver::new(rules, default_action),
            fixers: self.fixers,
        })
    }
}

fn parse_action(pattern: &str, action: &str) -> Result<PolicyAction, ConfigError> {
    action
        .parse()
        .map_err(|reason| ConfigError::InvalidAction {
            pattern: pattern.to_string(),
            reason,
        })
}

/// Validated configuration used by the registry and the batch fixer
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    policy: PolicyResolver,
    fixers: FixersConfig,
}

impl Configuration {
    pub fn new(policy: PolicyResolver, fixers: FixersConfig) -> Self {
        Self { policy, fixers }
    }

    pub fn policy(&self) -> &PolicyResolver {
        &self.policy
    }

    pub fn rule_for(&self, message: &str) -> &Rule {
        self.policy.rule_for(message)
    }

    pub fn default_rule(&self) -> &Rule {
        self.policy.default_rule()
    }

    /// An explicit enabled-list restricts; else the disabled-list excludes
    pub fn is_enabled(&self, name: &str) -> bool {
        if !self.fixers.enabled.is_empty() {
            return self.fixers.enabled.iter().any(|n| n == name);
        }
        !self.fixers.disabled.iter().any(|n| n == name)
    }

    pub fn priority_for(&self, name: &str) -> Option<i32> {
        self.fixers.priorities.get(name).copied()
    }

    pub fn custom_strategy_names(&self) -> &[String] {
        &self.fixers.custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = StanfixConfig::load(dir.path()).unwrap().resolve().unwrap();

        assert_eq!(config.default_rule().action, PolicyAction::Fix);
        assert!(config.is_enabled("missing_return_type"));
        assert_eq!(config.priority_for("missing_return_type"), None);
        assert!(config.custom_strategy_names().is_empty());
    }

    #[test]
    fn test_load_toml() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("stanfix.toml"),
            r#"
[policy]
default = "ignore"

[[policy.rules]]
pattern = "Method * has no return type specified."
action = "fix"

[[policy.rules]]
pattern = "/undefined/i"
action = "report"

[fixers]
disabled = ["missing_throws"]
custom = ["AddPureFlag"]

[fixers.priorities]
missing_param_type = 99
"#,
        )
        .unwrap();

        let config = StanfixConfig::load(dir.path()).unwrap().resolve().unwrap();

        assert_eq!(
            config
                .rule_for("Method Foo::bar() has no return type specified.")
                .action,
            PolicyAction::Fix
        );
        assert_eq!(
            config.rule_for("Call to Undefined method.").action,
            PolicyAction::Report
        );
        assert_eq!(config.rule_for("Other").action, PolicyAction::Ignore);
        assert!(!config.is_enabled("missing_throws"));
        assert!(config.is_enabled("missing_param_type"));
        assert_eq!(config.priority_for("missing_param_type"), Some(99));
        assert_eq!(config.custom_strategy_names(), ["AddPureFlag".to_string()]);
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("stanfix.yaml"),
            r#"
policy:
  default: report
  rules:
    - pattern: "Exact message."
      action: ignore
fixers:
  enabled: [missing_return_type]
"#,
        )
        .unwrap();

        let config = StanfixConfig::load(dir.path()).unwrap().resolve().unwrap();
        assert_eq!(config.rule_for("Exact message.").action, PolicyAction::Ignore);
        assert_eq!(config.rule_for("Exact message").action, PolicyAction::Report);
        assert!(config.is_enabled("missing_return_type"));
        assert!(!config.is_enabled("missing_param_type"));
    }

    #[test]
    fn test_enabled_list_wins_over_disabled() {
        let fixers = FixersConfig {
            enabled: vec!["a".into()],
            disabled: vec!["a".into(), "b".into()],
            ..FixersConfig::default()
        };
        let config = Configuration::new(PolicyResolver::default(), fixers);
        assert!(config.is_enabled("a"));
        assert!(!config.is_enabled("b"));
        assert!(!config.is_enabled("c"));
    }

    #[test]
    fn test_cli_overrides() {
        let config = StanfixConfig::default()
            .with_cli_overrides(&[], &["missing_throws".to_string()])
            .resolve()
            .unwrap();
        assert!(!config.is_enabled("missing_throws"));

        let config = StanfixConfig::default()
            .with_cli_overrides(&["missing_param_type".to_string()], &[])
            .resolve()
            .unwrap();
        assert!(config.is_enabled("missing_param_type"));
        assert!(!config.is_enabled("missing_return_type"));
    }

    #[test]
    fn test_invalid_action_is_error() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("stanfix.toml"),
            "[[policy.rules]]\npattern = \"x\"\naction = \"skip\"\n",
        )
        .unwrap();

        let err = StanfixConfig::load(dir.path())
            .unwrap()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAction { .. }));
        assert!(err.to_string().contains("skip"));
    }

    #[test]
    fn test_invalid_default_and_unparsable_file() {
        let mut raw = StanfixConfig::default();
        raw.policy.default = "maybe".to_string();
        assert!(matches!(
            raw.resolve(),
            Err(ConfigError::InvalidAction { .. })
        ));

        let dir = tempdir().unwrap();
        let path = dir.path().join("stanfix.toml");
        fs::write(&path, "[policy\ndefault = ").unwrap();
        assert!(matches!(
            StanfixConfig::load_from(&path),
            Err(ConfigError::Toml { .. })
        ));
        assert!(matches!(
            StanfixConfig::load_from(&dir.path().join("absent.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
