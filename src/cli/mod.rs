pub mod fix;
pub mod fixers;

use crate::fixers::{Collaborators, Registry, StrategyFactory};
use crate::models::{Configuration, StanfixConfig};
use crate::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Project root from `--root`, else the working directory
pub fn project_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => env::current_dir().context("Failed to determine current directory"),
    }
}

/// Load, override and validate configuration
///
/// Overrides precedence: CLI > config file > defaults.
pub fn load_configuration(
    project_root: &Path,
    config_path: Option<&Path>,
    enable: &[String],
    disable: &[String],
) -> Result<Configuration> {
    let raw = match config_path {
        Some(path) => StanfixConfig::load_from(path)?,
        None => StanfixConfig::load(project_root)?,
    };

    let configuration = raw
        .with_cli_overrides(enable, disable)
        .resolve()
        .context("Invalid stanfix configuration")?;
    Ok(configuration)
}

/// Build the registry with the built-in fixers and any configured custom ones
pub fn build_registry(configuration: &Configuration, factory: &StrategyFactory) -> Result<Registry> {
    let registry = Registry::from_config(configuration, &Collaborators::php(), factory)
        .context("Failed to build fixer registry")?;
    Ok(registry)
}
