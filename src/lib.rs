// Stanfix - PHPDoc fixes for PHPStan diagnostics
// Reads a PHPStan JSON report and repairs each diagnostic by editing the PHPDoc it points at

pub mod cli;
pub mod fixers;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod policy;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use fixers::{FixStrategy, Registry, StrategyFactory};
pub use models::{Configuration, Diagnostic, FileFixReport, FixOutcome, FixResult, FixStatistics};
pub use orchestrator::BatchFixer;
pub use policy::{PolicyAction, PolicyResolver};
