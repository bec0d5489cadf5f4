use crate::fixers::StrategyFactory;
use crate::models::{BatchOutcome, FixOutcome, FixStatistics};
use crate::orchestrator::{BatchFixer, ProgressCallback};
use crate::parser::load_report;
use crate::{Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct FixArgs {
    /// PHPStan JSON report (`phpstan analyse --error-format=json`)
    pub report: PathBuf,

    /// Project root that report paths are relative to (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file (default: stanfix.toml, stanfix.yaml or stanfix.yml in the root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Compute fixes without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Only run these fixers (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub enable: Vec<String>,

    /// Skip these fixers (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub disable: Vec<String>,
}

pub fn run(args: FixArgs) -> Result<()> {
    run_with_factory(args, &StrategyFactory::new())
}

/// Run with a catalogue of custom fixers available to configuration
pub fn run_with_factory(args: FixArgs, factory: &StrategyFactory) -> Result<()> {
    let project_root = super::project_root(args.root.clone())?;
    let configuration = super::load_configuration(
        &project_root,
        args.config.as_deref(),
        &args.enable,
        &args.disable,
    )?;
    let registry = super::build_registry(&configuration, factory)?;

    let diagnostics = load_report(&args.report, &project_root)?;
    debug!("Loaded {} diagnostics", diagnostics.len());

    if diagnostics.is_empty() {
        if args.json {
            print_json(&BatchOutcome::default(), args.dry_run)?;
        } else {
            println!("{}", "✅ No diagnostics to fix".green());
        }
        return Ok(());
    }

    let fixer = BatchFixer::new(&registry, configuration.policy(), &project_root);

    let bar = if args.json {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        bar
    };
    let mut on_progress = |done: usize, total: usize, file: &Path| {
        bar.set_length(total as u64);
        bar.set_position(done as u64);
        bar.set_message(file.display().to_string());
    };
    let outcome =
        fixer.fix_all_with_progress(&diagnostics, Some(&mut on_progress as &mut ProgressCallback));
    bar.finish_and_clear();

    if !args.dry_run {
        write_changes(&fixer, &outcome)?;
    }

    if args.json {
        print_json(&outcome, args.dry_run)?;
    } else {
        print_summary(&outcome, args.dry_run);
    }

    Ok(())
}

fn write_changes(fixer: &BatchFixer<'_>, outcome: &BatchOutcome) -> Result<()> {
    for report in outcome.reports.iter().filter(|r| r.has_changes()) {
        let path = fixer.resolve_path(&report.file);
        fs::write(&path, &report.final_content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Wrote {}", path.display());
    }
    Ok(())
}

fn print_json(outcome: &BatchOutcome, dry_run: bool) -> Result<()> {
    let output = serde_json::json!({
        "dry_run": dry_run,
        "statistics": FixStatistics::from_outcome(outcome),
        "files": outcome.reports,
        "missing_files": outcome.missing_files,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_summary(outcome: &BatchOutcome, dry_run: bool) {
    for report in &outcome.reports {
        println!("{}", report.file.display().to_string().cyan().bold());
        for result in &report.fix_results {
            let line = format!(
                "   {} L{}: {}",
                result.outcome.symbol(),
                result.diagnostic.line,
                result.description
            );
            match result.outcome {
                FixOutcome::Success => println!("{}", line.green()),
                FixOutcome::Failure => println!("{}", line.red()),
                FixOutcome::Ignored => println!("{}", line.bright_black()),
                FixOutcome::Reported => println!("{}", line.yellow()),
            }
        }
    }

    for missing in &outcome.missing_files {
        println!(
            "{}",
            format!("⚠️  Skipped missing file: {}", missing.display()).yellow()
        );
    }

    let stats = FixStatistics::from_outcome(outcome);
    println!();
    println!("{}", "Summary".bold());
    println!("   Files:       {} ({} changed)", stats.total_files, stats.files_with_changes);
    println!("   Diagnostics: {}", stats.total_diagnostics);
    println!("   Fixed:       {}", stats.fixed.to_string().green());
    println!("   Failed:      {}", stats.failed.to_string().red());
    println!("   Ignored:     {}", stats.ignored);
    println!("   Reported:    {}", stats.reported);
    if stats.missing_files > 0 {
        println!("   Missing:     {}", stats.missing_files.to_string().yellow());
    }

    if dry_run && stats.files_with_changes > 0 {
        println!("\n{}", "Dry run: no files were written".yellow());
    }
}
