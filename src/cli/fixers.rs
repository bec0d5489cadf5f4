use crate::fixers::StrategyFactory;
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct FixersArgs {
    /// Project root to read configuration from (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file (default: stanfix.toml, stanfix.yaml or stanfix.yml in the root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List fixers in dispatch order with their effective priority
pub fn run(args: FixersArgs) -> Result<()> {
    let project_root = super::project_root(args.root)?;
    let configuration =
        super::load_configuration(&project_root, args.config.as_deref(), &[], &[])?;
    let registry = super::build_registry(&configuration, &StrategyFactory::new())?;

    if args.json {
        let fixers: Vec<_> = registry
            .registrations()
            .iter()
            .map(|r| {
                serde_json::json!({
                    "name": r.name(),
                    "description": r.strategy.description(),
                    "priority": r.priority,
                    "enabled": r.enabled,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&fixers)?);
        return Ok(());
    }

    println!("{}", "Fixers (in dispatch order)".cyan().bold());
    for registration in registry.registrations() {
        let state = if registration.enabled {
            "enabled".green()
        } else {
            "disabled".bright_black()
        };
        println!(
            "   {:<24} {:>4}  {:<8}  {}",
            registration.name().bold(),
            registration.priority,
            state,
            registration.strategy.description()
        );
    }

    Ok(())
}
