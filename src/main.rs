use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use stanfix::Result;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stanfix")]
#[command(author = "Chris Cheng <chris.cheng@shopee.com>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fix PHPStan diagnostics by editing PHPDoc", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose logging (same as RUST_LOG=stanfix=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply PHPDoc fixes for diagnostics in a PHPStan JSON report
    Fix(stanfix::cli::fix::FixArgs),

    /// List fixers in dispatch order
    Fixers(stanfix::cli::fixers::FixersArgs),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "stanfix=debug" } else { "stanfix=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fix(args) => {
            stanfix::cli::fix::run(args)?;
        }

        Commands::Fixers(args) => {
            stanfix::cli::fixers::run(args)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "stanfix", &mut io::stdout());
        }
    }

    Ok(())
}
