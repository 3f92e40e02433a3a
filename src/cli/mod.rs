//! Command-line interface for multisplit
//!
//! Provides `plan`, `list` and `check-ignore` subcommands plus shell completions.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod check;
mod list;
mod plan;
mod utils;

/// Open many files side by side: plan a grid of editor panes, skipping binaries and ignored paths
#[derive(Parser)]
#[command(name = "multisplit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a split view for the selected files and directories
    Plan(plan::PlanArgs),

    /// List the files a selection expands to after ignore filtering
    List(list::ListArgs),

    /// Show which paths the ignore file matches
    CheckIgnore(check::CheckArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Plan(args) => plan::run(args),
        Commands::List(args) => list::run(args),
        Commands::CheckIgnore(args) => check::run(args),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "multisplit", &mut std::io::stdout());
            Ok(())
        }
    }
}
