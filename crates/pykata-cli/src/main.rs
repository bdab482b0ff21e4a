use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pykata_catalog::Catalog;
use std::path::{Path, PathBuf};

mod commands;
mod report;

/// PyKata - Python coding challenges in your terminal.
///
/// Submissions are executed inside an embedded Python interpreter and
/// checked against each challenge's test cases.
///
/// EXAMPLES:
///     pykata list                              Show the challenge catalog
///     pykata show add-two-numbers              Show one challenge
///     pykata run solution.py                   Execute a file, print its output
///     pykata check solution.py -c sum-list     Check a submission
///
/// ENVIRONMENT VARIABLES:
///     NO_COLOR      Set to disable colored output
///     RUST_LOG      Tracing filter for internal diagnostics
#[derive(Parser)]
#[command(name = "pykata")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Load challenges from a custom catalog JSON file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all challenges grouped by level and topic
    #[command(visible_alias = "ls")]
    List,

    /// Show a challenge's description, hint and starter code
    Show {
        /// Challenge id (see `pykata list`)
        id: String,
    },

    /// Execute a Python file and print its captured output
    #[command(visible_alias = "r")]
    Run {
        /// Path to the Python source file
        file: String,
    },

    /// Check a submission against a challenge's test cases
    #[command(visible_alias = "c")]
    Check {
        /// Path to the Python source file
        file: String,
        /// Challenge id to check against
        #[arg(long, short = 'c')]
        challenge: String,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> Result<()> {
    // Initialize structured logging with env-based filter, defaulting to warn
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::List => commands::list::run(&catalog),
        Commands::Show { id } => commands::show::run(&catalog, &id),
        Commands::Run { file } => commands::run::run(&file),
        Commands::Check {
            file,
            challenge,
            no_color,
        } => commands::check::run(&catalog, &file, &challenge, no_color),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Catalog::builtin().context("Failed to load the built-in catalog"),
    }
}
