//! pkgm CLI
//!
//! Command-line interface for installing and managing plugins from a
//! git-hosted catalog.

mod cli;
mod commands;
mod context;
mod error;
mod host;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;
use host::ConsoleSink;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(&cli.base, cmd),
        None => {
            println!("{} plugin package manager", "pkgm".green().bold());
            println!();
            println!("Run {} for available commands.", "pkgm --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr so reports on stdout stay clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{} tracing subscriber already set", "warning:".yellow().bold());
    }
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(base: &std::path::Path, cmd: Commands) -> Result<()> {
    let sink = ConsoleSink;
    let manager = || context::open_manager(base);

    match cmd {
        Commands::Search { pattern } => commands::run_search(&manager()?, &sink, &pattern),
        Commands::Update => commands::run_update(&manager()?, &sink),
        Commands::Upgrade { pkg } => commands::run_upgrade(&manager()?, &sink, pkg.as_deref()),
        Commands::Install { identifiers } => {
            commands::run_install(&manager()?, &sink, &identifiers)
        }
        Commands::Uninstall { names } => commands::run_uninstall(&manager()?, &sink, &names),
        Commands::List => commands::run_list(&manager()?, &sink),
        Commands::ListAll { json } => commands::run_list_all(&manager()?, &sink, json),
        Commands::Config { action } => commands::run_config(base, &sink, action),
    }
}
