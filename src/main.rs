use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use repokit::commands;
use repokit::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing with RUST_LOG env filter
    // e.g., RUST_LOG=repokit=debug
    // Logs go to stderr; stdout carries the rendered commands.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = || commands::load_catalog(cli.catalog_file.as_deref());

    match cli.command {
        Commands::Repos(args) => commands::repos::run(args, &catalog()?),
        Commands::Install(args) => commands::install::run(args),
        Commands::Catalog(args) => commands::catalog::run(args, &catalog()?),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
