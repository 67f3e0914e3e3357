//! CLI argument definitions for repokit.
//!
//! Separated from `main.rs` so that shell completion generation can
//! reference these types.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Debug, Parser)]
#[command(name = "repokit")]
#[command(about = "Render repository and package install commands for container build recipes")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository catalog (JSON) merged over the built-in one
    ///
    /// Entries in this file replace built-in entries with the same distro
    /// and repository name.
    #[arg(long = "catalog", global = true, env = "REPOKIT_CATALOG")]
    pub catalog_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the command enabling or disabling repositories
    Repos(commands::repos::ReposArgs),

    /// Render the command installing packages
    Install(commands::install::InstallArgs),

    /// Inspect the repository catalog
    Catalog(commands::catalog::CatalogArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}
