//! `repokit repos` - render repository enable/disable commands.

use super::{DistroArgs, emit};
use crate::catalog::RepoCatalog;
use crate::repos::{RepoAction, RepoCommandOptions, handle_repos_value_with, handle_repos_with};
use anyhow::{Context, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct ReposArgs {
    /// Whether to enable or disable the repositories
    #[arg(value_enum)]
    pub action: RepoAction,

    #[command(flatten)]
    pub distro: DistroArgs,

    /// Extra flags for <manager>-config-manager (rpm only)
    #[arg(long = "config-manager-flags", allow_hyphen_values = true)]
    pub config_manager_flags: Option<String>,

    /// Repository names as a JSON array, as a template engine passes them
    #[arg(long = "names-json", conflicts_with = "names")]
    pub names_json: Option<String>,

    /// Logical repository names, in order
    #[arg(required_unless_present = "names_json")]
    pub names: Vec<String>,
}

pub fn run(args: ReposArgs, catalog: &RepoCatalog) -> Result<()> {
    let ctx = args.distro.to_context()?;
    let options = RepoCommandOptions {
        config_manager_flags: args.config_manager_flags.unwrap_or_default(),
    };

    let command = match &args.names_json {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("Failed to parse --names-json")?;
            handle_repos_value_with(catalog, &ctx, &value, args.action, &options)?
        }
        None => handle_repos_with(catalog, &ctx, &args.names, args.action, &options),
    };

    emit(&command);
    Ok(())
}
