//! `repokit install` - render package install commands.

use super::{DistroArgs, emit};
use crate::catalog::RepoCatalog;
use crate::packages::InstallOptions;
use crate::recipe::RecipeRenderer;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InstallArgs {
    #[command(flatten)]
    pub distro: DistroArgs,

    /// Remove package manager caches after installing
    #[arg(long)]
    pub clean_cache: bool,

    /// Package names or download URLs, in order
    #[arg(required = true)]
    pub packages: Vec<String>,
}

pub fn run(args: InstallArgs) -> Result<()> {
    let ctx = args.distro.to_context()?;
    // Installing never consults repositories
    let catalog = RepoCatalog::default();
    let renderer = RecipeRenderer::new(&catalog, ctx).with_install_options(InstallOptions {
        clean_cache: args.clean_cache,
    });

    emit(&renderer.package_install(&args.packages));
    Ok(())
}
