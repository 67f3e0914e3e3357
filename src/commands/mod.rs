//! Command implementations for the repokit CLI.

pub mod catalog;
pub mod completions;
pub mod install;
pub mod repos;

use crate::catalog::RepoCatalog;
use crate::distro::{DEFAULT_ARCH, DistroContext, PackageType};
use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

/// Distro selection shared by the rendering commands.
#[derive(Debug, Args)]
pub struct DistroArgs {
    /// Distro id as used by the catalog (e.g. centos, debian, ubuntu)
    #[arg(long)]
    pub distro: String,

    /// Package family of the distro (deb or rpm)
    #[arg(long = "package-type")]
    pub package_type: String,

    /// Package manager for rpm distros (e.g. yum, dnf)
    #[arg(long = "package-manager")]
    pub package_manager: Option<String>,

    /// Target architecture
    #[arg(long, default_value = DEFAULT_ARCH)]
    pub arch: String,
}

impl DistroArgs {
    pub fn to_context(&self) -> Result<DistroContext> {
        let ctx = DistroContext::new(
            self.arch.clone(),
            self.distro.clone(),
            PackageType::from(self.package_type.as_str()),
            self.package_manager.clone(),
        )?;
        tracing::debug!(distro = %ctx, "Distro context");
        Ok(ctx)
    }
}

/// Load the built-in catalog, merging `overlay` over it when given.
pub fn load_catalog(overlay: Option<&Path>) -> Result<RepoCatalog> {
    let builtin = RepoCatalog::builtin().context("Failed to load built-in repository catalog")?;

    match overlay {
        Some(path) => {
            let overlay = RepoCatalog::load(path).with_context(|| {
                format!("Failed to load repository catalog from {}", path.display())
            })?;
            Ok(RepoCatalog::merged(&builtin, &overlay))
        }
        None => Ok(builtin),
    }
}

/// Print a rendered instruction; empty output prints nothing.
fn emit(command: &str) {
    if command.is_empty() {
        tracing::info!("Nothing to render");
    } else {
        println!("{}", command);
    }
}
