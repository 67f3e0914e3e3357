//! `repokit catalog` - inspect the repository catalog.

use crate::catalog::{CatalogDocument, RepoCatalog, RepoSource};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use schemars::schema_for;

#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub action: CatalogAction,
}

#[derive(Debug, Subcommand)]
pub enum CatalogAction {
    /// List repositories known per distro
    List {
        /// Only show this distro
        #[arg(long)]
        distro: Option<String>,
    },
    /// Print the JSON schema of catalog files
    Schema,
}

pub fn run(args: CatalogArgs, catalog: &RepoCatalog) -> Result<()> {
    match args.action {
        CatalogAction::List { distro } => {
            let distros: Vec<&str> = match &distro {
                Some(d) => vec![d.as_str()],
                None => catalog.distros().collect(),
            };

            for distro in distros {
                println!("{}:", distro);
                let mut any = false;
                for repo in catalog.repos(distro) {
                    any = true;
                    match &repo.source {
                        RepoSource::Rpm { id } => println!("  {:<16} rpm  {}", repo.name, id),
                        RepoSource::Apt { source, .. } => println!(
                            "  {:<16} apt  {} ({}.list)",
                            repo.name,
                            source,
                            repo.list_file()
                        ),
                    }
                }
                if !any {
                    println!("  (no repositories)");
                }
            }
        }
        CatalogAction::Schema => {
            let schema = schema_for!(CatalogDocument);
            let json = serde_json::to_string_pretty(&schema)
                .context("Failed to serialize catalog schema")?;
            println!("{}", json);
        }
    }

    Ok(())
}
