//! Repository enable/disable command synthesis.
//!
//! Turns a list of logical repository names into a single recipe
//! instruction for the target distro:
//!
//! ```dockerfile
//! RUN yum-config-manager  --enable grafana --enable centos-ceph-nautilus
//! RUN echo "deb https://packages.grafana.com/oss/deb stable main" >/etc/apt/sources.list.d/grafana.list
//! ```
//!
//! Names the catalog does not know for the distro are dropped, and a call
//! that resolves nothing renders the empty string so the caller emits no
//! line at all.

use crate::catalog::{RepoCatalog, RepoDescriptor, RepoSource};
use crate::distro::{DistroContext, PackageType};
use crate::error::{Error, Result};
use clap::ValueEnum;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Directory apt reads extra source lists from.
pub const APT_SOURCES_DIR: &str = "/etc/apt/sources.list.d";

/// What to do with the named repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum RepoAction {
    Enable,
    Disable,
}

impl RepoAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoAction::Enable => "enable",
            RepoAction::Disable => "disable",
        }
    }
}

impl fmt::Display for RepoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepoAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "enable" => Ok(RepoAction::Enable),
            "disable" => Ok(RepoAction::Disable),
            other => Err(Error::UnknownAction(other.to_string())),
        }
    }
}

/// Knobs for the rendered repository command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoCommandOptions {
    /// Extra flags placed right after `<manager>-config-manager`.
    ///
    /// The slot is rendered even when empty, which leaves two spaces before
    /// the first `--enable`/`--disable`. Recipes already built depend on
    /// those exact bytes.
    pub config_manager_flags: String,
}

/// Render the command enabling or disabling `repo_names` on `ctx`.
pub fn handle_repos<S: AsRef<str>>(
    catalog: &RepoCatalog,
    ctx: &DistroContext,
    repo_names: &[S],
    action: RepoAction,
) -> String {
    handle_repos_with(
        catalog,
        ctx,
        repo_names,
        action,
        &RepoCommandOptions::default(),
    )
}

/// Like [`handle_repos`] with explicit [`RepoCommandOptions`].
pub fn handle_repos_with<S: AsRef<str>>(
    catalog: &RepoCatalog,
    ctx: &DistroContext,
    repo_names: &[S],
    action: RepoAction,
    options: &RepoCommandOptions,
) -> String {
    let resolved = resolve(catalog, ctx, repo_names);
    if resolved.is_empty() {
        return String::new();
    }

    let command = match ctx.base_package_type() {
        PackageType::Rpm => render_rpm(ctx, &resolved, action, options),
        PackageType::Deb => render_apt(&resolved, action),
        PackageType::Unknown(other) => {
            tracing::debug!(package_type = %other, "No repository rendering for package type");
            String::new()
        }
    };

    tracing::trace!(distro = %ctx, %action, command = %command, "Rendered repository command");
    command
}

/// Entry point for dynamically typed callers (template engines).
///
/// `repo_names` must be a JSON array of strings. A bare string is rejected
/// rather than being read as a list of one-character names.
pub fn handle_repos_value(
    catalog: &RepoCatalog,
    ctx: &DistroContext,
    repo_names: &Value,
    action: RepoAction,
) -> Result<String> {
    handle_repos_value_with(
        catalog,
        ctx,
        repo_names,
        action,
        &RepoCommandOptions::default(),
    )
}

/// Like [`handle_repos_value`] with explicit [`RepoCommandOptions`].
pub fn handle_repos_value_with(
    catalog: &RepoCatalog,
    ctx: &DistroContext,
    repo_names: &Value,
    action: RepoAction,
    options: &RepoCommandOptions,
) -> Result<String> {
    let names = repo_names_from_value(repo_names)?;
    Ok(handle_repos_with(catalog, ctx, &names, action, options))
}

fn repo_names_from_value(value: &Value) -> Result<Vec<&str>> {
    let Value::Array(items) = value else {
        return Err(Error::not_a_repo_list());
    };

    items
        .iter()
        .map(|item| item.as_str().ok_or_else(Error::not_a_repo_list))
        .collect()
}

/// Catalog entries for `repo_names` that apply to `ctx`, in request order.
fn resolve<'a, S: AsRef<str>>(
    catalog: &'a RepoCatalog,
    ctx: &DistroContext,
    repo_names: &[S],
) -> Vec<&'a RepoDescriptor> {
    let distro = ctx.base_distro();
    let mut resolved = Vec::with_capacity(repo_names.len());

    for name in repo_names {
        let name = name.as_ref();
        match catalog.lookup(distro, name) {
            Some(descriptor) if &descriptor.package_type() == ctx.base_package_type() => {
                resolved.push(descriptor);
            }
            Some(descriptor) => {
                tracing::debug!(
                    distro,
                    repo = name,
                    repo_type = %descriptor.package_type(),
                    "Skipping repository configured for another package type"
                );
            }
            None => {
                tracing::debug!(distro, repo = name, "Repository not in catalog, skipping");
            }
        }
    }

    resolved
}

fn render_rpm(
    ctx: &DistroContext,
    repos: &[&RepoDescriptor],
    action: RepoAction,
    options: &RepoCommandOptions,
) -> String {
    let Some(manager) = ctx.distro_package_manager() else {
        tracing::debug!(distro = %ctx, "rpm context without package manager");
        return String::new();
    };

    let mut command = format!(
        "RUN {}-config-manager {}",
        manager, options.config_manager_flags
    );
    for repo in repos {
        if let RepoSource::Rpm { id } = &repo.source {
            command.push_str(&format!(" --{} {}", action, id));
        }
    }

    command
}

fn render_apt(repos: &[&RepoDescriptor], action: RepoAction) -> String {
    // apt has no convention for removing a source list
    if action == RepoAction::Disable {
        return String::new();
    }

    let commands: Vec<String> = repos
        .iter()
        .filter_map(|repo| match &repo.source {
            RepoSource::Apt { source, .. } => Some(format!(
                "echo \"{}\" >{}/{}.list",
                source,
                APT_SOURCES_DIR,
                repo.list_file()
            )),
            RepoSource::Rpm { .. } => None,
        })
        .collect();

    format!("RUN {}", commands.join(" && "))
}
