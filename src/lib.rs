//! repokit - repository and package install commands for container recipes
//!
//! Renders the `RUN` instructions an image build recipe needs to enable or
//! disable third-party repositories and to install packages, for apt
//! (Debian/Ubuntu) and rpm (RHEL/CentOS) distros.
//!
//! ```rust
//! use repokit::{DistroContext, RepoAction, RepoCatalog, handle_repos};
//!
//! let catalog = RepoCatalog::builtin()?;
//! let centos = DistroContext::rpm("centos", "yum");
//!
//! assert_eq!(
//!     handle_repos(&catalog, &centos, &["grafana", "ceph"], RepoAction::Enable),
//!     "RUN yum-config-manager  --enable grafana --enable centos-ceph-nautilus"
//! );
//! # Ok::<(), repokit::Error>(())
//! ```
//!
//! Requests are fail-open: repositories the catalog does not list for a
//! distro are skipped, and a request that resolves nothing renders the empty
//! string. The only hard failures are malformed arguments and catalogs.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod distro;
pub mod error;
pub mod packages;
pub mod recipe;
pub mod repos;

pub use catalog::{CatalogDocument, RepoCatalog, RepoDescriptor, RepoSource};
pub use cli::{Cli, Commands};
pub use distro::{DistroContext, PackageType};
pub use error::{Error, Result};
pub use packages::{
    InstallOptions, PackageSpec, debian_package_install, debian_package_install_with,
    rpm_package_install,
};
pub use recipe::RecipeRenderer;
pub use repos::{
    RepoAction, RepoCommandOptions, handle_repos, handle_repos_value, handle_repos_value_with,
    handle_repos_with,
};
