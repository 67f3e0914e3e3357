//! Recipe helpers bound to one catalog and one distro.
//!
//! This is the surface a templating pipeline exposes to its templates:
//! `enable_repos`, `disable_repos` and `package_install`, each returning a
//! complete recipe instruction or the empty string.

use crate::catalog::RepoCatalog;
use crate::distro::{DistroContext, PackageType};
use crate::error::Result;
use crate::packages::{InstallOptions, debian_package_install_with, rpm_package_install};
use crate::repos::{RepoAction, RepoCommandOptions, handle_repos_value_with, handle_repos_with};
use serde_json::Value;

/// Renders recipe instructions for one distro.
#[derive(Debug, Clone)]
pub struct RecipeRenderer<'a> {
    catalog: &'a RepoCatalog,
    ctx: DistroContext,
    repo_options: RepoCommandOptions,
    install_options: InstallOptions,
}

impl<'a> RecipeRenderer<'a> {
    pub fn new(catalog: &'a RepoCatalog, ctx: DistroContext) -> Self {
        Self {
            catalog,
            ctx,
            repo_options: RepoCommandOptions::default(),
            install_options: InstallOptions::default(),
        }
    }

    pub fn with_repo_options(mut self, options: RepoCommandOptions) -> Self {
        self.repo_options = options;
        self
    }

    pub fn with_install_options(mut self, options: InstallOptions) -> Self {
        self.install_options = options;
        self
    }

    pub fn context(&self) -> &DistroContext {
        &self.ctx
    }

    pub fn enable_repos<S: AsRef<str>>(&self, repo_names: &[S]) -> String {
        self.repos(repo_names, RepoAction::Enable)
    }

    pub fn disable_repos<S: AsRef<str>>(&self, repo_names: &[S]) -> String {
        self.repos(repo_names, RepoAction::Disable)
    }

    pub fn repos<S: AsRef<str>>(&self, repo_names: &[S], action: RepoAction) -> String {
        handle_repos_with(
            self.catalog,
            &self.ctx,
            repo_names,
            action,
            &self.repo_options,
        )
    }

    /// Untyped variant of [`RecipeRenderer::repos`] for template engines.
    pub fn repos_value(&self, repo_names: &Value, action: RepoAction) -> Result<String> {
        handle_repos_value_with(
            self.catalog,
            &self.ctx,
            repo_names,
            action,
            &self.repo_options,
        )
    }

    /// `RUN` instruction installing `packages` with the distro's tooling.
    pub fn package_install<S: AsRef<str>>(&self, packages: &[S]) -> String {
        let command = match self.ctx.base_package_type() {
            PackageType::Deb => debian_package_install_with(packages, &self.install_options),
            PackageType::Rpm => rpm_package_install(&self.ctx, packages, &self.install_options),
            PackageType::Unknown(other) => {
                tracing::debug!(package_type = %other, "No install rendering for package type");
                String::new()
            }
        };

        if command.is_empty() {
            command
        } else {
            format!("RUN {}", command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enable_disable_centos() {
        let catalog = RepoCatalog::builtin().unwrap();
        let renderer = RecipeRenderer::new(&catalog, DistroContext::rpm("centos", "yum"));

        assert_eq!(
            renderer.enable_repos(&["grafana"]),
            "RUN yum-config-manager  --enable grafana"
        );
        assert_eq!(
            renderer.disable_repos(&["grafana", "ceph"]),
            "RUN yum-config-manager  --disable grafana --disable centos-ceph-nautilus"
        );
    }

    #[test]
    fn test_same_request_across_distros() {
        let catalog = RepoCatalog::builtin().unwrap();
        let wanted = ["grafana", "ceph"];

        let centos = RecipeRenderer::new(&catalog, DistroContext::rpm("centos", "yum"));
        let rhel = RecipeRenderer::new(&catalog, DistroContext::rpm("rhel", "dnf"));
        let ubuntu = RecipeRenderer::new(&catalog, DistroContext::deb("ubuntu"));

        assert!(centos.enable_repos(&wanted).contains("centos-ceph-nautilus"));
        assert_eq!(rhel.enable_repos(&wanted), "");
        assert_eq!(
            ubuntu.enable_repos(&wanted),
            "RUN echo \"deb https://packages.grafana.com/oss/deb stable main\" \
             >/etc/apt/sources.list.d/grafana.list"
        );
    }

    #[test]
    fn test_repos_value_rejects_string() {
        let catalog = RepoCatalog::builtin().unwrap();
        let renderer = RecipeRenderer::new(&catalog, DistroContext::deb("debian"));

        assert!(
            renderer
                .repos_value(&json!("grafana"), RepoAction::Enable)
                .is_err()
        );
        assert_eq!(
            renderer
                .repos_value(&json!(["grafana"]), RepoAction::Disable)
                .unwrap(),
            ""
        );
    }

    #[test]
    fn test_package_install_deb() {
        let catalog = RepoCatalog::default();
        let renderer = RecipeRenderer::new(&catalog, DistroContext::deb("debian"))
            .with_install_options(InstallOptions { clean_cache: true });

        assert_eq!(
            renderer.package_install(&["curl"]),
            "RUN apt-get -y install --no-install-recommends curl \
             && apt-get clean && rm -rf /var/lib/apt/lists/*"
        );
    }

    #[test]
    fn test_package_install_rpm() {
        let catalog = RepoCatalog::default();
        let renderer = RecipeRenderer::new(&catalog, DistroContext::rpm("centos", "dnf"));

        assert_eq!(
            renderer.package_install(&["vim", "git"]),
            "RUN dnf -y install vim git"
        );
    }

    #[test]
    fn test_package_install_empty_and_unknown() {
        let catalog = RepoCatalog::default();
        let empty: [&str; 0] = [];

        let deb = RecipeRenderer::new(&catalog, DistroContext::deb("debian"));
        assert_eq!(deb.package_install(&empty), "");

        let ctx = DistroContext::new("x86_64", "alpine", PackageType::from("apk"), None).unwrap();
        let apk = RecipeRenderer::new(&catalog, ctx);
        assert_eq!(apk.package_install(&["curl"]), "");
    }

    #[test]
    fn test_repo_options_flow_through() {
        let catalog = RepoCatalog::builtin().unwrap();
        let renderer = RecipeRenderer::new(&catalog, DistroContext::rpm("centos", "yum"))
            .with_repo_options(RepoCommandOptions {
                config_manager_flags: "-q".to_string(),
            });

        assert_eq!(
            renderer.enable_repos(&["epel"]),
            "RUN yum-config-manager -q --enable epel"
        );
        assert_eq!(
            renderer
                .repos_value(&json!(["epel"]), RepoAction::Enable)
                .unwrap(),
            "RUN yum-config-manager -q --enable epel"
        );
    }
}
