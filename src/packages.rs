//! Package install command composition.
//!
//! apt-get cannot install a `.deb` straight from a URL, so install requests
//! mixing download links with package names are split in two: remote
//! artifacts are fetched and installed from local files first, then named
//! packages go through `apt-get` as usual.

use crate::distro::{DistroContext, PackageType};
use std::borrow::Cow;
use url::Url;

/// apt-get invocation shared by both install segments.
const APT_INSTALL: &str = "apt-get -y install --no-install-recommends";

/// Where remote artifacts are downloaded before installation.
const DOWNLOAD_DIR: &str = "/tmp";

/// URL schemes treated as download locations.
const REMOTE_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// One requested install item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSpec {
    /// A package archive to download, e.g. `https://example.org/foo.deb`
    Remote {
        /// The URL exactly as requested
        url: String,
        /// Last path segment of the URL
        file_name: String,
    },
    /// A package resolved by the package manager
    Named(String),
}

impl PackageSpec {
    /// Classify `spec` by its shape alone.
    ///
    /// A spec is remote when it parses as an http(s)/ftp URL whose last path
    /// segment ends with the package extension of `package_type`. Everything
    /// else, including bare file names like `foo.deb`, is a named package.
    pub fn classify(spec: &str, package_type: &PackageType) -> Self {
        let Some(extension) = package_type.package_extension() else {
            return PackageSpec::Named(spec.to_string());
        };

        let file_name = Url::parse(spec).ok().and_then(|url| {
            if !REMOTE_SCHEMES.contains(&url.scheme()) {
                return None;
            }
            let last = url.path_segments()?.next_back()?.to_string();
            (last.len() > extension.len() && last.ends_with(extension)).then_some(last)
        });

        match file_name {
            Some(file_name) => PackageSpec::Remote {
                url: spec.to_string(),
                file_name,
            },
            None => PackageSpec::Named(spec.to_string()),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, PackageSpec::Remote { .. })
    }
}

/// Options shared by the install composers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Drop package manager caches after installing.
    pub clean_cache: bool,
}

/// Compose the apt command installing `packages`.
///
/// Remote artifacts come first, named packages second, joined by ` && `.
/// Either part is left out when it has nothing to install. Blank specs are
/// ignored.
pub fn debian_package_install<S: AsRef<str>>(packages: &[S]) -> String {
    debian_package_install_with(packages, &InstallOptions::default())
}

/// Like [`debian_package_install`] with explicit [`InstallOptions`].
pub fn debian_package_install_with<S: AsRef<str>>(
    packages: &[S],
    options: &InstallOptions,
) -> String {
    let mut remote = Vec::new();
    let mut named = Vec::new();

    for spec in packages.iter().map(|p| p.as_ref()) {
        if spec.trim().is_empty() {
            continue;
        }
        match PackageSpec::classify(spec, &PackageType::Deb) {
            PackageSpec::Remote { url, file_name } => remote.push((url, file_name)),
            PackageSpec::Named(name) => named.push(name),
        }
    }

    let mut segments = Vec::new();
    if !remote.is_empty() {
        segments.push(render_remote_debs(&remote));
    }
    if !named.is_empty() {
        segments.push(format!("{} {}", APT_INSTALL, named.join(" ")));
    }
    if segments.is_empty() {
        return String::new();
    }
    if options.clean_cache {
        segments.push("apt-get clean".to_string());
        segments.push("rm -rf /var/lib/apt/lists/*".to_string());
    }

    let command = segments.join(" && ");
    tracing::trace!(
        remote = remote.len(),
        named = named.len(),
        command = %command,
        "Rendered apt install command"
    );
    command
}

/// Download every artifact and install it from the local file.
///
/// Rendered as one `sh -ec` call so the segment holds no `&&` of its own
/// and any failed download aborts the install. Each download is saved as
/// `<n>-<file name>`, numbered from 1, so artifacts sharing a file name do
/// not overwrite each other. The package index is refreshed first so apt
/// can resolve the artifacts' dependencies.
fn render_remote_debs(remote: &[(String, String)]) -> String {
    let saved: Vec<String> = remote
        .iter()
        .enumerate()
        .map(|(i, (_, file))| format!("{}-{}", i + 1, file))
        .collect();

    let downloads: Vec<String> = remote
        .iter()
        .zip(&saved)
        .map(|((url, _), file)| format!("-o {} {}", quote(file), quote(url)))
        .collect();
    let local: Vec<String> = saved
        .iter()
        .map(|file| quote(&format!("./{}", file)).into_owned())
        .collect();
    let files: Vec<Cow<str>> = saved.iter().map(|file| quote(file)).collect();

    let script = format!(
        "cd {}; curl --fail --silent --show-error --location {}; apt-get update; {} {}; rm -f {}",
        DOWNLOAD_DIR,
        downloads.join(" "),
        APT_INSTALL,
        local.join(" "),
        files.join(" ")
    );

    format!("sh -ec {}", quote(&script))
}

/// Compose the yum/dnf command installing `packages`.
///
/// rpm package managers take URLs directly, so specs are passed through in
/// order. Blank specs are ignored. Renders nothing without a package
/// manager or packages.
pub fn rpm_package_install<S: AsRef<str>>(
    ctx: &DistroContext,
    packages: &[S],
    options: &InstallOptions,
) -> String {
    let Some(manager) = ctx.distro_package_manager() else {
        return String::new();
    };

    let specs: Vec<&str> = packages
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.trim().is_empty())
        .collect();
    if specs.is_empty() {
        return String::new();
    }

    let mut command = format!("{} -y install {}", manager, specs.join(" "));
    if options.clean_cache {
        command.push_str(&format!(" && {} clean all", manager));
    }
    command
}

fn quote(s: &str) -> Cow<'_, str> {
    shlex::try_quote(s).unwrap_or_else(|_| s.into())
}
