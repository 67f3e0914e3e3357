//! Repository catalog.
//!
//! Maps a distro id and a logical repository name to the data needed to
//! render that repository for the distro's package family. A name missing
//! for a distro is normal: callers routinely ask for a repository set that
//! only partly applies to a given distro.
//!
//! The catalog document is JSON:
//!
//! ```json
//! {
//!   "distros": {
//!     "centos": { "ceph": { "type": "rpm", "id": "centos-ceph-nautilus" } },
//!     "debian": {
//!       "grafana": {
//!         "type": "apt",
//!         "source": "deb https://packages.grafana.com/oss/deb stable main"
//!       }
//!     }
//!   }
//! }
//! ```

use crate::distro::PackageType;
use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Catalog data compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/repos.json");

/// How a repository is configured for one package family.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RepoSource {
    /// An apt source-list entry written to `/etc/apt/sources.list.d/`.
    Apt {
        /// Source-list line, e.g. `deb https://example.org/deb stable main`
        source: String,
        /// Stem of the `.list` file (defaults to the repository name)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<String>,
    },
    /// A repository id handed to `<manager>-config-manager`.
    Rpm {
        /// Repository id as known to yum/dnf (e.g. "centos-ceph-nautilus")
        id: String,
    },
}

impl RepoSource {
    pub fn package_type(&self) -> PackageType {
        match self {
            RepoSource::Apt { .. } => PackageType::Deb,
            RepoSource::Rpm { .. } => PackageType::Rpm,
        }
    }
}

/// One logical repository as configured for one distro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoDescriptor {
    pub name: String,
    pub source: RepoSource,
}

impl RepoDescriptor {
    pub fn package_type(&self) -> PackageType {
        self.source.package_type()
    }

    /// Stem of the apt `.list` file this repository is written to.
    pub fn list_file(&self) -> &str {
        match &self.source {
            RepoSource::Apt {
                file: Some(file), ..
            } => file,
            _ => &self.name,
        }
    }
}

/// On-disk form of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct CatalogDocument {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Repositories per distro id (e.g. "centos", "debian"), keyed by logical name
    #[serde(default)]
    pub distros: BTreeMap<String, BTreeMap<String, RepoSource>>,
}

/// Immutable repository lookup table.
///
/// Built once at startup and shared by reference with every renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoCatalog {
    distros: BTreeMap<String, BTreeMap<String, RepoDescriptor>>,
}

impl RepoCatalog {
    /// The catalog shipped with repokit.
    pub fn builtin() -> Result<Self> {
        Self::parse("<builtin>", BUILTIN_CATALOG)
    }

    /// Parse a catalog document from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        Self::parse("<inline>", content)
    }

    /// Load a catalog document from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let source_name = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| Error::Catalog {
            source_name: source_name.clone(),
            message: format!("failed to read: {}", e),
        })?;
        Self::parse(&source_name, &content)
    }

    fn parse(source_name: &str, content: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(content).map_err(|e| Error::Catalog {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        let catalog = Self::from_document(source_name, document)?;
        tracing::debug!(
            source = source_name,
            distros = catalog.distros.len(),
            "Loaded repository catalog"
        );
        Ok(catalog)
    }

    /// Build a catalog from an already parsed document, validating entries.
    pub fn from_document(source_name: &str, document: CatalogDocument) -> Result<Self> {
        let mut distros = BTreeMap::new();

        for (distro, repos) in document.distros {
            let mut entries = BTreeMap::new();
            for (name, source) in repos {
                validate_entry(&distro, &name, &source).map_err(|message| Error::Catalog {
                    source_name: source_name.to_string(),
                    message,
                })?;
                entries.insert(
                    name.clone(),
                    RepoDescriptor {
                        name: name.clone(),
                        source,
                    },
                );
            }
            distros.insert(distro, entries);
        }

        Ok(Self { distros })
    }

    /// Look up `name` for `distro`. `None` means "not configured here".
    pub fn lookup(&self, distro: &str, name: &str) -> Option<&RepoDescriptor> {
        self.distros.get(distro)?.get(name)
    }

    /// Combine two catalogs. Entries in `overlay` replace entries in `base`
    /// with the same distro and name.
    pub fn merged(base: &Self, overlay: &Self) -> Self {
        let mut distros = base.distros.clone();
        for (distro, repos) in &overlay.distros {
            let entries = distros.entry(distro.clone()).or_default();
            for (name, descriptor) in repos {
                if entries.insert(name.clone(), descriptor.clone()).is_some() {
                    tracing::debug!(distro = %distro, repo = %name, "Overlay replaces repository");
                }
            }
        }
        Self { distros }
    }

    /// Distro ids present in the catalog, sorted.
    pub fn distros(&self) -> impl Iterator<Item = &str> {
        self.distros.keys().map(String::as_str)
    }

    /// Repositories configured for `distro`, sorted by name.
    pub fn repos(&self, distro: &str) -> impl Iterator<Item = &RepoDescriptor> {
        self.distros.get(distro).into_iter().flat_map(|m| m.values())
    }

    pub fn is_empty(&self) -> bool {
        self.distros.values().all(BTreeMap::is_empty)
    }
}

/// Characters the shell still expands inside a double-quoted string, plus
/// the quote itself and line breaks.
const UNSAFE_IN_DOUBLE_QUOTES: &[char] = &['"', '$', '`', '\\', '\n', '\r'];

/// Reject entries that would render into a broken shell command.
fn validate_entry(
    distro: &str,
    name: &str,
    source: &RepoSource,
) -> std::result::Result<(), String> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(format!(
            "repository name '{}' for {} must be non-empty without whitespace",
            name, distro
        ));
    }

    match source {
        RepoSource::Apt { source, file } => {
            if source.trim().is_empty() {
                return Err(format!("{}/{}: apt source line is empty", distro, name));
            }
            if source.contains(UNSAFE_IN_DOUBLE_QUOTES) {
                return Err(format!(
                    "{}/{}: apt source line must not contain double quotes, '$', backticks, \
                     backslashes or newlines",
                    distro, name
                ));
            }
            let file = file.as_deref().unwrap_or(name);
            if !is_plain_word(file) {
                return Err(format!(
                    "{}/{}: list file '{}' must be a plain file name",
                    distro, name, file
                ));
            }
        }
        RepoSource::Rpm { id } => {
            if !is_plain_word(id) {
                return Err(format!(
                    "{}/{}: rpm repository id '{}' may only use letters, digits, '.', '_' and '-'",
                    distro, name, id
                ));
            }
        }
    }

    Ok(())
}

/// Non-empty and safe to place unquoted in a shell command.
fn is_plain_word(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
