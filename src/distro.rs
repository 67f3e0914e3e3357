//! Target distro description for a single render call.
//!
//! A [`DistroContext`] mirrors the template variables the image pipeline
//! already carries around (`base_arch`, `base_distro`, `base_package_type`,
//! `distro_package_manager`) and can be deserialized straight from them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Architecture assumed when the caller does not name one.
pub const DEFAULT_ARCH: &str = "x86_64";

/// Package family of the target distro.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackageType {
    /// Debian/Ubuntu (`.deb`, apt)
    Deb,
    /// RHEL/CentOS (`.rpm`, yum/dnf)
    Rpm,
    /// Anything else. Rendering for it always produces nothing.
    Unknown(String),
}

impl PackageType {
    pub fn as_str(&self) -> &str {
        match self {
            PackageType::Deb => "deb",
            PackageType::Rpm => "rpm",
            PackageType::Unknown(other) => other,
        }
    }

    /// File extension of a package archive for this family, if known.
    pub fn package_extension(&self) -> Option<&'static str> {
        match self {
            PackageType::Deb => Some(".deb"),
            PackageType::Rpm => Some(".rpm"),
            PackageType::Unknown(_) => None,
        }
    }
}

impl From<&str> for PackageType {
    fn from(value: &str) -> Self {
        match value {
            "deb" => PackageType::Deb,
            "rpm" => PackageType::Rpm,
            other => PackageType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for PackageType {
    fn from(value: String) -> Self {
        PackageType::from(value.as_str())
    }
}

impl From<PackageType> for String {
    fn from(value: PackageType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Template variables as the pipeline passes them.
#[derive(Debug, Deserialize)]
struct TemplateVars {
    #[serde(default = "default_arch")]
    base_arch: String,
    base_distro: String,
    base_package_type: String,
    #[serde(default)]
    distro_package_manager: Option<String>,
}

fn default_arch() -> String {
    DEFAULT_ARCH.to_string()
}

/// Immutable description of the distro a recipe is rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TemplateVars")]
pub struct DistroContext {
    base_arch: String,
    base_distro: String,
    base_package_type: PackageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    distro_package_manager: Option<String>,
}

impl DistroContext {
    /// Build a context, checking that rpm distros name their package manager.
    ///
    /// The package manager is dropped for deb distros since nothing reads it.
    pub fn new(
        base_arch: impl Into<String>,
        base_distro: impl Into<String>,
        base_package_type: PackageType,
        distro_package_manager: Option<String>,
    ) -> Result<Self> {
        let base_distro = base_distro.into();
        let distro_package_manager = match base_package_type {
            PackageType::Rpm => match named_manager(distro_package_manager) {
                Some(manager) => Some(manager),
                None => return Err(Error::MissingPackageManager { distro: base_distro }),
            },
            PackageType::Deb => None,
            PackageType::Unknown(_) => distro_package_manager,
        };

        Ok(Self {
            base_arch: base_arch.into(),
            base_distro,
            base_package_type,
            distro_package_manager,
        })
    }

    /// Context for a Debian-family distro on the default architecture.
    pub fn deb(base_distro: impl Into<String>) -> Self {
        Self {
            base_arch: DEFAULT_ARCH.to_string(),
            base_distro: base_distro.into(),
            base_package_type: PackageType::Deb,
            distro_package_manager: None,
        }
    }

    /// Context for an rpm-family distro on the default architecture.
    ///
    /// A blank `package_manager` leaves the context without one, and every
    /// rpm renderer then produces nothing. Use [`DistroContext::new`] to get
    /// an error instead.
    pub fn rpm(base_distro: impl Into<String>, package_manager: impl Into<String>) -> Self {
        Self {
            base_arch: DEFAULT_ARCH.to_string(),
            base_distro: base_distro.into(),
            base_package_type: PackageType::Rpm,
            distro_package_manager: named_manager(Some(package_manager.into())),
        }
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.base_arch = arch.into();
        self
    }

    pub fn base_arch(&self) -> &str {
        &self.base_arch
    }

    pub fn base_distro(&self) -> &str {
        &self.base_distro
    }

    pub fn base_package_type(&self) -> &PackageType {
        &self.base_package_type
    }

    pub fn distro_package_manager(&self) -> Option<&str> {
        self.distro_package_manager.as_deref()
    }
}

/// A package manager name, or `None` when it is missing or blank.
fn named_manager(manager: Option<String>) -> Option<String> {
    manager.filter(|m| !m.trim().is_empty())
}

impl TryFrom<TemplateVars> for DistroContext {
    type Error = Error;

    fn try_from(vars: TemplateVars) -> Result<Self> {
        DistroContext::new(
            vars.base_arch,
            vars.base_distro,
            PackageType::from(vars.base_package_type),
            vars.distro_package_manager,
        )
    }
}

impl fmt::Display for DistroContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({})",
            self.base_distro, self.base_arch, self.base_package_type
        )?;
        if let Some(manager) = &self.distro_package_manager {
            write!(f, " via {}", manager)?;
        }
        Ok(())
    }
}
