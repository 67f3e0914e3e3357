//! Error types for repokit.

use thiserror::Error;

/// Message carried by [`Error::InvalidArgument`] when the repository list
/// argument is not a list.
pub const NOT_A_REPO_LIST: &str = "First argument should be a list of repositories";

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Unknown repository action '{0}' (expected 'enable' or 'disable')")]
    UnknownAction(String),

    #[error("Distro '{distro}' uses rpm packages but no distro_package_manager was given")]
    MissingPackageManager { distro: String },

    #[error("Invalid repository catalog {source_name}: {message}")]
    Catalog {
        source_name: String,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn not_a_repo_list() -> Self {
        Error::InvalidArgument(NOT_A_REPO_LIST.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
