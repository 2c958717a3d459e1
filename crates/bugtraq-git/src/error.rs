//! Error types for bugtraq-git

use std::path::PathBuf;

/// Result type for bugtraq-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading bugtraq configuration from a repository
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No git repository found at {path}")]
    RepositoryNotFound {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Invalid base config {file}: {source}")]
    InvalidBaseFile {
        file: String,
        #[source]
        source: git2::Error,
    },

    #[error("bug tracker configuration is invalid: {0}")]
    Config(#[from] bugtraq_core::Error),
}
