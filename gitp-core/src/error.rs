//! Startup failures of the history walk.
//!
//! Every variant is fatal: the binary reports it and exits with status 1.
//! Nothing past startup can fail.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    /// The store could not be opened: not a repository, permissions, corruption.
    #[error("cannot open repository at {}", path.display())]
    RepositoryUnavailable {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// An object could not be read while walking parents or diffing trees.
    /// Reported as a repository failure; partial histories are never returned.
    #[error("repository unreadable during history walk")]
    Traversal(#[from] git2::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;
