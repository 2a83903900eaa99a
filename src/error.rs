//! Error types: fatal scan configuration faults and per-directory read failures.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal errors returned by [`Scanner::scan`](crate::Scanner::scan). Raised before any filesystem access.
#[derive(Debug, Error)]
pub enum Error {
    /// Concurrency degree was zero.
    #[error("scanner concurrency must be >= 1, got {concurrency}")]
    InvalidConcurrency { concurrency: usize },

    /// The handler thread pool could not be started.
    #[error("failed to build handler pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result alias used by the public dirscan API.
pub type Result<T> = std::result::Result<T, Error>;

/// A directory that could not be listed. Delivered to [`Handler::handle_error`](crate::Handler::handle_error);
/// traversal of that subtree stops, siblings and ancestors continue.
#[derive(Debug, Error)]
#[error("failed to read directory {}: {source}", .path.display())]
pub struct DirReadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl DirReadError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Kind of the underlying OS error.
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == io::ErrorKind::NotFound
    }

    pub fn is_permission_denied(&self) -> bool {
        self.kind() == io::ErrorKind::PermissionDenied
    }
}
