//! Handler capability consumed by the scanner, plus the stock implementations.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::DirReadError;

/// Receives every discovered file and every unreadable directory.
///
/// With concurrency > 1 both methods are called from several pool threads at once,
/// so implementations guard their own state. Neither method should block without bound:
/// once every permit is held by a stuck call the walk stops making progress.
pub trait Handler: Send + Sync {
    fn handle(&self, path: PathBuf);
    fn handle_error(&self, err: DirReadError);
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn handle(&self, path: PathBuf) {
        (**self).handle(path)
    }

    fn handle_error(&self, err: DirReadError) {
        (**self).handle_error(err)
    }
}

/// Discards everything. Used when `scan` is given no handler, and for benchmarking traversal.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHandler;

impl Handler for NullHandler {
    fn handle(&self, _path: PathBuf) {}

    fn handle_error(&self, _err: DirReadError) {}
}

/// Collects files and errors in memory, in the order the handler saw them.
#[derive(Debug, Default)]
pub struct MemoryHandler {
    files: Mutex<Vec<PathBuf>>,
    errors: Mutex<Vec<DirReadError>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the files collected so far.
    pub fn files(&self) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn file_count(&self) -> usize {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn error_count(&self) -> usize {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drain the collected errors (`io::Error` is not `Clone`).
    pub fn take_errors(&self) -> Vec<DirReadError> {
        std::mem::take(&mut *self.errors.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn into_parts(self) -> (Vec<PathBuf>, Vec<DirReadError>) {
        (
            self.files.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.errors
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl Handler for MemoryHandler {
    fn handle(&self, path: PathBuf) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path);
    }

    fn handle_error(&self, err: DirReadError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(err);
    }
}

/// Adapts a pair of closures into a [`Handler`].
///
/// ```ignore
/// let h = FnHandler::new(|p| println!("{}", p.display()), |e| eprintln!("{e}"));
/// Scanner::new("/data").scan(Some(&h))?;
/// ```
pub struct FnHandler<F, E> {
    on_file: F,
    on_error: E,
}

impl<F, E> FnHandler<F, E>
where
    F: Fn(PathBuf) + Send + Sync,
    E: Fn(DirReadError) + Send + Sync,
{
    pub fn new(on_file: F, on_error: E) -> Self {
        Self { on_file, on_error }
    }
}

impl<F, E> Handler for FnHandler<F, E>
where
    F: Fn(PathBuf) + Send + Sync,
    E: Fn(DirReadError) + Send + Sync,
{
    fn handle(&self, path: PathBuf) {
        (self.on_file)(path)
    }

    fn handle_error(&self, err: DirReadError) {
        (self.on_error)(err)
    }
}
