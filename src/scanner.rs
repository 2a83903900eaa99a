//! Scanner façade: configuration plus the single blocking `scan` call.

use log::debug;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::fs::{DirReader, OsDirReader};
use crate::handler::{Handler, NullHandler};
use crate::pipeline;
use crate::types::ScanSummary;
use crate::utils::config::DEFAULT_CONCURRENCY;

/// Recursively scans a directory and hands each file and unreadable directory to a [`Handler`].
///
/// Fields may be changed between calls. Channels, permits and the barrier are created fresh
/// inside every [`scan`](Self::scan), so nothing but the configuration carries over.
///
/// ```ignore
/// let mut scanner = Scanner::new("/path/to/dir");
/// scanner.concurrency = 5;
/// let h = MemoryHandler::new();
/// scanner.scan(Some(&h))?;
/// for f in h.files() {
///     println!("{}", f.display());
/// }
/// ```
#[derive(Clone)]
pub struct Scanner {
    /// Directory being scanned. Discovered paths are joined onto it as given.
    pub path: PathBuf,
    /// Maximum number of handler calls (files and errors combined) running at once.
    /// 1 serializes handling in discovery order. 0 is rejected by `scan`.
    ///
    /// Handlers run on a pool of at most
    /// [`MAX_HANDLER_THREADS`](crate::utils::config::MAX_HANDLER_THREADS) threads. Above that the
    /// ceiling still holds, but only that many calls run in parallel and the remaining permits
    /// wait for a free thread.
    pub concurrency: usize,
    reader: Arc<dyn DirReader>,
}

impl Scanner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            concurrency: DEFAULT_CONCURRENCY,
            reader: Arc::new(OsDirReader),
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Replace the directory lister (e.g. with an in-memory tree in tests).
    pub fn with_reader(mut self, reader: impl DirReader + 'static) -> Self {
        self.reader = Arc::new(reader);
        self
    }

    /// Walk the tree and block until every handler call has returned.
    ///
    /// `None` scans with a [`NullHandler`]. Fails with [`Error::InvalidConcurrency`] before touching
    /// the filesystem when `concurrency` is 0. Directory read failures do not fail the scan; they
    /// go to [`Handler::handle_error`]. A panic raised by the handler is resumed here after all
    /// other work has finished.
    pub fn scan(&self, handler: Option<&dyn Handler>) -> Result<ScanSummary> {
        let concurrency = NonZeroUsize::new(self.concurrency).ok_or(Error::InvalidConcurrency {
            concurrency: self.concurrency,
        })?;
        let handler = handler.unwrap_or(&NullHandler);

        debug!(
            "scanning {} (concurrency {})",
            self.path.display(),
            concurrency
        );
        let start = Instant::now();
        let counts =
            pipeline::run_pipeline(&self.path, self.reader.as_ref(), handler, concurrency)?;
        let elapsed = start.elapsed();
        debug!(
            "scanned {}: {} files, {} errors, {} dirs in {:?}",
            self.path.display(),
            counts.files,
            counts.errors,
            counts.dirs,
            elapsed
        );
        pipeline::report_unreadable_dirs(&self.path, &counts);

        Ok(ScanSummary::from_counts(
            counts,
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        ))
    }
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("path", &self.path)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}
