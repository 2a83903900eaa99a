//! Dirscan: recursive directory scanner with bounded-concurrency handling.
//!
//! A walk thread lists directories in sorted depth-first order and sends every file and every
//! unreadable directory to a [`Handler`]. At most `concurrency` handler calls run at once; the
//! walk blocks instead of buffering when that ceiling is reached.

pub mod engine;
pub mod error;
pub mod fs;
pub mod handler;
pub mod pipeline;
pub mod scanner;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::{DirReadError, Error, Result};
pub use fs::{DirEntryInfo, DirReader, EntryKind, OsDirReader};
pub use handler::{FnHandler, Handler, MemoryHandler, NullHandler};
pub use scanner::Scanner;
pub use types::*;

use log::debug;
use std::path::Path;

/// Single entry point: scan `root` with `concurrency` and block until every handler call returns.
///
/// - **`handler: None`** → traversal only, everything discarded (benchmarking).
/// - **`handler: Some(h)`** → `h` sees each file and each unreadable directory exactly once.
///
/// Equivalent to `Scanner::new(root).with_concurrency(concurrency).scan(handler)`.
pub fn scan_dir(
    root: &Path,
    concurrency: usize,
    handler: Option<&dyn Handler>,
) -> Result<ScanSummary> {
    let scanner = Scanner::new(root).with_concurrency(concurrency);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        scanner
    );
    scanner.scan(handler)
}
