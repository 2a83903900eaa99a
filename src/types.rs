//! Public and internal types for the dirscan API and CLI.

use serde::Serialize;

use crate::utils::config::DEFAULT_CONCURRENCY;

/// Counts produced by the walk. Returned from the walk thread when it finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkCounts {
    /// Files emitted to the handler.
    pub files: usize,
    /// Directories that could not be listed (one `handle_error` call each).
    pub errors: usize,
    /// Directories successfully listed, root included.
    pub dirs: usize,
    /// Symbolic links skipped without emitting anything.
    pub symlinks_skipped: usize,
}

/// Result of a completed [`Scanner::scan`](crate::Scanner::scan).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub files: usize,
    pub errors: usize,
    pub dirs: usize,
    pub symlinks_skipped: usize,
    pub elapsed_ms: u64,
}

impl ScanSummary {
    pub fn from_counts(counts: WalkCounts, elapsed_ms: u64) -> Self {
        Self {
            files: counts.files,
            errors: counts.errors,
            dirs: counts.dirs,
            symlinks_skipped: counts.symlinks_skipped,
            elapsed_ms,
        }
    }
}

/// Full CLI options, after merging defaults, `.dirscan.toml`, environment and flags.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Maximum number of handler calls running at once.
    pub concurrency: usize,
    /// Debug logging.
    pub verbose: bool,
    /// Print unreadable directories on stderr.
    pub show_errors: bool,
    /// Show a running counter instead of listing files.
    pub progress: bool,
    /// Print the scan summary as JSON on stdout.
    pub json: bool,
    /// Do not list files on stdout.
    pub quiet: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            verbose: false,
            show_errors: false,
            progress: false,
            json: false,
            quiet: false,
        }
    }
}
