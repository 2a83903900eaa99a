use std::path::Path;

use crate::WalkCounts;

/// Log a one-line note about what the walk could not reach. The errors themselves went to
/// the handler; this only reports how many there were. Call after the pipeline has finished.
pub fn report_unreadable_dirs(root: &Path, counts: &WalkCounts) {
    if counts.errors > 0 {
        log::warn!(
            "{}: {} director{} could not be read and {} skipped",
            root.display(),
            counts.errors,
            if counts.errors == 1 { "y" } else { "ies" },
            if counts.errors == 1 { "was" } else { "were" },
        );
    }
    if counts.symlinks_skipped > 0 {
        log::debug!(
            "{}: skipped {} symbolic links",
            root.display(),
            counts.symlinks_skipped
        );
    }
}
