//! Progress counter for the CLI (kdam), fed from concurrently running handler calls.

use kdam::{Animation, Bar, BarExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create a counter for unknown total (shows count without percentage).
pub fn create_counter(desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " files"
    )))
}

/// Advance the bar by `n`. Uses try_lock so handler threads never wait on the display;
/// a skipped update is caught up by the next batch or the final flush.
pub fn update_progress_bar(pb: &ProgressBar, n: usize) -> bool {
    match pb.try_lock() {
        Ok(mut pb) => {
            let _ = pb.update(n);
            true
        }
        Err(_) => false,
    }
}

/// Force a refresh of the bar (e.g. after the final count is set).
pub fn refresh_bar(pb: &ProgressBar) {
    if let Ok(mut bar) = pb.lock() {
        let _ = bar.refresh();
    }
}

/// Counts handled items and pushes them to the bar every `chunk_size`, so handler threads
/// only touch the bar's mutex once per chunk.
pub struct BatchedProgress {
    bar: ProgressBar,
    seen: AtomicUsize,
    reported: AtomicUsize,
    chunk_size: usize,
}

impl BatchedProgress {
    pub fn new(bar: ProgressBar, chunk_size: usize) -> Self {
        Self {
            bar,
            seen: AtomicUsize::new(0),
            reported: AtomicUsize::new(0),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Record one handled item.
    pub fn tick(&self) {
        let seen = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
        if seen.is_multiple_of(self.chunk_size) {
            self.push(seen);
        }
    }

    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::Relaxed)
    }

    /// Push whatever has not been shown yet and redraw. Call once after the scan.
    pub fn flush(&self) {
        let seen = self.seen();
        let reported = self.reported.swap(seen, Ordering::Relaxed);
        if seen > reported
            && let Ok(mut bar) = self.bar.lock()
        {
            let _ = bar.update(seen - reported);
        }
        refresh_bar(&self.bar);
    }

    fn push(&self, seen: usize) {
        let reported = self.reported.load(Ordering::Relaxed);
        if seen > reported
            && self
                .reported
                .compare_exchange(reported, seen, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            && !update_progress_bar(&self.bar, seen - reported)
        {
            // Bar was busy; give the delta back so the next push or flush shows it.
            self.reported.fetch_sub(seen - reported, Ordering::Relaxed);
        }
    }
}
