//! Shared test helpers: in-memory directory tree and instrumented handlers.

#![allow(dead_code)]

use dirscan::{DirEntryInfo, DirReadError, DirReader, EntryKind, Handler};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// In-memory tree. Directories not registered read as NotFound; `unreadable` ones as PermissionDenied.
#[derive(Default)]
pub struct MemFs {
    dirs: HashMap<PathBuf, Option<Vec<DirEntryInfo>>>,
    reads: AtomicUsize,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, path: &str, entries: &[(&str, EntryKind)]) -> Self {
        let entries = entries
            .iter()
            .map(|(name, kind)| DirEntryInfo::new(*name, *kind))
            .collect();
        self.dirs.insert(PathBuf::from(path), Some(entries));
        self
    }

    pub fn unreadable(mut self, path: &str) -> Self {
        self.dirs.insert(PathBuf::from(path), None);
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl DirReader for MemFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match self.dirs.get(dir) {
            Some(Some(entries)) => Ok(entries.clone()),
            Some(None) => Err(io::Error::from(io::ErrorKind::PermissionDenied)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}

/// Entries deliberately listed out of order; the walk must sort them.
///
/// ```text
/// root/
///   b.txt
///   a/
///     y/
///       z.txt
///     x.txt
///   link -> (symlink)
///   locked/ (unreadable)
///   m.txt
/// ```
pub fn sample_tree() -> MemFs {
    MemFs::new()
        .dir(
            "root",
            &[
                ("b.txt", EntryKind::File),
                ("locked", EntryKind::Dir),
                ("a", EntryKind::Dir),
                ("link", EntryKind::Symlink),
                ("m.txt", EntryKind::File),
            ],
        )
        .dir("root/a", &[("y", EntryKind::Dir), ("x.txt", EntryKind::File)])
        .dir("root/a/y", &[("z.txt", EntryKind::File)])
        .unreadable("root/locked")
}

/// Discovery order of [`sample_tree`]; `!` marks an error.
pub fn sample_tree_order() -> Vec<String> {
    [
        "root/a/x.txt",
        "root/a/y/z.txt",
        "root/b.txt",
        "!root/locked",
        "root/m.txt",
    ]
    .iter()
    .map(|s| p(s))
    .collect()
}

/// Normalize a `/`-separated expectation to the OS separator.
pub fn p(s: &str) -> String {
    match s.strip_prefix('!') {
        Some(rest) => format!("!{}", path_of(rest).display()),
        None => path_of(s).display().to_string(),
    }
}

fn path_of(s: &str) -> PathBuf {
    s.split('/').collect()
}

/// `root` with `n` files `f000.txt`… and no subdirectories.
pub fn flat_tree(n: usize) -> MemFs {
    let names: Vec<String> = (0..n).map(|i| format!("f{i:03}.txt")).collect();
    let entries: Vec<(&str, EntryKind)> = names
        .iter()
        .map(|n| (n.as_str(), EntryKind::File))
        .collect();
    MemFs::new().dir("root", &entries)
}

/// Records every call in the order the handler saw it.
#[derive(Default)]
pub struct RecordingHandler {
    pub events: Mutex<Vec<String>>,
}

impl RecordingHandler {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Handler for RecordingHandler {
    fn handle(&self, path: PathBuf) {
        self.events
            .lock()
            .unwrap()
            .push(path.display().to_string());
    }

    fn handle_error(&self, err: DirReadError) {
        self.events
            .lock()
            .unwrap()
            .push(format!("!{}", err.path().display()));
    }
}

/// Sleeps in every call and tracks how many calls overlap.
pub struct OverlapHandler {
    pub delay: Duration,
    pub current: AtomicUsize,
    pub peak: AtomicUsize,
    pub calls: AtomicUsize,
}

impl OverlapHandler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(self.delay);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Handler for OverlapHandler {
    fn handle(&self, _path: PathBuf) {
        self.enter();
    }

    fn handle_error(&self, _err: DirReadError) {
        self.enter();
    }
}
