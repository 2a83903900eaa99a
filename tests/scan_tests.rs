mod common;

use common::{
    MemFs, OverlapHandler, RecordingHandler, flat_tree, p, sample_tree, sample_tree_order,
};
use dirscan::{DirReadError, Error, Handler, MemoryHandler, Scanner, scan_dir};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const FIXTURE: &str = "tests/fixtures/data";

fn fixture(rel: &str) -> PathBuf {
    rel.split('/').fold(PathBuf::from(FIXTURE), |acc, part| acc.join(part))
}

// --- fixture tree on the real filesystem ---

#[test]
fn test_scan_fixture_in_order() {
    let h = MemoryHandler::new();
    let summary = Scanner::new(FIXTURE).scan(Some(&h)).unwrap();
    assert_eq!(
        h.files(),
        vec![
            fixture("file1.txt"),
            fixture("subdir/file2.txt"),
            fixture("subdir/file3.txt"),
        ]
    );
    assert_eq!(h.error_count(), 0);
    assert_eq!(summary.files, 3);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.dirs, 2);
}

#[test]
fn test_scan_fixture_concurrent_finds_same_files() {
    let h = MemoryHandler::new();
    Scanner::new(FIXTURE)
        .with_concurrency(4)
        .scan(Some(&h))
        .unwrap();
    let mut files = h.files();
    files.sort();
    assert_eq!(
        files,
        vec![
            fixture("file1.txt"),
            fixture("subdir/file2.txt"),
            fixture("subdir/file3.txt"),
        ]
    );
}

#[test]
fn test_scan_missing_root() {
    let root = Path::new(FIXTURE).join("baddir");
    let h = MemoryHandler::new();
    let summary = Scanner::new(&root).scan(Some(&h)).unwrap();
    let (files, errors) = h.into_parts();
    assert!(files.is_empty());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_not_found());
    assert_eq!(errors[0].path(), root.as_path());
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.files, 0);
}

#[test]
fn test_scan_without_handler() {
    let summary = Scanner::new(FIXTURE).scan(None).unwrap();
    assert_eq!(summary.files, 3);
}

#[test]
fn test_scan_dir_entry_point() {
    let h = MemoryHandler::new();
    let summary = scan_dir(Path::new(FIXTURE), 2, Some(&h)).unwrap();
    assert_eq!(summary.files, 3);
    assert_eq!(h.file_count(), 3);
}

#[cfg(unix)]
#[test]
fn test_scan_skips_symlinks() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("real.txt"), "x")?;
    std::fs::create_dir(dir.path().join("sub"))?;
    std::fs::write(dir.path().join("sub").join("inner.txt"), "y")?;
    std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("file_link"))?;
    std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("dir_link"))?;

    let h = MemoryHandler::new();
    let summary = Scanner::new(dir.path()).scan(Some(&h))?;
    assert_eq!(
        h.files(),
        vec![
            dir.path().join("real.txt"),
            dir.path().join("sub").join("inner.txt"),
        ]
    );
    assert_eq!(summary.symlinks_skipped, 2);
    Ok(())
}

#[test]
fn test_scan_tempdir_nested_order() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    for rel in ["b/2.txt", "b/1.txt", "a.txt", "c/d/e.txt", "c/0.txt"] {
        let path = rel.split('/').fold(dir.path().to_path_buf(), |acc, part| acc.join(part));
        std::fs::create_dir_all(path.parent().unwrap())?;
        std::fs::write(&path, rel)?;
    }
    let h = MemoryHandler::new();
    Scanner::new(dir.path()).scan(Some(&h))?;
    let rel: Vec<String> = h
        .files()
        .iter()
        .map(|f| f.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();
    assert_eq!(
        rel,
        vec![p("a.txt"), p("b/1.txt"), p("b/2.txt"), p("c/0.txt"), p("c/d/e.txt")]
    );
    Ok(())
}

// --- configuration faults ---

#[test]
fn test_zero_concurrency_rejected_before_io() {
    let fs = Arc::new(sample_tree());
    let h = MemoryHandler::new();
    let result = Scanner::new("root")
        .with_concurrency(0)
        .with_reader(Arc::clone(&fs))
        .scan(Some(&h));
    assert!(matches!(
        result,
        Err(Error::InvalidConcurrency { concurrency: 0 })
    ));
    assert_eq!(fs.reads(), 0);
    assert_eq!(h.file_count(), 0);
    assert_eq!(h.error_count(), 0);
}

#[test]
fn test_zero_concurrency_via_field() {
    let mut scanner = Scanner::new(FIXTURE);
    scanner.concurrency = 0;
    assert!(scanner.scan(None).is_err());
    scanner.concurrency = 1;
    assert_eq!(scanner.scan(None).unwrap().files, 3);
}

// --- ordering and counts on an in-memory tree ---

#[test]
fn test_serial_handling_follows_discovery_order() {
    let h = RecordingHandler::default();
    let summary = Scanner::new("root")
        .with_reader(sample_tree())
        .scan(Some(&h))
        .unwrap();
    assert_eq!(h.events(), sample_tree_order());
    assert_eq!(summary.files, 4);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.symlinks_skipped, 1);
}

#[test]
fn test_counts_independent_of_concurrency() {
    for concurrency in [1, 2, 3, 8, 64] {
        let h = RecordingHandler::default();
        let summary = Scanner::new("root")
            .with_concurrency(concurrency)
            .with_reader(sample_tree())
            .scan(Some(&h))
            .unwrap();
        let mut events = h.events();
        events.sort();
        let mut expected = sample_tree_order();
        expected.sort();
        assert_eq!(events, expected, "concurrency {concurrency}");
        assert_eq!(summary.files, 4);
        assert_eq!(summary.errors, 1);
    }
}

#[test]
fn test_null_handler_still_walks_everything() {
    let fs = Arc::new(sample_tree());
    let summary = Scanner::new("root")
        .with_concurrency(3)
        .with_reader(Arc::clone(&fs))
        .scan(None)
        .unwrap();
    assert_eq!(fs.reads(), 4);
    assert_eq!(summary.files, 4);
    assert_eq!(summary.errors, 1);
}

#[test]
fn test_scanner_reusable_sequentially() {
    let scanner = Scanner::new("root").with_reader(sample_tree());
    let first = RecordingHandler::default();
    let second = RecordingHandler::default();
    scanner.scan(Some(&first)).unwrap();
    scanner.scan(Some(&second)).unwrap();
    assert_eq!(first.events(), second.events());
}

// --- concurrency ceiling ---

#[test]
fn test_concurrency_ceiling_respected() {
    let h = OverlapHandler::new(Duration::from_millis(5));
    Scanner::new("root")
        .with_concurrency(3)
        .with_reader(flat_tree(30))
        .scan(Some(&h))
        .unwrap();
    assert_eq!(h.calls(), 30);
    assert!(h.peak() <= 3, "peak {} exceeded ceiling", h.peak());
}

#[test]
fn test_concurrent_handlers_overlap() {
    let h = OverlapHandler::new(Duration::from_millis(30));
    Scanner::new("root")
        .with_concurrency(4)
        .with_reader(flat_tree(12))
        .scan(Some(&h))
        .unwrap();
    assert_eq!(h.calls(), 12);
    assert!(h.peak() > 1, "handlers never ran in parallel");
    assert!(h.peak() <= 4, "peak {} exceeded ceiling", h.peak());
}

#[test]
fn test_ceiling_shared_by_files_and_errors() {
    let mut fs = MemFs::new();
    let mut root_entries = Vec::new();
    let names: Vec<String> = (0..10).map(|i| format!("d{i}")).collect();
    for (i, name) in names.iter().enumerate() {
        root_entries.push((name.as_str(), dirscan::EntryKind::Dir));
        if i % 2 == 0 {
            fs = fs.unreadable(&format!("root/{name}"));
        } else {
            fs = fs.dir(&format!("root/{name}"), &[("f.txt", dirscan::EntryKind::File)]);
        }
    }
    fs = fs.dir("root", &root_entries);

    let h = OverlapHandler::new(Duration::from_millis(5));
    let summary = Scanner::new("root")
        .with_concurrency(2)
        .with_reader(fs)
        .scan(Some(&h))
        .unwrap();
    assert_eq!(summary.files, 5);
    assert_eq!(summary.errors, 5);
    assert_eq!(h.calls(), 10);
    assert!(h.peak() <= 2, "peak {} exceeded ceiling", h.peak());
}

#[test]
fn test_serial_never_overlaps() {
    let h = OverlapHandler::new(Duration::from_millis(1));
    Scanner::new("root")
        .with_reader(flat_tree(20))
        .scan(Some(&h))
        .unwrap();
    assert_eq!(h.peak(), 1);
    assert_eq!(h.calls(), 20);
}

#[test]
fn test_scan_returns_after_all_handlers_finish() {
    let h = OverlapHandler::new(Duration::from_millis(20));
    Scanner::new("root")
        .with_concurrency(8)
        .with_reader(flat_tree(16))
        .scan(Some(&h))
        .unwrap();
    assert_eq!(h.calls(), 16);
    assert_eq!(h.current.load(Ordering::SeqCst), 0);
}

// --- handler failures ---

struct PanicOnce {
    handled: AtomicUsize,
}

impl Handler for PanicOnce {
    fn handle(&self, path: PathBuf) {
        if path.ends_with("f003.txt") {
            panic!("handler failed on {}", path.display());
        }
        self.handled.fetch_add(1, Ordering::SeqCst);
    }

    fn handle_error(&self, _err: DirReadError) {}
}

#[test]
fn test_handler_panic_does_not_hang_scan() {
    for concurrency in [1, 4] {
        let h = PanicOnce {
            handled: AtomicUsize::new(0),
        };
        let scanner = Scanner::new("root")
            .with_concurrency(concurrency)
            .with_reader(flat_tree(10));
        let result = panic::catch_unwind(AssertUnwindSafe(|| scanner.scan(Some(&h))));
        assert!(result.is_err(), "panic should reach the caller");
        assert_eq!(h.handled.load(Ordering::SeqCst), 9);
    }
}
