//! Traversal engine: sorted, pre-order, depth-first walk that emits files and directory errors.
//!
//! The walk keeps an explicit stack of open directories instead of recursing, so deep trees
//! cost heap rather than thread stack. Emission order is identical to the recursive form.

use log::{debug, trace};
use std::path::{Path, PathBuf};
use std::thread::{Scope, ScopedJoinHandle};

use crate::WalkCounts;
use crate::error::DirReadError;
use crate::fs::{DirEntryInfo, DirReader, EntryKind};

use super::barrier::Registration;
use super::context::{Dispatch, WalkContext};

/// One result from the walk: a file to handle or a directory that could not be listed.
#[derive(Debug)]
pub enum WalkOutcome {
    File(PathBuf),
    Err(DirReadError),
}

/// List `dir` and sort its entries by name. Sorting here makes discovery order a property
/// of the walk rather than of the reader or the OS.
fn read_sorted(reader: &dyn DirReader, dir: &Path) -> std::io::Result<Vec<DirEntryInfo>> {
    let mut entries = reader.read_dir(dir)?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Walk `root`, calling `emit` for every file and every unreadable directory in sorted
/// depth-first order. Symlinks are skipped. `emit` returns false to stop the walk early
/// (the receiving side is gone). Returns what was emitted and visited.
pub fn walk_tree<F>(root: &Path, reader: &dyn DirReader, mut emit: F) -> WalkCounts
where
    F: FnMut(WalkOutcome) -> bool,
{
    let mut counts = WalkCounts::default();
    let mut stack: Vec<(PathBuf, std::vec::IntoIter<DirEntryInfo>)> = Vec::new();

    match read_sorted(reader, root) {
        Ok(entries) => {
            counts.dirs += 1;
            stack.push((root.to_path_buf(), entries.into_iter()));
        }
        Err(source) => {
            debug!("cannot read root {}: {}", root.display(), source);
            if emit(WalkOutcome::Err(DirReadError::new(root, source))) {
                counts.errors += 1;
            }
            return counts;
        }
    }

    while let Some((dir, entries)) = stack.last_mut() {
        let Some(entry) = entries.next() else {
            stack.pop();
            continue;
        };
        let path = dir.join(&entry.name);
        match entry.kind {
            EntryKind::Dir => match read_sorted(reader, &path) {
                Ok(children) => {
                    counts.dirs += 1;
                    stack.push((path, children.into_iter()));
                }
                Err(source) => {
                    debug!("cannot read {}: {}", path.display(), source);
                    if !emit(WalkOutcome::Err(DirReadError::new(path, source))) {
                        break;
                    }
                    counts.errors += 1;
                }
            },
            EntryKind::Symlink => {
                trace!("skipping symlink {}", path.display());
                counts.symlinks_skipped += 1;
            }
            EntryKind::File => {
                if !emit(WalkOutcome::File(path)) {
                    break;
                }
                counts.files += 1;
            }
        }
    }
    counts
}

/// Run [`walk_tree`] on its own thread. Each outcome takes a permit before it is sent, which
/// blocks the walk while `concurrency` items are in flight. Both senders are dropped when the
/// walk returns (or unwinds), which closes the channels and ends the drain threads.
pub fn spawn_walk_thread<'scope, 'env>(
    threads: &'scope Scope<'scope, 'env>,
    ctx: WalkContext<'env>,
    registration: Registration,
) -> ScopedJoinHandle<'scope, WalkCounts> {
    threads.spawn(move || {
        let _registration = registration;
        let WalkContext {
            root,
            reader,
            file_tx,
            error_tx,
            permits,
        } = ctx;
        let counts = walk_tree(&root, reader, |outcome| match outcome {
            WalkOutcome::File(path) => file_tx
                .send(Dispatch::new(path, permits.acquire()))
                .is_ok(),
            WalkOutcome::Err(err) => error_tx
                .send(Dispatch::new(err, permits.acquire()))
                .is_ok(),
        });
        drop(file_tx);
        drop(error_tx);
        counts
    })
}
