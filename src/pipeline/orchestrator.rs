use log::debug;
use std::num::NonZeroUsize;
use std::panic;
use std::path::Path;
use std::thread;

use crate::error::Error;
use crate::fs::DirReader;
use crate::{Handler, WalkCounts};

use super::barrier::CompletionBarrier;
use super::context::{PipelineChannels, WalkContext, create_pipeline_channels};
use super::dispatch::{build_handler_pool, spawn_drain_thread};
use super::walk::spawn_walk_thread;

/// Main orchestrator: run one complete scan of `root` and block until it is done.
///
/// Walk thread → (permit, file | error) channels → drain threads → handler pool tasks.
/// Returns only after the walk, both drains and every handler task have deregistered from the
/// completion barrier. A handler panic is resumed here once everything else has finished.
pub fn run_pipeline(
    root: &Path,
    reader: &dyn DirReader,
    handler: &dyn Handler,
    concurrency: NonZeroUsize,
) -> Result<WalkCounts, Error> {
    let pool = build_handler_pool(concurrency)?;
    let PipelineChannels {
        file_tx,
        file_rx,
        error_tx,
        error_rx,
        permits,
    } = create_pipeline_channels(concurrency);
    let barrier = CompletionBarrier::new();

    let counts = pool.in_place_scope(|tasks| {
        thread::scope(|threads| {
            // Register all three long-lived tasks up front so the counter cannot touch zero
            // until the walk and both drains are finished.
            let walk_registration = barrier.register();
            let files_registration = barrier.register();
            let errors_registration = barrier.register();

            let walk = spawn_walk_thread(
                threads,
                WalkContext {
                    root: root.to_path_buf(),
                    reader,
                    file_tx,
                    error_tx,
                    permits,
                },
                walk_registration,
            );
            let files = spawn_drain_thread(
                threads,
                file_rx,
                tasks,
                &barrier,
                handler,
                files_registration,
            );
            let errors = spawn_drain_thread(
                threads,
                error_rx,
                tasks,
                &barrier,
                handler,
                errors_registration,
            );

            barrier.wait();

            let spawned = [files.join(), errors.join()]
                .into_iter()
                .map(|r| r.unwrap_or_else(|payload| panic::resume_unwind(payload)))
                .sum::<usize>();
            let counts = walk
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload));
            debug!(
                "pipeline: walk done, {} handler tasks spawned ({} files, {} errors)",
                spawned, counts.files, counts.errors
            );
            counts
        })
    });
    Ok(counts)
}
