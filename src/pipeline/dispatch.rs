//! Bounded dispatcher: one drain thread per channel, one pool task per item.

use crossbeam_channel::Receiver;
use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread::{Scope, ScopedJoinHandle};

use crate::Handler;
use crate::error::DirReadError;
use crate::utils::config::{MAX_HANDLER_THREADS, PackagePaths};

use super::barrier::{CompletionBarrier, Registration};
use super::context::Dispatch;

/// Something the walk produces that knows which handler method consumes it.
pub trait Deliver: Send {
    fn deliver(self, handler: &dyn Handler);
}

impl Deliver for PathBuf {
    fn deliver(self, handler: &dyn Handler) {
        handler.handle(self);
    }
}

impl Deliver for DirReadError {
    fn deliver(self, handler: &dyn Handler) {
        handler.handle_error(self);
    }
}

/// Thread pool that runs handler tasks. Never larger than the permit count: at most
/// `concurrency` tasks exist at once, so extra threads would only idle.
pub fn build_handler_pool(
    concurrency: NonZeroUsize,
) -> Result<ThreadPool, rayon::ThreadPoolBuildError> {
    let num_threads = concurrency.get().min(MAX_HANDLER_THREADS);
    debug!("handler pool: {} threads", num_threads);
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("{}-handler-{}", PackagePaths::get().pkg_name(), i))
        .build()
}

/// Drain loop: receive until the walk closes the channel, spawning one task per item.
/// Each task is registered with the barrier before it is spawned. Inside the task the
/// permit is released before the registration, also when the handler panics.
pub fn drain_to_handler<'scope, T>(
    rx: Receiver<Dispatch<T>>,
    tasks: &rayon::Scope<'scope>,
    barrier: &CompletionBarrier,
    handler: &'scope dyn Handler,
) -> usize
where
    T: Deliver + 'scope,
{
    let mut spawned = 0_usize;
    for dispatch in rx.iter() {
        let registration = barrier.register();
        tasks.spawn(move |_| {
            let _registration = registration;
            let Dispatch { item, permit } = dispatch;
            item.deliver(handler);
            drop(permit);
        });
        spawned += 1;
    }
    spawned
}

/// Run [`drain_to_handler`] on its own thread; `registration` is held until the channel closes
/// and every task for it has been spawned.
pub fn spawn_drain_thread<'scope, 'env, 'tasks, T>(
    threads: &'scope Scope<'scope, 'env>,
    rx: Receiver<Dispatch<T>>,
    tasks: &'env rayon::Scope<'tasks>,
    barrier: &'env CompletionBarrier,
    handler: &'tasks dyn Handler,
    registration: Registration,
) -> ScopedJoinHandle<'scope, usize>
where
    T: Deliver + 'tasks,
{
    threads.spawn(move || {
        let _registration = registration;
        drain_to_handler(rx, tasks, barrier, handler)
    })
}
