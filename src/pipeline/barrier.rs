//! Completion barrier: an outstanding-work counter the scan call blocks on until it reaches zero.
//!
//! Every task (walk thread, drain threads, each handler task) holds a [`Registration`] for its
//! whole lifetime. Dropping the registration deregisters, so a task that panics still counts down.

use std::sync::{Arc, Condvar, Mutex, PoisonError};

#[derive(Clone, Debug, Default)]
pub struct CompletionBarrier {
    inner: Arc<BarrierState>,
}

#[derive(Debug, Default)]
struct BarrierState {
    outstanding: Mutex<usize>,
    idle: Condvar,
}

impl CompletionBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one unit of outstanding work. Call before the task starts.
    pub fn register(&self) -> Registration {
        *self
            .inner
            .outstanding
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Registration {
            barrier: self.clone(),
        }
    }

    pub fn outstanding(&self) -> usize {
        *self
            .inner
            .outstanding
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until every registration has been dropped.
    pub fn wait(&self) {
        let mut outstanding = self
            .inner
            .outstanding
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while *outstanding > 0 {
            outstanding = self
                .inner
                .idle
                .wait(outstanding)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn deregister(&self) {
        let mut outstanding = self
            .inner
            .outstanding
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *outstanding = outstanding.saturating_sub(1);
        if *outstanding == 0 {
            self.inner.idle.notify_all();
        }
    }
}

/// Outstanding-work token returned by [`CompletionBarrier::register`].
#[derive(Debug)]
#[must_use = "dropping a registration deregisters it immediately"]
pub struct Registration {
    barrier: CompletionBarrier,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.barrier.deregister();
    }
}
