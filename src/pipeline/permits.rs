//! Counting semaphore built on a bounded crossbeam channel of unit tokens.
//!
//! Acquiring sends a token (blocks while the channel is full); dropping a [`Permit`]
//! takes one back out. Files and errors share one pool, so the ceiling covers
//! `handle` and `handle_error` calls combined.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::num::NonZeroUsize;

#[derive(Clone, Debug)]
pub struct PermitPool {
    slots_tx: Sender<()>,
    slots_rx: Receiver<()>,
    capacity: NonZeroUsize,
}

impl PermitPool {
    pub fn new(capacity: NonZeroUsize) -> Self {
        let (slots_tx, slots_rx) = bounded::<()>(capacity.get());
        Self {
            slots_tx,
            slots_rx,
            capacity,
        }
    }

    /// Block until a slot is free and take it.
    pub fn acquire(&self) -> Permit {
        // The pool keeps its own receiver alive, so the channel is never disconnected here.
        let _ = self.slots_tx.send(());
        Permit {
            slots: self.slots_rx.clone(),
        }
    }

    /// Take a slot only if one is free right now.
    pub fn try_acquire(&self) -> Option<Permit> {
        self.slots_tx.try_send(()).ok().map(|()| Permit {
            slots: self.slots_rx.clone(),
        })
    }

    /// Permits currently held.
    pub fn in_use(&self) -> usize {
        self.slots_tx.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

/// One held slot. Released on drop, including during unwinding.
#[derive(Debug)]
#[must_use = "dropping a permit releases it immediately"]
pub struct Permit {
    slots: Receiver<()>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        // Our own token is still in the channel, so this never comes back empty.
        let _ = self.slots.try_recv();
    }
}
