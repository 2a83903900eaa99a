//! Pipeline context: channels, permit pool and the shared data handed to the walk thread.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::error::DirReadError;
use crate::fs::DirReader;
use crate::utils::config::ITEM_CHANNEL_CAP;

use super::permits::{Permit, PermitPool};

/// An item on its way to the handler, carrying the permit the walk took for it.
/// The handler task drops the permit once the handler call returns.
#[derive(Debug)]
pub struct Dispatch<T> {
    pub item: T,
    pub permit: Permit,
}

impl<T> Dispatch<T> {
    pub fn new(item: T, permit: Permit) -> Self {
        Self { item, permit }
    }
}

/// Everything the walk thread needs: where to start, how to list, where to send.
pub struct WalkContext<'env> {
    pub root: PathBuf,
    pub reader: &'env dyn DirReader,
    pub file_tx: Sender<Dispatch<PathBuf>>,
    pub error_tx: Sender<Dispatch<DirReadError>>,
    pub permits: PermitPool,
}

/// Channels and permit pool for one scan. Walk thread gets the senders (via [`WalkContext`]);
/// one drain thread gets each receiver.
pub struct PipelineChannels {
    pub file_tx: Sender<Dispatch<PathBuf>>,
    pub file_rx: Receiver<Dispatch<PathBuf>>,
    pub error_tx: Sender<Dispatch<DirReadError>>,
    pub error_rx: Receiver<Dispatch<DirReadError>>,
    pub permits: PermitPool,
}

pub fn create_pipeline_channels(concurrency: NonZeroUsize) -> PipelineChannels {
    let (file_tx, file_rx) = bounded::<Dispatch<PathBuf>>(ITEM_CHANNEL_CAP);
    let (error_tx, error_rx) = bounded::<Dispatch<DirReadError>>(ITEM_CHANNEL_CAP);
    PipelineChannels {
        file_tx,
        file_rx,
        error_tx,
        error_rx,
        permits: PermitPool::new(concurrency),
    }
}
