//! Pipeline components: context, walk, permits, dispatch, completion barrier.

pub mod barrier;
pub mod context;
pub mod dispatch;
pub mod error_handler;
pub mod orchestrator;
pub mod permits;
pub mod walk;

pub use barrier::{CompletionBarrier, Registration};
pub use context::{Dispatch, PipelineChannels, WalkContext, create_pipeline_channels};
pub use dispatch::{Deliver, build_handler_pool, drain_to_handler, spawn_drain_thread};
pub use error_handler::report_unreadable_dirs;
pub use orchestrator::run_pipeline;
pub use permits::{Permit, PermitPool};
pub use walk::{WalkOutcome, spawn_walk_thread, walk_tree};
