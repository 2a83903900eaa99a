//! Engine module for the command-line front end

pub mod arg_parser;
pub mod cli;
pub mod handlers;
pub mod progress;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{ResolvedOpts, handle_run, resolve_opts};
pub use handlers::PrintHandler;
pub use progress::{BatchedProgress, create_counter};
