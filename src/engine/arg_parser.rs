use clap::Parser;
use std::path::PathBuf;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Recursive directory scanner with bounded-concurrency handling.
#[derive(Clone, Debug, Parser)]
#[command(name = "dirscan")]
#[command(about = "List every file under a directory in sorted depth-first order.")]
pub struct Cli {
    /// Directory to scan. Default: current directory.
    #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Maximum number of files handled at once. 1 keeps output in discovery order.
    /// Values above 256 are accepted, but at most 256 run in parallel.
    #[arg(long, short = 'j', value_name = "N")]
    pub concurrency: Option<usize>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Print directories that could not be read on stderr.
    #[arg(long, short = 'e', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub errors: Option<bool>,

    /// Show a running file counter instead of listing files.
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub progress: Option<bool>,

    /// Print the scan summary as JSON.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub json: Option<bool>,

    /// Do not list files.
    #[arg(long, short = 'q', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub quiet: Option<bool>,
}
