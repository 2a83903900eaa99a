//! Dirscan CLI: list every file under a directory with bounded-concurrency handling.

use anyhow::Result;
use clap::Parser;
use dirscan::engine::arg_parser::Cli;
use dirscan::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
