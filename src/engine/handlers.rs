//! Handler used by the CLI: lists files on stdout, optionally errors on stderr and a counter.

use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::engine::progress::{BatchedProgress, create_counter};
use crate::utils::config::PROGRESS_UPDATE_BATCH_SIZE;
use crate::{DirReadError, Handler, Opts};

pub struct PrintHandler {
    out: Option<Mutex<BufWriter<Stdout>>>,
    show_errors: bool,
    progress: Option<BatchedProgress>,
}

impl PrintHandler {
    pub fn from_opts(opts: &Opts) -> Self {
        let list = !opts.quiet && !opts.progress;
        Self {
            out: list.then(|| Mutex::new(BufWriter::new(io::stdout()))),
            show_errors: opts.show_errors,
            progress: opts.progress.then(|| {
                BatchedProgress::new(create_counter("Scanning"), PROGRESS_UPDATE_BATCH_SIZE)
            }),
        }
    }

    /// Flush buffered output and the counter. Call once after the scan.
    pub fn finish(&self) -> io::Result<()> {
        if let Some(progress) = &self.progress {
            progress.flush();
            eprintln!();
        }
        if let Some(out) = &self.out {
            out.lock().unwrap_or_else(PoisonError::into_inner).flush()?;
        }
        Ok(())
    }
}

impl Handler for PrintHandler {
    fn handle(&self, path: PathBuf) {
        if let Some(out) = &self.out {
            let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = writeln!(out, "{}", path.display()) {
                log::debug!("stdout write failed: {}", e);
            }
        }
        if let Some(progress) = &self.progress {
            progress.tick();
        }
    }

    fn handle_error(&self, err: DirReadError) {
        if self.show_errors {
            eprintln!("{}", err);
        } else {
            log::debug!("{}", err);
        }
    }
}
