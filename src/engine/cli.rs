//! CLI command handler: resolve options, scan, report.

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::handlers::PrintHandler;
use crate::scanner::Scanner;
use crate::utils::{apply_env_to_opts, apply_file_to_opts, load_dirscan_toml, setup_logging};

/// Options resolved for one run. `config_error` holds a malformed `.dirscan.toml` that was
/// skipped; it is reported once logging is up.
#[derive(Debug)]
pub struct ResolvedOpts {
    pub opts: Opts,
    pub config_error: Option<anyhow::Error>,
}

/// Merge options: defaults, then `.dirscan.toml` in the scanned dir, then env, then flags.
pub fn resolve_opts(cli: &Cli) -> Result<ResolvedOpts> {
    let mut opts = Opts::default();
    let config_error = match load_dirscan_toml(&cli.dir) {
        Ok(Some(file)) => {
            apply_file_to_opts(&file, &mut opts);
            None
        }
        Ok(None) => None,
        Err(e) => Some(e),
    };
    apply_env_to_opts(&mut opts)?;
    apply_cli_to_opts(cli, &mut opts);
    Ok(ResolvedOpts { opts, config_error })
}

fn apply_cli_to_opts(cli: &Cli, opts: &mut Opts) {
    if let Some(n) = cli.concurrency {
        opts.concurrency = n;
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Some(v) = cli.errors {
        opts.show_errors = v;
    }
    if let Some(v) = cli.progress {
        opts.progress = v;
    }
    if let Some(v) = cli.json {
        opts.json = v;
    }
    if let Some(v) = cli.quiet {
        opts.quiet = v;
    }
}

/// Scan `cli.dir`, listing files (or counting them), then report the summary.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let ResolvedOpts { opts, config_error } = resolve_opts(cli)?;
    setup_logging(opts.verbose);
    if let Some(e) = config_error {
        warn!("{:#}", e);
    }
    debug!("{:#?}", opts);

    let scanner = Scanner::new(&cli.dir).with_concurrency(opts.concurrency);
    let handler = PrintHandler::from_opts(&opts);
    let summary = scanner
        .scan(Some(&handler))
        .with_context(|| format!("scan {}", cli.dir.display()))?;
    handler.finish().context("flush output")?;

    if opts.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serialize summary")?
        );
    } else {
        log::info!(
            "{} files, {} unreadable directories in {} ms",
            summary.files,
            summary.errors,
            summary.elapsed_ms
        );
    }
    Ok(())
}
