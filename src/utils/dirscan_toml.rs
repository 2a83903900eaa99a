//! Load `.dirscan.toml` from the scanned directory (CLI only). The library takes its
//! configuration from `Scanner` fields.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct DirscanToml {
    #[serde(default)]
    settings: ScanSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScanSection {
    concurrency: Option<usize>,
    verbose: Option<bool>,
    errors: Option<bool>,
    progress: Option<bool>,
    json: Option<bool>,
    quiet: Option<bool>,
}

/// Parse a config file body.
pub fn parse_dirscan_toml(s: &str) -> Result<DirscanToml> {
    toml::from_str(s).context("parse dirscan config")
}

/// Load the config file from `dir` if present. Missing or unreadable files give `Ok(None)`;
/// a malformed file gives an error naming the file. The caller warns and carries on without it.
pub fn load_dirscan_toml(dir: &Path) -> Result<Option<DirscanToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let Ok(s) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    parse_dirscan_toml(&s)
        .with_context(|| format!("ignoring {}", path.display()))
        .map(Some)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $($field:ident => $opts_field:ident),+ $(,)?) => {
        $(
            if let Some(v) = $section.$field {
                $opts.$opts_field = v;
            }
        )+
    };
}

/// Apply file config to opts (only fields present in the file). Call before env and CLI.
pub fn apply_file_to_opts(file: &DirscanToml, opts: &mut Opts) {
    let section = &file.settings;
    apply_file_opt!(
        section,
        opts,
        concurrency => concurrency,
        verbose => verbose,
        errors => show_errors,
        progress => progress,
        json => json,
        quiet => quiet,
    );
}

/// Apply `DIRSCAN_CONCURRENCY` (process env, or `.env` via dotenvy) when set.
pub fn apply_env_to_opts(opts: &mut Opts) -> Result<()> {
    let _ = dotenvy::dotenv();
    let var = PackagePaths::get().concurrency_env();
    if let Ok(raw) = std::env::var(var) {
        opts.concurrency = raw
            .trim()
            .parse()
            .with_context(|| format!("{var} must be a non-negative integer, got {raw:?}"))?;
    }
    Ok(())
}
