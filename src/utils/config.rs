//! Application configuration constants.
//! Tuning and names in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    concurrency_env: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                concurrency_env: format!("{}_CONCURRENCY", pkg.to_uppercase()),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Per-directory config file read by the CLI (e.g. `.dirscan.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Environment variable overriding the CLI concurrency (e.g. `DIRSCAN_CONCURRENCY`).
    pub fn concurrency_env(&self) -> &str {
        &self.concurrency_env
    }
}

// ---- Concurrency ----

/// Default concurrency: handler calls are fully serialized and follow discovery order.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Upper bound on handler pool threads. Concurrency above this still works, but real
/// parallelism stops here: permits beyond it wait for a pool thread.
pub const MAX_HANDLER_THREADS: usize = 256;

/// Capacity of the file and error channels. Zero makes each send a rendezvous with
/// the drain thread, so the permit taken before the send is the only buffering.
pub const ITEM_CHANNEL_CAP: usize = 0;

// ---- Progress ----

/// Handled items between progress counter refreshes (reduce lock contention).
pub const PROGRESS_UPDATE_BATCH_SIZE: usize = 100;
