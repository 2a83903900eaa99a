use colored::Colorize;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::io::Write;

/// Initialise `env_logger` on stderr. Stdout stays free for the file listing.
pub fn setup_logging(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let _ = logger_builder(verbose, rust_log.as_deref()).try_init();
}

/// Logger defaults: this crate at Debug when `verbose` (else Info), dependencies at Warn.
/// `filters` (`RUST_LOG` syntax) replaces the defaults entirely when given.
pub fn logger_builder(verbose: bool, filters: Option<&str>) -> Builder {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder.target(Target::Stderr);
    match filters {
        Some(filters) => builder.parse_filters(filters),
        None => builder
            .filter_level(LevelFilter::Warn)
            .filter_module(env!("CARGO_PKG_NAME"), level),
    };
    builder.format(|buf, record| {
        let name = env!("CARGO_PKG_NAME");
        let line = match record.level() {
            Level::Error => format!(
                "[{} {} {}] {}",
                name.cyan(),
                "ERROR".red(),
                record.target().white(),
                record.args()
            ),
            Level::Warn => format!("[{} {}] {}", name.cyan(), "WARN".yellow(), record.args()),
            Level::Debug | Level::Trace => format!(
                "[{} {}] {}",
                name.cyan(),
                record.level().as_str().dimmed(),
                record.args()
            ),
            Level::Info => format!("[{}] {}", name.cyan(), record.args()),
        };
        writeln!(buf, "{}", line)
    });
    builder
}
