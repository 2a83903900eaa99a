pub mod config;
pub mod dirscan_toml;
pub mod logger;

pub use config::*;
pub use dirscan_toml::{
    apply_env_to_opts, apply_file_to_opts, load_dirscan_toml, parse_dirscan_toml,
};
pub use logger::{logger_builder, setup_logging};
