//! CLI command implementations.

use std::path::Path;

use inkpress_core::{LoadedInput, source};

pub mod check;
pub mod resolve;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "inkpress.toml";

/// Load user input from `config_path`, or from [`DEFAULT_CONFIG`] if present.
///
/// An explicitly named file must exist; the default one may be absent.
pub fn load_input(config_path: Option<&Path>) -> inkpress_core::Result<LoadedInput> {
    match config_path {
        Some(path) => source::load(path),
        None => source::load_or_default(Path::new(DEFAULT_CONFIG)),
    }
}
