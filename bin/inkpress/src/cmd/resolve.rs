//! Resolve command - emit the resolved configuration for a build

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use inkpress_core::{BuildConfig, Defaults, LoadedInput, PartialBuildConfig, resolve};

use super::load_input;

/// Serialization format of the resolved configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
}

/// Run the resolve command.
///
/// Layers the configuration file, `INKPRESS__*` environment variables and
/// `overrides` (in increasing precedence), resolves them, and writes the
/// result to `output` or stdout.
pub fn run(
    config_path: Option<&Path>,
    overrides: &PartialBuildConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    tracing::info!(?config_path, ?overrides, ?format, ?output, "Resolving configuration");

    let loaded = load_input(config_path).wrap_err("Failed to load configuration")?;
    emit(loaded, overrides, format, output)
}

/// Apply `overrides` to already loaded input, resolve, and write the result.
pub fn emit(
    loaded: LoadedInput,
    overrides: &PartialBuildConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let input = loaded.input.overlay(overrides.clone());
    let config = resolve(input, &Defaults::default()).wrap_err("Invalid configuration")?;

    tracing::debug!(?config, "Resolved configuration");

    let rendered = render(&config, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(?path, "Wrote resolved configuration");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Serialize a resolved configuration.
pub fn render(config: &BuildConfig, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(config)?;
            rendered.push('\n');
            Ok(rendered)
        }
        OutputFormat::Toml => Ok(toml::to_string_pretty(config)?),
    }
}
