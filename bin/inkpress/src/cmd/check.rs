//! Check command - validate configuration

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use inkpress_core::{BuildConfig, Defaults, LoadedInput, resolve};

use super::load_input;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Loads and resolves the configuration, then reports errors and warnings.
pub fn run(config_path: Option<&Path>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration");
    report(load_input(config_path), strict)
}

/// Print the report for already loaded input.
pub fn report(loaded: inkpress_core::Result<LoadedInput>, strict: bool) -> Result<()> {
    println!("Checking configuration...");
    let (result, config) = evaluate(loaded, &Defaults::default());

    if let Some(config) = &config {
        println!("  ✓ Configuration valid");
        match config.site_url() {
            Some(url) => println!("  ℹ siteUrl: {url}"),
            None => println!("  ℹ siteUrl: (not set)"),
        }
        println!("  ℹ markdown.includeDrafts: {}", config.include_drafts());
    } else {
        println!("  ✗ Configuration invalid");
    }

    // Print summary
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate loaded input without printing anything.
///
/// Returns the collected findings and, when resolution succeeded, the
/// resolved configuration.
pub fn evaluate(
    loaded: inkpress_core::Result<LoadedInput>,
    defaults: &Defaults,
) -> (ValidationResult, Option<BuildConfig>) {
    let mut result = ValidationResult::default();

    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            result.add_error(e.to_string());
            return (result, None);
        }
    };

    for key in &loaded.unknown_keys {
        result.add_warning(format!("Unrecognized key `{key}` is ignored"));
    }

    match resolve(loaded.input, defaults) {
        Ok(config) => {
            check_config_values(&config, &mut result);
            (result, Some(config))
        }
        Err(e) => {
            result.add_error(e.to_string());
            (result, None)
        }
    }
}

/// Check resolved values for common issues.
fn check_config_values(config: &BuildConfig, result: &mut ValidationResult) {
    let Some(url) = config.site_url() else {
        result.add_warning("siteUrl is not set; sitemap and canonical links need it");
        return;
    };

    if !matches!(url.scheme(), "http" | "https") {
        result.add_warning(format!(
            "siteUrl should start with http:// or https:// (found {}://)",
            url.scheme()
        ));
    }

    if url.as_str().ends_with('/') {
        result.add_warning("siteUrl should not have a trailing slash");
    }
}
