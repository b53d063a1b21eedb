//! Reading build options from configuration files and the environment.
//!
//! Each source is read through the `config` crate and turned into a
//! [`PartialBuildConfig`] on its own, with per-field type checking. Layers
//! are then combined with [`PartialBuildConfig::overlay`], so a file and the
//! environment may spell the same option differently without clashing.
//!
//! Keys are matched case-insensitively with `_` and `-` ignored, so
//! `siteUrl`, `site_url` and `SITE_URL` all name the same option.
//!
//! The `config` crate lowercases keys while reading a source. Two keys in
//! one source that differ only in case (`siteUrl` and `SITEURL`) are folded
//! into one entry before they reach [`parse_table`], and one of them wins.
//! Spellings that differ in more than case (`drafts` and `include_drafts`)
//! are still reported as duplicates.

use std::{collections::HashSet, path::Path};

pub use config::FileFormat;
use config::{Config, Environment, File, Map, Source, Value, ValueKind};

use crate::{
    config::field,
    error::{CoreError, Result, ValidationError},
    partial::{PartialBuildConfig, PartialMarkdownOptions},
};

type Checked<T> = std::result::Result<T, ValidationError>;

/// Prefix of environment variables read as build options.
///
/// `INKPRESS__SITE_URL` sets `siteUrl`, and
/// `INKPRESS__MARKDOWN__INCLUDE_DRAFTS` sets `markdown.includeDrafts`.
pub const ENV_PREFIX: &str = "INKPRESS";

/// Separator between prefix and nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Partial build options read from one or more sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedInput {
    /// The recognized options.
    pub input: PartialBuildConfig,

    /// Keys that were present but not recognized, as lowercased dotted
    /// paths (e.g. `markdown.syntaxhighlight`).
    pub unknown_keys: Vec<String>,
}

impl LoadedInput {
    /// Layer `other` on top of `self`.
    pub fn overlay(mut self, other: Self) -> Self {
        self.unknown_keys.extend(other.unknown_keys);
        Self {
            input: self.input.overlay(other.input),
            unknown_keys: self.unknown_keys,
        }
    }
}

/// Load build options from `path`, then apply `INKPRESS__*` environment
/// overrides.
///
/// The file format is chosen from the extension (`.toml`, `.yaml`, `.json`).
pub fn load(path: &Path) -> Result<LoadedInput> {
    let file = load_file(path)?;
    Ok(file.overlay(from_env()?))
}

/// Like [`load`], but a missing file counts as empty input.
pub fn load_or_default(path: &Path) -> Result<LoadedInput> {
    if !path.exists() {
        tracing::debug!(?path, "No configuration file, using defaults");
        return from_env();
    }
    load(path)
}

/// Load build options from `path` and an explicit set of environment
/// variables instead of the process environment.
pub fn load_with_env(path: &Path, vars: Map<String, String>) -> Result<LoadedInput> {
    let file = load_file(path)?;
    Ok(file.overlay(from_env_vars(vars)?))
}

/// Load build options from a single file, without environment overrides.
pub fn load_file(path: &Path) -> Result<LoadedInput> {
    if !path.exists() {
        return Err(CoreError::config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    tracing::debug!(?path, "Loading configuration file");
    from_source(File::from(path))
}

/// Parse build options from an in-memory document.
pub fn from_str(content: &str, format: FileFormat) -> Result<LoadedInput> {
    from_source(File::from_str(content, format))
}

/// Read build options from `INKPRESS__*` process environment variables.
pub fn from_env() -> Result<LoadedInput> {
    from_source(env_source())
}

/// Read build options from an explicit map of environment variables.
pub fn from_env_vars(vars: Map<String, String>) -> Result<LoadedInput> {
    from_source(env_source().source(Some(vars)))
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

fn from_source<S>(source: S) -> Result<LoadedInput>
where
    S: Source + Send + Sync + 'static,
{
    let settings = Config::builder().add_source(source).build()?;
    let table: Map<String, Value> = settings.try_deserialize()?;
    Ok(parse_table(table)?)
}

/// Type-check a raw table of options.
pub fn parse_table(table: Map<String, Value>) -> Checked<LoadedInput> {
    let mut seen = HashSet::new();
    let mut loaded = LoadedInput::default();

    for (key, value) in table {
        match normalize_key(&key).as_str() {
            "siteurl" => {
                mark_seen(&mut seen, field::SITE_URL)?;
                loaded.input.site_url = expect_string(field::SITE_URL, value)?;
            }
            "markdown" => {
                mark_seen(&mut seen, field::MARKDOWN)?;
                loaded.input.markdown = parse_markdown(value, &mut loaded.unknown_keys)?;
            }
            _ => loaded.unknown_keys.push(key),
        }
    }

    loaded.unknown_keys.sort();
    for key in &loaded.unknown_keys {
        tracing::warn!(key = %key, "Ignoring unrecognized configuration key");
    }

    Ok(loaded)
}

fn parse_markdown(
    value: Value,
    unknown_keys: &mut Vec<String>,
) -> Checked<PartialMarkdownOptions> {
    let table = match value.kind {
        ValueKind::Nil => return Ok(PartialMarkdownOptions::default()),
        ValueKind::Table(table) => table,
        other => {
            return Err(ValidationError::new(
                field::MARKDOWN,
                format!("markdown must be a table, found {}", describe(&other)),
            ));
        }
    };

    let mut seen = HashSet::new();
    let mut options = PartialMarkdownOptions::default();

    for (key, value) in table {
        match normalize_key(&key).as_str() {
            // `drafts` is accepted as a short alias.
            "includedrafts" | "drafts" => {
                mark_seen(&mut seen, field::INCLUDE_DRAFTS)?;
                options.include_drafts = expect_bool(field::INCLUDE_DRAFTS, value)?;
            }
            _ => unknown_keys.push(format!("{}.{key}", field::MARKDOWN)),
        }
    }

    Ok(options)
}

fn mark_seen(seen: &mut HashSet<&'static str>, name: &'static str) -> Checked<()> {
    if seen.insert(name) {
        Ok(())
    } else {
        Err(ValidationError::new(
            name,
            format!("{name} is specified more than once (check for aliases)"),
        ))
    }
}

fn expect_string(name: &str, value: Value) -> Checked<Option<String>> {
    match value.kind {
        ValueKind::Nil => Ok(None),
        ValueKind::String(s) => Ok(Some(s)),
        other => Err(ValidationError::new(
            name,
            format!("{name} must be a string, found {}", describe(&other)),
        )),
    }
}

fn expect_bool(name: &str, value: Value) -> Checked<Option<bool>> {
    match value.kind {
        ValueKind::Nil => Ok(None),
        ValueKind::Boolean(b) => Ok(Some(b)),
        ValueKind::String(s) => Err(ValidationError::new(
            name,
            format!("{name} must be a boolean, found string {s:?}"),
        )),
        other => Err(ValidationError::new(
            name,
            format!("{name} must be a boolean, found {}", describe(&other)),
        )),
    }
}

fn describe(kind: &ValueKind) -> &'static str {
    match kind {
        ValueKind::Nil => "null",
        ValueKind::Boolean(_) => "boolean",
        ValueKind::I64(_) | ValueKind::I128(_) | ValueKind::U64(_) | ValueKind::U128(_) => {
            "integer"
        }
        ValueKind::Float(_) => "float",
        ValueKind::String(_) => "string",
        ValueKind::Table(_) => "table",
        ValueKind::Array(_) => "array",
    }
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
