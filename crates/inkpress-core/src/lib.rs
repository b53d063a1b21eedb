//! Inkpress Core Library
//!
//! Build configuration resolution for the Inkpress static blog generator:
//! user-supplied options are read, overlaid on explicit defaults, validated,
//! and handed to a build pipeline as one immutable value.

pub mod config;
pub mod error;
pub mod partial;
pub mod pipeline;
pub mod source;

pub use crate::config::{BuildConfig, Defaults, MarkdownOptions, SiteUrl, resolve};
pub use error::{CoreError, Result, ValidationError};
pub use partial::{PartialBuildConfig, PartialMarkdownOptions};
pub use pipeline::{BuildError, BuildPipeline, run_build};
pub use source::LoadedInput;
