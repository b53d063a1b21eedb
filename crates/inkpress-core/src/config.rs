//! Resolved build configuration.
//!
//! A [`BuildConfig`] is produced once per build invocation by [`resolve`],
//! which overlays a user-supplied [`PartialBuildConfig`] onto an explicit set
//! of [`Defaults`] and validates the result. The resolved value has no
//! setters and can be shared read-only with any number of consumers.

use std::fmt;

use serde::{Serialize, Serializer};
use url::Url;

use crate::{error::ValidationError, partial::PartialBuildConfig};

/// Canonical field names used in validation errors.
pub mod field {
    /// Base URL of the deployed site.
    pub const SITE_URL: &str = "siteUrl";

    /// Markdown options table.
    pub const MARKDOWN: &str = "markdown";

    /// Whether draft content is built.
    pub const INCLUDE_DRAFTS: &str = "markdown.includeDrafts";
}

/// Default values applied to every field the user leaves out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    /// Site URL used when the input does not set one.
    pub site_url: Option<String>,

    /// Draft inclusion used when the input does not set it.
    pub include_drafts: bool,
}

/// A validated absolute site URL.
///
/// Keeps the string exactly as the user wrote it alongside the parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl {
    raw: String,
    parsed: Url,
}

impl SiteUrl {
    /// Parse and validate a site URL.
    ///
    /// The URL must be non-empty, free of surrounding whitespace, written as
    /// `scheme://host[/path]`, and carry no query string or fragment, so that
    /// [`BuildConfig::url_for`] can append paths to it.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::new(
                field::SITE_URL,
                "siteUrl must not be empty",
            ));
        }

        if raw.trim() != raw {
            return Err(ValidationError::new(
                field::SITE_URL,
                "siteUrl must not have leading or trailing whitespace",
            ));
        }

        let parsed = Url::parse(raw).map_err(|e| {
            ValidationError::new(
                field::SITE_URL,
                format!("siteUrl must be an absolute URL ({e})"),
            )
        })?;

        if !parsed.has_host() {
            return Err(ValidationError::new(
                field::SITE_URL,
                "siteUrl must be an absolute URL with a host",
            ));
        }

        // `https:example.com` parses, but the raw string is not a usable base.
        let prefix = format!("{}://", parsed.scheme());
        if !raw.to_ascii_lowercase().starts_with(&prefix) {
            return Err(ValidationError::new(
                field::SITE_URL,
                format!("siteUrl must be written as {}://host", parsed.scheme()),
            ));
        }

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ValidationError::new(
                field::SITE_URL,
                "siteUrl must not have a query string or fragment",
            ));
        }

        Ok(Self {
            raw: raw.to_string(),
            parsed,
        })
    }

    /// The URL as supplied by the user.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.parsed
    }

    /// The URL scheme, e.g. `https`.
    pub fn scheme(&self) -> &str {
        self.parsed.scheme()
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for SiteUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Resolved markdown options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownOptions {
    include_drafts: bool,
}

impl MarkdownOptions {
    /// Whether content marked as draft is part of the build.
    pub fn include_drafts(&self) -> bool {
        self.include_drafts
    }
}

/// Fully resolved, immutable build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    site_url: Option<SiteUrl>,
    markdown: MarkdownOptions,
}

impl BuildConfig {
    /// The configured site URL, if any.
    pub fn site_url(&self) -> Option<&SiteUrl> {
        self.site_url.as_ref()
    }

    /// Markdown options.
    pub fn markdown(&self) -> &MarkdownOptions {
        &self.markdown
    }

    /// Shorthand for `markdown().include_drafts()`.
    pub fn include_drafts(&self) -> bool {
        self.markdown.include_drafts
    }

    /// Whether a content item with the given draft flag belongs in this build.
    pub fn includes(&self, is_draft: bool) -> bool {
        !is_draft || self.markdown.include_drafts
    }

    /// Get the full URL for a site-relative path.
    ///
    /// Returns `None` when no site URL is configured.
    pub fn url_for(&self, path: &str) -> Option<String> {
        let base = self.site_url.as_ref()?.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Some(format!("{base}/{path}"))
    }
}

/// Resolve user input against `defaults` into a validated [`BuildConfig`].
///
/// Fields present in `input` replace the corresponding default; absent
/// fields keep it. The merged result is validated as a whole, so an invalid
/// default site URL is rejected just like an invalid user-supplied one.
pub fn resolve(
    input: PartialBuildConfig,
    defaults: &Defaults,
) -> Result<BuildConfig, ValidationError> {
    let site_url = input.site_url.or_else(|| defaults.site_url.clone());
    let include_drafts = input
        .markdown
        .include_drafts
        .unwrap_or(defaults.include_drafts);

    let site_url = site_url.as_deref().map(SiteUrl::parse).transpose()?;

    tracing::debug!(
        site_url = site_url.as_ref().map(SiteUrl::as_str),
        include_drafts,
        "Resolved build configuration"
    );

    Ok(BuildConfig {
        site_url,
        markdown: MarkdownOptions { include_drafts },
    })
}
