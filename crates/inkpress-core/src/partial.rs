//! User-supplied, partially specified build options.

use crate::config::BuildConfig;

/// Build options as written by the user; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialBuildConfig {
    /// Base URL of the deployed site.
    pub site_url: Option<String>,

    /// Markdown options.
    pub markdown: PartialMarkdownOptions,
}

/// Markdown options as written by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialMarkdownOptions {
    /// Whether draft content is built.
    pub include_drafts: Option<bool>,
}

impl PartialBuildConfig {
    /// Set the site URL.
    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = Some(site_url.into());
        self
    }

    /// Set draft inclusion.
    pub fn with_include_drafts(mut self, include_drafts: bool) -> Self {
        self.markdown.include_drafts = Some(include_drafts);
        self
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.site_url.is_none() && self.markdown.include_drafts.is_none()
    }

    /// Shallow merge: every field set in `other` wins over `self`.
    pub fn overlay(self, other: Self) -> Self {
        Self {
            site_url: other.site_url.or(self.site_url),
            markdown: PartialMarkdownOptions {
                include_drafts: other.markdown.include_drafts.or(self.markdown.include_drafts),
            },
        }
    }
}

impl From<&BuildConfig> for PartialBuildConfig {
    fn from(config: &BuildConfig) -> Self {
        Self {
            site_url: config.site_url().map(|url| url.as_str().to_string()),
            markdown: PartialMarkdownOptions {
                include_drafts: Some(config.include_drafts()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_keeps_unset_fields() {
        let file = PartialBuildConfig::default()
            .with_site_url("https://example.com")
            .with_include_drafts(false);
        let cli = PartialBuildConfig::default().with_include_drafts(true);

        let merged = file.overlay(cli);
        assert_eq!(merged.site_url.as_deref(), Some("https://example.com"));
        assert_eq!(merged.markdown.include_drafts, Some(true));
    }

    #[test]
    fn test_overlay_empty_is_identity() {
        let file = PartialBuildConfig::default().with_site_url("https://example.com");
        assert_eq!(
            file.clone().overlay(PartialBuildConfig::default()),
            file
        );
        assert_eq!(PartialBuildConfig::default().overlay(file.clone()), file);
    }

    #[test]
    fn test_is_empty() {
        assert!(PartialBuildConfig::default().is_empty());
        assert!(!PartialBuildConfig::default().with_include_drafts(false).is_empty());
    }
}
