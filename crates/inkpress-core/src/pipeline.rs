//! Hand-off point between configuration resolution and the site build.
//!
//! Inkpress does not render content itself. A build pipeline implements
//! [`BuildPipeline`] and receives the resolved [`BuildConfig`] through
//! [`run_build`], which never invokes the pipeline with a configuration that
//! failed validation.

use thiserror::Error;

use crate::{
    config::{BuildConfig, Defaults, resolve},
    error::ValidationError,
    partial::PartialBuildConfig,
};

/// An external process that turns a resolved configuration into a site.
pub trait BuildPipeline {
    /// What a successful build produces.
    type Artifact;

    /// What a failed build reports.
    type Error: std::error::Error + 'static;

    /// Build the site using `config`.
    fn build(&self, config: &BuildConfig) -> Result<Self::Artifact, Self::Error>;
}

/// Failure of a complete build invocation.
#[derive(Debug, Error)]
pub enum BuildError<E: std::error::Error + 'static> {
    /// The configuration was rejected; the pipeline did not run.
    #[error("Configuration rejected: {0}")]
    Config(#[from] ValidationError),

    /// The pipeline ran and failed.
    #[error("Build failed: {0}")]
    Pipeline(#[source] E),
}

/// Resolve `input` and hand the result to `pipeline`.
pub fn run_build<P: BuildPipeline>(
    pipeline: &P,
    input: PartialBuildConfig,
    defaults: &Defaults,
) -> Result<P::Artifact, BuildError<P::Error>> {
    let config = resolve(input, defaults)?;
    tracing::info!(
        site_url = config.site_url().map(|url| url.as_str()),
        include_drafts = config.include_drafts(),
        "Starting build"
    );
    pipeline.build(&config).map_err(BuildError::Pipeline)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Debug, Error)]
    #[error("renderer crashed")]
    struct RenderError;

    /// Records every configuration it is asked to build with.
    #[derive(Default)]
    struct RecordingPipeline {
        seen: RefCell<Vec<BuildConfig>>,
        fail: bool,
    }

    impl BuildPipeline for RecordingPipeline {
        type Artifact = usize;
        type Error = RenderError;

        fn build(&self, config: &BuildConfig) -> Result<usize, RenderError> {
            if self.fail {
                return Err(RenderError);
            }
            self.seen.borrow_mut().push(config.clone());
            Ok(self.seen.borrow().len())
        }
    }

    #[test]
    fn test_pipeline_receives_resolved_config() {
        let pipeline = RecordingPipeline::default();
        let input = PartialBuildConfig::default()
            .with_site_url("https://wisdom-blog.vercel.app")
            .with_include_drafts(true);

        let artifact = run_build(&pipeline, input, &Defaults::default()).expect("build");
        assert_eq!(artifact, 1);

        let seen = pipeline.seen.borrow();
        assert_eq!(
            seen[0].site_url().map(|url| url.as_str()),
            Some("https://wisdom-blog.vercel.app")
        );
        assert!(seen[0].include_drafts());
    }

    #[test]
    fn test_invalid_config_halts_before_pipeline() {
        let pipeline = RecordingPipeline::default();
        let input = PartialBuildConfig::default().with_site_url("not-a-url");

        let err = run_build(&pipeline, input, &Defaults::default()).unwrap_err();
        match err {
            BuildError::Config(err) => assert_eq!(err.field(), "siteUrl"),
            other => panic!("Expected config error, got {other:?}"),
        }
        assert!(pipeline.seen.borrow().is_empty());
    }

    #[test]
    fn test_pipeline_failure_is_reported() {
        let pipeline = RecordingPipeline {
            fail: true,
            ..Default::default()
        };

        let err = run_build(&pipeline, PartialBuildConfig::default(), &Defaults::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::Pipeline(RenderError)));
        assert!(err.to_string().contains("renderer crashed"));
    }
}
