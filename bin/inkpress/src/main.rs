//! Inkpress CLI
//!
//! Validates and resolves the build configuration of an Inkpress blog.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use inkpress::{PartialBuildConfig, cmd::resolve::OutputFormat};

/// Command-line interface for Inkpress.
#[derive(Parser)]
#[command(
    name = "inkpress",
    version,
    about = "Build configuration resolver for static blogs"
)]
struct Cli {
    /// Path to configuration file [default: inkpress.toml, if present]
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate the configuration
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Print the resolved configuration for the build pipeline
    Resolve {
        /// Include draft posts
        #[arg(long, conflicts_with = "no_drafts")]
        drafts: bool,
        /// Exclude draft posts
        #[arg(long)]
        no_drafts: bool,
        /// Override the site URL (e.g., https://example.com)
        #[arg(long)]
        site_url: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
}

/// Command-line overrides as partial input; unset flags leave fields unset.
fn overrides(drafts: bool, no_drafts: bool, site_url: Option<String>) -> PartialBuildConfig {
    let mut input = PartialBuildConfig::default();
    if drafts {
        input = input.with_include_drafts(true);
    } else if no_drafts {
        input = input.with_include_drafts(false);
    }
    if let Some(url) = site_url {
        input = input.with_site_url(url);
    }
    input
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    inkpress::init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { strict } => {
            inkpress::cmd::check::run(cli.config.as_deref(), strict)?;
        }
        Commands::Resolve {
            drafts,
            no_drafts,
            site_url,
            format,
            output,
        } => {
            inkpress::cmd::resolve::run(
                cli.config.as_deref(),
                &overrides(drafts, no_drafts, site_url),
                format,
                output.as_deref(),
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["inkpress", "check", "--strict"];
        let cli = Cli::parse_from(args);

        assert!(cli.config.is_none());
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Check { strict } => {
                assert!(strict);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_resolve_defaults() {
        let args = ["inkpress", "resolve"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Resolve {
                drafts,
                no_drafts,
                site_url,
                format,
                output,
            } => {
                assert!(!drafts);
                assert!(!no_drafts);
                assert!(site_url.is_none());
                assert_eq!(format, OutputFormat::Json);
                assert!(output.is_none());
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_cli_resolve_with_overrides() {
        let args = [
            "inkpress",
            "resolve",
            "--drafts",
            "--site-url",
            "https://wisdom-blog.vercel.app",
            "--format",
            "toml",
            "--output",
            "resolved.toml",
        ];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Resolve {
                drafts,
                site_url,
                format,
                output,
                ..
            } => {
                assert!(drafts);
                assert_eq!(site_url.as_deref(), Some("https://wisdom-blog.vercel.app"));
                assert_eq!(format, OutputFormat::Toml);
                assert_eq!(output, Some(std::path::PathBuf::from("resolved.toml")));
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_cli_drafts_flags_conflict() {
        let args = ["inkpress", "resolve", "--drafts", "--no-drafts"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["inkpress", "-vvv", "check"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["inkpress", "--config", "blog.json", "check"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, Some(std::path::PathBuf::from("blog.json")));
    }

    #[test]
    fn test_overrides_leave_unset_fields_empty() {
        assert!(overrides(false, false, None).is_empty());

        let input = overrides(false, true, Some("https://example.com".to_string()));
        assert_eq!(input.markdown.include_drafts, Some(false));
        assert_eq!(input.site_url.as_deref(), Some("https://example.com"));

        let input = overrides(true, false, None);
        assert_eq!(input.markdown.include_drafts, Some(true));
    }
}
