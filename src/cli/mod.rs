//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for glporter using clap.

pub mod commands;

use crate::domain::{GitLabError, PorterError};
use clap::{Parser, Subcommand};

/// glporter - GitLab project export/import driver
#[derive(Parser, Debug)]
#[command(name = "glporter")]
#[command(version, about, long_about = None)]
#[command(author = "glporter Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "glporter.toml", env = "GLPORTER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GLPORTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a project and print its download links
    Export(commands::export::ExportArgs),

    /// Import a project archive, overwriting the target project
    Import(commands::import::ImportArgs),

    /// List projects whose path matches a pattern
    List(commands::list::ListArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

/// Process exit code for a failed command
///
/// - 1: the transfer itself failed (rejected, stalled, failed, timed out)
/// - 2: configuration or input error
/// - 4: GitLab could not be reached
/// - 5: any other fatal error
/// - 130: interrupted by a shutdown signal
pub fn exit_code_for(error: &PorterError) -> i32 {
    match error {
        PorterError::Configuration(_) | PorterError::Validation(_) => 2,
        PorterError::GitLab(GitLabError::ConnectionFailed(_)) => 4,
        PorterError::GitLab(_) => 1,
        PorterError::Cancelled => 130,
        PorterError::Serialization(_) | PorterError::Io(_) | PorterError::Other(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["glporter", "export", "group/app"]);
        assert_eq!(cli.config, "glporter.toml");
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.project, "group/app");
                assert!(args.max_stall_retries.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_export_with_retries() {
        let cli = Cli::parse_from(["glporter", "export", "group/app", "--max-stall-retries", "3"]);
        match cli.command {
            Commands::Export(args) => assert_eq!(args.max_stall_retries, Some(3)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_import() {
        let cli = Cli::parse_from(["glporter", "import", "group/app", "/tmp/app.tar.gz"]);
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.project, "group/app");
                assert_eq!(args.archive, PathBuf::from("/tmp/app.tar.gz"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["glporter", "list", "infra/.*", "--all"]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.pattern, "infra/.*");
                assert!(args.all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_list_defaults() {
        let cli = Cli::parse_from(["glporter", "list"]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.pattern, "");
                assert!(!args.all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["glporter", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["glporter", "--log-level", "debug", "list"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&PorterError::Configuration("x".into())), 2);
        assert_eq!(exit_code_for(&PorterError::Validation("x".into())), 2);
        assert_eq!(
            exit_code_for(&GitLabError::ConnectionFailed("refused".into()).into()),
            4
        );
        assert_eq!(
            exit_code_for(
                &GitLabError::Rejected {
                    operation: "export of g/p".into(),
                    status: 403,
                    body: String::new(),
                }
                .into()
            ),
            1
        );
        assert_eq!(exit_code_for(&PorterError::Cancelled), 130);
        assert_eq!(exit_code_for(&PorterError::Io("x".into())), 5);
    }
}
