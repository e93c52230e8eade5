//! This file defines the command-line interface (CLI) for the autolink application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "autolink",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Turn words into links in Markdown",
    long_about = "Autolink rewrites configured words and phrases in Markdown text into richer markup, typically links. Text that is already inside a link, an image, an inline code span or a code block is never changed. Rules are applied in the order they appear in the configuration file, each one seeing the output of the previous one.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the autolink crates)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `autolink` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrites an input file or stdin using the configured link rules.
    #[command(about = "Rewrites an input file or stdin using the configured link rules.")]
    Rewrite(RewriteCommand),

    /// Compiles a rule file and reports rules that would be dropped.
    #[command(about = "Compiles a rule file and reports rules that would be dropped.")]
    Check(CheckCommand),
}

/// Arguments for the `rewrite` command.
#[derive(Parser, Debug)]
pub struct RewriteCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write rewritten output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Path to the link rule file (YAML or JSON).
    #[arg(long = "config", short = 'c', value_name = "FILE", env = "AUTOLINK_CONFIG", help = "Path to the link rule file (YAML or JSON).")]
    pub config: Option<PathBuf>,

    /// Disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// Show a unified diff instead of the rewritten text.
    #[arg(long, short = 'D', help = "Show a unified diff instead of the rewritten text.")]
    pub diff: bool,

    /// Print how many spans were rewritten or skipped.
    #[arg(long, short = 's', help = "Print a rewrite summary to stderr.")]
    pub summary: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Path to the link rule file (YAML or JSON).
    #[arg(long = "config", short = 'c', value_name = "FILE", env = "AUTOLINK_CONFIG", help = "Path to the link rule file (YAML or JSON).")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rewrite_flags() {
        let cli = Cli::try_parse_from([
            "autolink", "-q", "rewrite", "-c", "links.yaml", "-x", "a,b", "--diff",
        ])
        .unwrap();
        assert!(cli.quiet);
        match cli.command {
            Commands::Rewrite(cmd) => {
                assert_eq!(cmd.config, Some(PathBuf::from("links.yaml")));
                assert_eq!(cmd.disable, vec!["a".to_string(), "b".to_string()]);
                assert!(cmd.diff);
                assert!(!cmd.summary);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
