use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg, RuleArg};

/// Rule-based batch file renaming with preview and undo.
///
/// Without a subcommand, starts an interactive menu over PATH.
#[derive(Parser, Debug)]
#[command(name = "renbatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory to work in; a file means its parent directory
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "RENBATCH_YES")]
    pub yes: bool,

    /// Preview format (defaults to the configured one)
    #[arg(long, global = true, value_enum)]
    pub preview: Option<PreviewArg>,

    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan, preview and apply a single rule without the interactive menu
    Rename {
        /// Rule used to locate the text to replace
        #[arg(long, value_enum)]
        rule: RuleArg,

        /// Number of characters (prefix, suffix, slice, after-n, before-n)
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// 0-based start position (slice)
        #[arg(short = 'p', long, allow_negative_numbers = true)]
        pos: Option<i64>,

        /// Literal marker text (after, before, after-n, before-n)
        #[arg(short = 'm', long, allow_hyphen_values = true)]
        marker: Option<String>,

        /// Text that replaces the matched part; empty deletes it
        #[arg(short = 'r', long = "replace", default_value = "", allow_hyphen_values = true)]
        replacement: String,

        /// Show the preview without renaming anything
        #[arg(long)]
        dry_run: bool,

        /// Output format for the result
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Directory to rename in; a file means its parent directory
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,

        /// Write the script into this directory instead of stdout
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
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
    fn test_parse_rename_with_negative_and_hyphen_values() {
        let cli = Cli::try_parse_from([
            "renbatch", "rename", "--rule", "before-n", "--marker", "-", "--count", "-2",
            "--replace", "-x",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Rename {
                rule,
                count,
                marker,
                replacement,
                ..
            }) => {
                assert_eq!(rule, RuleArg::BeforeN);
                assert_eq!(count, Some(-2));
                assert_eq!(marker.as_deref(), Some("-"));
                assert_eq!(replacement, "-x");
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_bare_path_starts_shell() {
        let cli = Cli::try_parse_from(["renbatch", "--yes", "/tmp/photos"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.yes);
        assert_eq!(cli.path, Some(PathBuf::from("/tmp/photos")));
    }
}
