//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// plantid CLI - Recognize plants from photos and browse past results.
#[derive(Debug, Parser)]
#[command(name = "plantid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PLANTID_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names and IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a photo to the recognition agent and record the result
    Recognize(RecognizeArgs),

    /// Run the extractor over a saved agent response
    Extract(ExtractArgs),

    /// Browse and edit the recognition history
    History(HistoryArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the recognize command.
#[derive(Debug, Parser)]
pub struct RecognizeArgs {
    /// JPEG photo to recognize
    pub image: PathBuf,

    /// Image reference stored in the history (defaults to a file:// URI)
    #[arg(long)]
    pub image_uri: Option<String>,

    /// Do not record the result in the history
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Response file, or `-` / nothing for stdin
    pub input: Option<String>,

    /// Record the result in the history
    #[arg(long, requires = "image")]
    pub save: bool,

    /// Image reference to record with the result
    #[arg(long)]
    pub image: Option<String>,

    /// Report which payload shape and strategy were used
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for history management.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub action: HistoryAction,
}

/// History actions.
#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List entries, newest first
    List {
        /// Maximum number of entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Find entries by common or scientific name
    Search {
        /// Case-insensitive search text
        query: String,
    },

    /// Show a stored result
    Show {
        /// Entry ID
        id: String,
    },

    /// Remove entries
    Remove {
        /// Entry IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete the whole history
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_command() {
        let cli = Cli::parse_from(["plantid", "recognize", "mai.jpg", "--no-save"]);
        match cli.command {
            Command::Recognize(args) => {
                assert_eq!(args.image, PathBuf::from("mai.jpg"));
                assert!(args.no_save);
                assert!(args.image_uri.is_none());
            }
            _ => panic!("Expected Recognize command"),
        }
    }

    #[test]
    fn test_extract_save_requires_image() {
        assert!(Cli::try_parse_from(["plantid", "extract", "resp.txt", "--save"]).is_err());

        let cli = Cli::parse_from([
            "plantid",
            "extract",
            "-",
            "--save",
            "--image",
            "file:///mai.jpg",
        ]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.input.as_deref(), Some("-"));
                assert_eq!(args.image.as_deref(), Some("file:///mai.jpg"));
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_history_subcommands() {
        let cli = Cli::parse_from(["plantid", "--format", "json", "history", "search", "sen"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::History(HistoryArgs {
                action: HistoryAction::Search { query },
            }) => assert_eq!(query, "sen"),
            _ => panic!("Expected history search"),
        }

        assert!(Cli::try_parse_from(["plantid", "history", "remove"]).is_err());
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["plantid", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force: true }
            })
        ));
    }
}
