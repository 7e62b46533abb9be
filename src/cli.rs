//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `flowscribe`.
#[derive(Debug, Parser)]
#[command(
    name = "flowscribe",
    version,
    about = "Turn code into flowcharts, pseudocode, complexity estimates, and test cases"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze code read from a file or standard input.
    Analyze {
        /// File holding the code; standard input when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Analyze a hosted repository and save the result to history.
    Import {
        /// Repository URL, e.g. `https://github.com/owner/repo`.
        url: String,
    },
    /// List saved analyses, newest first.
    History {
        /// Keep running and reprint the list whenever it changes.
        #[arg(long)]
        watch: bool,
    },
    /// Create a shareable link for one saved analysis.
    Share {
        /// Id of the history record to share.
        history_id: String,
    },
    /// View a shared analysis by id, counting the view.
    Shared {
        /// Id of the share to view.
        share_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_and_without_a_file() {
        let cli = Cli::parse_from(["flowscribe", "analyze"]);
        assert!(matches!(cli.command, Command::Analyze { file: None }));

        let cli = Cli::parse_from(["flowscribe", "analyze", "--file", "main.js"]);
        let Command::Analyze { file: Some(path) } = cli.command else {
            panic!("expected a file path");
        };
        assert_eq!(path, PathBuf::from("main.js"));
    }

    #[test]
    fn parses_import_with_a_url() {
        let cli = Cli::parse_from(["flowscribe", "import", "https://github.com/acme/app"]);
        let Command::Import { url } = cli.command else {
            panic!("expected import");
        };
        assert_eq!(url, "https://github.com/acme/app");
    }

    #[test]
    fn parses_history_watch_flag() {
        let cli = Cli::parse_from(["flowscribe", "history"]);
        assert!(matches!(cli.command, Command::History { watch: false }));

        let cli = Cli::parse_from(["flowscribe", "history", "--watch"]);
        assert!(matches!(cli.command, Command::History { watch: true }));
    }

    #[test]
    fn parses_share_and_shared_ids() {
        let cli = Cli::parse_from(["flowscribe", "share", "hist-1"]);
        let Command::Share { history_id } = cli.command else {
            panic!("expected share");
        };
        assert_eq!(history_id, "hist-1");

        let cli = Cli::parse_from(["flowscribe", "shared", "share-1"]);
        let Command::Shared { share_id } = cli.command else {
            panic!("expected shared");
        };
        assert_eq!(share_id, "share-1");
    }
}
