use std::path::PathBuf;

use assistant_core::OperationKind;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "research-assistant", version, about = "Send text to a local research assistant service and keep notes")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Path to a RON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the research service
    #[arg(long, global = true, env = "RESEARCH_ASSISTANT_URL")]
    pub base_url: Option<String>,

    /// Directory holding the notes storage and log file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging on the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one operation on TEXT (or stdin) and print the result
    Process {
        #[arg(short, long, value_parser = parse_operation)]
        operation: OperationKind,
        text: Option<String>,
    },
    /// Park a selection for the panel to process when it next opens
    Capture {
        #[arg(short, long, value_parser = parse_operation)]
        operation: OperationKind,
        text: String,
    },
    /// Manage the persisted notes
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },
    /// Interactive side panel
    Panel,
    /// Query the service's auxiliary endpoints
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum NotesAction {
    Show,
    Save { text: String },
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    Export {
        /// Directory for the exported file
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Health,
    History,
    Stats,
    ClearHistory,
}

fn parse_operation(raw: &str) -> Result<OperationKind, String> {
    raw.parse().map_err(|err: assistant_core::ValidationError| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_process_with_operation() {
        let cli = Cli::try_parse_from([
            "research-assistant",
            "process",
            "--operation",
            "KeyPoints",
            "some selected text",
        ])
        .unwrap();

        match cli.command {
            Command::Process { operation, text } => {
                assert_eq!(operation, OperationKind::Keypoints);
                assert_eq!(text.as_deref(), Some("some selected text"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_operation() {
        let err = Cli::try_parse_from(["research-assistant", "process", "-o", "translate", "x"])
            .unwrap_err();
        assert!(err.to_string().contains("unknown operation"));
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "research-assistant",
            "notes",
            "clear",
            "--yes",
            "--base-url",
            "http://127.0.0.1:9000",
        ])
        .unwrap();

        assert_eq!(cli.global.base_url.as_deref(), Some("http://127.0.0.1:9000"));
        match cli.command {
            Command::Notes { action } => assert_eq!(action, NotesAction::Clear { yes: true }),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
