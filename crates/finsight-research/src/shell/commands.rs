//! Command parsing for the research shell
//!
//! Lines starting with `/` are commands; everything else is a query routed
//! through the orchestrator.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::intent::IntentLabel;

/// How the shell resolves a query to an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingMode {
    /// Classify each query automatically
    #[default]
    Auto,

    /// Pin every query to one agent, skipping classification
    Forced(IntentLabel),
}

impl RoutingMode {
    /// The pinned label, if any
    pub fn forced(self) -> Option<IntentLabel> {
        match self {
            RoutingMode::Auto => None,
            RoutingMode::Forced(label) => Some(label),
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingMode::Auto => f.write_str("auto"),
            RoutingMode::Forced(label) => write!(f, "{label}"),
        }
    }
}

/// Errors from parsing one line of shell input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command '/{0}' (try /help)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown mode '{0}' (modes: auto, company, pdf, research, chat)")]
    UnknownMode(String),
}

/// Parsed line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch the routing mode
    Mode(RoutingMode),
    /// Load a PDF into the session context
    Load(PathBuf),
    /// Show the loaded document
    Doc,
    /// Drop the document and conversation history
    Clear,
    /// Show cache statistics
    Cache,
    /// Show help
    Help,
    /// Leave the shell
    Exit,
    /// Natural language query (not a command)
    Query(String),
}

impl Command {
    /// Parse one line of user input
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        // Bare "exit" works like /exit; everything else without a slash is
        // a query
        if input.eq_ignore_ascii_case("exit") {
            return Ok(Command::Exit);
        }
        if !input.starts_with('/') {
            return Ok(Command::Query(input.to_string()));
        }

        let parts: Vec<&str> = input[1..].split_whitespace().collect();
        if parts.is_empty() {
            return Err(CommandError::Empty);
        }

        let cmd = parts[0].to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "mode" | "m" => {
                let arg = args
                    .first()
                    .ok_or(CommandError::Usage("/mode auto|company|pdf|research|chat"))?;
                Ok(Command::Mode(parse_mode(arg)?))
            }
            "load" | "l" => {
                if args.is_empty() {
                    return Err(CommandError::Usage("/load <path-to-pdf>"));
                }
                // Paths may contain spaces
                Ok(Command::Load(PathBuf::from(args.join(" "))))
            }
            "doc" => Ok(Command::Doc),
            "clear" | "cls" => Ok(Command::Clear),
            "cache" => Ok(Command::Cache),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(CommandError::Unknown(cmd)),
        }
    }

    /// Help text listing all commands
    pub fn help_text() -> &'static str {
        r#"
FinSight Research Shell
=======================

Routing:
  /mode auto             Classify each query automatically (default)
  /mode company          Every query goes to the company analyzer
  /mode pdf              Every query goes to the document analyzer
  /mode research         Every query goes to the research recommender
  /mode chat             Every query goes to general chat

Documents:
  /load <path>           Load a PDF into the session
  /doc                   Show the loaded document

Session:
  /clear                 Drop the document and conversation history
  /cache                 Show response cache statistics
  /help                  Show this help
  /exit                  Leave the shell (also /quit or plain 'exit')

Aliases:
  /m = /mode    /l = /load    /h = /help    /q = /exit

Anything else is a question:
  - "Analyze Apple's current performance and provide a BUY/HOLD/SELL recommendation"
  - "Summarize the revenue trend in the loaded report"
  - "How should I start researching semiconductor stocks?"
"#
    }
}

fn parse_mode(arg: &str) -> Result<RoutingMode, CommandError> {
    match arg.to_lowercase().as_str() {
        "auto" => Ok(RoutingMode::Auto),
        "company" => Ok(RoutingMode::Forced(IntentLabel::CompanyAnalysis)),
        "pdf" => Ok(RoutingMode::Forced(IntentLabel::PdfAnalysis)),
        "research" => Ok(RoutingMode::Forced(IntentLabel::ResearchRecommendation)),
        "chat" => Ok(RoutingMode::Forced(IntentLabel::GeneralChat)),
        other => Err(CommandError::UnknownMode(other.to_string())),
    }
}
