//! Interactive research shell
//!
//! One [`Shell`] per terminal session. It owns the session context (loaded
//! document, conversation history), the routing mode, and the orchestrator,
//! and turns each input line into an [`Outcome`] for the caller to print.
//! Request failures render as failure text; the session itself never dies
//! on an error.

pub mod commands;
pub mod render;

pub use commands::{Command, CommandError, RoutingMode};

use std::path::Path;

use finsight_core::ContextBundle;
use tracing::{error, info};
use uuid::Uuid;

use crate::orchestrator::Orchestrator;
use crate::pdf;

/// What the caller should do with one handled input line
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text and read the next line
    Reply(String),
    /// Leave the shell
    Exit,
}

/// Session state driving the interactive loop
pub struct Shell {
    orchestrator: Orchestrator,
    ctx: ContextBundle,
    mode: RoutingMode,
    session_id: Uuid,
}

impl Shell {
    /// Start a fresh session around an orchestrator
    pub fn new(orchestrator: Orchestrator) -> Self {
        let session_id = Uuid::new_v4();
        info!(%session_id, "session started");
        Self {
            orchestrator,
            ctx: ContextBundle::new(),
            mode: RoutingMode::default(),
            session_id,
        }
    }

    /// The current routing mode
    pub fn mode(&self) -> RoutingMode {
        self.mode
    }

    /// The session identifier
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The session context
    pub fn context(&self) -> &ContextBundle {
        &self.ctx
    }

    /// Mutable session context
    pub fn context_mut(&mut self) -> &mut ContextBundle {
        &mut self.ctx
    }

    /// Handle one line of input
    ///
    /// Parse errors and request failures come back as reply text; this
    /// method itself never fails.
    pub async fn handle_line(&mut self, input: &str) -> Outcome {
        match Command::parse(input) {
            Ok(command) => self.execute(command).await,
            Err(CommandError::Empty) => Outcome::Reply(String::new()),
            Err(err) => Outcome::Reply(err.to_string()),
        }
    }

    async fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Mode(mode) => {
                self.mode = mode;
                info!(%mode, "routing mode changed");
                Outcome::Reply(format!("Routing mode set to {mode}."))
            }
            Command::Load(path) => Outcome::Reply(self.load_document(&path)),
            Command::Doc => Outcome::Reply(match self.ctx.document() {
                Some(document) => format!(
                    "Loaded document: '{}' ({} characters of text).",
                    document.name,
                    document.text.chars().count()
                ),
                None => "No document loaded. Use /load <path>.".to_string(),
            }),
            Command::Clear => {
                self.ctx.clear_document();
                self.ctx.clear_history();
                Outcome::Reply("Dropped the loaded document and conversation history.".to_string())
            }
            Command::Cache => {
                let entries = self.orchestrator.cache().len().await;
                Outcome::Reply(format!("Response cache holds {entries} entries."))
            }
            Command::Help => Outcome::Reply(Command::help_text().to_string()),
            Command::Exit => Outcome::Exit,
            Command::Query(text) => Outcome::Reply(self.run_query(&text).await),
        }
    }

    fn load_document(&mut self, path: &Path) -> String {
        match pdf::extract_document(path) {
            Ok(document) => {
                let chars = document.text.chars().count();
                let name = document.name.clone();
                info!(%name, chars, "document loaded");
                self.ctx.set_document(document);
                format!("Loaded '{name}' ({chars} characters of text).")
            }
            Err(err) => format!("Could not load the document: {err}"),
        }
    }

    async fn run_query(&mut self, query: &str) -> String {
        match self
            .orchestrator
            .respond(query, &self.ctx, self.mode.forced())
            .await
        {
            Ok(routed) => {
                self.ctx.record_exchange(query, routed.reply.text.clone());
                render::routed_reply(&routed)
            }
            Err(err) => {
                error!(error = %err, "request failed");
                format!("The request failed: {err}\nNothing was cached; you can ask again.")
            }
        }
    }
}
