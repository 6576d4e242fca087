//! FinSight research shell CLI
//!
//! An interactive terminal assistant for financial research: company
//! analysis, PDF report analysis, research planning, and general chat.
//!
//! # Usage
//!
//! ```bash
//! # The Groq API key is required; startup fails without it
//! export GROQ_API_KEY="gsk_..."
//!
//! # Optional overrides
//! export RESEARCH_MODEL="llama-3.3-70b-versatile"
//!
//! # Run the shell
//! cargo run --bin research-bot -p finsight-research
//! ```

use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use finsight_llm::providers::{GroqConfig, GroqProvider};
use finsight_llm::CompletionClient;
use finsight_research::config::AssistantConfig;
use finsight_research::orchestrator::Orchestrator;
use finsight_research::shell::{Outcome, Shell};

fn print_banner() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║                   FinSight Research Shell                    ║
║                                                              ║
║  Commands:                                                   ║
║    /mode <name>   - Pin queries to one agent (or auto)       ║
║    /load <path>   - Load a PDF report                        ║
║    /cache         - Response cache statistics                ║
║    /help          - Show all commands                        ║
║    /exit          - Leave the shell                          ║
║                                                              ║
║  Or just ask:                                                ║
║    "Analyze Apple's current performance and provide a        ║
║     BUY/HOLD/SELL recommendation"                            ║
╚══════════════════════════════════════════════════════════════╝
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| {
            "warn,research_bot=info,finsight_research=info".to_string()
        }))
        .init();

    print_banner();

    let config = AssistantConfig::default().with_env_model();
    config.validate().context("invalid assistant configuration")?;

    // The one secret credential; a missing key fails startup rather than
    // the first request
    let groq_config = GroqConfig::from_env()
        .context("set GROQ_API_KEY to your Groq API key")?
        .with_timeout(config.request_timeout.as_secs());

    println!("Configuration:");
    println!("  Model: {}", config.model);
    println!(
        "  Web search: {}",
        if config.search.is_available() {
            "available"
        } else {
            "not available"
        }
    );
    println!();

    let provider = GroqProvider::with_config(groq_config)?;
    let client = Arc::new(CompletionClient::new(
        Arc::new(provider),
        config.retry_policy(),
    ));

    let orchestrator = Orchestrator::new(client, Arc::new(config))?;
    let mut shell = Shell::new(orchestrator);
    println!("Ready!\n");

    // Run REPL
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!(">>> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match shell.handle_line(input).await {
            Outcome::Reply(text) => println!("{text}\n"),
            Outcome::Exit => {
                println!("Goodbye!");
                break;
            }
        }
    }

    Ok(())
}
