//! Rosterbot - fantasy football chat assistant
//!
//! Main entry point. Runs the conversation router against the in-memory
//! demo league behind a readline console loop.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rosterbot::cli::Cli;
use rosterbot::commands::Context;
use rosterbot::config::Config;
use rosterbot::fantasy::DemoLeague;
use rosterbot::flow::Router;
use rosterbot::messaging::ConsoleMessenger;
use rosterbot::session::{InMemorySessionStore, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config = Config::load(&cli.config)?;
    config.validate()?;

    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    // The console session starts pre-linked so every command is usable
    // right away; send "restart" to exercise the reset path.
    sessions.set_credentials(&cli.user, DemoLeague::demo_credentials());

    let ctx = Context {
        sessions,
        fantasy: Arc::new(DemoLeague::new()),
        messenger: Arc::new(ConsoleMessenger),
        config,
    };
    let router = Router::new(ctx);

    println!(
        "{}",
        "🏈 Rosterbot console. Send \"help\" for commands, Ctrl-D to quit.".bold()
    );

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline(&format!("{} ", "you>".cyan().bold())) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;
                if let Err(e) = router.handle_message(&cli.user, trimmed).await {
                    tracing::error!(error = %e, "message handling failed");
                    eprintln!("{} {}", "error:".red().bold(), e);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "readline failed");
                break;
            }
        }
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "rosterbot=debug"
    } else {
        "rosterbot=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
