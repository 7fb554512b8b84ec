//! Outbound messaging collaborator
//!
//! The flow engine treats message delivery as fire-and-forget: failures are
//! logged at the call site and never retried inline.

use crate::error::Result;
use async_trait::async_trait;
use colored::Colorize;

/// Delivers replies to a user over whatever chat gateway is wired in
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send one message to one user
    async fn send(&self, to: &str, body: &str) -> Result<()>;
}

/// Messenger that prints replies to the terminal
///
/// Used by the interactive REPL in place of a real chat gateway.
pub struct ConsoleMessenger;

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send(&self, _to: &str, body: &str) -> Result<()> {
        println!("{} {}", "bot>".green().bold(), body);
        Ok(())
    }
}
