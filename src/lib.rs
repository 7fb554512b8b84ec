//! Rosterbot - fantasy football chat assistant library
//!
//! This library implements the conversational core of a fantasy football
//! chat assistant: per-user session state, intent classification, the
//! multi-step flow engine, and the command actions behind each flow.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Per-user session storage, credentials, and cached directories
//! - `flow`: Message router, intent classifier, and flow state machine
//! - `commands`: The actions flows execute against the fantasy upstream
//! - `fantasy`: Fantasy data collaborator trait and the in-memory demo league
//! - `messaging`: Outbound message gateway abstraction
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rosterbot::commands::Context;
//! use rosterbot::config::Config;
//! use rosterbot::fantasy::DemoLeague;
//! use rosterbot::flow::Router;
//! use rosterbot::messaging::ConsoleMessenger;
//! use rosterbot::session::InMemorySessionStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = Context {
//!         sessions: Arc::new(InMemorySessionStore::new()),
//!         fantasy: Arc::new(DemoLeague::new()),
//!         messenger: Arc::new(ConsoleMessenger),
//!         config: Config::default(),
//!     };
//!     let router = Router::new(ctx);
//!     router.handle_message("user-1", "help").await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fantasy;
pub mod flow;
pub mod messaging;
pub mod session;

pub use config::Config;
pub use error::{Result, RosterbotError};
pub use flow::Router;
