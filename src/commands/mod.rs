//! Command actions invoked by the flow engine
//!
//! Each submodule holds the effectful operations for one command family:
//! it calls the fantasy collaborator, formats the reply, and sends it.
//! Flow bookkeeping (what state comes next, what clears it) stays in the
//! engine; these functions only do the work of a single step.

use crate::config::Config;
use crate::fantasy::FantasyApi;
use crate::messaging::Messenger;
use crate::session::SessionStore;
use std::sync::Arc;
use tracing::warn;

pub mod available;
pub mod lineup;
pub mod meta;
pub mod roster;
pub mod roster_moves;
pub mod scoreboard;
pub mod standings;
pub mod teams;
pub mod trade;
pub mod transactions;

/// Shared collaborators handed to every command
///
/// The stores and clients are trait objects so tests can swap in fakes
/// without touching flow logic.
#[derive(Clone)]
pub struct Context {
    /// Per-user session storage
    pub sessions: Arc<dyn SessionStore>,
    /// Fantasy data upstream
    pub fantasy: Arc<dyn FantasyApi>,
    /// Outbound chat gateway
    pub messenger: Arc<dyn Messenger>,
    /// Bot configuration
    pub config: Config,
}

impl Context {
    /// Send a reply, logging (not propagating) delivery failures
    ///
    /// Delivery is fire-and-forget from the flow's perspective; a dropped
    /// reply must not abort or retry the step that produced it.
    pub async fn deliver(&self, to: &str, body: &str) {
        if let Err(e) = self.messenger.send(to, body).await {
            warn!(user = to, error = %e, "failed to deliver reply");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fantasy::DemoLeague;
    use crate::messaging::MockMessenger;
    use crate::session::InMemorySessionStore;
    use anyhow::anyhow;

    #[tokio::test]
    async fn test_deliver_swallows_messenger_failure() {
        let mut messenger = MockMessenger::new();
        messenger
            .expect_send()
            .times(1)
            .returning(|_, _| Err(anyhow!("gateway down")));

        let ctx = Context {
            sessions: Arc::new(InMemorySessionStore::new()),
            fantasy: Arc::new(DemoLeague::new()),
            messenger: Arc::new(messenger),
            config: Config::default(),
        };
        // Must not panic or propagate.
        ctx.deliver("u1", "hello").await;
    }
}
