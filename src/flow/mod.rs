//! Conversational flow layer
//!
//! The [`Router`] is the single entry point for inbound messages. It handles
//! the global commands that work from any state, keeps credentials fresh,
//! and hands everything else to either the active flow or the intent
//! classifier.

pub mod engine;
pub mod intent;
pub mod lineup;
pub mod state;

pub use intent::IntentClassifier;
pub use state::FlowState;

use crate::commands::{meta, Context};
use crate::error::Result;
use tracing::{debug, info, warn};

/// Per-message dispatcher
pub struct Router {
    ctx: Context,
    classifier: IntentClassifier,
}

impl Router {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            classifier: IntentClassifier::new(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Process one inbound message end to end
    ///
    /// Exactly one flow transition runs per call. Globals (`restart`,
    /// `help`, `link`) pre-empt any active flow; everything else goes to
    /// the active flow when one exists, otherwise through authentication
    /// and the classifier.
    pub async fn handle_message(&self, user: &str, raw: &str) -> Result<()> {
        let body = raw.trim();
        if body.is_empty() {
            return Ok(());
        }
        let lower = body.to_lowercase();
        info!(user, "inbound message");

        // Globals work from any state, including mid-flow.
        match lower.as_str() {
            "restart" => {
                self.ctx.sessions.restart(user);
                meta::restarted(&self.ctx, user).await;
                return Ok(());
            }
            "help" => {
                self.ctx.sessions.clear_state(user);
                return engine::run(&self.ctx, user, body, FlowState::Help).await;
            }
            "link" => {
                self.ctx.sessions.clear_state(user);
                return engine::run(&self.ctx, user, body, FlowState::Link).await;
            }
            _ => {}
        }

        if let Some(active) = self.ctx.sessions.state(user) {
            return engine::run(&self.ctx, user, body, active).await;
        }

        // No active flow: require a linked account before classifying,
        // refreshing the token silently when it has expired.
        let Some(credentials) = self.ctx.sessions.credentials(user) else {
            return engine::run(&self.ctx, user, body, FlowState::AuthRequired).await;
        };
        if credentials.is_expired() {
            debug!(user, "access token expired, refreshing");
            match self
                .ctx
                .fantasy
                .refresh_credentials(&credentials.refresh_token)
                .await
            {
                Ok(fresh) => self.ctx.sessions.set_credentials(user, fresh),
                Err(e) => {
                    warn!(user, error = %e, "token refresh failed");
                    return engine::run(&self.ctx, user, body, FlowState::TokenExpired).await;
                }
            }
        }

        let state = self.classifier.classify(body, &lower);
        self.ctx.sessions.set_state(user, state.clone());
        engine::run(&self.ctx, user, body, state).await
    }
}
