use async_trait::async_trait;
use rosterbot::commands::Context;
use rosterbot::config::Config;
use rosterbot::error::Result;
use rosterbot::fantasy::DemoLeague;
use rosterbot::flow::Router;
use rosterbot::messaging::Messenger;
use rosterbot::session::{InMemorySessionStore, SessionStore};
use std::sync::{Arc, Mutex};

pub const USER: &str = "user-1";

/// Messenger that captures every outbound body for assertions
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<String>>,
}

impl RecordingMessenger {
    pub fn all(&self) -> Vec<String> {
        self.sent.lock().expect("messenger lock").clone()
    }

    pub fn last(&self) -> String {
        self.all().last().cloned().unwrap_or_default()
    }

    pub fn clear(&self) {
        self.sent.lock().expect("messenger lock").clear();
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, _to: &str, body: &str) -> Result<()> {
        self.sent
            .lock()
            .expect("messenger lock")
            .push(body.to_string());
        Ok(())
    }
}

/// A router wired to the demo league with a recording messenger
pub struct Harness {
    pub router: Router,
    pub messages: Arc<RecordingMessenger>,
    pub sessions: Arc<InMemorySessionStore>,
}

impl Harness {
    /// Process one message as the test user
    pub async fn send(&self, text: &str) {
        self.router
            .handle_message(USER, text)
            .await
            .expect("message handling failed");
    }

    /// Select the first demo team, clearing the chatter it produces
    pub async fn pick_first_team(&self) {
        self.send("choose team").await;
        self.send("1").await;
        self.messages.clear();
    }
}

/// Harness whose test user is already linked
#[allow(dead_code)]
pub fn linked_harness() -> Harness {
    let harness = unlinked_harness();
    harness
        .sessions
        .set_credentials(USER, DemoLeague::demo_credentials());
    harness
}

/// Harness whose test user has never linked an account
#[allow(dead_code)]
pub fn unlinked_harness() -> Harness {
    let sessions = Arc::new(InMemorySessionStore::new());
    let messages = Arc::new(RecordingMessenger::default());
    let ctx = Context {
        sessions: sessions.clone(),
        fantasy: Arc::new(DemoLeague::new()),
        messenger: messages.clone(),
        config: Config::default(),
    };
    Harness {
        router: Router::new(ctx),
        messages,
        sessions,
    }
}
