//! Per-user session storage
//!
//! The store is the only shared mutable state in the bot. It maps an opaque
//! user identifier to a [`Session`] and offers lifecycle helpers with the
//! invariants the flow engine relies on: the selected league is always
//! derived from the selected team, and the cached league directory is
//! dropped whenever the team changes.
//!
//! The trait is injected so the in-memory map can be swapped for a real
//! datastore without touching flow logic.

use crate::fantasy::PendingTransaction;
use crate::flow::FlowState;
use chrono::{DateTime, Duration, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

pub mod types;
pub use types::{league_key_from_team_key, Credentials, Directory, Session};

/// Keyed storage from user id to [`Session`]
///
/// Implementations must guarantee atomic get/set per key. Only one in-flight
/// message per user is assumed, so no read-modify-write coordination beyond
/// that is required.
pub trait SessionStore: Send + Sync {
    /// Full session snapshot, if the user has one
    fn session(&self, id: &str) -> Option<Session>;

    /// Store linked-account tokens, creating the session if needed
    fn set_credentials(&self, id: &str, credentials: Credentials);

    /// Current tokens, if linked
    fn credentials(&self, id: &str) -> Option<Credentials>;

    /// Select a team
    ///
    /// Also sets the derived league and clears the cached league directory,
    /// atomically. The directory is league-scoped and becomes stale the
    /// moment the team changes.
    fn set_selected_team(&self, id: &str, team_key: &str);

    /// The selected team key, if any
    fn selected_team(&self, id: &str) -> Option<String>;

    /// The league of the selected team, if any
    fn selected_league(&self, id: &str) -> Option<String>;

    /// Cache the user's own team directory
    fn set_team_directory(&self, id: &str, directory: Directory);

    /// The user's own team directory, if cached
    fn team_directory(&self, id: &str) -> Option<Directory>;

    /// Cache the directory of all teams in the selected league
    fn set_league_directory(&self, id: &str, directory: Directory);

    /// The league team directory, if cached
    fn league_directory(&self, id: &str) -> Option<Directory>;

    /// Cache the most recent pending-transaction listing
    fn set_pending_transactions(&self, id: &str, transactions: Vec<PendingTransaction>);

    /// The cached pending transactions, in listing order
    fn pending_transactions(&self, id: &str) -> Vec<PendingTransaction>;

    /// Replace the active conversational flow
    fn set_state(&self, id: &str, state: FlowState);

    /// The active conversational flow, if any
    fn state(&self, id: &str) -> Option<FlowState>;

    /// End the active flow
    fn clear_state(&self, id: &str);

    /// Full session reset except credentials
    ///
    /// Clears the active flow, the team/league selection, both directories,
    /// and the pending-transaction cache.
    fn restart(&self, id: &str);

    /// Issue a one-time code that an auth service can exchange for this user
    fn issue_link_code(&self, id: &str, ttl_minutes: i64) -> String;

    /// Redeem a link code; single use, `None` if unknown or expired
    fn take_link_code(&self, code: &str) -> Option<String>;
}

/// In-memory [`SessionStore`] backed by a mutexed map
///
/// Sessions do not survive a process restart, which costs users a re-link
/// and a re-selection.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    link_codes: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        let session = sessions.entry(id.to_string()).or_insert_with(|| Session {
            id: id.to_string(),
            ..Session::default()
        });
        f(session)
    }

    fn read_session<R>(&self, id: &str, f: impl FnOnce(&Session) -> R) -> Option<R> {
        let sessions = self.sessions.lock().expect("session store poisoned");
        sessions.get(id).map(f)
    }
}

impl SessionStore for InMemorySessionStore {
    fn session(&self, id: &str) -> Option<Session> {
        self.read_session(id, |s| s.clone())
    }

    fn set_credentials(&self, id: &str, credentials: Credentials) {
        debug!(user = id, "storing credentials");
        self.with_session(id, |s| s.credentials = Some(credentials));
    }

    fn credentials(&self, id: &str) -> Option<Credentials> {
        self.read_session(id, |s| s.credentials.clone()).flatten()
    }

    fn set_selected_team(&self, id: &str, team_key: &str) {
        let league = league_key_from_team_key(team_key);
        debug!(user = id, team = team_key, league = %league, "selecting team");
        self.with_session(id, |s| {
            s.selected_team = Some(team_key.to_string());
            s.selected_league = Some(league);
            s.league_directory = None;
        });
    }

    fn selected_team(&self, id: &str) -> Option<String> {
        self.read_session(id, |s| s.selected_team.clone()).flatten()
    }

    fn selected_league(&self, id: &str) -> Option<String> {
        self.read_session(id, |s| s.selected_league.clone())
            .flatten()
    }

    fn set_team_directory(&self, id: &str, directory: Directory) {
        self.with_session(id, |s| s.team_directory = Some(directory));
    }

    fn team_directory(&self, id: &str) -> Option<Directory> {
        self.read_session(id, |s| s.team_directory.clone()).flatten()
    }

    fn set_league_directory(&self, id: &str, directory: Directory) {
        self.with_session(id, |s| s.league_directory = Some(directory));
    }

    fn league_directory(&self, id: &str) -> Option<Directory> {
        self.read_session(id, |s| s.league_directory.clone())
            .flatten()
    }

    fn set_pending_transactions(&self, id: &str, transactions: Vec<PendingTransaction>) {
        self.with_session(id, |s| s.pending_transactions = transactions);
    }

    fn pending_transactions(&self, id: &str) -> Vec<PendingTransaction> {
        self.read_session(id, |s| s.pending_transactions.clone())
            .unwrap_or_default()
    }

    fn set_state(&self, id: &str, state: FlowState) {
        debug!(user = id, state = state.name(), "set conversation state");
        self.with_session(id, |s| s.state = Some(state));
    }

    fn state(&self, id: &str) -> Option<FlowState> {
        self.read_session(id, |s| s.state.clone()).flatten()
    }

    fn clear_state(&self, id: &str) {
        debug!(user = id, "clear conversation state");
        self.with_session(id, |s| s.state = None);
    }

    fn restart(&self, id: &str) {
        debug!(user = id, "session restart");
        self.with_session(id, |s| {
            s.state = None;
            s.selected_team = None;
            s.selected_league = None;
            s.team_directory = None;
            s.league_directory = None;
            s.pending_transactions.clear();
        });
    }

    fn issue_link_code(&self, id: &str, ttl_minutes: i64) -> String {
        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(char::from)
            .collect::<String>()
            .to_uppercase();
        let expires_at = Utc::now() + Duration::minutes(ttl_minutes);
        self.link_codes
            .lock()
            .expect("link codes poisoned")
            .insert(code.clone(), (id.to_string(), expires_at));
        code
    }

    fn take_link_code(&self, code: &str) -> Option<String> {
        let mut codes = self.link_codes.lock().expect("link codes poisoned");
        let (user, expires_at) = codes.remove(code)?;
        if Utc::now() >= expires_at {
            return None;
        }
        Some(user)
    }
}
