//! Session data types shared by the store and the flow engine

use crate::fantasy::PendingTransaction;
use crate::flow::FlowState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OAuth token bundle for a linked account
///
/// Absent from a [`Session`] means the user is unauthenticated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token passed to the fantasy collaborator
    pub access_token: String,
    /// Token used for the silent refresh when the access token expires
    pub refresh_token: String,
    /// When the access token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl Credentials {
    /// Whether the access token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Ordered name-to-identifier mapping with case-insensitive lookup
///
/// Used for both the user's own teams and the teams of the selected league.
/// Insertion order is preserved so numbered menus stay stable for the whole
/// lifetime of a flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    entries: Vec<(String, String)>,
}

impl Directory {
    /// Build a directory from (display name, identifier) pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Whether the directory has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display names in retrieval order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Resolve a display name to its identifier (case-insensitive exact match)
    pub fn get(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(n, _)| n.to_lowercase() == wanted)
            .map(|(_, id)| id.as_str())
    }

    /// Entry at a zero-based position, in retrieval order
    pub fn at(&self, index: usize) -> Option<(&str, &str)> {
        self.entries
            .get(index)
            .map(|(n, id)| (n.as_str(), id.as_str()))
    }

    /// Iterate over (name, identifier) pairs in retrieval order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, id)| (n.as_str(), id.as_str()))
    }
}

/// All conversation-scoped data for one user
///
/// One session per opaque user identifier (the chat gateway's sender id).
/// Everything here is ephemeral; losing it only costs the user a re-link
/// and a re-selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Opaque user identifier, unique key in the store
    pub id: String,
    /// Linked-account tokens; `None` means unauthenticated
    pub credentials: Option<Credentials>,
    /// Team the user picked via the choose-team flow
    pub selected_team: Option<String>,
    /// League containing `selected_team`; always derived, never set directly
    pub selected_league: Option<String>,
    /// The user's own teams, name to team key
    pub team_directory: Option<Directory>,
    /// All teams in the selected league; invalidated when the team changes
    pub league_directory: Option<Directory>,
    /// Transactions cached by the last listing, addressed by 1-based position
    pub pending_transactions: Vec<PendingTransaction>,
    /// Active conversational flow; `None` means idle
    pub state: Option<FlowState>,
}

/// Extract the league key from a team key
///
/// Team keys embed their league (`"461.l.12345.t.7"` belongs to league
/// `"461.l.12345"`), so the selected league is always derivable from the
/// selected team.
pub fn league_key_from_team_key(team_key: &str) -> String {
    match team_key.split_once(".t.") {
        Some((league, _)) => league.to_string(),
        None => team_key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_credentials_expiry() {
        let live = Credentials {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: Utc::now() + Duration::hours(1),
        };
        assert!(!live.is_expired());

        let stale = Credentials {
            expires_at: Utc::now() - Duration::seconds(1),
            ..live
        };
        assert!(stale.is_expired());
    }

    #[test]
    fn test_directory_preserves_order() {
        let dir = Directory::from_pairs(vec![
            ("Bench Warmers".to_string(), "461.l.1.t.2".to_string()),
            ("Armchair Allstars".to_string(), "461.l.1.t.4".to_string()),
        ]);
        assert_eq!(dir.names(), vec!["Bench Warmers", "Armchair Allstars"]);
        assert_eq!(dir.at(1), Some(("Armchair Allstars", "461.l.1.t.4")));
    }

    #[test]
    fn test_directory_lookup_is_case_insensitive() {
        let dir = Directory::from_pairs(vec![(
            "Bench Warmers".to_string(),
            "461.l.1.t.2".to_string(),
        )]);
        assert_eq!(dir.get("bench warmers"), Some("461.l.1.t.2"));
        assert_eq!(dir.get("  BENCH WARMERS "), Some("461.l.1.t.2"));
        assert_eq!(dir.get("Bench"), None);
    }

    #[test]
    fn test_league_key_from_team_key() {
        assert_eq!(league_key_from_team_key("461.l.12345.t.7"), "461.l.12345");
        assert_eq!(league_key_from_team_key("461.l.12345"), "461.l.12345");
    }
}
