//! Fantasy data collaborator
//!
//! This module defines the [`FantasyApi`] trait the flow engine calls for
//! everything league-related, along with the domain types crossing that
//! boundary. The real upstream speaks REST/XML; none of that leaks in here.
//! A self-contained [`demo::DemoLeague`] implementation backs the console
//! REPL and the integration tests.

use crate::error::Result;
use crate::session::{Credentials, Directory};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod demo;
pub use demo::DemoLeague;

/// One rostered player as shown in roster listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    /// Full display name
    pub name: String,
    /// Display position, e.g. `QB` or `W/R/T`
    pub position: String,
}

/// A resolved player, addressable in roster-changing calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Upstream player key used in all effectful calls
    pub player_key: String,
    /// Full display name
    pub name: String,
    /// Display position
    pub position: String,
    /// Pro team abbreviation, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_abbr: Option<String>,
}

/// One row of the league standings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    /// League rank, 1-based
    pub rank: u32,
    /// Team display name
    pub team_name: String,
    /// Season wins
    pub wins: u32,
    /// Season losses
    pub losses: u32,
    /// Season ties
    pub ties: u32,
}

impl StandingsRow {
    /// Win-loss record, with ties appended only when present
    pub fn record(&self) -> String {
        if self.ties > 0 {
            format!("{}-{}-{}", self.wins, self.losses, self.ties)
        } else {
            format!("{}-{}", self.wins, self.losses)
        }
    }
}

/// One side of a weekly matchup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupSide {
    /// Team key of this side
    pub team_key: String,
    /// Team display name
    pub team_name: String,
    /// Actual points scored so far
    pub points: f64,
    /// Projected final points
    pub projected: f64,
}

/// One weekly head-to-head matchup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    /// The two competing teams
    pub sides: [MatchupSide; 2],
    /// Winner, set only once the matchup is decided
    pub winner_team_key: Option<String>,
}

impl Matchup {
    /// Whether the given team plays in this matchup
    pub fn involves(&self, team_key: &str) -> bool {
        self.sides.iter().any(|s| s.team_key == team_key)
    }
}

/// One lineup slot assignment submitted to the upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupMove {
    /// Player being moved
    pub player_key: String,
    /// Target slot; `BN` benches the player
    pub position: String,
}

/// Kind of a pending transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// A trade offer waiting on the counterparty
    PendingTrade,
    /// A waiver claim waiting on the waiver run
    Waiver,
    /// Anything else the upstream reports; never shown to users
    #[serde(other)]
    Other,
}

impl TransactionKind {
    /// Short label used in listings
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::PendingTrade => "Trade",
            TransactionKind::Waiver => "Waiver",
            TransactionKind::Other => "Transaction",
        }
    }
}

/// One player entry inside a pending transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPlayer {
    /// Full display name
    pub name: String,
    /// What happens to the player: `add`, `drop`, or `trade`
    pub action: String,
}

/// A not-yet-executed transaction as reported by the upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTransaction {
    /// Upstream transaction key used for delete/modify calls
    pub transaction_key: String,
    /// Transaction kind
    pub kind: TransactionKind,
    /// Upstream status string, e.g. `proposed`
    pub status: String,
    /// Trade note or waiver detail, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Players involved
    pub players: Vec<TransactionPlayer>,
}

/// Changes applied to a pending transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    /// Replacement player list, when the user changed it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<String>>,
    /// Replacement note, when the user changed it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A complete trade proposal, all identifiers already resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeProposal {
    /// League the trade happens in
    pub league_key: String,
    /// Proposing team (the user's own)
    pub from_team: String,
    /// Counterparty team
    pub to_team: String,
    /// Player keys leaving the user's roster
    pub outgoing: Vec<String>,
    /// Player keys arriving from the counterparty
    pub incoming: Vec<String>,
    /// Free-text note for the other manager; empty when skipped
    pub note: String,
}

/// Everything the flow engine needs from the fantasy upstream
///
/// All calls are awaited directly and carry the user's access token. A
/// failed call surfaces as an error at the flow-step boundary; the engine
/// decides terminal handling and never retries.
#[async_trait]
pub trait FantasyApi: Send + Sync {
    /// Exchange a refresh token for fresh credentials
    async fn refresh_credentials(&self, refresh_token: &str) -> Result<Credentials>;

    /// The user's own teams across all their leagues, name to team key
    async fn list_user_teams(&self, token: &str) -> Result<Directory>;

    /// All teams in one league, name to team key
    async fn list_league_teams(&self, token: &str, league_key: &str) -> Result<Directory>;

    /// Current roster of a team
    async fn get_roster(&self, token: &str, team_key: &str) -> Result<Vec<RosterPlayer>>;

    /// Ranked league standings
    async fn get_standings(&self, token: &str, league_key: &str) -> Result<Vec<StandingsRow>>;

    /// Matchups for a week; `None` means the current week
    async fn get_scoreboard(
        &self,
        token: &str,
        league_key: &str,
        week: Option<u32>,
    ) -> Result<Vec<Matchup>>;

    /// Resolve a player by name within a league; `None` when unknown
    async fn find_player(
        &self,
        token: &str,
        league_key: &str,
        name: &str,
    ) -> Result<Option<PlayerInfo>>;

    /// Whether a player is currently list-locked on waivers
    async fn is_on_waivers(&self, token: &str, league_key: &str, player_key: &str) -> Result<bool>;

    /// Add a free agent (or submit a waiver claim for a locked player)
    async fn add_player(
        &self,
        token: &str,
        league_key: &str,
        team_key: &str,
        player_key: &str,
    ) -> Result<()>;

    /// Drop a rostered player
    async fn drop_player(
        &self,
        token: &str,
        league_key: &str,
        team_key: &str,
        player_key: &str,
    ) -> Result<()>;

    /// Add one player and drop another in a single move
    async fn add_drop_player(
        &self,
        token: &str,
        league_key: &str,
        team_key: &str,
        add_key: &str,
        drop_key: &str,
    ) -> Result<()>;

    /// Apply lineup slot assignments for a week
    async fn modify_lineup(
        &self,
        token: &str,
        team_key: &str,
        moves: &[LineupMove],
        week: u32,
    ) -> Result<()>;

    /// Submit a trade proposal
    async fn propose_trade(&self, token: &str, proposal: &TradeProposal) -> Result<()>;

    /// Pending transactions involving a team
    async fn list_pending_transactions(
        &self,
        token: &str,
        team_key: &str,
        league_key: &str,
    ) -> Result<Vec<PendingTransaction>>;

    /// Withdraw a pending transaction
    async fn delete_transaction(&self, token: &str, transaction_key: &str) -> Result<()>;

    /// Amend a pending transaction
    async fn modify_transaction(
        &self,
        token: &str,
        transaction_key: &str,
        update: &TransactionUpdate,
    ) -> Result<()>;

    /// Unrostered players in a league, optionally filtered by position
    async fn list_available_players(
        &self,
        token: &str,
        league_key: &str,
        position: Option<&str>,
    ) -> Result<Vec<PlayerInfo>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standings_record_formats_ties_only_when_present() {
        let row = StandingsRow {
            rank: 1,
            team_name: "Bench Warmers".into(),
            wins: 8,
            losses: 4,
            ties: 0,
        };
        assert_eq!(row.record(), "8-4");

        let tied = StandingsRow { ties: 1, ..row };
        assert_eq!(tied.record(), "8-4-1");
    }

    #[test]
    fn test_transaction_kind_deserializes_unknown_as_other() {
        let kind: TransactionKind = serde_json::from_str("\"add_drop\"").expect("parse");
        assert_eq!(kind, TransactionKind::Other);
        let kind: TransactionKind = serde_json::from_str("\"pending_trade\"").expect("parse");
        assert_eq!(kind, TransactionKind::PendingTrade);
    }

    #[test]
    fn test_matchup_involves() {
        let matchup = Matchup {
            sides: [
                MatchupSide {
                    team_key: "461.l.1.t.1".into(),
                    team_name: "A".into(),
                    points: 0.0,
                    projected: 0.0,
                },
                MatchupSide {
                    team_key: "461.l.1.t.2".into(),
                    team_name: "B".into(),
                    points: 0.0,
                    projected: 0.0,
                },
            ],
            winner_team_key: None,
        };
        assert!(matchup.involves("461.l.1.t.2"));
        assert!(!matchup.involves("461.l.1.t.3"));
    }
}
