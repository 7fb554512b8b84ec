//! In-memory demo league
//!
//! Backs the console REPL so the whole conversation surface can be driven
//! without upstream credentials. Seeded with two user teams, a small free
//! agent pool, and a couple of pending transactions; roster-changing calls
//! mutate the in-memory state so a session stays coherent.

use crate::error::{Result, RosterbotError};
use crate::session::{Credentials, Directory};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::debug;

use super::{
    FantasyApi, LineupMove, Matchup, MatchupSide, PendingTransaction, PlayerInfo, RosterPlayer,
    StandingsRow, TradeProposal, TransactionKind, TransactionPlayer, TransactionUpdate,
};

const LEAGUE_KEY: &str = "461.l.1000";
const USER_TEAM_KEY: &str = "461.l.1000.t.1";

pub struct DemoLeague {
    pool: Vec<PlayerInfo>,
    waivers: HashSet<String>,
    rosters: Mutex<HashMap<String, Vec<RosterPlayer>>>,
    pending: Mutex<Vec<PendingTransaction>>,
}

impl Default for DemoLeague {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoLeague {
    /// Builds the seeded league.
    ///
    /// # Examples
    ///
    /// ```
    /// use rosterbot::fantasy::{DemoLeague, FantasyApi};
    ///
    /// # tokio_test::block_on(async {
    /// let league = DemoLeague::new();
    /// let teams = league.list_user_teams("demo-access").await.unwrap();
    /// assert!(!teams.is_empty());
    /// # });
    /// ```
    pub fn new() -> Self {
        let pool = vec![
            player("461.p.100", "Jake Thornton", "QB", "SEA"),
            player("461.p.101", "Marcus Bell", "RB", "DEN"),
            player("461.p.102", "Devon Carter", "RB", "MIA"),
            player("461.p.103", "Tyler Brooks", "WR", "GB"),
            player("461.p.104", "Andre Walsh", "WR", "KC"),
            player("461.p.105", "Colin Reyes", "TE", "DAL"),
            player("461.p.106", "Sam Okafor", "K", "BUF"),
            player("461.p.107", "Logan Pierce", "QB", "NYJ"),
            player("461.p.108", "Elijah Moss", "WR", "PHI"),
            player("461.p.109", "Reggie Tate", "RB", "CHI"),
            player("461.p.110", "Grant Foley", "QB", "LAR"),
            player("461.p.111", "Miles Archer", "RB", "ATL"),
            player("461.p.112", "Victor Nunes", "WR", "TB"),
            player("461.p.113", "Owen Radcliffe", "QB", "CLE"),
            player("461.p.114", "Dante Whitfield", "RB", "LV"),
        ];

        // Waiver-locked players prompt a claim instead of an instant add.
        let waivers = HashSet::from(["461.p.102".to_string()]);

        let mut rosters = HashMap::new();
        rosters.insert(
            USER_TEAM_KEY.to_string(),
            vec![
                roster_slot("Jake Thornton", "QB"),
                roster_slot("Marcus Bell", "RB"),
                roster_slot("Reggie Tate", "RB"),
                roster_slot("Tyler Brooks", "WR"),
                roster_slot("Andre Walsh", "WR"),
                roster_slot("Colin Reyes", "TE"),
                roster_slot("Sam Okafor", "K"),
                roster_slot("Logan Pierce", "BN"),
            ],
        );
        rosters.insert(
            "461.l.1000.t.2".to_string(),
            vec![
                roster_slot("Grant Foley", "QB"),
                roster_slot("Miles Archer", "RB"),
                roster_slot("Victor Nunes", "WR"),
            ],
        );
        rosters.insert(
            "461.l.1000.t.3".to_string(),
            vec![
                roster_slot("Owen Radcliffe", "QB"),
                roster_slot("Dante Whitfield", "RB"),
            ],
        );

        let pending = vec![
            PendingTransaction {
                transaction_key: "461.l.1000.tr.11".to_string(),
                kind: TransactionKind::PendingTrade,
                status: "proposed".to_string(),
                note: Some("Need RB depth".to_string()),
                players: vec![
                    TransactionPlayer {
                        name: "Marcus Bell".to_string(),
                        action: "trade".to_string(),
                    },
                    TransactionPlayer {
                        name: "Victor Nunes".to_string(),
                        action: "trade".to_string(),
                    },
                ],
            },
            PendingTransaction {
                transaction_key: "461.l.1000.w.7".to_string(),
                kind: TransactionKind::Waiver,
                status: "pending".to_string(),
                note: None,
                players: vec![TransactionPlayer {
                    name: "Devon Carter".to_string(),
                    action: "add".to_string(),
                }],
            },
        ];

        Self {
            pool,
            waivers,
            rosters: Mutex::new(rosters),
            pending: Mutex::new(pending),
        }
    }

    /// Credentials pre-linked for the demo user, valid for an hour
    pub fn demo_credentials() -> Credentials {
        Credentials {
            access_token: "demo-access".to_string(),
            refresh_token: "demo-refresh".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    fn lookup(&self, name: &str) -> Option<PlayerInfo> {
        let wanted = name.trim();
        self.pool
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .cloned()
    }

    fn player_by_key(&self, player_key: &str) -> Option<&PlayerInfo> {
        self.pool.iter().find(|p| p.player_key == player_key)
    }
}

fn player(key: &str, name: &str, position: &str, team: &str) -> PlayerInfo {
    PlayerInfo {
        player_key: key.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        team_abbr: Some(team.to_string()),
    }
}

fn roster_slot(name: &str, position: &str) -> RosterPlayer {
    RosterPlayer {
        name: name.to_string(),
        position: position.to_string(),
    }
}

fn poisoned<T>(_: T) -> RosterbotError {
    RosterbotError::Storage("demo league state poisoned".to_string())
}

#[async_trait]
impl FantasyApi for DemoLeague {
    async fn refresh_credentials(&self, refresh_token: &str) -> Result<Credentials> {
        if refresh_token != "demo-refresh" {
            return Err(RosterbotError::AuthenticationExpired(
                "unknown refresh token".to_string(),
            )
            .into());
        }
        Ok(Self::demo_credentials())
    }

    async fn list_user_teams(&self, _token: &str) -> Result<Directory> {
        Ok(Directory::from_pairs(vec![
            ("Bench Warmers".to_string(), USER_TEAM_KEY.to_string()),
            (
                "Gridiron Giants".to_string(),
                "461.l.2000.t.4".to_string(),
            ),
        ]))
    }

    async fn list_league_teams(&self, _token: &str, league_key: &str) -> Result<Directory> {
        if league_key != LEAGUE_KEY {
            return Ok(Directory::from_pairs(vec![(
                "Gridiron Giants".to_string(),
                "461.l.2000.t.4".to_string(),
            )]));
        }
        Ok(Directory::from_pairs(vec![
            ("Bench Warmers".to_string(), USER_TEAM_KEY.to_string()),
            ("End Zone Elite".to_string(), "461.l.1000.t.2".to_string()),
            ("Blitz Brigade".to_string(), "461.l.1000.t.3".to_string()),
        ]))
    }

    async fn get_roster(&self, _token: &str, team_key: &str) -> Result<Vec<RosterPlayer>> {
        let rosters = self.rosters.lock().map_err(poisoned)?;
        rosters.get(team_key).cloned().ok_or_else(|| {
            RosterbotError::Lookup {
                entity: "team",
                name: team_key.to_string(),
            }
            .into()
        })
    }

    async fn get_standings(&self, _token: &str, _league_key: &str) -> Result<Vec<StandingsRow>> {
        Ok(vec![
            StandingsRow {
                rank: 1,
                team_name: "End Zone Elite".to_string(),
                wins: 9,
                losses: 3,
                ties: 0,
            },
            StandingsRow {
                rank: 2,
                team_name: "Bench Warmers".to_string(),
                wins: 8,
                losses: 4,
                ties: 0,
            },
            StandingsRow {
                rank: 3,
                team_name: "Blitz Brigade".to_string(),
                wins: 5,
                losses: 6,
                ties: 1,
            },
        ])
    }

    async fn get_scoreboard(
        &self,
        _token: &str,
        _league_key: &str,
        week: Option<u32>,
    ) -> Result<Vec<Matchup>> {
        debug!(?week, "demo scoreboard");
        Ok(vec![Matchup {
            sides: [
                MatchupSide {
                    team_key: USER_TEAM_KEY.to_string(),
                    team_name: "Bench Warmers".to_string(),
                    points: 84.3,
                    projected: 112.6,
                },
                MatchupSide {
                    team_key: "461.l.1000.t.3".to_string(),
                    team_name: "Blitz Brigade".to_string(),
                    points: 77.1,
                    projected: 104.2,
                },
            ],
            winner_team_key: Some(USER_TEAM_KEY.to_string()),
        }])
    }

    async fn find_player(
        &self,
        _token: &str,
        _league_key: &str,
        name: &str,
    ) -> Result<Option<PlayerInfo>> {
        Ok(self.lookup(name))
    }

    async fn is_on_waivers(
        &self,
        _token: &str,
        _league_key: &str,
        player_key: &str,
    ) -> Result<bool> {
        Ok(self.waivers.contains(player_key))
    }

    async fn add_player(
        &self,
        _token: &str,
        _league_key: &str,
        team_key: &str,
        player_key: &str,
    ) -> Result<()> {
        let info = self.player_by_key(player_key).ok_or(RosterbotError::Lookup {
            entity: "player",
            name: player_key.to_string(),
        })?;
        let mut rosters = self.rosters.lock().map_err(poisoned)?;
        let roster = rosters.entry(team_key.to_string()).or_default();
        roster.push(roster_slot(&info.name, "BN"));
        Ok(())
    }

    async fn drop_player(
        &self,
        _token: &str,
        _league_key: &str,
        team_key: &str,
        player_key: &str,
    ) -> Result<()> {
        let info = self.player_by_key(player_key).ok_or(RosterbotError::Lookup {
            entity: "player",
            name: player_key.to_string(),
        })?;
        let mut rosters = self.rosters.lock().map_err(poisoned)?;
        if let Some(roster) = rosters.get_mut(team_key) {
            roster.retain(|p| p.name != info.name);
        }
        Ok(())
    }

    async fn add_drop_player(
        &self,
        token: &str,
        league_key: &str,
        team_key: &str,
        add_key: &str,
        drop_key: &str,
    ) -> Result<()> {
        self.drop_player(token, league_key, team_key, drop_key)
            .await?;
        self.add_player(token, league_key, team_key, add_key).await
    }

    async fn modify_lineup(
        &self,
        _token: &str,
        team_key: &str,
        moves: &[LineupMove],
        week: u32,
    ) -> Result<()> {
        let mut rosters = self.rosters.lock().map_err(poisoned)?;
        let roster = rosters.get_mut(team_key).ok_or(RosterbotError::Lookup {
            entity: "team",
            name: team_key.to_string(),
        })?;
        for mv in moves {
            let info = self.pool.iter().find(|p| p.player_key == mv.player_key);
            if let Some(info) = info {
                for slot in roster.iter_mut() {
                    if slot.name == info.name {
                        slot.position = mv.position.clone();
                    }
                }
            }
        }
        debug!(team_key, week, count = moves.len(), "demo lineup updated");
        Ok(())
    }

    async fn propose_trade(&self, _token: &str, proposal: &TradeProposal) -> Result<()> {
        let players = proposal
            .outgoing
            .iter()
            .chain(proposal.incoming.iter())
            .filter_map(|key| self.player_by_key(key))
            .map(|info| TransactionPlayer {
                name: info.name.clone(),
                action: "trade".to_string(),
            })
            .collect();
        let mut pending = self.pending.lock().map_err(poisoned)?;
        let key = format!("461.l.1000.tr.{}", 12 + pending.len());
        pending.push(PendingTransaction {
            transaction_key: key,
            kind: TransactionKind::PendingTrade,
            status: "proposed".to_string(),
            note: if proposal.note.is_empty() {
                None
            } else {
                Some(proposal.note.clone())
            },
            players,
        });
        Ok(())
    }

    async fn list_pending_transactions(
        &self,
        _token: &str,
        _team_key: &str,
        _league_key: &str,
    ) -> Result<Vec<PendingTransaction>> {
        Ok(self.pending.lock().map_err(poisoned)?.clone())
    }

    async fn delete_transaction(&self, _token: &str, transaction_key: &str) -> Result<()> {
        let mut pending = self.pending.lock().map_err(poisoned)?;
        let before = pending.len();
        pending.retain(|tx| tx.transaction_key != transaction_key);
        if pending.len() == before {
            return Err(RosterbotError::Lookup {
                entity: "transaction",
                name: transaction_key.to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn modify_transaction(
        &self,
        _token: &str,
        transaction_key: &str,
        update: &TransactionUpdate,
    ) -> Result<()> {
        let mut pending = self.pending.lock().map_err(poisoned)?;
        let tx = pending
            .iter_mut()
            .find(|tx| tx.transaction_key == transaction_key)
            .ok_or(RosterbotError::Lookup {
                entity: "transaction",
                name: transaction_key.to_string(),
            })?;
        if let Some(players) = &update.players {
            tx.players = players
                .iter()
                .map(|name| TransactionPlayer {
                    name: name.clone(),
                    action: "trade".to_string(),
                })
                .collect();
        }
        if let Some(note) = &update.note {
            tx.note = Some(note.clone());
        }
        Ok(())
    }

    async fn list_available_players(
        &self,
        _token: &str,
        _league_key: &str,
        position: Option<&str>,
    ) -> Result<Vec<PlayerInfo>> {
        let rosters = self.rosters.lock().map_err(poisoned)?;
        let rostered: HashSet<&str> = rosters
            .values()
            .flat_map(|r| r.iter().map(|p| p.name.as_str()))
            .collect();
        Ok(self
            .pool
            .iter()
            .filter(|p| !rostered.contains(p.name.as_str()))
            .filter(|p| position.map_or(true, |pos| p.position.eq_ignore_ascii_case(pos)))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_player_is_case_insensitive() {
        let league = DemoLeague::new();
        let found = league
            .find_player("t", LEAGUE_KEY, "devon carter")
            .await
            .expect("lookup");
        assert_eq!(found.expect("present").player_key, "461.p.102");
        let missing = league
            .find_player("t", LEAGUE_KEY, "Nobody Special")
            .await
            .expect("lookup");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_available_players_excludes_rostered() {
        let league = DemoLeague::new();
        let available = league
            .list_available_players("t", LEAGUE_KEY, None)
            .await
            .expect("list");
        assert!(available.iter().any(|p| p.name == "Devon Carter"));
        assert!(available.iter().all(|p| p.name != "Jake Thornton"));
    }

    #[tokio::test]
    async fn test_delete_transaction_unknown_key_errors() {
        let league = DemoLeague::new();
        assert!(league
            .delete_transaction("t", "461.l.1000.tr.11")
            .await
            .is_ok());
        assert!(league.delete_transaction("t", "no-such-key").await.is_err());
    }
}
