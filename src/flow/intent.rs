//! Free-text intent classification
//!
//! Maps an inbound message with no active flow to the initial
//! [`FlowState`]. The rules are a prioritized list evaluated in documented
//! order, first match wins; the ordering is a designed precedence (the
//! combined `add X drop Y` must win over single `add <name>`, the literal
//! `add player` must win over `add <name>`), not an accident of the code.
//!
//! Matching is done on the trimmed, lowercased text; embedded data such as
//! player and team names is extracted from the original-cased text.

use crate::flow::state::{ChooseTeamStep, FlowState, PlayerStep, TradeStep, TransactionStep};
use regex::Regex;
use tracing::debug;

/// Compiled classification rules
pub struct IntentClassifier {
    roster: Regex,
    scoreboard: Regex,
    available: Regex,
    delete_tx: Regex,
    modify_tx: Regex,
    add_drop: Regex,
    add: Regex,
    drop: Regex,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Compile the rule set
    pub fn new() -> Self {
        let rx = |p: &str| Regex::new(p).expect("intent rule is a valid regex");
        Self {
            roster: rx(r"(?i)^get roster(?:\s+(.+))?$"),
            scoreboard: rx(r"(?i)^get (?:matchup|scoreboard)(?:\s+week\s+(\d+))?$"),
            available: rx(r"(?i)^show available(?:\s+([a-z/]+))?$"),
            delete_tx: rx(r"(?i)^delete transaction\s+(\d+)$"),
            modify_tx: rx(r"(?i)^modify transaction\s+(\d+)$"),
            add_drop: rx(r"(?i)^add\s+(.+?)\s+drop\s+(.+)$"),
            add: rx(r"(?i)^add\s+(.+)$"),
            drop: rx(r"(?i)^drop\s+(.+)$"),
        }
    }

    /// Classify one message into an initial flow state
    ///
    /// # Arguments
    ///
    /// * `original` - trimmed message text, original casing
    /// * `lower` - the same text lowercased
    ///
    /// Global commands (`help`, `link`, `restart`) and authentication are
    /// handled by the router before classification ever runs.
    pub fn classify(&self, original: &str, lower: &str) -> FlowState {
        let state = self.classify_inner(original, lower);
        debug!(intent = state.name(), "classified message");
        state
    }

    fn classify_inner(&self, original: &str, lower: &str) -> FlowState {
        // Simple one-shot and team-gated flows first.
        match lower {
            "show teams" => return FlowState::ShowTeams,
            "choose team" => {
                return FlowState::ChooseTeam {
                    step: ChooseTeamStep::Fetch,
                    resume: None,
                }
            }
            "show league" => return FlowState::ShowLeague,
            "get standings" => return FlowState::GetStandings,
            _ => {}
        }

        if let Some(caps) = self.roster.captures(original) {
            let team = caps
                .get(1)
                .map(|m| strip_quotes(m.as_str().trim()).to_string())
                .filter(|t| !t.is_empty());
            return FlowState::GetRoster { team };
        }

        if lower == "propose trade" {
            return FlowState::ProposeTrade {
                step: TradeStep::AwaitingCounterpartyTeam { prompted: false },
            };
        }

        if let Some(caps) = self.scoreboard.captures(original) {
            let week = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .filter(|w| *w >= 1);
            return FlowState::GetScoreboard { week };
        }

        if lower == "modify lineup" {
            return FlowState::ModifyLineup;
        }

        if lower == "show transactions" || lower == "get transactions" {
            return FlowState::ListTransactions;
        }

        if let Some(caps) = self.delete_tx.captures(lower) {
            if let Ok(index) = caps[1].parse::<usize>() {
                return FlowState::DeleteTransaction { index };
            }
        }

        if let Some(caps) = self.modify_tx.captures(lower) {
            if let Ok(index) = caps[1].parse::<usize>() {
                return FlowState::ModifyTransaction {
                    index,
                    step: TransactionStep::Start,
                };
            }
        }

        if let Some(caps) = self.available.captures(original) {
            let position = caps
                .get(1)
                .map(|m| m.as_str().trim().to_uppercase())
                .filter(|p| !p.is_empty());
            return FlowState::ShowAvailable { position };
        }

        // Combined add/drop must be checked before the single forms, or
        // "add X drop Y" would be read as adding "X drop Y".
        if let Some(caps) = self.add_drop.captures(original) {
            let add = caps[1].trim().to_string();
            let drop = caps[2].trim().to_string();
            if !add.is_empty() && !drop.is_empty() {
                return FlowState::AddDropPlayer {
                    add,
                    drop,
                    prompt_sent: false,
                };
            }
        }

        // The bare trigger word is never a player name; "add player" asks
        // for the name instead of trying to add someone called "player".
        if lower == "add player" {
            return FlowState::AddPlayer {
                step: PlayerStep::AwaitingName,
            };
        }
        if lower == "drop player" {
            return FlowState::DropPlayer {
                step: PlayerStep::AwaitingName,
            };
        }

        if let Some(caps) = self.add.captures(original) {
            let player = caps[1].trim().to_string();
            if !player.is_empty() && !player.eq_ignore_ascii_case("player") {
                return FlowState::AddPlayer {
                    step: PlayerStep::AwaitingConfirmation {
                        player,
                        prompt_sent: false,
                    },
                };
            }
        }

        if let Some(caps) = self.drop.captures(original) {
            let player = caps[1].trim().to_string();
            if !player.is_empty() && !player.eq_ignore_ascii_case("player") {
                return FlowState::DropPlayer {
                    step: PlayerStep::AwaitingConfirmation {
                        player,
                        prompt_sent: false,
                    },
                };
            }
        }

        // A stray "yes" with no flow waiting on it.
        if lower == "yes" {
            return FlowState::ConfirmNothingPending;
        }

        FlowState::Default {
            body: original.to_string(),
        }
    }
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> FlowState {
        let classifier = IntentClassifier::new();
        let trimmed = text.trim();
        classifier.classify(trimmed, &trimmed.to_lowercase())
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(classify("show teams"), FlowState::ShowTeams);
        assert_eq!(classify("GET STANDINGS"), FlowState::GetStandings);
        assert_eq!(classify("show league"), FlowState::ShowLeague);
        assert!(matches!(
            classify("choose team"),
            FlowState::ChooseTeam {
                step: ChooseTeamStep::Fetch,
                resume: None
            }
        ));
    }

    #[test]
    fn test_roster_with_and_without_inline_team() {
        assert_eq!(classify("get roster"), FlowState::GetRoster { team: None });
        assert_eq!(
            classify("get roster Bench Warmers"),
            FlowState::GetRoster {
                team: Some("Bench Warmers".to_string())
            }
        );
        assert_eq!(
            classify("get roster \"Bench Warmers\""),
            FlowState::GetRoster {
                team: Some("Bench Warmers".to_string())
            }
        );
    }

    #[test]
    fn test_scoreboard_week_parsing() {
        assert_eq!(
            classify("get matchup"),
            FlowState::GetScoreboard { week: None }
        );
        assert_eq!(
            classify("get scoreboard week 4"),
            FlowState::GetScoreboard { week: Some(4) }
        );
        assert_eq!(
            classify("get matchup week 0"),
            FlowState::GetScoreboard { week: None }
        );
    }

    #[test]
    fn test_combined_add_drop_wins_over_single_add() {
        match classify("add Player A drop Player B") {
            FlowState::AddDropPlayer {
                add,
                drop,
                prompt_sent,
            } => {
                assert_eq!(add, "Player A");
                assert_eq!(drop, "Player B");
                assert!(!prompt_sent);
            }
            other => panic!("expected AddDropPlayer, got {:?}", other),
        }
    }

    #[test]
    fn test_add_player_literal_asks_for_name() {
        assert_eq!(
            classify("add player"),
            FlowState::AddPlayer {
                step: PlayerStep::AwaitingName
            }
        );
        assert_eq!(
            classify("Drop Player"),
            FlowState::DropPlayer {
                step: PlayerStep::AwaitingName
            }
        );
    }

    #[test]
    fn test_inline_add_goes_straight_to_confirmation() {
        match classify("add Jordan Love") {
            FlowState::AddPlayer {
                step:
                    PlayerStep::AwaitingConfirmation {
                        player,
                        prompt_sent,
                    },
            } => {
                assert_eq!(player, "Jordan Love");
                assert!(!prompt_sent);
            }
            other => panic!("expected confirmation step, got {:?}", other),
        }
    }

    #[test]
    fn test_transaction_commands() {
        assert_eq!(classify("show transactions"), FlowState::ListTransactions);
        assert_eq!(
            classify("delete transaction 2"),
            FlowState::DeleteTransaction { index: 2 }
        );
        assert_eq!(
            classify("modify transaction 1"),
            FlowState::ModifyTransaction {
                index: 1,
                step: TransactionStep::Start
            }
        );
    }

    #[test]
    fn test_show_available_with_position() {
        assert_eq!(
            classify("show available"),
            FlowState::ShowAvailable { position: None }
        );
        assert_eq!(
            classify("show available wr"),
            FlowState::ShowAvailable {
                position: Some("WR".to_string())
            }
        );
    }

    #[test]
    fn test_propose_trade() {
        assert!(matches!(
            classify("propose trade"),
            FlowState::ProposeTrade {
                step: TradeStep::AwaitingCounterpartyTeam { prompted: false }
            }
        ));
    }

    #[test]
    fn test_bare_yes_is_nothing_pending() {
        assert_eq!(classify("yes"), FlowState::ConfirmNothingPending);
    }

    #[test]
    fn test_fallback_preserves_original_text() {
        assert_eq!(
            classify("Do The Thing"),
            FlowState::Default {
                body: "Do The Thing".to_string()
            }
        );
    }
}
