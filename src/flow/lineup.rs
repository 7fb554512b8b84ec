//! Natural-language lineup-move grammar
//!
//! Parses instructions like `start Patrick Mahomes at QB week 3` or
//! `bench Ezekiel Elliott week 3`. The week is mandatory; the position is
//! mandatory for `start` and ignored for `bench`, which always resolves to
//! the bench slot.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// What to do with the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineupAction {
    /// Put the player into a starting slot
    Start,
    /// Move the player to the bench
    Bench,
}

/// One parsed lineup instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Start or bench
    pub action: LineupAction,
    /// Player name, original casing preserved
    pub player: String,
    /// Requested slot; `None` when the user gave no `at <POS>` clause
    pub position: Option<String>,
    /// Week the move applies to
    pub week: u32,
}

impl MoveRequest {
    /// The slot actually submitted upstream
    ///
    /// `bench` always resolves to `BN` regardless of any given position.
    /// Callers must reject `start` without a position before submitting.
    pub fn target_slot(&self) -> Option<&str> {
        match self.action {
            LineupAction::Bench => Some("BN"),
            LineupAction::Start => self.position.as_deref(),
        }
    }
}

/// Parser for lineup instructions
///
/// The player-name group is greedy but non-possessive: it stops before an
/// optional `at <POS>` clause and the mandatory `week <N>` tail.
pub struct MoveParser {
    pattern: Regex,
}

impl Default for MoveParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveParser {
    /// Compile the grammar
    pub fn new() -> Self {
        let pattern = Regex::new(
            r"(?i)^(start|bench)\s+([\w\s'.-]+?)(?:\s+at\s+([\w/]+))?\s+week\s+(\d+)\s*$",
        )
        .expect("lineup grammar is a valid regex");
        Self { pattern }
    }

    /// Parse one instruction; `None` when the text does not match the grammar
    pub fn parse(&self, body: &str) -> Option<MoveRequest> {
        let caps = self.pattern.captures(body.trim())?;

        let action = if caps[1].eq_ignore_ascii_case("start") {
            LineupAction::Start
        } else {
            LineupAction::Bench
        };

        let player = caps[2].trim().to_string();
        let position = caps.get(3).map(|m| normalize_position(m.as_str()));
        let week: u32 = caps[4].parse().ok().filter(|w| *w >= 1)?;

        Some(MoveRequest {
            action,
            player,
            position,
            week,
        })
    }
}

/// Upper-case a position code and translate the `flex` alias to `W/R/T`
fn normalize_position(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if upper.chars().filter(|c| c.is_ascii_alphabetic()).collect::<String>() == "FLEX" {
        "W/R/T".to_string()
    } else {
        upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_with_position_and_week() {
        let parser = MoveParser::new();
        let mv = parser
            .parse("start Patrick Mahomes at QB week 3")
            .expect("should parse");
        assert_eq!(mv.action, LineupAction::Start);
        assert_eq!(mv.player, "Patrick Mahomes");
        assert_eq!(mv.position.as_deref(), Some("QB"));
        assert_eq!(mv.week, 3);
        assert_eq!(mv.target_slot(), Some("QB"));
    }

    #[test]
    fn test_parse_bench_without_position() {
        let parser = MoveParser::new();
        let mv = parser
            .parse("bench Ezekiel Elliott week 3")
            .expect("should parse");
        assert_eq!(mv.action, LineupAction::Bench);
        assert_eq!(mv.player, "Ezekiel Elliott");
        assert_eq!(mv.position, None);
        assert_eq!(mv.target_slot(), Some("BN"));
    }

    #[test]
    fn test_bench_ignores_given_position() {
        let parser = MoveParser::new();
        let mv = parser
            .parse("bench Ezekiel Elliott at RB week 3")
            .expect("should parse");
        assert_eq!(mv.target_slot(), Some("BN"));
    }

    #[test]
    fn test_flex_alias_resolves_to_wrt() {
        let parser = MoveParser::new();
        let mv = parser
            .parse("start Amon-Ra St. Brown at flex week 7")
            .expect("should parse");
        assert_eq!(mv.player, "Amon-Ra St. Brown");
        assert_eq!(mv.position.as_deref(), Some("W/R/T"));
    }

    #[test]
    fn test_week_is_mandatory() {
        let parser = MoveParser::new();
        assert!(parser.parse("start Patrick Mahomes at QB").is_none());
        assert!(parser.parse("bench Ezekiel Elliott").is_none());
    }

    #[test]
    fn test_week_zero_rejected() {
        let parser = MoveParser::new();
        assert!(parser.parse("bench Ezekiel Elliott week 0").is_none());
    }

    #[test]
    fn test_start_without_position_still_parses() {
        // The engine rejects this with a re-prompt; the grammar itself
        // accepts it so the error can name the missing piece.
        let parser = MoveParser::new();
        let mv = parser
            .parse("start Patrick Mahomes week 3")
            .expect("should parse");
        assert_eq!(mv.position, None);
        assert_eq!(mv.target_slot(), None);
    }

    #[test]
    fn test_unrelated_text_does_not_parse() {
        let parser = MoveParser::new();
        assert!(parser.parse("trade Patrick Mahomes week 3").is_none());
        assert!(parser.parse("done").is_none());
    }
}
