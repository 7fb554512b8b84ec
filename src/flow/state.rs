//! Conversational flow state
//!
//! Every multi-step dialogue the bot can hold is one variant of
//! [`FlowState`], with its own strongly-typed step enum and whatever data
//! the flow has accumulated so far. A session with no state is idle; the
//! intent classifier creates the initial state and the flow engine mutates
//! or clears it, one transition per inbound message.

use crate::fantasy::TransactionUpdate;
use serde::{Deserialize, Serialize};

/// The active conversational flow for one user
///
/// Confirmation-gated variants carry a `prompt_sent` flag so an
/// unrecognized reply re-sends the identical prompt instead of stacking
/// duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowState {
    /// Show the command overview
    Help,
    /// Hand out an account-link URL
    Link,
    /// Tell an unauthenticated user to link first
    AuthRequired,
    /// Tell the user their login expired and the refresh failed
    TokenExpired,
    /// List the user's own teams
    ShowTeams,
    /// List all teams in the selected league
    ShowLeague,
    /// Pick one of the user's teams by number
    ChooseTeam {
        /// Where the flow currently is
        step: ChooseTeamStep,
        /// Flow to re-run once a team has been selected
        resume: Option<Box<FlowState>>,
    },
    /// Show a roster, optionally for an inline-named team
    GetRoster {
        /// Team named inline in the command, original casing preserved
        team: Option<String>,
    },
    /// Show the league standings
    GetStandings,
    /// Show the user's weekly matchup
    GetScoreboard {
        /// Requested week; `None` means the current week
        week: Option<u32>,
    },
    /// List available free agents
    ShowAvailable {
        /// Optional position filter, upper-cased
        position: Option<String>,
    },
    /// Add a player, confirmation-gated, with a waiver-claim branch
    AddPlayer {
        /// Where the flow currently is
        step: PlayerStep,
    },
    /// Drop a player, confirmation-gated
    DropPlayer {
        /// Where the flow currently is
        step: PlayerStep,
    },
    /// Add one player and drop another behind a single confirmation
    AddDropPlayer {
        /// Player to add, original casing preserved
        add: String,
        /// Player to drop, original casing preserved
        drop: String,
        /// Whether the confirmation prompt has been shown
        prompt_sent: bool,
    },
    /// Looping lineup editor; stays active until `done` or `cancel`
    ModifyLineup,
    /// Five-step trade builder
    ProposeTrade {
        /// Where the flow currently is
        step: TradeStep,
    },
    /// List pending trades and waiver claims
    ListTransactions,
    /// Withdraw a previously listed transaction by 1-based position
    DeleteTransaction {
        /// Position in the cached listing
        index: usize,
    },
    /// Amend a previously listed transaction
    ModifyTransaction {
        /// Position in the cached listing
        index: usize,
        /// Where the flow currently is
        step: TransactionStep,
    },
    /// A bare `yes` arrived with nothing awaiting confirmation
    ConfirmNothingPending,
    /// No rule matched; echo the text back with a help hint
    Default {
        /// The unrecognized message
        body: String,
    },
}

/// Steps of the choose-team flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChooseTeamStep {
    /// Fetch the team directory and show the numbered menu
    Fetch,
    /// Waiting for a numeric reply
    ///
    /// The menu ordering is cached here so the numbering stays stable for
    /// the whole flow even if the directory is refreshed elsewhere.
    Awaiting {
        /// Team names in menu order
        names: Vec<String>,
    },
}

/// Steps shared by the add-player and drop-player flows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerStep {
    /// The user said `add player`/`drop player` without a name
    AwaitingName,
    /// Waiting for a yes/no on the named player
    AwaitingConfirmation {
        /// Player name, original casing preserved
        player: String,
        /// Whether the confirmation prompt has been shown
        prompt_sent: bool,
    },
    /// The player is on waivers; waiting for a yes/no on the claim
    AwaitingWaiverClaim {
        /// Player name, original casing preserved
        player: String,
        /// Already-resolved player key
        player_key: String,
    },
}

/// Steps of the trade-builder flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TradeStep {
    /// Waiting for the counterparty team name
    AwaitingCounterpartyTeam {
        /// Whether the team menu prompt has been shown
        prompted: bool,
    },
    /// Waiting for the comma-separated list of players offered
    AwaitingOutgoingPlayers {
        /// Counterparty team name as validated against the league directory
        team: String,
    },
    /// Waiting for the comma-separated list of players requested
    AwaitingIncomingPlayers {
        /// Counterparty team name
        team: String,
        /// Player names offered
        outgoing: Vec<String>,
    },
    /// Waiting for a note, or `skip`
    AwaitingNote {
        /// Counterparty team name
        team: String,
        /// Player names offered
        outgoing: Vec<String>,
        /// Player names requested
        incoming: Vec<String>,
    },
    /// Waiting for the final yes/no
    AwaitingConfirmation {
        /// Counterparty team name
        team: String,
        /// Player names offered
        outgoing: Vec<String>,
        /// Player names requested
        incoming: Vec<String>,
        /// Note text; empty when skipped
        note: String,
        /// Whether the summary prompt has been shown
        prompt_sent: bool,
    },
}

/// Steps of the modify-transaction flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransactionStep {
    /// Announce the selected transaction and ask which field to change
    Start,
    /// Waiting for `players`, `note`, or `cancel`
    AwaitingField,
    /// Waiting for the replacement player list
    AwaitingPlayers,
    /// Waiting for the replacement note text
    AwaitingNote,
    /// Waiting for the final yes/no on the assembled update
    AwaitingConfirmation {
        /// The update to apply
        update: TransactionUpdate,
        /// Whether the summary prompt has been shown
        prompt_sent: bool,
    },
}

impl FlowState {
    /// Short flow name for logging
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Help => "help",
            FlowState::Link => "link",
            FlowState::AuthRequired => "auth_required",
            FlowState::TokenExpired => "token_expired",
            FlowState::ShowTeams => "show_teams",
            FlowState::ShowLeague => "show_league",
            FlowState::ChooseTeam { .. } => "choose_team",
            FlowState::GetRoster { .. } => "get_roster",
            FlowState::GetStandings => "get_standings",
            FlowState::GetScoreboard { .. } => "get_scoreboard",
            FlowState::ShowAvailable { .. } => "show_available",
            FlowState::AddPlayer { .. } => "add_player",
            FlowState::DropPlayer { .. } => "drop_player",
            FlowState::AddDropPlayer { .. } => "add_drop_player",
            FlowState::ModifyLineup => "modify_lineup",
            FlowState::ProposeTrade { .. } => "propose_trade",
            FlowState::ListTransactions => "list_transactions",
            FlowState::DeleteTransaction { .. } => "delete_transaction",
            FlowState::ModifyTransaction { .. } => "modify_transaction",
            FlowState::ConfirmNothingPending => "confirm_nothing_pending",
            FlowState::Default { .. } => "default",
        }
    }
}
