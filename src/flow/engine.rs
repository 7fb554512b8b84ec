//! Flow engine
//!
//! Executes exactly one state transition per inbound message for whichever
//! flow is active. Every handler ends in one of three ways: success (side
//! effect performed, state cleared), explicit cancellation (state cleared,
//! no side effect), or re-prompt (state kept, with prompt-sent idempotence
//! on confirmation-gated steps). Validation problems never clear state;
//! lookup and collaborator failures always do, with a message naming the
//! attempted action. Nothing is retried.

use crate::commands::lineup::MoveOutcome;
use crate::commands::{
    available, lineup, meta, roster, roster_moves, scoreboard, standings, teams, trade,
    transactions, Context,
};
use crate::error::Result;
use crate::fantasy::TransactionUpdate;
use crate::flow::lineup::MoveParser;
use crate::flow::state::{ChooseTeamStep, FlowState, PlayerStep, TradeStep, TransactionStep};
use tracing::{debug, warn};

/// Execute one transition of the given flow
pub async fn run(ctx: &Context, user: &str, body: &str, state: FlowState) -> Result<()> {
    debug!(user, state = state.name(), "executing flow step");
    dispatch(ctx, user, body, state).await
}

type BoxedStep<'a> =
    std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + 'a>>;

fn dispatch<'a>(
    ctx: &'a Context,
    user: &'a str,
    body: &'a str,
    state: FlowState,
) -> BoxedStep<'a> {
    Box::pin(async move {
        let lower = body.trim().to_lowercase();
        match state {
            FlowState::Help => {
                meta::help(ctx, user).await;
                ctx.sessions.clear_state(user);
            }
            FlowState::Link => {
                meta::link(ctx, user).await;
                ctx.sessions.clear_state(user);
            }
            FlowState::AuthRequired => {
                meta::auth_required(ctx, user).await;
                ctx.sessions.clear_state(user);
            }
            FlowState::TokenExpired => {
                meta::token_expired(ctx, user).await;
                ctx.sessions.clear_state(user);
            }
            FlowState::ConfirmNothingPending => {
                meta::nothing_pending(ctx, user).await;
                ctx.sessions.clear_state(user);
            }
            FlowState::Default { body: original } => {
                meta::default_response(ctx, user, &original).await;
                ctx.sessions.clear_state(user);
            }
            FlowState::ShowTeams => {
                if let Some(token) = require_token(ctx, user).await {
                    teams::show_teams(ctx, user, &token).await;
                }
                ctx.sessions.clear_state(user);
            }
            FlowState::ShowLeague => {
                let Some(selection) =
                    require_selection(ctx, user, body, FlowState::ShowLeague).await?
                else {
                    return Ok(());
                };
                if let Some(token) = require_token(ctx, user).await {
                    teams::show_league(ctx, user, &token, &selection.league).await;
                }
                ctx.sessions.clear_state(user);
            }
            FlowState::ChooseTeam { step, resume } => {
                choose_team(ctx, user, body, step, resume).await?;
            }
            FlowState::GetRoster { team } => {
                get_roster(ctx, user, body, team).await?;
            }
            FlowState::GetStandings => {
                let Some(selection) =
                    require_selection(ctx, user, body, FlowState::GetStandings).await?
                else {
                    return Ok(());
                };
                if let Some(token) = require_token(ctx, user).await {
                    standings::get_standings(ctx, user, &token, &selection.league).await;
                }
                ctx.sessions.clear_state(user);
            }
            FlowState::GetScoreboard { week } => {
                let Some(selection) =
                    require_selection(ctx, user, body, FlowState::GetScoreboard { week }).await?
                else {
                    return Ok(());
                };
                if let Some(token) = require_token(ctx, user).await {
                    scoreboard::get_scoreboard(
                        ctx,
                        user,
                        &token,
                        &selection.league,
                        &selection.team,
                        week,
                    )
                    .await;
                }
                ctx.sessions.clear_state(user);
            }
            FlowState::ShowAvailable { position } => {
                let resume = FlowState::ShowAvailable {
                    position: position.clone(),
                };
                let Some(selection) = require_selection(ctx, user, body, resume).await? else {
                    return Ok(());
                };
                if let Some(token) = require_token(ctx, user).await {
                    available::show_available(
                        ctx,
                        user,
                        &token,
                        &selection.league,
                        position.as_deref(),
                    )
                    .await;
                }
                ctx.sessions.clear_state(user);
            }
            FlowState::AddPlayer { step } => {
                player_flow(ctx, user, body, &lower, MoveVerb::Add, step).await?;
            }
            FlowState::DropPlayer { step } => {
                player_flow(ctx, user, body, &lower, MoveVerb::Drop, step).await?;
            }
            FlowState::AddDropPlayer {
                add,
                drop,
                prompt_sent,
            } => {
                add_drop_flow(ctx, user, body, &lower, add, drop, prompt_sent).await?;
            }
            FlowState::ModifyLineup => {
                modify_lineup_flow(ctx, user, body, &lower).await?;
            }
            FlowState::ProposeTrade { step } => {
                trade_flow(ctx, user, body, &lower, step).await?;
            }
            FlowState::ListTransactions => {
                let Some(selection) =
                    require_selection(ctx, user, body, FlowState::ListTransactions).await?
                else {
                    return Ok(());
                };
                if let Some(token) = require_token(ctx, user).await {
                    transactions::list_pending(
                        ctx,
                        user,
                        &token,
                        &selection.team,
                        &selection.league,
                    )
                    .await;
                }
                ctx.sessions.clear_state(user);
            }
            FlowState::DeleteTransaction { index } => {
                if let Some(token) = require_token(ctx, user).await {
                    transactions::delete_pending(ctx, user, &token, index).await;
                }
                ctx.sessions.clear_state(user);
            }
            FlowState::ModifyTransaction { index, step } => {
                modify_transaction_flow(ctx, user, body, &lower, index, step).await?;
            }
        }
        Ok(())
    })
}

/// The team and derived league a gated flow runs against
struct Selection {
    team: String,
    league: String,
}

/// Access token of the linked account
///
/// Flows only run for linked users, so a miss here means the session was
/// torn down mid-flow; the user is told to link again and the flow ends.
async fn require_token(ctx: &Context, user: &str) -> Option<String> {
    match ctx.sessions.credentials(user) {
        Some(credentials) => Some(credentials.access_token),
        None => {
            meta::auth_required(ctx, user).await;
            ctx.sessions.clear_state(user);
            None
        }
    }
}

/// Team/league prerequisite gate
///
/// When no team is selected, the original flow is queued as the resumption
/// target behind a choose-team flow, which re-invokes it once a team has
/// been picked. Returns `None` when the deferral happened.
async fn require_selection(
    ctx: &Context,
    user: &str,
    body: &str,
    resume: FlowState,
) -> Result<Option<Selection>> {
    let team = ctx.sessions.selected_team(user);
    let league = ctx.sessions.selected_league(user);
    if let (Some(team), Some(league)) = (team, league) {
        return Ok(Some(Selection { team, league }));
    }

    debug!(user, resume = resume.name(), "no team selected, deferring");
    let state = FlowState::ChooseTeam {
        step: ChooseTeamStep::Fetch,
        resume: Some(Box::new(resume)),
    };
    ctx.sessions.set_state(user, state.clone());
    dispatch(ctx, user, body, state).await?;
    Ok(None)
}

async fn choose_team(
    ctx: &Context,
    user: &str,
    body: &str,
    step: ChooseTeamStep,
    resume: Option<Box<FlowState>>,
) -> Result<()> {
    let Some(token) = require_token(ctx, user).await else {
        return Ok(());
    };

    match step {
        ChooseTeamStep::Fetch => {
            let directory = match teams::ensure_team_directory(ctx, user, &token).await {
                Ok(d) => d,
                Err(e) => {
                    warn!(user, error = %e, "list_user_teams failed");
                    ctx.deliver(user, "❌ Failed to get your teams. Please try again later.")
                        .await;
                    ctx.sessions.clear_state(user);
                    return Ok(());
                }
            };
            if directory.is_empty() {
                ctx.deliver(user, "You have no teams available to choose from.")
                    .await;
                ctx.sessions.clear_state(user);
                return Ok(());
            }

            let names = directory.names();
            ctx.deliver(
                user,
                &format!("Let's pick your team! {}", teams::team_menu(&names)),
            )
            .await;
            ctx.sessions.set_state(
                user,
                FlowState::ChooseTeam {
                    step: ChooseTeamStep::Awaiting { names },
                    resume,
                },
            );
        }
        ChooseTeamStep::Awaiting { names } => {
            let selected = body
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=names.len()).contains(n))
                .map(|n| names[n - 1].clone());

            let Some(name) = selected else {
                // Re-show the menu from the same cached ordering so the
                // numbering stays stable for the whole flow.
                ctx.deliver(
                    user,
                    &format!(
                        "Invalid selection. Please reply with a valid number.\n\n{}",
                        teams::team_menu(&names)
                    ),
                )
                .await;
                return Ok(());
            };

            let team_key = ctx
                .sessions
                .team_directory(user)
                .and_then(|d| d.get(&name).map(str::to_string));
            let Some(team_key) = team_key else {
                ctx.deliver(
                    user,
                    &format!("❌ Could not resolve team: {}. Use 'show teams' and try again.", name),
                )
                .await;
                ctx.sessions.clear_state(user);
                return Ok(());
            };

            ctx.sessions.set_selected_team(user, &team_key);
            ctx.deliver(user, &format!("✅ Team selected: {}", name)).await;

            match resume {
                Some(next) => {
                    let next = *next;
                    debug!(user, resume = next.name(), "team selected, resuming flow");
                    ctx.sessions.set_state(user, next.clone());
                    // The menu reply was consumed here; the resumed flow
                    // gets an empty body so input-consuming steps prompt
                    // instead of reading the team number as their answer.
                    dispatch(ctx, user, "", next).await?;
                }
                None => ctx.sessions.clear_state(user),
            }
        }
    }
    Ok(())
}

async fn get_roster(ctx: &Context, user: &str, body: &str, team: Option<String>) -> Result<()> {
    let Some(token) = require_token(ctx, user).await else {
        return Ok(());
    };

    if let Some(name) = team {
        // Inline team: resolve through the cached directory when possible,
        // otherwise treat the text as a raw team key.
        let resolved = ctx
            .sessions
            .team_directory(user)
            .and_then(|d| d.get(&name).map(str::to_string));
        let key = resolved.unwrap_or_else(|| name.clone());
        roster::get_roster(ctx, user, &token, &key, &name).await;
        ctx.sessions.clear_state(user);
        return Ok(());
    }

    let Some(selection) = require_selection(ctx, user, body, FlowState::GetRoster { team: None })
        .await?
    else {
        return Ok(());
    };
    let label = ctx
        .sessions
        .team_directory(user)
        .and_then(|d| {
            d.iter()
                .find(|(_, key)| *key == selection.team)
                .map(|(name, _)| name.to_string())
        })
        .unwrap_or_else(|| selection.team.clone());
    roster::get_roster(ctx, user, &token, &selection.team, &label).await;
    ctx.sessions.clear_state(user);
    Ok(())
}

/// Which direction a single-player confirmation flow moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveVerb {
    Add,
    Drop,
}

impl MoveVerb {
    fn word(self) -> &'static str {
        match self {
            MoveVerb::Add => "add",
            MoveVerb::Drop => "drop",
        }
    }

    fn title(self) -> &'static str {
        match self {
            MoveVerb::Add => "Add",
            MoveVerb::Drop => "Drop",
        }
    }

    fn trigger(self) -> &'static str {
        match self {
            MoveVerb::Add => "add player",
            MoveVerb::Drop => "drop player",
        }
    }

    fn state(self, step: PlayerStep) -> FlowState {
        match self {
            MoveVerb::Add => FlowState::AddPlayer { step },
            MoveVerb::Drop => FlowState::DropPlayer { step },
        }
    }

    fn confirm_prompt(self, player: &str) -> String {
        format!(
            "You want to {} {}. Reply 'yes' to confirm or 'no' to cancel.",
            self.word(),
            player
        )
    }
}

async fn player_flow(
    ctx: &Context,
    user: &str,
    body: &str,
    lower: &str,
    verb: MoveVerb,
    step: PlayerStep,
) -> Result<()> {
    let Some(selection) =
        require_selection(ctx, user, body, verb.state(step.clone())).await?
    else {
        return Ok(());
    };
    let Some(token) = require_token(ctx, user).await else {
        return Ok(());
    };

    match step {
        PlayerStep::AwaitingName => {
            if body.trim().is_empty() || lower == verb.trigger() {
                ctx.deliver(
                    user,
                    &format!(
                        "Which player would you like to {}? Please reply with the player's name.",
                        verb.word()
                    ),
                )
                .await;
                return Ok(());
            }
            let player = body.trim().to_string();
            ctx.deliver(user, &verb.confirm_prompt(&player)).await;
            ctx.sessions.set_state(
                user,
                verb.state(PlayerStep::AwaitingConfirmation {
                    player,
                    prompt_sent: true,
                }),
            );
        }
        PlayerStep::AwaitingConfirmation {
            player,
            prompt_sent,
        } => {
            if !prompt_sent {
                // First entry: the triggering message is not an answer.
                ctx.deliver(user, &verb.confirm_prompt(&player)).await;
                ctx.sessions.set_state(
                    user,
                    verb.state(PlayerStep::AwaitingConfirmation {
                        player,
                        prompt_sent: true,
                    }),
                );
                return Ok(());
            }

            match lower {
                "yes" => match verb {
                    MoveVerb::Drop => {
                        roster_moves::drop_player(
                            ctx,
                            user,
                            &token,
                            &selection.league,
                            &selection.team,
                            &player,
                        )
                        .await;
                        ctx.sessions.clear_state(user);
                    }
                    MoveVerb::Add => {
                        match roster_moves::check_waiver_status(
                            ctx,
                            &token,
                            &selection.league,
                            &player,
                        )
                        .await
                        {
                            Ok(None) => {
                                ctx.deliver(
                                    user,
                                    &format!("❌ Could not find player: {}", player),
                                )
                                .await;
                                ctx.sessions.clear_state(user);
                            }
                            Ok(Some(status)) if status.on_waivers => {
                                ctx.deliver(
                                    user,
                                    &format!(
                                        "⏳ {} is currently on waivers. Reply 'yes' to submit a waiver claim or 'no' to cancel.",
                                        player
                                    ),
                                )
                                .await;
                                ctx.sessions.set_state(
                                    user,
                                    verb.state(PlayerStep::AwaitingWaiverClaim {
                                        player,
                                        player_key: status.player_key,
                                    }),
                                );
                            }
                            Ok(Some(status)) => {
                                roster_moves::add_by_key(
                                    ctx,
                                    user,
                                    &token,
                                    &selection.league,
                                    &selection.team,
                                    &status.player_key,
                                    &player,
                                    false,
                                )
                                .await;
                                ctx.sessions.clear_state(user);
                            }
                            Err(e) => {
                                warn!(user, player = %player, error = %e, "waiver check failed");
                                ctx.deliver(user, "❌ Failed to add player.").await;
                                ctx.sessions.clear_state(user);
                            }
                        }
                    }
                },
                "no" => {
                    ctx.deliver(user, &format!("❌ {} cancelled.", verb.title()))
                        .await;
                    ctx.sessions.clear_state(user);
                }
                _ => {
                    ctx.deliver(user, &verb.confirm_prompt(&player)).await;
                }
            }
        }
        PlayerStep::AwaitingWaiverClaim { player, player_key } => match lower {
            "yes" => {
                roster_moves::add_by_key(
                    ctx,
                    user,
                    &token,
                    &selection.league,
                    &selection.team,
                    &player_key,
                    &player,
                    true,
                )
                .await;
                ctx.sessions.clear_state(user);
            }
            "no" => {
                ctx.deliver(user, &format!("❌ {} cancelled.", verb.title()))
                    .await;
                ctx.sessions.clear_state(user);
            }
            _ => {
                ctx.deliver(
                    user,
                    &format!(
                        "⏳ {} is currently on waivers. Reply 'yes' to submit a waiver claim or 'no' to cancel.",
                        player
                    ),
                )
                .await;
            }
        },
    }
    Ok(())
}

async fn add_drop_flow(
    ctx: &Context,
    user: &str,
    body: &str,
    lower: &str,
    add: String,
    drop: String,
    prompt_sent: bool,
) -> Result<()> {
    let resume = FlowState::AddDropPlayer {
        add: add.clone(),
        drop: drop.clone(),
        prompt_sent,
    };
    let Some(selection) = require_selection(ctx, user, body, resume).await? else {
        return Ok(());
    };
    let Some(token) = require_token(ctx, user).await else {
        return Ok(());
    };

    let prompt = format!(
        "You want to add {} and drop {}. Reply 'yes' to confirm or 'no' to cancel.",
        add, drop
    );

    if !prompt_sent {
        ctx.deliver(user, &prompt).await;
        ctx.sessions.set_state(
            user,
            FlowState::AddDropPlayer {
                add,
                drop,
                prompt_sent: true,
            },
        );
        return Ok(());
    }

    match lower {
        "yes" => {
            roster_moves::add_drop_player(
                ctx,
                user,
                &token,
                &selection.league,
                &selection.team,
                &add,
                &drop,
            )
            .await;
            ctx.sessions.clear_state(user);
        }
        "no" => {
            ctx.deliver(user, "❌ Add/drop cancelled.").await;
            ctx.sessions.clear_state(user);
        }
        _ => {
            ctx.deliver(user, &prompt).await;
        }
    }
    Ok(())
}

async fn modify_lineup_flow(ctx: &Context, user: &str, body: &str, lower: &str) -> Result<()> {
    let Some(selection) = require_selection(ctx, user, body, FlowState::ModifyLineup).await? else {
        return Ok(());
    };
    let Some(token) = require_token(ctx, user).await else {
        return Ok(());
    };

    match lower {
        "done" => {
            ctx.deliver(user, "✅ Lineup modification complete.").await;
            ctx.sessions.clear_state(user);
        }
        "cancel" => {
            ctx.deliver(user, "❌ Lineup modification cancelled.").await;
            ctx.sessions.clear_state(user);
        }
        _ => {
            let Some(request) = MoveParser::new().parse(body) else {
                ctx.deliver(
                    user,
                    "Please specify your move, e.g. 'start Patrick Mahomes at QB week 3' or \
                     'bench Ezekiel Elliott week 3'. Send 'done' when finished.",
                )
                .await;
                return Ok(());
            };

            match lineup::execute_move(
                ctx,
                user,
                &token,
                &selection.league,
                &selection.team,
                &request,
            )
            .await
            {
                MoveOutcome::Applied => {
                    ctx.deliver(
                        user,
                        "Would you like to make another move? Reply with another command, \
                         or send 'done' if finished.",
                    )
                    .await;
                }
                MoveOutcome::Invalid => {
                    // Already re-prompted; stay in the loop.
                }
                MoveOutcome::Failed => {
                    ctx.sessions.clear_state(user);
                }
            }
        }
    }
    Ok(())
}

fn trade_summary(team: &str, outgoing: &[String], incoming: &[String], note: &str) -> String {
    let note_text = if note.is_empty() { "(none)" } else { note };
    format!(
        "Trade proposal:\nTo: {}\nYou send: {}\nYou receive: {}\nNote: {}\n\nReply 'yes' to send or 'no' to cancel.",
        team,
        outgoing.join(", "),
        incoming.join(", "),
        note_text
    )
}

async fn trade_flow(
    ctx: &Context,
    user: &str,
    body: &str,
    lower: &str,
    step: TradeStep,
) -> Result<()> {
    let resume = FlowState::ProposeTrade { step: step.clone() };
    let Some(selection) = require_selection(ctx, user, body, resume).await? else {
        return Ok(());
    };
    let Some(token) = require_token(ctx, user).await else {
        return Ok(());
    };

    match step {
        TradeStep::AwaitingCounterpartyTeam { prompted } => {
            let directory =
                match teams::ensure_league_directory(ctx, user, &token, &selection.league).await {
                    Ok(d) => d,
                    Err(e) => {
                        warn!(user, error = %e, "list_league_teams failed");
                        ctx.deliver(
                            user,
                            "❌ Failed to get the league teams. Please try again later.",
                        )
                        .await;
                        ctx.sessions.clear_state(user);
                        return Ok(());
                    }
                };
            if directory.is_empty() {
                ctx.deliver(
                    user,
                    "No league teams found. Please choose your team or refresh your league.",
                )
                .await;
                ctx.sessions.clear_state(user);
                return Ok(());
            }

            let menu = directory
                .iter()
                .enumerate()
                .map(|(idx, (name, _))| format!("{}. {}", idx + 1, name))
                .collect::<Vec<_>>()
                .join("\n");

            if !prompted {
                ctx.deliver(
                    user,
                    &format!(
                        "Which team do you want to trade with? Here are the teams in your league:\n{}",
                        menu
                    ),
                )
                .await;
                ctx.sessions.set_state(
                    user,
                    FlowState::ProposeTrade {
                        step: TradeStep::AwaitingCounterpartyTeam { prompted: true },
                    },
                );
                return Ok(());
            }

            // Case-insensitive exact match against the league directory,
            // keeping the directory's own casing for the summary.
            let canonical = directory
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(body.trim()))
                .map(|(name, _)| name.to_string());
            match canonical {
                Some(team) => {
                    ctx.deliver(
                        user,
                        "Which of your players are you offering? Reply with a comma-separated list of names.",
                    )
                    .await;
                    ctx.sessions.set_state(
                        user,
                        FlowState::ProposeTrade {
                            step: TradeStep::AwaitingOutgoingPlayers { team },
                        },
                    );
                }
                None => {
                    ctx.deliver(
                        user,
                        &format!("I couldn't find that team. Reply with one of:\n{}", menu),
                    )
                    .await;
                }
            }
        }
        TradeStep::AwaitingOutgoingPlayers { team } => {
            let outgoing = split_names(body);
            if outgoing.is_empty() {
                ctx.deliver(user, "Please list at least one player, comma separated.")
                    .await;
                return Ok(());
            }
            ctx.deliver(
                user,
                "Which players do you want in return? Reply with a comma-separated list of names.",
            )
            .await;
            ctx.sessions.set_state(
                user,
                FlowState::ProposeTrade {
                    step: TradeStep::AwaitingIncomingPlayers { team, outgoing },
                },
            );
        }
        TradeStep::AwaitingIncomingPlayers { team, outgoing } => {
            let incoming = split_names(body);
            if incoming.is_empty() {
                ctx.deliver(user, "Please list at least one player, comma separated.")
                    .await;
                return Ok(());
            }
            ctx.deliver(user, "Add a note for the other manager, or reply 'skip'.")
                .await;
            ctx.sessions.set_state(
                user,
                FlowState::ProposeTrade {
                    step: TradeStep::AwaitingNote {
                        team,
                        outgoing,
                        incoming,
                    },
                },
            );
        }
        TradeStep::AwaitingNote {
            team,
            outgoing,
            incoming,
        } => {
            let note = if lower == "skip" {
                String::new()
            } else {
                body.trim().to_string()
            };
            ctx.deliver(user, &trade_summary(&team, &outgoing, &incoming, &note))
                .await;
            ctx.sessions.set_state(
                user,
                FlowState::ProposeTrade {
                    step: TradeStep::AwaitingConfirmation {
                        team,
                        outgoing,
                        incoming,
                        note,
                        prompt_sent: true,
                    },
                },
            );
        }
        TradeStep::AwaitingConfirmation {
            team,
            outgoing,
            incoming,
            note,
            prompt_sent,
        } => {
            if !prompt_sent {
                ctx.deliver(user, &trade_summary(&team, &outgoing, &incoming, &note))
                    .await;
                ctx.sessions.set_state(
                    user,
                    FlowState::ProposeTrade {
                        step: TradeStep::AwaitingConfirmation {
                            team,
                            outgoing,
                            incoming,
                            note,
                            prompt_sent: true,
                        },
                    },
                );
                return Ok(());
            }

            match lower {
                "yes" => {
                    // Directories may have gone stale between step one and
                    // now; resolve from the league directory first, then
                    // fall back to the user's own teams.
                    let to_key = ctx
                        .sessions
                        .league_directory(user)
                        .and_then(|d| d.get(&team).map(str::to_string))
                        .or_else(|| {
                            ctx.sessions
                                .team_directory(user)
                                .and_then(|d| d.get(&team).map(str::to_string))
                        });
                    match to_key {
                        Some(to_team) => {
                            trade::send_trade(
                                ctx,
                                user,
                                &token,
                                &selection.league,
                                &selection.team,
                                &to_team,
                                &outgoing,
                                &incoming,
                                &note,
                            )
                            .await;
                        }
                        None => {
                            ctx.deliver(
                                user,
                                &format!(
                                    "❌ Could not resolve team: {}. Use 'show league' and start the trade again.",
                                    team
                                ),
                            )
                            .await;
                        }
                    }
                    ctx.sessions.clear_state(user);
                }
                "no" => {
                    ctx.deliver(user, "❌ Trade cancelled.").await;
                    ctx.sessions.clear_state(user);
                }
                _ => {
                    ctx.deliver(user, &trade_summary(&team, &outgoing, &incoming, &note))
                        .await;
                }
            }
        }
    }
    Ok(())
}

fn transaction_update_summary(index: usize, update: &TransactionUpdate) -> String {
    let change = match (&update.players, &update.note) {
        (Some(players), _) => format!("players: {}", players.join(", ")),
        (None, Some(note)) => format!("note: {}", note),
        (None, None) => "no changes".to_string(),
    };
    format!(
        "Update transaction {} with {}. Reply 'yes' to apply or 'no' to cancel.",
        index, change
    )
}

async fn modify_transaction_flow(
    ctx: &Context,
    user: &str,
    body: &str,
    lower: &str,
    index: usize,
    step: TransactionStep,
) -> Result<()> {
    // A stale or out-of-range index is a hard failure at any step; it never
    // silently no-ops.
    let Some(tx) = transactions::cached_transaction(ctx, user, index) else {
        ctx.deliver(user, "❌ Invalid transaction number.").await;
        ctx.sessions.clear_state(user);
        return Ok(());
    };

    match step {
        TransactionStep::Start => {
            ctx.deliver(
                user,
                &format!(
                    "Modifying transaction {} ({}). What would you like to change? Reply 'players', 'note', or 'cancel'.",
                    index,
                    tx.kind.label()
                ),
            )
            .await;
            ctx.sessions.set_state(
                user,
                FlowState::ModifyTransaction {
                    index,
                    step: TransactionStep::AwaitingField,
                },
            );
        }
        TransactionStep::AwaitingField => match lower {
            "players" => {
                ctx.deliver(user, "Send the updated player list, comma separated.")
                    .await;
                ctx.sessions.set_state(
                    user,
                    FlowState::ModifyTransaction {
                        index,
                        step: TransactionStep::AwaitingPlayers,
                    },
                );
            }
            "note" => {
                ctx.deliver(user, "Send the new note text.").await;
                ctx.sessions.set_state(
                    user,
                    FlowState::ModifyTransaction {
                        index,
                        step: TransactionStep::AwaitingNote,
                    },
                );
            }
            "cancel" => {
                ctx.deliver(user, "❌ Transaction modification cancelled.")
                    .await;
                ctx.sessions.clear_state(user);
            }
            _ => {
                ctx.deliver(user, "Reply 'players', 'note', or 'cancel'.")
                    .await;
            }
        },
        TransactionStep::AwaitingPlayers => {
            let players = split_names(body);
            if players.is_empty() {
                ctx.deliver(user, "Please list at least one player, comma separated.")
                    .await;
                return Ok(());
            }
            let update = TransactionUpdate {
                players: Some(players),
                note: None,
            };
            ctx.deliver(user, &transaction_update_summary(index, &update))
                .await;
            ctx.sessions.set_state(
                user,
                FlowState::ModifyTransaction {
                    index,
                    step: TransactionStep::AwaitingConfirmation {
                        update,
                        prompt_sent: true,
                    },
                },
            );
        }
        TransactionStep::AwaitingNote => {
            let update = TransactionUpdate {
                players: None,
                note: Some(body.trim().to_string()),
            };
            ctx.deliver(user, &transaction_update_summary(index, &update))
                .await;
            ctx.sessions.set_state(
                user,
                FlowState::ModifyTransaction {
                    index,
                    step: TransactionStep::AwaitingConfirmation {
                        update,
                        prompt_sent: true,
                    },
                },
            );
        }
        TransactionStep::AwaitingConfirmation {
            update,
            prompt_sent: _,
        } => match lower {
            "yes" => {
                if let Some(token) = require_token(ctx, user).await {
                    transactions::modify_pending(ctx, user, &token, index, &update).await;
                }
                ctx.sessions.clear_state(user);
            }
            "no" => {
                ctx.deliver(user, "❌ Transaction modification cancelled.")
                    .await;
                ctx.sessions.clear_state(user);
            }
            _ => {
                ctx.deliver(user, &transaction_update_summary(index, &update))
                    .await;
            }
        },
    }
    Ok(())
}

/// Split a comma-separated list, trimming entries and dropping empties
fn split_names(body: &str) -> Vec<String> {
    body.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
