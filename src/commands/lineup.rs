//! Lineup-move execution

use super::Context;
use crate::fantasy::LineupMove;
use crate::flow::lineup::{LineupAction, MoveRequest};

/// How one lineup instruction ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Move submitted and confirmed to the user
    Applied,
    /// Input problem; the user was re-prompted and the flow should stay
    Invalid,
    /// Lookup or upstream failure; the flow should end
    Failed,
}

/// Execute one parsed lineup instruction
pub async fn execute_move(
    ctx: &Context,
    user: &str,
    token: &str,
    league_key: &str,
    team_key: &str,
    request: &MoveRequest,
) -> MoveOutcome {
    let Some(slot) = request.target_slot() else {
        // Only reachable for "start" without a position.
        ctx.deliver(
            user,
            "Please specify a position, e.g. 'start Patrick Mahomes at QB week 3'.",
        )
        .await;
        return MoveOutcome::Invalid;
    };

    let player = match ctx
        .fantasy
        .find_player(token, league_key, &request.player)
        .await
    {
        Ok(Some(p)) => p,
        Ok(None) => {
            ctx.deliver(
                user,
                &format!("❌ Could not find player key for {}", request.player),
            )
            .await;
            return MoveOutcome::Failed;
        }
        Err(e) => {
            tracing::warn!(user, player = %request.player, error = %e, "find_player failed");
            ctx.deliver(user, "❌ Failed to update lineup.").await;
            return MoveOutcome::Failed;
        }
    };

    let moves = [LineupMove {
        player_key: player.player_key,
        position: slot.to_string(),
    }];

    match ctx
        .fantasy
        .modify_lineup(token, team_key, &moves, request.week)
        .await
    {
        Ok(()) => {
            let verb = match request.action {
                LineupAction::Start => "Started",
                LineupAction::Bench => "Benched",
            };
            ctx.deliver(
                user,
                &format!(
                    "✅ {} {} at {} for week {}",
                    verb, request.player, slot, request.week
                ),
            )
            .await;
            MoveOutcome::Applied
        }
        Err(e) => {
            tracing::warn!(user, player = %request.player, error = %e, "modify_lineup failed");
            ctx.deliver(user, "❌ Failed to update lineup.").await;
            MoveOutcome::Failed
        }
    }
}
