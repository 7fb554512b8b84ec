//! Trade proposal submission

use super::Context;
use crate::fantasy::TradeProposal;

/// Resolve player names and submit a trade proposal
///
/// The counterparty team key is already resolved by the engine (directories
/// live in the session); this function resolves the player names on both
/// sides, aborting with a message naming the first one that fails, then
/// posts the proposal.
#[allow(clippy::too_many_arguments)]
pub async fn send_trade(
    ctx: &Context,
    user: &str,
    token: &str,
    league_key: &str,
    from_team: &str,
    to_team: &str,
    outgoing_names: &[String],
    incoming_names: &[String],
    note: &str,
) {
    let mut outgoing = Vec::with_capacity(outgoing_names.len());
    for name in outgoing_names {
        match ctx.fantasy.find_player(token, league_key, name).await {
            Ok(Some(p)) => outgoing.push(p.player_key),
            Ok(None) => {
                ctx.deliver(user, &format!("Could not find player: {}", name))
                    .await;
                return;
            }
            Err(e) => {
                tracing::warn!(user, player = %name, error = %e, "find_player failed");
                ctx.deliver(user, &format!("❌ Trade failed: {}", e)).await;
                return;
            }
        }
    }

    let mut incoming = Vec::with_capacity(incoming_names.len());
    for name in incoming_names {
        match ctx.fantasy.find_player(token, league_key, name).await {
            Ok(Some(p)) => incoming.push(p.player_key),
            Ok(None) => {
                ctx.deliver(user, &format!("Could not find player: {}", name))
                    .await;
                return;
            }
            Err(e) => {
                tracing::warn!(user, player = %name, error = %e, "find_player failed");
                ctx.deliver(user, &format!("❌ Trade failed: {}", e)).await;
                return;
            }
        }
    }

    let proposal = TradeProposal {
        league_key: league_key.to_string(),
        from_team: from_team.to_string(),
        to_team: to_team.to_string(),
        outgoing,
        incoming,
        note: note.to_string(),
    };

    match ctx.fantasy.propose_trade(token, &proposal).await {
        Ok(()) => {
            ctx.deliver(user, "✅ Trade proposal sent!").await;
        }
        Err(e) => {
            tracing::warn!(user, error = %e, "propose_trade failed");
            ctx.deliver(user, &format!("❌ Trade failed: {}", e)).await;
        }
    }
}
