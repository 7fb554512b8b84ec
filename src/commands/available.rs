//! Free-agent listing

use super::Context;

/// Display available free agents, optionally filtered by position
pub async fn show_available(
    ctx: &Context,
    user: &str,
    token: &str,
    league_key: &str,
    position: Option<&str>,
) {
    let players = match ctx
        .fantasy
        .list_available_players(token, league_key, position)
        .await
    {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(user, league = league_key, error = %e, "list_available_players failed");
            ctx.deliver(user, "❌ Failed to get available players. Please try again.")
                .await;
            return;
        }
    };

    if players.is_empty() {
        let at_position = position.map(|p| format!(" at {}", p)).unwrap_or_default();
        ctx.deliver(
            user,
            &format!(
                "No available free agents found{} in your league.",
                at_position
            ),
        )
        .await;
        return;
    }

    let tag = position.map(|p| format!(" ({})", p)).unwrap_or_default();
    let mut msg = format!("🟢 *Available Players to Add{}*\n", tag);
    for (idx, player) in players
        .iter()
        .take(ctx.config.display.available_limit)
        .enumerate()
    {
        let team = player
            .team_abbr
            .as_deref()
            .map(|t| format!(" - {}", t))
            .unwrap_or_default();
        msg.push_str(&format!(
            "\n{}. {} ({}{})",
            idx + 1,
            player.name,
            player.position,
            team
        ));
    }
    msg.push_str("\n\nReply 'add [player name]' to add a player.");
    ctx.deliver(user, &msg).await;
}
