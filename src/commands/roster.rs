//! Roster display

use super::Context;

/// Fetch and display the roster of one team
///
/// `label` is whatever the user should see as the team's name: either the
/// display name resolved from a directory or the raw key they typed.
pub async fn get_roster(ctx: &Context, user: &str, token: &str, team_key: &str, label: &str) {
    let players = match ctx.fantasy.get_roster(token, team_key).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(user, team = team_key, error = %e, "get_roster failed");
            ctx.deliver(
                user,
                "❌ Failed to get roster. Make sure your team key is correct. \
                 Use 'show teams' to see your team keys.",
            )
            .await;
            return;
        }
    };

    let mut msg = format!("📋 *Roster for {}:*\n\n", label);
    if players.is_empty() {
        msg.push_str("No players found.");
    } else {
        let lines = players
            .iter()
            .map(|p| format!("{} ({})", p.name, p.position))
            .collect::<Vec<_>>()
            .join("\n");
        msg.push_str(&lines);
    }
    ctx.deliver(user, &msg).await;
}
