//! Weekly matchup display

use super::Context;

/// Fetch the scoreboard and display the user's own matchup
///
/// `week` of `None` means the current week, resolved by the collaborator.
pub async fn get_scoreboard(
    ctx: &Context,
    user: &str,
    token: &str,
    league_key: &str,
    team_key: &str,
    week: Option<u32>,
) {
    let matchups = match ctx.fantasy.get_scoreboard(token, league_key, week).await {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(user, league = league_key, error = %e, "get_scoreboard failed");
            ctx.deliver(user, "❌ Could not fetch scoreboard.").await;
            return;
        }
    };

    let Some(matchup) = matchups.iter().find(|m| m.involves(team_key)) else {
        ctx.deliver(user, "Could not find your matchup.").await;
        return;
    };

    let (mine, theirs) = if matchup.sides[0].team_key == team_key {
        (&matchup.sides[0], &matchup.sides[1])
    } else {
        (&matchup.sides[1], &matchup.sides[0])
    };

    // Only call a winner once both sides have actual points on the board.
    let mut winner_text = String::new();
    if let Some(winner_key) = &matchup.winner_team_key {
        if mine.points > 0.0 && theirs.points > 0.0 {
            let who = if winner_key == team_key {
                "You!".to_string()
            } else {
                theirs.team_name.clone()
            };
            winner_text = format!("\nWinner: {}", who);
        }
    }

    let reply = format!(
        "Your matchup:\n{}: {} pts (proj: {})\nvs\n{}: {} pts (proj: {}){}",
        mine.team_name,
        mine.points,
        mine.projected,
        theirs.team_name,
        theirs.points,
        theirs.projected,
        winner_text
    );
    ctx.deliver(user, &reply).await;
}
