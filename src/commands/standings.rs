//! League standings display

use super::Context;

/// Fetch and display the ranked league standings
pub async fn get_standings(ctx: &Context, user: &str, token: &str, league_key: &str) {
    let rows = match ctx.fantasy.get_standings(token, league_key).await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(user, league = league_key, error = %e, "get_standings failed");
            ctx.deliver(user, "❌ Failed to retrieve league standings.")
                .await;
            return;
        }
    };

    if rows.is_empty() {
        ctx.deliver(user, "❌ No teams found in league standings.")
            .await;
        return;
    }

    let mut text = String::new();
    for row in &rows {
        text.push_str(&format!(
            "{}. {} - Record: {}\n",
            row.rank,
            row.team_name,
            row.record()
        ));
    }
    ctx.deliver(
        user,
        &format!("🏆 Here are your league standings:\n{}", text),
    )
    .await;
}
