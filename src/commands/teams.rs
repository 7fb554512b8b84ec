//! Team directory commands: show teams, show league, directory caching

use super::Context;
use crate::error::Result;
use crate::session::Directory;

/// Fetch and display the user's own teams, caching the directory
pub async fn show_teams(ctx: &Context, user: &str, token: &str) {
    let directory = match ctx.fantasy.list_user_teams(token).await {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(user, error = %e, "list_user_teams failed");
            ctx.deliver(user, "❌ Failed to get your teams. Please try again later.")
                .await;
            return;
        }
    };

    if directory.is_empty() {
        ctx.deliver(
            user,
            "🏈 *Your Fantasy Teams:*\n\nNo teams found for your account.",
        )
        .await;
        return;
    }

    let mut text = String::from("🏈 *Your Fantasy Teams:*\n\n");
    for (name, _) in directory.iter() {
        text.push_str(&format!("• {}\n", name));
    }
    ctx.sessions.set_team_directory(user, directory);
    ctx.deliver(user, &text).await;
}

/// The user's team directory, fetched and cached when absent
pub async fn ensure_team_directory(ctx: &Context, user: &str, token: &str) -> Result<Directory> {
    if let Some(directory) = ctx.sessions.team_directory(user) {
        return Ok(directory);
    }
    let directory = ctx.fantasy.list_user_teams(token).await?;
    ctx.sessions.set_team_directory(user, directory.clone());
    Ok(directory)
}

/// The league team directory, fetched and cached when absent
pub async fn ensure_league_directory(
    ctx: &Context,
    user: &str,
    token: &str,
    league_key: &str,
) -> Result<Directory> {
    if let Some(directory) = ctx.sessions.league_directory(user) {
        return Ok(directory);
    }
    let directory = ctx.fantasy.list_league_teams(token, league_key).await?;
    ctx.sessions.set_league_directory(user, directory.clone());
    Ok(directory)
}

/// Display every team in the selected league as a numbered list
pub async fn show_league(ctx: &Context, user: &str, token: &str, league_key: &str) {
    let directory = match ensure_league_directory(ctx, user, token, league_key).await {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(user, error = %e, "list_league_teams failed");
            ctx.deliver(user, "❌ Failed to get the league teams. Please try again later.")
                .await;
            return;
        }
    };

    if directory.is_empty() {
        ctx.deliver(
            user,
            "No league teams found. Please choose your team or refresh your league.",
        )
        .await;
        return;
    }

    let list = directory
        .iter()
        .enumerate()
        .map(|(idx, (name, _))| format!("{}. {}", idx + 1, name))
        .collect::<Vec<_>>()
        .join("\n");
    ctx.deliver(user, &format!("🏆 League Teams:\n{}", list)).await;
}

/// Numbered team menu used by the choose-team flow
pub fn team_menu(names: &[String]) -> String {
    let mut msg = String::from("Here are your options:\n");
    for (idx, name) in names.iter().enumerate() {
        msg.push_str(&format!("{}. {}\n", idx + 1, name));
    }
    msg.push_str("\nReply with the number of your team.");
    msg
}
