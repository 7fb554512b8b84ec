//! Add/drop execution
//!
//! These functions do the effectful half of the confirmation-gated roster
//! flows: resolve names to player keys, call the collaborator, and message
//! the user. Whether the surrounding flow stays alive or clears is the
//! engine's decision; the return value only says whether the move landed.

use super::Context;
use crate::error::Result;

/// Resolution result for a player about to be added
#[derive(Debug, Clone, PartialEq)]
pub struct WaiverStatus {
    /// Resolved player key
    pub player_key: String,
    /// Whether the player is list-locked on waivers
    pub on_waivers: bool,
}

/// Resolve a player and check waiver lock; `Ok(None)` when the name is unknown
pub async fn check_waiver_status(
    ctx: &Context,
    token: &str,
    league_key: &str,
    name: &str,
) -> Result<Option<WaiverStatus>> {
    let Some(player) = ctx.fantasy.find_player(token, league_key, name).await? else {
        return Ok(None);
    };
    let on_waivers = ctx
        .fantasy
        .is_on_waivers(token, league_key, &player.player_key)
        .await?;
    Ok(Some(WaiverStatus {
        player_key: player.player_key,
        on_waivers,
    }))
}

/// Add an already-resolved player, messaging success or failure
///
/// `waiver_claim` only changes the wording; the upstream call is the same.
pub async fn add_by_key(
    ctx: &Context,
    user: &str,
    token: &str,
    league_key: &str,
    team_key: &str,
    player_key: &str,
    name: &str,
    waiver_claim: bool,
) -> bool {
    match ctx
        .fantasy
        .add_player(token, league_key, team_key, player_key)
        .await
    {
        Ok(()) => {
            let what = if waiver_claim {
                "waiver claim submitted!"
            } else {
                "added successfully!"
            };
            ctx.deliver(user, &format!("✅ Player {} {}", name, what))
                .await;
            true
        }
        Err(e) => {
            tracing::warn!(user, player = name, error = %e, "add_player failed");
            ctx.deliver(user, "❌ Failed to add player.").await;
            false
        }
    }
}

/// Resolve and drop a player, messaging success or failure
///
/// Returns `false` on both lookup failure and collaborator failure; the
/// user has already been told which one it was.
pub async fn drop_player(
    ctx: &Context,
    user: &str,
    token: &str,
    league_key: &str,
    team_key: &str,
    name: &str,
) -> bool {
    let player = match ctx.fantasy.find_player(token, league_key, name).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            ctx.deliver(user, &format!("❌ Could not find player: {}", name))
                .await;
            return false;
        }
        Err(e) => {
            tracing::warn!(user, player = name, error = %e, "find_player failed");
            ctx.deliver(user, "❌ Failed to drop player.").await;
            return false;
        }
    };

    match ctx
        .fantasy
        .drop_player(token, league_key, team_key, &player.player_key)
        .await
    {
        Ok(()) => {
            ctx.deliver(user, &format!("✅ Player {} dropped successfully!", name))
                .await;
            true
        }
        Err(e) => {
            tracing::warn!(user, player = name, error = %e, "drop_player failed");
            ctx.deliver(user, "❌ Failed to drop player.").await;
            false
        }
    }
}

/// Resolve both sides of a swap, then add and drop in one move
///
/// Both names are resolved before anything effectful happens; a failure on
/// either side aborts with a message naming that side and no partial
/// operation is performed.
pub async fn add_drop_player(
    ctx: &Context,
    user: &str,
    token: &str,
    league_key: &str,
    team_key: &str,
    add_name: &str,
    drop_name: &str,
) -> bool {
    let add_key = match ctx.fantasy.find_player(token, league_key, add_name).await {
        Ok(Some(p)) => p.player_key,
        Ok(None) => {
            ctx.deliver(
                user,
                &format!("❌ Could not find player to add: {}", add_name),
            )
            .await;
            return false;
        }
        Err(e) => {
            tracing::warn!(user, player = add_name, error = %e, "find_player failed");
            ctx.deliver(user, "❌ Failed to add/drop player.").await;
            return false;
        }
    };

    let drop_key = match ctx.fantasy.find_player(token, league_key, drop_name).await {
        Ok(Some(p)) => p.player_key,
        Ok(None) => {
            ctx.deliver(
                user,
                &format!("❌ Could not find player to drop: {}", drop_name),
            )
            .await;
            return false;
        }
        Err(e) => {
            tracing::warn!(user, player = drop_name, error = %e, "find_player failed");
            ctx.deliver(user, "❌ Failed to add/drop player.").await;
            return false;
        }
    };

    match ctx
        .fantasy
        .add_drop_player(token, league_key, team_key, &add_key, &drop_key)
        .await
    {
        Ok(()) => {
            ctx.deliver(
                user,
                &format!(
                    "✅ Added {} and dropped {} successfully!",
                    add_name, drop_name
                ),
            )
            .await;
            true
        }
        Err(e) => {
            tracing::warn!(user, error = %e, "add_drop_player failed");
            ctx.deliver(user, "❌ Failed to add/drop player.").await;
            false
        }
    }
}
