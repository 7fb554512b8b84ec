//! Terminal one-step replies: help, link, auth prompts, fallbacks

use super::Context;

/// Show the command overview
pub async fn help(ctx: &Context, user: &str) {
    ctx.deliver(
        user,
        "🏈 *Rosterbot Commands:*\n\n\
         *Setup:*\n\
         • link - Link your fantasy account\n\
         • choose team - Pick which of your teams to manage\n\
         • restart - Reset your session\n\n\
         *Team info:*\n\
         • show teams - List your fantasy teams\n\
         • show league - List the teams in your league\n\
         • get roster [team] - Show a roster\n\
         • get standings - League standings\n\
         • get matchup [week N] - Your weekly matchup\n\
         • show available [POS] - Free agents you can add\n\n\
         *Moves:*\n\
         • add [player] / drop [player]\n\
         • add [player] drop [player] - One-move swap\n\
         • modify lineup - Start or bench players\n\
         • propose trade - Build a trade offer\n\n\
         *Transactions:*\n\
         • show transactions - Pending trades and waivers\n\
         • delete transaction [number]\n\
         • modify transaction [number]\n\n\
         Send \"help\" anytime to see this menu!",
    )
    .await;
}

/// Hand out a one-time login URL
pub async fn link(ctx: &Context, user: &str) {
    let code = ctx
        .sessions
        .issue_link_code(user, ctx.config.link.code_ttl_minutes);
    let url = format!("{}/auth/login?state={}", ctx.config.link.base_url, code);
    ctx.deliver(
        user,
        &format!(
            "🔗 *Link Your Fantasy Account*\n\n\
             Open this link to connect your account:\n{}\n\n\
             This link expires in {} minutes.\nYour code: {}",
            url, ctx.config.link.code_ttl_minutes, code
        ),
    )
    .await;
}

/// Tell an unauthenticated user to link first
pub async fn auth_required(ctx: &Context, user: &str) {
    ctx.deliver(
        user,
        "❌ You need to link your fantasy account first!\n\nSend \"link\" to get started.",
    )
    .await;
}

/// Tell the user their login expired and the silent refresh failed
pub async fn token_expired(ctx: &Context, user: &str) {
    ctx.deliver(
        user,
        "❌ Your fantasy login has expired. Please send \"link\" to reconnect.",
    )
    .await;
}

/// Fallback for unrecognized input
pub async fn default_response(ctx: &Context, user: &str, body: &str) {
    ctx.deliver(
        user,
        &format!(
            "❓ I didn't understand \"{}\". Send \"help\" to see available commands.",
            body
        ),
    )
    .await;
}

/// A bare `yes` arrived with nothing awaiting confirmation
pub async fn nothing_pending(ctx: &Context, user: &str) {
    ctx.deliver(
        user,
        "Nothing is waiting for confirmation. Send \"help\" to see available commands.",
    )
    .await;
}

/// Confirm a full session reset
pub async fn restarted(ctx: &Context, user: &str) {
    ctx.deliver(
        user,
        "🔄 Session restarted. Your account stays linked; pick a team again with \"choose team\".",
    )
    .await;
}
