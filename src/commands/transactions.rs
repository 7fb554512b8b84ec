//! Pending-transaction commands: list, delete, modify
//!
//! Listing caches the filtered transactions in the session; delete and
//! modify address that cache by 1-based position. The indices are only
//! valid until the next listing refresh or a session reset.

use super::Context;
use crate::fantasy::{PendingTransaction, TransactionKind, TransactionUpdate};

/// Look up a cached transaction by its 1-based listing position
pub fn cached_transaction(
    ctx: &Context,
    user: &str,
    index: usize,
) -> Option<PendingTransaction> {
    if index == 0 {
        return None;
    }
    ctx.sessions
        .pending_transactions(user)
        .into_iter()
        .nth(index - 1)
}

/// Fetch, cache, and display pending trades and waiver claims
pub async fn list_pending(
    ctx: &Context,
    user: &str,
    token: &str,
    team_key: &str,
    league_key: &str,
) {
    let raw = match ctx
        .fantasy
        .list_pending_transactions(token, team_key, league_key)
        .await
    {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(user, league = league_key, error = %e, "list_pending_transactions failed");
            ctx.deliver(user, "❌ Failed to get pending transactions.")
                .await;
            return;
        }
    };

    let transactions: Vec<PendingTransaction> = raw
        .into_iter()
        .filter(|t| matches!(t.kind, TransactionKind::PendingTrade | TransactionKind::Waiver))
        .collect();
    ctx.sessions
        .set_pending_transactions(user, transactions.clone());

    if transactions.is_empty() {
        ctx.deliver(user, "No pending waivers or trades found for your team.")
            .await;
        return;
    }

    let mut msg = String::from("⏳ *Pending Transactions*\n");
    for (idx, tx) in transactions.iter().enumerate() {
        msg.push_str(&format!(
            "\n{}. {} ({})\n",
            idx + 1,
            tx.kind.label(),
            tx.status
        ));
        for player in &tx.players {
            msg.push_str(&format!("   - {} ({})\n", player.name, player.action));
        }
        if let Some(note) = &tx.note {
            msg.push_str(&format!("   Note: {}\n", note));
        }
    }
    msg.push_str(
        "\nTo delete or modify a transaction, use:\n  delete transaction [number]\n  modify transaction [number]\n(Where [number] is the transaction's number in this list.)",
    );
    ctx.deliver(user, &msg).await;
}

/// Withdraw a cached transaction by listing position
///
/// An out-of-range index is reported without any collaborator call.
pub async fn delete_pending(ctx: &Context, user: &str, token: &str, index: usize) {
    let Some(tx) = cached_transaction(ctx, user, index) else {
        ctx.deliver(user, "❌ Invalid transaction number.").await;
        return;
    };

    match ctx
        .fantasy
        .delete_transaction(token, &tx.transaction_key)
        .await
    {
        Ok(()) => {
            ctx.deliver(user, &format!("✅ Transaction {} deleted.", index))
                .await;
        }
        Err(e) => {
            tracing::warn!(user, key = %tx.transaction_key, error = %e, "delete_transaction failed");
            ctx.deliver(user, "❌ Failed to delete transaction.").await;
        }
    }
}

/// Apply an update to a cached transaction by listing position
pub async fn modify_pending(
    ctx: &Context,
    user: &str,
    token: &str,
    index: usize,
    update: &TransactionUpdate,
) {
    let Some(tx) = cached_transaction(ctx, user, index) else {
        ctx.deliver(user, "❌ Invalid transaction number.").await;
        return;
    };

    match ctx
        .fantasy
        .modify_transaction(token, &tx.transaction_key, update)
        .await
    {
        Ok(()) => {
            ctx.deliver(user, &format!("✅ Transaction {} updated.", index))
                .await;
        }
        Err(e) => {
            tracing::warn!(user, key = %tx.transaction_key, error = %e, "modify_transaction failed");
            ctx.deliver(user, "❌ Failed to update transaction.").await;
        }
    }
}
