mod common;

use common::{linked_harness, USER};
use rosterbot::session::SessionStore;

#[tokio::test]
async fn test_lineup_loop_two_moves_then_done() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("modify lineup").await;
    assert!(h.messages.last().contains("Please specify your move"));

    h.send("start Logan Pierce at QB week 3").await;
    let all = h.messages.all();
    assert!(all.iter().any(|m| m == "✅ Started Logan Pierce at QB for week 3"));
    assert!(h.messages.last().contains("another move"));

    h.send("bench Sam Okafor week 3").await;
    let all = h.messages.all();
    assert!(all.iter().any(|m| m == "✅ Benched Sam Okafor at BN for week 3"));

    h.send("done").await;
    assert_eq!(h.messages.last(), "✅ Lineup modification complete.");
    assert!(h.sessions.state(USER).is_none());
}

#[tokio::test]
async fn test_start_without_position_stays_in_flow() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("modify lineup").await;
    h.send("start Logan Pierce week 3").await;
    assert!(h.messages.last().contains("Please specify a position"));
    assert!(h.sessions.state(USER).is_some());

    h.send("cancel").await;
    assert_eq!(h.messages.last(), "❌ Lineup modification cancelled.");
    assert!(h.sessions.state(USER).is_none());
}

#[tokio::test]
async fn test_move_without_week_is_rejected() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("modify lineup").await;
    h.send("start Logan Pierce at QB").await;
    assert!(h.messages.last().contains("Please specify your move"));
    assert!(h.sessions.state(USER).is_some());
}

#[tokio::test]
async fn test_unknown_player_ends_lineup_flow() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("modify lineup").await;
    h.send("start Ghost Man at QB week 3").await;
    assert_eq!(h.messages.last(), "❌ Could not find player key for Ghost Man");
    assert!(h.sessions.state(USER).is_none());
}
