mod common;

use common::{linked_harness, USER};
use rosterbot::session::SessionStore;

#[tokio::test]
async fn test_trade_full_round_trip() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("propose trade").await;
    let menu = h.messages.last();
    assert!(menu.contains("Which team do you want to trade with?"));
    assert!(menu.contains("End Zone Elite"));
    assert!(menu.contains("Blitz Brigade"));

    h.send("End Zone Elite").await;
    assert!(h.messages.last().contains("Which of your players are you offering?"));

    h.send("Marcus Bell").await;
    assert!(h.messages.last().contains("Which players do you want in return?"));

    h.send("Victor Nunes").await;
    assert!(h.messages.last().contains("Add a note for the other manager"));

    h.send("Need a WR upgrade").await;
    let summary = h.messages.last();
    assert!(summary.contains("To: End Zone Elite"));
    assert!(summary.contains("You send: Marcus Bell"));
    assert!(summary.contains("You receive: Victor Nunes"));
    assert!(summary.contains("Note: Need a WR upgrade"));

    h.send("yes").await;
    assert_eq!(h.messages.last(), "✅ Trade proposal sent!");
    assert!(h.sessions.state(USER).is_none());

    // The new proposal shows up in the pending list.
    h.send("show transactions").await;
    assert!(h.messages.last().contains("Need a WR upgrade"));
}

#[tokio::test]
async fn test_trade_counterparty_match_is_case_insensitive() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("propose trade").await;
    h.send("end zone elite").await;
    assert!(h.messages.last().contains("Which of your players are you offering?"));
}

#[tokio::test]
async fn test_trade_unknown_team_reprompts() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("propose trade").await;
    h.send("No Such Team").await;
    let retry = h.messages.last();
    assert!(retry.contains("couldn't find that team"));
    assert!(retry.contains("Blitz Brigade"));

    h.send("Blitz Brigade").await;
    assert!(h.messages.last().contains("Which of your players are you offering?"));
}

#[tokio::test]
async fn test_trade_skipped_note_and_cancel() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("propose trade").await;
    h.send("End Zone Elite").await;
    h.send("Marcus Bell, Reggie Tate").await;
    h.send("Victor Nunes").await;
    h.send("skip").await;
    let summary = h.messages.last();
    assert!(summary.contains("You send: Marcus Bell, Reggie Tate"));
    assert!(summary.contains("Note: (none)"));

    h.send("no").await;
    assert_eq!(h.messages.last(), "❌ Trade cancelled.");
    assert!(h.sessions.state(USER).is_none());
}

#[tokio::test]
async fn test_trade_skipped_note_submits_without_note() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("propose trade").await;
    h.send("End Zone Elite").await;
    h.send("Marcus Bell").await;
    h.send("Victor Nunes").await;
    h.send("skip").await;
    assert!(h.messages.last().contains("Note: (none)"));

    h.send("yes").await;
    assert_eq!(h.messages.last(), "✅ Trade proposal sent!");
    assert!(h.sessions.state(USER).is_none());

    h.send("show transactions").await;
    let listing = h.messages.last();
    let entry = listing
        .split("3. ")
        .nth(1)
        .expect("submitted trade must appear in the pending list");
    assert!(entry.starts_with("Trade (proposed)"));
    assert!(entry.contains("Marcus Bell (trade)"));
    assert!(entry.contains("Victor Nunes (trade)"));
    assert!(!entry.contains("Note:"), "a skipped note must not be stored");
}

#[tokio::test]
async fn test_trade_empty_player_list_reprompts() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("propose trade").await;
    h.send("End Zone Elite").await;
    h.send(" , ").await;
    assert!(h.messages.last().contains("at least one player"));
    assert!(h.sessions.state(USER).is_some());
}

#[tokio::test]
async fn test_trade_unknown_player_aborts() {
    let h = linked_harness();
    h.pick_first_team().await;

    h.send("propose trade").await;
    h.send("End Zone Elite").await;
    h.send("Ghost Man").await;
    h.send("Victor Nunes").await;
    h.send("skip").await;
    h.send("yes").await;
    assert_eq!(h.messages.last(), "Could not find player: Ghost Man");
    assert!(h.sessions.state(USER).is_none());
}
