mod common;

use chrono::{Duration, Utc};
use common::{linked_harness, unlinked_harness, USER};
use rosterbot::session::{Credentials, SessionStore};

#[tokio::test]
async fn test_unlinked_user_is_prompted_to_link() {
    let h = unlinked_harness();
    h.send("get standings").await;
    assert!(h.messages.last().contains("link your fantasy account"));
    assert!(h.sessions.state(USER).is_none());
}

#[tokio::test]
async fn test_choose_team_selects_and_derives_league() {
    let h = linked_harness();
    h.send("choose team").await;
    let menu = h.messages.last();
    assert!(menu.contains("1. Bench Warmers"));
    assert!(menu.contains("2. Gridiron Giants"));

    h.send("2").await;
    assert!(h.messages.last().contains("✅ Team selected: Gridiron Giants"));
    assert_eq!(h.sessions.selected_team(USER).as_deref(), Some("461.l.2000.t.4"));
    assert_eq!(h.sessions.selected_league(USER).as_deref(), Some("461.l.2000"));
    assert!(h.sessions.state(USER).is_none());
}

#[tokio::test]
async fn test_choose_team_invalid_selection_keeps_stable_menu() {
    let h = linked_harness();
    h.send("choose team").await;
    h.send("99").await;
    let retry = h.messages.last();
    assert!(retry.contains("Invalid selection"));
    assert!(retry.contains("1. Bench Warmers"));
    assert!(retry.contains("2. Gridiron Giants"));

    // Still awaiting; a valid number completes the flow.
    h.send("1").await;
    assert!(h.messages.last().contains("✅ Team selected: Bench Warmers"));
}

#[tokio::test]
async fn test_gated_flow_defers_to_choose_team_and_resumes() {
    let h = linked_harness();
    h.send("get standings").await;
    assert!(h.messages.last().contains("pick your team"));

    h.send("1").await;
    let all = h.messages.all();
    assert!(all.iter().any(|m| m.contains("✅ Team selected: Bench Warmers")));
    assert!(all.iter().any(|m| m.contains("league standings")));
    assert!(h.sessions.state(USER).is_none());
}

#[tokio::test]
async fn test_restart_clears_session_but_keeps_credentials() {
    let h = linked_harness();
    h.pick_first_team().await;
    h.send("add Elijah Moss").await;
    assert!(h.sessions.state(USER).is_some());

    h.send("restart").await;
    assert!(h.messages.last().contains("Session restarted"));
    assert!(h.sessions.state(USER).is_none());
    assert!(h.sessions.selected_team(USER).is_none());
    assert!(h.sessions.selected_league(USER).is_none());
    assert!(h.sessions.credentials(USER).is_some());

    // Still linked: the next message classifies instead of demanding a link.
    h.send("what now").await;
    assert!(h.messages.last().contains("I didn't understand"));
}

#[tokio::test]
async fn test_help_preempts_active_flow() {
    let h = linked_harness();
    h.pick_first_team().await;
    h.send("propose trade").await;
    assert!(h.sessions.state(USER).is_some());

    h.send("help").await;
    assert!(h.messages.last().contains("Rosterbot Commands"));
    assert!(h.sessions.state(USER).is_none());
}

#[tokio::test]
async fn test_team_change_invalidates_league_directory() {
    let h = linked_harness();
    h.pick_first_team().await;
    h.send("show league").await;
    assert!(h.sessions.league_directory(USER).is_some());

    h.send("choose team").await;
    h.send("2").await;
    assert!(h.sessions.league_directory(USER).is_none());
}

#[tokio::test]
async fn test_expired_token_refreshes_silently() {
    let h = linked_harness();
    h.sessions.set_credentials(
        USER,
        Credentials {
            access_token: "stale".to_string(),
            refresh_token: "demo-refresh".to_string(),
            expires_at: Utc::now() - Duration::minutes(5),
        },
    );
    h.pick_first_team().await;
    h.send("get standings").await;
    assert!(h.messages.last().contains("league standings"));
    let refreshed = h.sessions.credentials(USER).expect("still linked");
    assert!(!refreshed.is_expired());
}

#[tokio::test]
async fn test_failed_refresh_asks_to_relink() {
    let h = linked_harness();
    h.sessions.set_credentials(
        USER,
        Credentials {
            access_token: "stale".to_string(),
            refresh_token: "revoked".to_string(),
            expires_at: Utc::now() - Duration::minutes(5),
        },
    );
    h.send("get standings").await;
    assert!(h.messages.last().contains("login has expired"));
}

#[tokio::test]
async fn test_link_hands_out_single_use_url() {
    let h = linked_harness();
    h.send("link").await;
    assert!(h.messages.last().contains("/auth/login?state="));
}

#[tokio::test]
async fn test_bare_yes_with_nothing_pending() {
    let h = linked_harness();
    h.send("yes").await;
    assert!(h.messages.last().contains("Nothing is waiting for confirmation"));
    assert!(h.sessions.state(USER).is_none());
}
