//! Discussion timeout on a paused Tokio clock.

use std::sync::Arc;
use std::time::Duration;

use impostor_backend::{
    AppState, FixedGuess, GameConfig, GamePhase, PlayerSession, RandomVoter, StoreKind,
};
use tempfile::TempDir;

use crate::support::game_setup::{memory_state, seeded_config, table};

fn shared_file_state(config: &GameConfig) -> AppState {
    AppState::from_config(config.clone())
        .expect("file state")
        .with_final_guess(Arc::new(FixedGuess(false)))
}

#[tokio::test(start_paused = true)]
async fn test_timer_opens_the_vote() {
    let t = table(memory_state(1, false), &["Ann", "Ben", "Cid"]);
    t.host.start_game().unwrap();
    t.guests[0].continue_to_discussion().unwrap();
    assert!(t.state.flow.timers().is_armed(t.code()));

    tokio::time::sleep(Duration::from_secs(29)).await;
    assert_eq!(t.host.phase().unwrap(), GamePhase::Discussion);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(t.host.phase().unwrap(), GamePhase::Voting);
    assert!(!t.state.flow.timers().is_armed(t.code()));
}

#[tokio::test(start_paused = true)]
async fn test_repeated_continue_does_not_rearm() {
    let t = table(memory_state(1, false), &["Ann", "Ben", "Cid"]);
    t.host.start_game().unwrap();
    t.host.continue_to_discussion().unwrap();

    tokio::time::sleep(Duration::from_secs(20)).await;
    t.guests[1].continue_to_discussion().unwrap();

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(t.host.phase().unwrap(), GamePhase::Voting);
}

#[tokio::test(start_paused = true)]
async fn test_early_advance_cancels_the_timer() {
    let t = table(memory_state(1, false), &["Ann", "Ben", "Cid"]);
    t.host.start_game().unwrap();
    t.host.continue_to_discussion().unwrap();
    t.host.advance_to_voting().unwrap();
    assert!(!t.state.flow.timers().is_armed(t.code()));

    t.guests[0].vote(Some(t.host.player_id())).unwrap();
    tokio::time::sleep(Duration::from_secs(60)).await;

    // The vote cast before the deadline survives
    let room = t.host.room().unwrap();
    assert_eq!(room.phase, GamePhase::Voting);
    assert_eq!(room.votes.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_timeout_is_a_no_op() {
    let t = table(memory_state(1, false), &["Ann", "Ben", "Cid"]);
    t.host.start_game().unwrap();
    assert!(!t.state.flow.expire_discussion(t.code()).unwrap());
    assert_eq!(t.host.phase().unwrap(), GamePhase::RoleReveal);

    t.host.continue_to_discussion().unwrap();
    assert!(t.state.flow.expire_discussion(t.code()).unwrap());
    assert!(!t.state.flow.expire_discussion(t.code()).unwrap());
    assert_eq!(t.host.phase().unwrap(), GamePhase::Voting);
}

#[test]
fn test_without_runtime_only_the_host_advances() {
    let t = table(memory_state(1, false), &["Ann", "Ben", "Cid"]);
    t.host.start_game().unwrap();
    t.host.continue_to_discussion().unwrap();
    assert!(!t.state.flow.timers().is_armed(t.code()));
    assert_eq!(t.host.advance_to_voting().unwrap().phase, GamePhase::Voting);
}

#[tokio::test(start_paused = true)]
async fn test_timer_from_an_earlier_round_leaves_the_next_one_alone() {
    let dir = TempDir::new().unwrap();
    let config = GameConfig {
        store: StoreKind::File(dir.path().join("rooms.json")),
        ..seeded_config(4)
    };
    let t = table(shared_file_state(&config), &["Ann", "Ben", "Cid"]);
    let other = shared_file_state(&config);
    let ben_elsewhere = PlayerSession::resume(
        other.rooms.clone(),
        other.flow.clone(),
        t.code(),
        t.guests[0].player_id(),
    )
    .unwrap();

    // Round 1: the timer lives in the other process, the host ends it early here
    t.host.start_game().unwrap();
    ben_elsewhere.continue_to_discussion().unwrap();
    assert!(other.flow.timers().is_armed(t.code()));
    t.host.advance_to_voting().unwrap();
    t.state
        .flow
        .fill_missing_votes(t.code(), &RandomVoter::new(Some(3)), &[])
        .unwrap();
    t.host.new_round().unwrap();

    tokio::time::sleep(Duration::from_secs(5)).await;
    let round_two = t.host.start_game().unwrap();
    assert_eq!(round_two.round, 2);
    t.host.continue_to_discussion().unwrap();

    // The round 1 deadline passes during round 2's discussion
    tokio::time::sleep(Duration::from_secs(26)).await;
    assert_eq!(t.host.phase().unwrap(), GamePhase::Discussion);

    // Round 2's own timer still fires on time
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(t.host.phase().unwrap(), GamePhase::Voting);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_continue_writes_nothing() {
    let t = table(memory_state(1, false), &["Ann", "Ben", "Cid"]);
    t.host.start_game().unwrap();
    t.host.continue_to_discussion().unwrap();

    let mut changes = t.host.subscribe();
    let room = t.guests[0].continue_to_discussion().unwrap();
    assert_eq!(room.phase, GamePhase::Discussion);
    assert!(changes.try_recv().is_err());
}
