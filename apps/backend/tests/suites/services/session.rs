//! Player sessions: what each client can read.

use impostor_backend::{ErrorCode, GamePhase, Role, SettingsPatch};

use crate::common::assert_error_code;
use crate::support::game_setup::{memory_state, table, to_voting};

#[test]
fn test_accessors_in_lobby() {
    let t = table(memory_state(1, false), &["Ann", "Ben", "Cid"]);

    assert_eq!(t.host.phase().unwrap(), GamePhase::Lobby);
    assert!(t.host.is_host().unwrap());
    assert!(!t.guests[0].is_host().unwrap());
    assert_eq!(t.guests[1].me().unwrap().name, "Cid");
    assert_eq!(t.host.result().unwrap(), None);
    assert!(t.host.tally().unwrap().is_empty());

    let card = t.guests[0].role_card().unwrap();
    assert_eq!(card.role, Role::Unassigned);
    assert_eq!(card.secret_word, None);
    assert_eq!(card.hint_word, None);
}

#[test]
fn test_role_cards_hide_the_word_from_impostors() {
    let t = table(memory_state(9, false), &["Ann", "Ben", "Cid", "Dee"]);
    let room = t.host.start_game().unwrap();

    for session in t.everyone() {
        let card = session.role_card().unwrap();
        let me = room.player(session.player_id()).unwrap();
        assert_eq!(card.role, me.role);
        assert_eq!(card.hint_word, room.hint_word);
        if card.is_impostor() {
            assert_eq!(card.secret_word, None);
        } else {
            assert_eq!(card.secret_word, room.secret_word);
        }
    }
}

#[test]
fn test_disabled_hints_are_hidden_from_everyone() {
    let t = table(memory_state(9, false), &["Ann", "Ben", "Cid"]);
    t.host.update_settings(SettingsPatch::hint_word_enabled(false)).unwrap();
    t.host.start_game().unwrap();

    for session in t.everyone() {
        assert_eq!(session.role_card().unwrap().hint_word, None);
    }
}

#[test]
fn test_sessions_see_each_others_changes() {
    let t = table(memory_state(2, false), &["Ann", "Ben", "Cid"]);
    let mut changes = t.guests[1].subscribe();

    to_voting(&t);
    t.guests[0].vote(Some(t.host.player_id())).unwrap();

    assert_eq!(t.guests[1].phase().unwrap(), GamePhase::Voting);
    assert_eq!(t.guests[1].tally().unwrap().count_for(t.host.player_id()), 1);
    assert!(t.guests[0].has_voted().unwrap());
    assert!(!t.guests[1].has_voted().unwrap());

    let mut seen = 0;
    while let Ok(event) = changes.try_recv() {
        assert_eq!(event.code, t.code());
        seen += 1;
    }
    assert_eq!(seen, 4);
}

#[test]
fn test_resume_binds_to_existing_player() {
    let t = table(memory_state(2, false), &["Ann", "Ben", "Cid"]);
    let resumed = impostor_backend::PlayerSession::resume(
        t.state.rooms.clone(),
        t.state.flow.clone(),
        &t.code().to_lowercase(),
        t.guests[0].player_id(),
    )
    .unwrap();
    assert_eq!(resumed.me().unwrap().name, "Ben");
    assert_eq!(resumed.code(), t.code());

    assert_error_code(
        impostor_backend::PlayerSession::resume(
            t.state.rooms.clone(),
            t.state.flow.clone(),
            t.code(),
            "player_x",
        )
        .map(|s| s.player_id().to_string()),
        ErrorCode::PlayerNotFound,
    );
}
