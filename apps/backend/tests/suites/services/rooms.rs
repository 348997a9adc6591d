//! Room service: lobby operations with host checks.

use impostor_backend::{ErrorCode, GamePhase, SettingsPatch};
use impostor_test_support::unique_helpers::{unique_name, unique_names};

use crate::common::assert_error_code;
use crate::support::game_setup::{memory_state, table};

#[test]
fn test_join_validates_code_and_name() {
    let state = memory_state(1, false);
    let room = state.rooms.create_room(&unique_name("Host")).unwrap();

    assert_error_code(state.rooms.join_room("AB-1", "Bob"), ErrorCode::InvalidRoomCode);
    assert_error_code(state.rooms.join_room("ABCDE", "Bob"), ErrorCode::InvalidRoomCode);
    assert_error_code(state.rooms.join_room(&room.code, ""), ErrorCode::InvalidName);
    assert_error_code(state.rooms.join_room("ZZZZ", "Bob"), ErrorCode::RoomNotFound);

    let joined = state.rooms.join_room(&room.code.to_lowercase(), "Bob").unwrap();
    assert_eq!(joined.room.players.len(), 2);
}

#[test]
fn test_settings_are_host_only_and_lobby_only() {
    let t = table(memory_state(1, false), &["Ann", "Ben", "Cid"]);
    let rooms = &t.state.rooms;

    assert_error_code(
        rooms.update_settings(
            t.code(),
            t.guests[0].player_id(),
            SettingsPatch::hint_word_enabled(false),
        ),
        ErrorCode::NotHost,
    );
    assert_error_code(
        rooms.update_settings(t.code(), t.host.player_id(), SettingsPatch::impostor_count(0)),
        ErrorCode::InvalidImpostorCount,
    );
    assert!(!rooms
        .update_settings("ZZZZ", t.host.player_id(), SettingsPatch::impostor_count(1))
        .unwrap());
    assert!(rooms
        .update_settings(t.code(), t.host.player_id(), SettingsPatch::default())
        .unwrap());

    t.host.start_game().unwrap();
    assert_error_code(
        rooms.update_settings(
            t.code(),
            t.host.player_id(),
            SettingsPatch::hint_word_enabled(false),
        ),
        ErrorCode::PhaseMismatch,
    );
    assert_eq!(t.host.phase().unwrap(), GamePhase::RoleReveal);
}

#[test]
fn test_rooms_are_independent() {
    let state = memory_state(1, false);
    let names = unique_names("P", 2);
    let first = state.rooms.create_room(&names[0]).unwrap();
    let second = state.rooms.create_room(&names[1]).unwrap();
    assert_ne!(first.code, second.code);

    state.rooms.join_room(&first.code, "Bob").unwrap();
    assert_eq!(state.rooms.require_room(&second.code).unwrap().players.len(), 1);

    assert!(state.rooms.close_room(&first.code).unwrap());
    assert!(state.rooms.get_room(&first.code).unwrap().is_none());
    assert!(state.rooms.get_room(&second.code).unwrap().is_some());
}
