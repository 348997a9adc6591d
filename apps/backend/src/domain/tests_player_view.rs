//! What each role is allowed to see.

use crate::domain::player_view::RoleCard;
use crate::domain::state::{GamePhase, Role};
use crate::domain::test_state_helpers::{id_of, room_with_roles};

#[test]
fn crew_sees_word_and_hint() {
    let room = room_with_roles(&["Alice", "Bob", "Carol"], &["Carol"]);
    let card = RoleCard::for_player(&room, &id_of(&room, "Alice")).unwrap();
    assert_eq!(card.role, Role::Crew);
    assert_eq!(card.secret_word.as_deref(), Some("Pizza"));
    assert_eq!(card.hint_word.as_deref(), Some("Käse"));
}

#[test]
fn impostor_never_sees_secret_word() {
    let mut room = room_with_roles(&["Alice", "Bob", "Carol"], &["Carol"]);
    let carol = id_of(&room, "Carol");

    let card = RoleCard::for_player(&room, &carol).unwrap();
    assert!(card.is_impostor());
    assert_eq!(card.secret_word, None);
    assert_eq!(card.hint_word.as_deref(), Some("Käse"));

    room.settings.hint_word_enabled = false;
    let card = RoleCard::for_player(&room, &carol).unwrap();
    assert_eq!(card.secret_word, None);
    assert_eq!(card.hint_word, None);
}

#[test]
fn disabled_hints_hide_hint_from_crew() {
    let mut room = room_with_roles(&["Alice", "Bob", "Carol"], &["Carol"]);
    room.settings.hint_word_enabled = false;
    let card = RoleCard::for_player(&room, &id_of(&room, "Bob")).unwrap();
    assert_eq!(card.secret_word.as_deref(), Some("Pizza"));
    assert_eq!(card.hint_word, None);
}

#[test]
fn lobby_card_is_blank() {
    let mut room = room_with_roles(&["Alice", "Bob", "Carol"], &["Carol"]);
    room.phase = GamePhase::Lobby;
    let card = RoleCard::for_player(&room, &id_of(&room, "Alice")).unwrap();
    assert_eq!(card.role, Role::Unassigned);
    assert_eq!(card.secret_word, None);
    assert_eq!(card.hint_word, None);
}

#[test]
fn unknown_player_has_no_card() {
    let room = room_with_roles(&["Alice", "Bob", "Carol"], &["Carol"]);
    assert!(RoleCard::for_player(&room, "nobody").is_err());
}
