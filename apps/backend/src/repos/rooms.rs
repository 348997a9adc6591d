//! Room store operations (generic over any [`RoomStorage`]).
//!
//! These are the create / get / join / update-settings operations every
//! caller goes through. Codes are normalized to uppercase here, so adapters
//! only ever see canonical keys.

use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::adapters::RoomStorage;
use crate::domain::rules::{normalize_room_code, validate_name};
use crate::domain::state::{Player, Room, SettingsPatch};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::utils::ids::{generate_player_id, generate_room_code};

/// Default bound on room code regeneration after collisions.
pub const DEFAULT_CODE_ATTEMPTS: u32 = 16;

/// Room after a successful join, with the player that was added.
#[derive(Debug, Clone, PartialEq)]
pub struct Joined {
    pub room: Room,
    pub player: Player,
}

/// Create a lobby hosted by `host_name`, regenerating the code on collision.
pub fn create_room<S: RoomStorage + ?Sized>(
    store: &S,
    host_name: &str,
    max_attempts: u32,
) -> Result<Room, DomainError> {
    create_room_with(store, host_name, max_attempts, generate_room_code)
}

/// As [`create_room`] with an explicit code source.
pub fn create_room_with<S: RoomStorage + ?Sized>(
    store: &S,
    host_name: &str,
    max_attempts: u32,
    mut next_code: impl FnMut() -> String,
) -> Result<Room, DomainError> {
    let name = validate_name(host_name)?;
    let now = OffsetDateTime::now_utc();
    let host = Player::new(generate_player_id(), name, true, now);

    for attempt in 1..=max_attempts.max(1) {
        let code = normalize_room_code(&next_code());
        let room = Room::new(code.clone(), host.clone(), now);
        if store.insert_new(room.clone())? {
            debug!(code = %code, attempt, "Room created");
            return Ok(room);
        }
        debug!(code = %code, attempt, "Room code collision, regenerating");
    }

    warn!(max_attempts, "Room code space exhausted");
    Err(DomainError::conflict(
        ConflictKind::RoomCodeExhausted,
        format!("no free room code after {max_attempts} attempts"),
    ))
}

/// Case-insensitive lookup.
pub fn find_room<S: RoomStorage + ?Sized>(
    store: &S,
    code: &str,
) -> Result<Option<Room>, DomainError> {
    store.load(&normalize_room_code(code))
}

pub fn require_room<S: RoomStorage + ?Sized>(store: &S, code: &str) -> Result<Room, DomainError> {
    find_room(store, code)?.ok_or_else(|| room_not_found(code))
}

/// Append a player named `player_name` (trimmed) to the room.
pub fn join_room<S: RoomStorage + ?Sized>(
    store: &S,
    code: &str,
    player_name: &str,
) -> Result<Joined, DomainError> {
    let name = validate_name(player_name)?;
    let player = Player::new(generate_player_id(), name, false, OffsetDateTime::now_utc());

    let room = store
        .modify(&normalize_room_code(code), &mut |room: &mut Room| {
            if room.player_by_name(&player.name).is_some() {
                return Err(DomainError::conflict(
                    ConflictKind::NameTaken,
                    format!("name {:?} is already taken in room {}", player.name, room.code),
                ));
            }
            room.players.push(player.clone());
            Ok(())
        })?
        .ok_or_else(|| room_not_found(code))?;

    Ok(Joined { room, player })
}

/// Merge `patch` into the room's settings. False when the room is missing.
///
/// The impostor count is not checked against the roster here; players may
/// still join, and the round start re-validates it.
pub fn update_settings<S: RoomStorage + ?Sized>(
    store: &S,
    code: &str,
    patch: SettingsPatch,
) -> Result<bool, DomainError> {
    let updated = store.modify(&normalize_room_code(code), &mut |room: &mut Room| {
        patch.apply(&mut room.settings);
        Ok(())
    })?;
    Ok(updated.is_some())
}

/// Explicitly clear a room. False when the room is missing.
pub fn remove_room<S: RoomStorage + ?Sized>(store: &S, code: &str) -> Result<bool, DomainError> {
    store.remove(&normalize_room_code(code))
}

/// Apply a game mutation to an existing room, failing with NotFound if absent.
pub fn mutate_room<S: RoomStorage + ?Sized>(
    store: &S,
    code: &str,
    f: &mut dyn FnMut(&mut Room) -> Result<(), DomainError>,
) -> Result<Room, DomainError> {
    store
        .modify(&normalize_room_code(code), f)?
        .ok_or_else(|| room_not_found(code))
}

fn room_not_found(code: &str) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Room,
        format!("no room with code {}", normalize_room_code(code)),
    )
}
