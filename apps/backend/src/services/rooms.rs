//! Lobby operations: create, join, look up and configure rooms.

use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::RoomStorage;
use crate::domain::rules::{normalize_room_code, validate_room_code};
use crate::domain::state::{require_host, require_phase, GamePhase, Room, SettingsPatch};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::rooms::{self, Joined};

/// Room lifecycle service over a shared store.
#[derive(Clone)]
pub struct RoomService {
    store: Arc<dyn RoomStorage>,
    code_attempts: u32,
}

impl RoomService {
    pub fn new(store: Arc<dyn RoomStorage>, code_attempts: u32) -> Self {
        Self {
            store,
            code_attempts,
        }
    }

    pub fn store(&self) -> &Arc<dyn RoomStorage> {
        &self.store
    }

    /// Open a lobby hosted by `host_name`.
    pub fn create_room(&self, host_name: &str) -> Result<Room, DomainError> {
        let room = rooms::create_room(self.store.as_ref(), host_name, self.code_attempts)?;
        info!(code = %room.code, host = %room.host_player_id, "Room created");
        Ok(room)
    }

    /// Join an existing room by code (any case).
    pub fn join_room(&self, code: &str, player_name: &str) -> Result<Joined, DomainError> {
        let code = validate_room_code(code)?;
        let joined = rooms::join_room(self.store.as_ref(), &code, player_name)?;
        info!(
            code = %code,
            player_id = %joined.player.id,
            players = joined.room.players.len(),
            "Player joined"
        );
        Ok(joined)
    }

    pub fn get_room(&self, code: &str) -> Result<Option<Room>, DomainError> {
        rooms::find_room(self.store.as_ref(), code)
    }

    pub fn require_room(&self, code: &str) -> Result<Room, DomainError> {
        rooms::require_room(self.store.as_ref(), code)
    }

    /// Host-only settings change while in the lobby.
    ///
    /// Returns false when the room does not exist. An impostor count of zero
    /// is rejected; the upper bound is checked when the round starts because
    /// the roster can still grow.
    pub fn update_settings(
        &self,
        code: &str,
        actor: &str,
        patch: SettingsPatch,
    ) -> Result<bool, DomainError> {
        if patch.impostor_count == Some(0) {
            return Err(DomainError::validation(
                ValidationKind::InvalidImpostorCount,
                "impostor count must be at least 1",
            ));
        }
        if patch.is_empty() {
            return Ok(self.get_room(code)?.is_some());
        }

        let updated = self.store.modify(&normalize_room_code(code), &mut |room: &mut Room| {
            require_host(room, actor, "change settings")?;
            require_phase(room, GamePhase::Lobby, "change settings")?;
            patch.apply(&mut room.settings);
            Ok(())
        })?;

        match &updated {
            Some(room) => info!(
                code = %room.code,
                actor,
                impostor_count = room.settings.impostor_count,
                hint_word_enabled = room.settings.hint_word_enabled,
                "Settings updated"
            ),
            None => debug!(code, "Settings update for unknown room"),
        }
        Ok(updated.is_some())
    }

    /// Drop a room entirely.
    pub fn close_room(&self, code: &str) -> Result<bool, DomainError> {
        let removed = rooms::remove_room(self.store.as_ref(), code)?;
        if removed {
            info!(code, "Room closed");
        }
        Ok(removed)
    }
}
