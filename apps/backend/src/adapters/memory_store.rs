//! Process-memory room storage.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

use super::{notify, RoomChanged, RoomMutation, RoomStorage, CHANGE_CHANNEL_CAPACITY};
use crate::domain::state::Room;
use crate::errors::domain::DomainError;

/// Rooms live for the lifetime of the process, one mutex per room.
///
/// The map shard lock is only held long enough to clone the room's `Arc`;
/// mutations serialize on the room's own mutex so different rooms never
/// contend.
pub struct MemoryRoomStorage {
    rooms: DashMap<String, Arc<Mutex<Room>>>,
    changes: broadcast::Sender<RoomChanged>,
}

impl MemoryRoomStorage {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            rooms: DashMap::new(),
            changes,
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    fn slot(&self, code: &str) -> Option<Arc<Mutex<Room>>> {
        self.rooms.get(code).map(|entry| entry.value().clone())
    }
}

impl Default for MemoryRoomStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomStorage for MemoryRoomStorage {
    fn load(&self, code: &str) -> Result<Option<Room>, DomainError> {
        Ok(self.slot(code).map(|slot| slot.lock().clone()))
    }

    fn insert_new(&self, room: Room) -> Result<bool, DomainError> {
        let code = room.code.clone();
        match self.rooms.entry(code.clone()) {
            Entry::Occupied(_) => {
                debug!(code = %code, "Room code already in use");
                Ok(false)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::new(Mutex::new(room)));
                notify(&self.changes, &code);
                Ok(true)
            }
        }
    }

    fn modify(&self, code: &str, f: &mut RoomMutation<'_>) -> Result<Option<Room>, DomainError> {
        let Some(slot) = self.slot(code) else {
            return Ok(None);
        };

        let (updated, changed) = {
            let mut guard = slot.lock();
            let mut draft = guard.clone();
            f(&mut draft)?;
            let changed = draft != *guard;
            if changed {
                *guard = draft.clone();
            }
            (draft, changed)
        };

        if changed {
            notify(&self.changes, code);
        }
        Ok(Some(updated))
    }

    fn remove(&self, code: &str) -> Result<bool, DomainError> {
        let removed = self.rooms.remove(code).is_some();
        if removed {
            notify(&self.changes, code);
        }
        Ok(removed)
    }

    fn codes(&self) -> Result<Vec<String>, DomainError> {
        let mut codes: Vec<String> = self.rooms.iter().map(|e| e.key().clone()).collect();
        codes.sort();
        Ok(codes)
    }

    fn subscribe(&self) -> broadcast::Receiver<RoomChanged> {
        self.changes.subscribe()
    }
}
