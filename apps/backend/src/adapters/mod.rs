//! Room storage adapters.
//!
//! [`RoomStorage`] is the only stateful seam in the crate. Adapters own the
//! room records; everything else works on the snapshots they return.

pub mod file_store;
pub mod memory_store;

use tokio::sync::broadcast;

use crate::domain::state::Room;
use crate::errors::domain::DomainError;

pub use file_store::FileRoomStorage;
pub use memory_store::MemoryRoomStorage;

/// Capacity of each adapter's change channel. Slow subscribers observe
/// `Lagged` and must re-read everything they show.
pub const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// Fired after a room was created, changed or removed. Carries no payload
/// beyond the code; consumers re-read the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomChanged {
    pub code: String,
}

/// Closure applied by [`RoomStorage::modify`].
pub type RoomMutation<'a> = dyn FnMut(&mut Room) -> Result<(), DomainError> + 'a;

/// Storage primitives. Codes passed in are already normalized to uppercase.
///
/// Each call is atomic with respect to one room code: `modify` is a
/// read-modify-write under the adapter's per-room exclusion, so concurrent
/// writers never lose each other's changes.
pub trait RoomStorage: Send + Sync {
    /// Snapshot of the room, if present.
    fn load(&self, code: &str) -> Result<Option<Room>, DomainError>;

    /// Store `room` unless its code is taken. Returns false on collision.
    fn insert_new(&self, room: Room) -> Result<bool, DomainError>;

    /// Apply `f` to a copy of the room and store it if `f` succeeds.
    ///
    /// Returns `Ok(None)` when the room does not exist. When `f` fails the
    /// stored room is untouched and the error is returned.
    fn modify(&self, code: &str, f: &mut RoomMutation<'_>) -> Result<Option<Room>, DomainError>;

    /// Delete the room. Returns false if it did not exist.
    fn remove(&self, code: &str) -> Result<bool, DomainError>;

    /// Codes of all stored rooms.
    fn codes(&self) -> Result<Vec<String>, DomainError>;

    /// Subscribe to change notifications.
    fn subscribe(&self) -> broadcast::Receiver<RoomChanged>;
}

pub(crate) fn notify(tx: &broadcast::Sender<RoomChanged>, code: &str) {
    // No receivers is fine; nobody is watching yet.
    let _ = tx.send(RoomChanged {
        code: code.to_string(),
    });
}
