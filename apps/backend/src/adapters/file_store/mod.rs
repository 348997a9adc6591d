//! Shared JSON-blob room storage.
//!
//! All rooms live in one keyed blob on disk so independent processes (or
//! client contexts) pointed at the same path see one another's rooms. Writes
//! are read-modify-write under an in-process mutex plus an exclusive file
//! lock, and land atomically via write-to-temp + rename. Readers never lock.

pub mod dto;
mod lock;

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{notify, RoomChanged, RoomMutation, RoomStorage, CHANGE_CHANNEL_CAPACITY};
use crate::domain::state::Room;
use crate::errors::domain::DomainError;
pub use dto::{RoomsBlob, SCHEMA_VERSION};

pub const DEFAULT_LOCK_RETRIES: u32 = 50;

pub struct FileRoomStorage {
    path: PathBuf,
    lock_path: PathBuf,
    lock_retries: u32,
    /// Serializes writers inside this process and remembers the last blob
    /// this instance read or wrote, for change polling.
    last_seen: Mutex<RoomsBlob>,
    changes: broadcast::Sender<RoomChanged>,
}

impl FileRoomStorage {
    /// Open (or lazily create) the blob at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        Self::open_with_retries(path, DEFAULT_LOCK_RETRIES)
    }

    pub fn open_with_retries(
        path: impl Into<PathBuf>,
        lock_retries: u32,
    ) -> Result<Self, DomainError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let lock_path = sidecar(&path, "lock");
        let initial = read_blob(&path)?;
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        debug!(
            path = %path.display(),
            revision = initial.revision,
            rooms = initial.rooms.len(),
            "Opened room blob"
        );

        Ok(Self {
            path,
            lock_path,
            lock_retries,
            last_seen: Mutex::new(initial),
            changes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the blob and fire one [`RoomChanged`] per room that another
    /// writer created, changed or removed since this instance last looked.
    /// Returns the affected codes.
    pub fn poll_external_changes(&self) -> Result<Vec<String>, DomainError> {
        let current = read_blob(&self.path)?;
        let changed = {
            let mut seen = self.last_seen.lock();
            if current.revision == seen.revision {
                return Ok(Vec::new());
            }
            let changed = diff_codes(&seen, &current);
            *seen = current;
            changed
        };

        for code in &changed {
            notify(&self.changes, code);
        }
        if !changed.is_empty() {
            debug!(rooms = changed.len(), "Observed external room changes");
        }
        Ok(changed)
    }

    /// Poll for external changes every `interval` until `cancel` fires.
    pub fn spawn_watcher(
        self: Arc<Self>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = self.poll_external_changes() {
                            warn!(error = %e, path = %self.path.display(), "Room blob poll failed");
                        }
                    }
                }
            }
            debug!(path = %self.path.display(), "Room blob watcher stopped");
        })
    }

    /// Read-modify-write the whole blob. `f` returns its value and the code
    /// of the room it changed; unchanged blobs are not rewritten.
    ///
    /// Rooms another writer changed since this instance last looked are
    /// reported here too, since the fresh read replaces what polling would
    /// compare against.
    fn transact<T>(
        &self,
        f: impl FnOnce(&mut RoomsBlob) -> Result<(T, Option<String>), DomainError>,
    ) -> Result<T, DomainError> {
        let mut seen = self.last_seen.lock();
        let guard = lock::acquire(&self.lock_path, self.lock_retries)?;

        let mut blob = read_blob(&self.path)?;
        let external = if blob.revision == seen.revision {
            Vec::new()
        } else {
            let changed = diff_codes(&seen, &blob);
            *seen = blob.clone();
            changed
        };

        let outcome = match f(&mut blob) {
            Ok((value, Some(code))) => {
                blob.revision += 1;
                write_blob(&self.path, &blob).map(|()| {
                    *seen = blob;
                    (value, Some(code))
                })
            }
            other => other,
        };
        drop(guard);
        drop(seen);

        let touched = outcome.as_ref().ok().and_then(|(_, code)| code.as_deref());
        for code in external.iter().filter(|code| Some(code.as_str()) != touched) {
            notify(&self.changes, code);
        }
        if let Some(code) = touched {
            notify(&self.changes, code);
        }
        if !external.is_empty() {
            debug!(rooms = external.len(), "Observed external room changes on write");
        }
        outcome.map(|(value, _)| value)
    }
}

impl RoomStorage for FileRoomStorage {
    fn load(&self, code: &str) -> Result<Option<Room>, DomainError> {
        Ok(read_blob(&self.path)?.rooms.remove(code))
    }

    fn insert_new(&self, room: Room) -> Result<bool, DomainError> {
        self.transact(|blob| {
            if blob.rooms.contains_key(&room.code) {
                debug!(code = %room.code, "Room code already in use");
                return Ok((false, None));
            }
            let code = room.code.clone();
            blob.rooms.insert(code.clone(), room);
            Ok((true, Some(code)))
        })
    }

    fn modify(&self, code: &str, f: &mut RoomMutation<'_>) -> Result<Option<Room>, DomainError> {
        self.transact(|blob| {
            let Some(stored) = blob.rooms.get_mut(code) else {
                return Ok((None, None));
            };
            let mut draft = stored.clone();
            f(&mut draft)?;
            if draft == *stored {
                return Ok((Some(draft), None));
            }
            *stored = draft.clone();
            Ok((Some(draft), Some(code.to_string())))
        })
    }

    fn remove(&self, code: &str) -> Result<bool, DomainError> {
        self.transact(|blob| {
            let removed = blob.rooms.remove(code).is_some();
            Ok((removed, removed.then(|| code.to_string())))
        })
    }

    fn codes(&self) -> Result<Vec<String>, DomainError> {
        Ok(read_blob(&self.path)?.rooms.into_keys().collect())
    }

    fn subscribe(&self) -> broadcast::Receiver<RoomChanged> {
        self.changes.subscribe()
    }
}

fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{suffix}"));
    path.with_file_name(name)
}

fn read_blob(path: &Path) -> Result<RoomsBlob, DomainError> {
    match fs::read(path) {
        Ok(bytes) => RoomsBlob::decode(&bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(RoomsBlob::empty()),
        Err(e) => Err(e.into()),
    }
}

fn write_blob(path: &Path, blob: &RoomsBlob) -> Result<(), DomainError> {
    let tmp = sidecar(path, "tmp");
    fs::write(&tmp, blob.encode()?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn diff_codes(before: &RoomsBlob, after: &RoomsBlob) -> Vec<String> {
    let codes: BTreeSet<&String> = before.rooms.keys().chain(after.rooms.keys()).collect();
    codes
        .into_iter()
        .filter(|code| before.rooms.get(*code) != after.rooms.get(*code))
        .cloned()
        .collect()
}
