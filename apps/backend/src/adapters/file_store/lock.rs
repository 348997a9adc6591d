//! Cross-process exclusion for the room blob.
//!
//! Uses an OS-level exclusive lock on `<blob>.lock`. Acquisition is
//! non-blocking with a bounded retry loop so a stuck peer surfaces as a
//! timeout instead of hanging the caller.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use fs4::fs_std::FileExt;
use tracing::debug;

use crate::errors::domain::{DomainError, InfraErrorKind};

const BACKOFF_STEP: Duration = Duration::from_millis(2);
const BACKOFF_MAX: Duration = Duration::from_millis(20);

/// Held lock; released on drop.
pub struct BlobLockGuard {
    file: File,
    lock_path: PathBuf,
}

impl Drop for BlobLockGuard {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            // the handle closes right after, which releases the lock anyway
            debug!(
                error = %e,
                lock_path = %self.lock_path.display(),
                "Blob unlock returned error (may be benign)"
            );
        }
    }
}

pub fn acquire(lock_path: &Path, retries: u32) -> Result<BlobLockGuard, DomainError> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(lock_path)?;

    let attempts = retries.max(1);
    for attempt in 1..=attempts {
        match file.try_lock_exclusive() {
            Ok(true) => {
                return Ok(BlobLockGuard {
                    file,
                    lock_path: lock_path.to_path_buf(),
                });
            }
            Ok(false) => {}
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
            Err(e) => return Err(e.into()),
        }
        debug!(
            lock_path = %lock_path.display(),
            attempt,
            "Blob lock contended"
        );
        thread::sleep((BACKOFF_STEP * attempt).min(BACKOFF_MAX));
    }

    Err(DomainError::infra(
        InfraErrorKind::Timeout,
        format!(
            "could not lock {} after {attempts} attempts",
            lock_path.display()
        ),
    ))
}
