//! Single-shot discussion timers, one per room.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::adapters::RoomStorage;
use crate::domain::rules::normalize_room_code;
use crate::domain::state::{GamePhase, Room};
use crate::errors::domain::DomainError;

#[derive(Default)]
pub struct DiscussionTimers {
    armed: Arc<DashMap<String, (u64, CancellationToken)>>,
    generation: AtomicU64,
}

impl DiscussionTimers {
    /// Schedule a discussion timeout for round `round` of `code`, replacing
    /// any pending one.
    ///
    /// Needs a Tokio runtime; without one nothing is scheduled, false is
    /// returned and only the host can open the vote.
    pub fn arm(
        &self,
        store: Arc<dyn RoomStorage>,
        code: &str,
        round: u64,
        after: Duration,
    ) -> bool {
        let Ok(handle) = Handle::try_current() else {
            info!(code, "No Tokio runtime, discussion timer not armed");
            return false;
        };

        let code = normalize_room_code(code);
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        if let Some((_, (_, previous))) = self.armed.remove(&code) {
            previous.cancel();
        }
        self.armed.insert(code.clone(), (generation, token.clone()));

        debug!(code = %code, round, after_ms = after.as_millis() as u64, "Discussion timer armed");

        let armed = Arc::clone(&self.armed);
        handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(code = %code, round, "Discussion timer cancelled");
                }
                _ = tokio::time::sleep(after) => {
                    armed.remove_if(&code, |_, (g, _)| *g == generation);
                    // The file store backs off on its lock with blocking sleeps.
                    let expired = {
                        let code = code.clone();
                        tokio::task::spawn_blocking(move || {
                            expire_discussion(store.as_ref(), &code, Some(round))
                        })
                        .await
                    };
                    match expired {
                        Ok(Ok(true)) => {}
                        Ok(Ok(false)) => {
                            debug!(code = %code, round, "Discussion timer fired after phase change")
                        }
                        Ok(Err(err)) => {
                            warn!(code = %code, error = %err, "Discussion timeout failed")
                        }
                        Err(err) => {
                            warn!(code = %code, error = %err, "Discussion timeout task failed")
                        }
                    }
                }
            }
        });
        true
    }

    /// Cancel the pending timer for `code`. False if none was armed.
    pub fn cancel(&self, code: &str) -> bool {
        match self.armed.remove(&normalize_room_code(code)) {
            Some((_, (_, token))) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self, code: &str) -> bool {
        self.armed.contains_key(&normalize_room_code(code))
    }

    pub fn cancel_all(&self) {
        self.armed.retain(|_, (_, token)| {
            token.cancel();
            false
        });
    }
}

/// Move a discussing room to Voting. No-op (false) in any other phase, or
/// when `round` is given and the room has since started another round.
pub(super) fn expire_discussion(
    store: &dyn RoomStorage,
    code: &str,
    round: Option<u64>,
) -> Result<bool, DomainError> {
    let code = normalize_room_code(code);
    let due = |room: &Room| {
        room.phase == GamePhase::Discussion && round.unwrap_or(room.round) == room.round
    };
    match store.load(&code)? {
        Some(room) if due(&room) => {}
        _ => return Ok(false),
    }

    let mut advanced = false;
    store.modify(&code, &mut |room: &mut Room| {
        if due(room) {
            room.phase = GamePhase::Voting;
            room.votes.clear();
            advanced = true;
        }
        Ok(())
    })?;

    if advanced {
        info!(
            code = %code,
            phase = GamePhase::Voting.as_str(),
            "Discussion timed out, voting opened"
        );
    }
    Ok(advanced)
}
