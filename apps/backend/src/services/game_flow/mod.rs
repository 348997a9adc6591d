//! Game flow service: drives a room through
//! `Lobby -> RoleReveal -> Discussion -> Voting -> Results -> Lobby`.
//!
//! Every transition re-reads the room inside the store's atomic modify, so
//! guards are evaluated against current state rather than a client's
//! snapshot. Guard failures leave the room untouched.

mod player_actions;
mod round_lifecycle;
mod timer;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use timer::DiscussionTimers;

use crate::adapters::RoomStorage;
use crate::config::game::GameConfig;
use crate::simulation::{CoinFlipGuess, FinalGuess};

/// Offset applied to the configured seed for the final-guess stream so it
/// does not mirror the role shuffle.
const FINAL_GUESS_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct GameFlowService {
    store: Arc<dyn RoomStorage>,
    discussion: Duration,
    rng: Mutex<StdRng>,
    final_guess: Arc<dyn FinalGuess>,
    timers: DiscussionTimers,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn RoomStorage>, config: &GameConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let final_guess = CoinFlipGuess::new(
            config.final_guess_probability,
            config.rng_seed.map(|seed| seed ^ FINAL_GUESS_SEED_SALT),
        );
        Self {
            store,
            discussion: config.discussion,
            rng: Mutex::new(rng),
            final_guess: Arc::new(final_guess),
            timers: DiscussionTimers::default(),
        }
    }

    /// Replace the final-guess strategy.
    pub fn with_final_guess(mut self, final_guess: Arc<dyn FinalGuess>) -> Self {
        self.final_guess = final_guess;
        self
    }

    pub fn store(&self) -> &Arc<dyn RoomStorage> {
        &self.store
    }

    pub fn discussion_duration(&self) -> Duration {
        self.discussion
    }

    pub fn timers(&self) -> &DiscussionTimers {
        &self.timers
    }
}

impl Drop for GameFlowService {
    fn drop(&mut self) {
        self.timers.cancel_all();
    }
}
