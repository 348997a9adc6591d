//! Random strategies, seedable for reproducible runs.

use parking_lot::Mutex;
use rand::prelude::*;

use super::trait_def::{FinalGuess, SimulationError, VoteSource};
use crate::domain::state::Room;

/// Votes uniformly at random for any player other than the voter.
pub struct RandomVoter {
    rng: Mutex<StdRng>,
}

impl RandomVoter {
    /// `Some(seed)` for reproducible votes, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl VoteSource for RandomVoter {
    fn choose_target(&self, room: &Room, voter: &str) -> Result<String, SimulationError> {
        let candidates: Vec<&str> = room
            .players
            .iter()
            .map(|p| p.id.as_str())
            .filter(|id| *id != voter)
            .collect();

        let mut rng = self.rng.lock();
        candidates
            .choose(&mut *rng)
            .map(|id| id.to_string())
            .ok_or_else(|| SimulationError::NoCandidates(voter.to_string()))
    }
}

/// Final guess that succeeds with a fixed probability, independent of the
/// round so far.
pub struct CoinFlipGuess {
    probability: f64,
    rng: Mutex<StdRng>,
}

impl CoinFlipGuess {
    /// `probability` is clamped to `0.0..=1.0`.
    pub fn new(probability: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            probability: probability.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl FinalGuess for CoinFlipGuess {
    fn guess(&self, _room: &Room) -> bool {
        self.rng.lock().random_bool(self.probability)
    }
}
