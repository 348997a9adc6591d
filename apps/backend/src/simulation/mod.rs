//! Simulated participants: who the absent players vote for and whether
//! surviving impostors guess the word.

mod random;
mod scripted;
mod trait_def;

pub use random::{CoinFlipGuess, RandomVoter};
pub use scripted::{FixedGuess, ScriptedVotes};
pub use trait_def::{FinalGuess, SimulationError, VoteSource};
