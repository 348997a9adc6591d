//! Strategy traits for simulated players.

use std::fmt;

use crate::domain::state::Room;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Errors a strategy can report instead of a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// No other player is available to vote for
    NoCandidates(String),
    /// Scripted source has no entry for this voter
    Unscripted(String),
    Internal(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::NoCandidates(voter) => write!(f, "no vote candidates for {voter}"),
            SimulationError::Unscripted(voter) => write!(f, "no scripted vote for {voter}"),
            SimulationError::Internal(msg) => write!(f, "simulation internal error: {msg}"),
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<SimulationError> for DomainError {
    fn from(err: SimulationError) -> Self {
        DomainError::infra(InfraErrorKind::Other("VOTE_SOURCE".into()), err.to_string())
    }
}

/// Decides the vote of a player who is not driven by a local client.
///
/// Implementations receive a snapshot of the room taken before any vote of
/// the batch is recorded and must return the id of another member. No store
/// lock is held while they run.
pub trait VoteSource: Send + Sync {
    fn choose_target(&self, room: &Room, voter: &str) -> Result<String, SimulationError>;
}

/// Decides whether the remaining impostors name the secret word after one
/// of them was voted out.
pub trait FinalGuess: Send + Sync {
    fn guess(&self, room: &Room) -> bool;
}
