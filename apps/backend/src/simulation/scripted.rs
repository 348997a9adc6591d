//! Deterministic strategies for tests and replays.

use std::collections::HashMap;

use super::trait_def::{FinalGuess, SimulationError, VoteSource};
use crate::domain::state::Room;

/// Replays a fixed voter -> target mapping.
#[derive(Debug, Clone, Default)]
pub struct ScriptedVotes {
    votes: HashMap<String, String>,
}

impl ScriptedVotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vote(mut self, voter: impl Into<String>, target: impl Into<String>) -> Self {
        self.votes.insert(voter.into(), target.into());
        self
    }
}

impl<V: Into<String>, T: Into<String>> FromIterator<(V, T)> for ScriptedVotes {
    fn from_iter<I: IntoIterator<Item = (V, T)>>(iter: I) -> Self {
        Self {
            votes: iter
                .into_iter()
                .map(|(v, t)| (v.into(), t.into()))
                .collect(),
        }
    }
}

impl VoteSource for ScriptedVotes {
    fn choose_target(&self, _room: &Room, voter: &str) -> Result<String, SimulationError> {
        self.votes
            .get(voter)
            .cloned()
            .ok_or_else(|| SimulationError::Unscripted(voter.to_string()))
    }
}

/// Final guess with a predetermined answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedGuess(pub bool);

impl FinalGuess for FixedGuess {
    fn guess(&self, _room: &Room) -> bool {
        self.0
    }
}
