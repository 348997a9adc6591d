//! Vote recording, tallying and round outcome resolution.
//!
//! Ties on the highest count go to the target that received its first vote
//! earliest. The tally keeps targets in first-vote order so a stable linear
//! scan gives that tie-break.

use serde::{Deserialize, Serialize};

use crate::domain::state::{require_player, Player, PlayerId, Role, Room, Vote};
use crate::errors::domain::{
    ConflictKind, DomainError, NotFoundKind, PreconditionKind, ValidationKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyEntry {
    pub target: PlayerId,
    pub count: u32,
}

/// Vote counts per target, ordered by each target's first vote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally {
    entries: Vec<TallyEntry>,
}

impl Tally {
    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    pub fn count_for(&self, target: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.target == target)
            .map_or(0, |e| e.count)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn record(&mut self, target: &str) {
        match self.entries.iter_mut().find(|e| e.target == target) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(TallyEntry {
                target: target.to_string(),
                count: 1,
            }),
        }
    }
}

pub fn tally(votes: &[Vote]) -> Tally {
    let mut t = Tally::default();
    for vote in votes {
        t.record(&vote.target);
    }
    t
}

/// Target with the strictly highest count; first-seen wins ties.
pub fn most_voted(tally: &Tally) -> Option<&TallyEntry> {
    let mut best: Option<&TallyEntry> = None;
    for entry in tally.entries() {
        if best.map_or(true, |b| entry.count > b.count) {
            best = Some(entry);
        }
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Winner {
    Crew,
    Impostors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeReason {
    /// The group voted out a crew member.
    InnocentEliminated,
    /// The voted-out impostor was the last one.
    AllImpostorsFound,
    /// An impostor went out but the remaining ones guessed the word.
    FinalGuessCorrect,
    /// An impostor went out and the remaining ones missed the word.
    FinalGuessMissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub winner: Winner,
    pub reason: OutcomeReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub voted_out: PlayerId,
    pub voted_out_name: String,
    pub voted_out_role: Role,
    pub votes_against: u32,
    pub tally: Tally,
    pub winner: Winner,
    pub reason: OutcomeReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_word: Option<String>,
}

/// Decide who won after `voted_out` left the game.
///
/// `final_guess` is asked only when an impostor went out and others remain;
/// it returns true when the remaining impostors guess the secret word.
pub fn resolve_outcome(
    room: &Room,
    voted_out: &str,
    final_guess: impl FnOnce(&Room) -> bool,
) -> Result<Outcome, DomainError> {
    let player = require_player(room, voted_out)?;

    if !player.is_impostor() {
        return Ok(Outcome {
            winner: Winner::Impostors,
            reason: OutcomeReason::InnocentEliminated,
        });
    }

    let remaining = room.impostors().filter(|p| p.id != voted_out).count();
    if remaining == 0 {
        return Ok(Outcome {
            winner: Winner::Crew,
            reason: OutcomeReason::AllImpostorsFound,
        });
    }

    Ok(if final_guess(room) {
        Outcome {
            winner: Winner::Impostors,
            reason: OutcomeReason::FinalGuessCorrect,
        }
    } else {
        Outcome {
            winner: Winner::Crew,
            reason: OutcomeReason::FinalGuessMissed,
        }
    })
}

/// Check a vote against the room before it is recorded.
pub fn validate_vote(room: &Room, voter: &str, target: Option<&str>) -> Result<Vote, DomainError> {
    require_player(room, voter)?;

    let Some(target) = target else {
        return Err(DomainError::precondition(
            PreconditionKind::NoTargetSelected,
            "select exactly one other player",
        ));
    };
    if target == voter {
        return Err(DomainError::precondition(
            PreconditionKind::NoTargetSelected,
            "players cannot vote for themselves",
        ));
    }
    if room.player(target).is_none() {
        return Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("vote target {target} is not in room {}", room.code),
        ));
    }
    if room.vote_of(voter).is_some() {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyVoted,
            format!("player {voter} already voted"),
        ));
    }

    Ok(Vote {
        voter: voter.to_string(),
        target: target.to_string(),
    })
}

/// Tally the room's votes and resolve the round.
pub fn resolve_round(
    room: &Room,
    final_guess: impl FnOnce(&Room) -> bool,
) -> Result<RoundResult, DomainError> {
    let t = tally(&room.votes);
    let top = most_voted(&t).cloned().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::Other("NO_VOTES".into()),
            format!("room {} has no votes to resolve", room.code),
        )
    })?;
    let outcome = resolve_outcome(room, &top.target, final_guess)?;
    let player: &Player = require_player(room, &top.target)?;

    Ok(RoundResult {
        voted_out: player.id.clone(),
        voted_out_name: player.name.clone(),
        voted_out_role: player.role,
        votes_against: top.count,
        tally: t,
        winner: outcome.winner,
        reason: outcome.reason,
        secret_word: room.secret_word.clone(),
    })
}
