use tracing::{debug, info};

use super::GameFlowService;
use crate::domain::state::{require_phase, GamePhase, PlayerId, Room};
use crate::domain::voting::{resolve_round, validate_vote};
use crate::errors::domain::DomainError;
use crate::repos::rooms::{mutate_room, require_room};
use crate::simulation::{FinalGuess, VoteSource};

impl GameFlowService {
    /// Record `voter`'s vote. `target` is `None` when the client has nothing
    /// selected. The last missing vote resolves the round.
    pub fn submit_vote(
        &self,
        code: &str,
        voter: &str,
        target: Option<&str>,
    ) -> Result<Room, DomainError> {
        let room = mutate_room(self.store.as_ref(), code, &mut |room: &mut Room| {
            require_phase(room, GamePhase::Voting, "vote")?;
            let vote = validate_vote(room, voter, target)?;
            room.votes.push(vote);
            resolve_if_complete(room, self.final_guess.as_ref())?;
            Ok(())
        })?;

        debug!(code = %room.code, voter, votes = room.votes.len(), "Vote recorded");
        log_resolution(&room);
        Ok(room)
    }

    /// Ask `source` for the vote of every player that has not voted yet,
    /// skipping the ids in `except` (players voting on their own).
    ///
    /// `source` decides on a snapshot, outside the store's lock, so it may
    /// read the store itself. Voters who voted in the meantime keep their
    /// own vote. If `source` fails for anyone, no vote is recorded.
    pub fn fill_missing_votes(
        &self,
        code: &str,
        source: &dyn VoteSource,
        except: &[&str],
    ) -> Result<Room, DomainError> {
        let snapshot = require_room(self.store.as_ref(), code)?;
        require_phase(&snapshot, GamePhase::Voting, "vote")?;

        let decided = snapshot
            .players
            .iter()
            .filter(|p| {
                snapshot.vote_of(&p.id).is_none() && !except.iter().any(|id| *id == p.id)
            })
            .map(|p| -> Result<(PlayerId, PlayerId), DomainError> {
                Ok((p.id.clone(), source.choose_target(&snapshot, &p.id)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let room = mutate_room(self.store.as_ref(), code, &mut |room: &mut Room| {
            require_phase(room, GamePhase::Voting, "vote")?;
            for (voter, target) in &decided {
                if room.vote_of(voter).is_some() {
                    continue;
                }
                let vote = validate_vote(room, voter, Some(target.as_str()))?;
                room.votes.push(vote);
            }
            resolve_if_complete(room, self.final_guess.as_ref())?;
            Ok(())
        })?;

        debug!(code = %room.code, votes = room.votes.len(), "Missing votes filled");
        log_resolution(&room);
        Ok(room)
    }
}

/// Tally and enter Results once every player voted. True when resolved.
fn resolve_if_complete(
    room: &mut Room,
    final_guess: &dyn FinalGuess,
) -> Result<bool, DomainError> {
    if !room.all_votes_in() {
        return Ok(false);
    }
    let result = resolve_round(room, |r| final_guess.guess(r))?;
    room.result = Some(result);
    room.phase = GamePhase::Results;
    Ok(true)
}

fn log_resolution(room: &Room) {
    if let (GamePhase::Results, Some(result)) = (room.phase, &room.result) {
        info!(
            code = %room.code,
            voted_out = %result.voted_out,
            votes_against = result.votes_against,
            winner = ?result.winner,
            reason = ?result.reason,
            phase = %room.phase,
            "Round resolved"
        );
    }
}
