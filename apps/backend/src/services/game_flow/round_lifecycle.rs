use tracing::{debug, info};

use super::timer::expire_discussion;
use super::GameFlowService;
use crate::domain::roles::assign_roles;
use crate::domain::rules::MIN_PLAYERS;
use crate::domain::state::{require_host, require_phase, require_player, GamePhase, Room};
use crate::domain::words::random_entry;
use crate::errors::domain::{DomainError, PreconditionKind};
use crate::repos::rooms::mutate_room;

impl GameFlowService {
    /// Host starts a round: roles are dealt and a word is drawn.
    ///
    /// Requires Lobby, at least [`MIN_PLAYERS`] players and fewer impostors
    /// than players, all checked against the stored roster.
    pub fn start_game(&self, code: &str, actor: &str) -> Result<Room, DomainError> {
        let room = mutate_room(self.store.as_ref(), code, &mut |room: &mut Room| {
            require_host(room, actor, "start the game")?;
            require_phase(room, GamePhase::Lobby, "start the game")?;

            let players = room.players.len();
            if players < MIN_PLAYERS {
                return Err(DomainError::precondition(
                    PreconditionKind::NotEnoughPlayers,
                    format!(
                        "need at least {MIN_PLAYERS} players, room {} has {players}",
                        room.code
                    ),
                ));
            }
            let impostors = room.settings.impostor_count;
            if impostors >= players {
                return Err(DomainError::precondition(
                    PreconditionKind::TooManyImpostors,
                    format!("{impostors} impostors need more than {players} players"),
                ));
            }

            let mut rng = self.rng.lock();
            assign_roles(&mut room.players, impostors, &mut *rng)?;
            let entry = random_entry(&mut *rng);

            room.secret_word = Some(entry.word.to_string());
            room.hint_word = Some(entry.hint.to_string());
            room.votes.clear();
            room.result = None;
            room.round += 1;
            room.phase = GamePhase::RoleReveal;
            Ok(())
        })?;

        info!(
            code = %room.code,
            actor,
            round = room.round,
            players = room.players.len(),
            impostors = room.settings.impostor_count,
            phase = %room.phase,
            "Round started"
        );
        Ok(room)
    }

    /// Leave the role reveal. Any member may continue; repeating it once the
    /// room is already discussing is a no-op.
    pub fn continue_to_discussion(&self, code: &str, actor: &str) -> Result<Room, DomainError> {
        let mut entered = false;
        let room = mutate_room(self.store.as_ref(), code, &mut |room: &mut Room| {
            require_player(room, actor)?;
            if room.phase == GamePhase::Discussion {
                return Ok(());
            }
            require_phase(room, GamePhase::RoleReveal, "continue to discussion")?;
            room.phase = GamePhase::Discussion;
            entered = true;
            Ok(())
        })?;

        if entered {
            let armed = self
                .timers
                .arm(self.store.clone(), &room.code, room.round, self.discussion);
            info!(
                code = %room.code,
                actor,
                round = room.round,
                timer = armed,
                phase = %room.phase,
                "Discussion started"
            );
        } else {
            debug!(code = %room.code, actor, "Already discussing");
        }
        Ok(room)
    }

    /// Host ends the discussion early.
    pub fn advance_to_voting(&self, code: &str, actor: &str) -> Result<Room, DomainError> {
        let room = mutate_room(self.store.as_ref(), code, &mut |room: &mut Room| {
            require_host(room, actor, "open the vote")?;
            require_phase(room, GamePhase::Discussion, "open the vote")?;
            room.phase = GamePhase::Voting;
            room.votes.clear();
            Ok(())
        })?;

        self.timers.cancel(&room.code);
        info!(code = %room.code, actor, phase = %room.phase, "Voting opened by host");
        Ok(room)
    }

    /// Apply a discussion timeout now. False when the room already left
    /// Discussion.
    pub fn expire_discussion(&self, code: &str) -> Result<bool, DomainError> {
        self.timers.cancel(code);
        expire_discussion(self.store.as_ref(), code, None)
    }

    /// Back to the lobby for another round; roster and settings stay.
    pub fn new_round(&self, code: &str, actor: &str) -> Result<Room, DomainError> {
        let room = mutate_room(self.store.as_ref(), code, &mut |room: &mut Room| {
            require_player(room, actor)?;
            require_phase(room, GamePhase::Results, "start a new round")?;
            room.reset_round();
            Ok(())
        })?;

        self.timers.cancel(&room.code);
        info!(code = %room.code, actor, phase = %room.phase, "Round reset");
        Ok(room)
    }
}
