//! Per-client view of a room: one player bound to one room code.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::game_flow::GameFlowService;
use super::rooms::RoomService;
use crate::adapters::RoomChanged;
use crate::domain::player_view::RoleCard;
use crate::domain::state::{require_player, GamePhase, Player, PlayerId, Room, SettingsPatch};
use crate::domain::voting::{tally, RoundResult, Tally};
use crate::errors::domain::DomainError;
use crate::simulation::VoteSource;

/// A client's handle on the game. Accessors always re-read the store, so
/// changes made by other clients are visible on the next call.
#[derive(Clone)]
pub struct PlayerSession {
    rooms: RoomService,
    flow: Arc<GameFlowService>,
    code: String,
    player_id: PlayerId,
}

impl PlayerSession {
    /// Create a room and bind to it as host.
    pub fn create(
        rooms: RoomService,
        flow: Arc<GameFlowService>,
        host_name: &str,
    ) -> Result<Self, DomainError> {
        let room = rooms.create_room(host_name)?;
        Ok(Self {
            code: room.code,
            player_id: room.host_player_id,
            rooms,
            flow,
        })
    }

    /// Join an existing room and bind to the new player.
    pub fn join(
        rooms: RoomService,
        flow: Arc<GameFlowService>,
        code: &str,
        player_name: &str,
    ) -> Result<Self, DomainError> {
        let joined = rooms.join_room(code, player_name)?;
        Ok(Self {
            code: joined.room.code,
            player_id: joined.player.id,
            rooms,
            flow,
        })
    }

    /// Rebind to a player already in the room, e.g. after a restart.
    pub fn resume(
        rooms: RoomService,
        flow: Arc<GameFlowService>,
        code: &str,
        player_id: &str,
    ) -> Result<Self, DomainError> {
        let room = rooms.require_room(code)?;
        require_player(&room, player_id)?;
        Ok(Self {
            code: room.code,
            player_id: player_id.to_string(),
            rooms,
            flow,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn room(&self) -> Result<Room, DomainError> {
        self.rooms.require_room(&self.code)
    }

    pub fn phase(&self) -> Result<GamePhase, DomainError> {
        Ok(self.room()?.phase)
    }

    pub fn me(&self) -> Result<Player, DomainError> {
        let room = self.room()?;
        require_player(&room, &self.player_id).cloned()
    }

    pub fn is_host(&self) -> Result<bool, DomainError> {
        Ok(self.room()?.is_host(&self.player_id))
    }

    /// What this player may see of the round.
    pub fn role_card(&self) -> Result<RoleCard, DomainError> {
        RoleCard::for_player(&self.room()?, &self.player_id)
    }

    pub fn result(&self) -> Result<Option<RoundResult>, DomainError> {
        Ok(self.room()?.result)
    }

    /// Running tally of the current vote.
    pub fn tally(&self) -> Result<Tally, DomainError> {
        Ok(tally(&self.room()?.votes))
    }

    pub fn has_voted(&self) -> Result<bool, DomainError> {
        Ok(self.room()?.vote_of(&self.player_id).is_some())
    }

    /// Change notifications of the underlying store; filter on [`Self::code`].
    pub fn subscribe(&self) -> broadcast::Receiver<RoomChanged> {
        self.rooms.store().subscribe()
    }

    pub fn update_settings(&self, patch: SettingsPatch) -> Result<bool, DomainError> {
        self.rooms.update_settings(&self.code, &self.player_id, patch)
    }

    pub fn start_game(&self) -> Result<Room, DomainError> {
        self.flow.start_game(&self.code, &self.player_id)
    }

    pub fn continue_to_discussion(&self) -> Result<Room, DomainError> {
        self.flow.continue_to_discussion(&self.code, &self.player_id)
    }

    pub fn advance_to_voting(&self) -> Result<Room, DomainError> {
        self.flow.advance_to_voting(&self.code, &self.player_id)
    }

    pub fn vote(&self, target: Option<&str>) -> Result<Room, DomainError> {
        self.flow.submit_vote(&self.code, &self.player_id, target)
    }

    /// Let `source` vote for everyone but this player.
    pub fn fill_other_votes(&self, source: &dyn VoteSource) -> Result<Room, DomainError> {
        self.flow
            .fill_missing_votes(&self.code, source, &[self.player_id.as_str()])
    }

    pub fn new_round(&self) -> Result<Room, DomainError> {
        self.flow.new_round(&self.code, &self.player_id)
    }
}
