//! Room, player and phase types shared by every layer.
//!
//! A [`Room`] is a value: stores hand out clones and every mutation goes
//! through the store's read-modify-write, so no two contexts alias one room.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::roles::clear_roles;
use crate::domain::voting::RoundResult;
use crate::errors::domain::{DomainError, NotFoundKind, PreconditionKind};

/// Opaque player identifier, unique within a room.
pub type PlayerId = String;

/// Secret role of a player for the current round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    #[default]
    Unassigned,
    Crew,
    Impostor,
}

/// Step of a round. Cycles back to `Lobby` after `Results`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Players gather; host edits settings and starts the round.
    #[default]
    Lobby,
    /// Each player looks at their role card.
    RoleReveal,
    /// Timed talk; ends by timeout or host advance.
    Discussion,
    /// Every player casts one vote.
    Voting,
    /// Outcome of the vote is shown.
    Results,
}

impl GamePhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Lobby => "lobby",
            GamePhase::RoleReveal => "role-reveal",
            GamePhase::Discussion => "discussion",
            GamePhase::Voting => "voting",
            GamePhase::Results => "results",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    /// Trimmed display name, unique within the room (case-sensitive).
    pub name: String,
    pub is_host: bool,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        is_host: bool,
        joined_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            is_host,
            role: Role::Unassigned,
            joined_at,
        }
    }

    pub fn is_impostor(&self) -> bool {
        self.role == Role::Impostor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub impostor_count: usize,
    pub hint_word_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            impostor_count: 1,
            hint_word_enabled: true,
        }
    }
}

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impostor_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_word_enabled: Option<bool>,
}

impl SettingsPatch {
    pub fn impostor_count(count: usize) -> Self {
        Self {
            impostor_count: Some(count),
            ..Self::default()
        }
    }

    pub fn hint_word_enabled(enabled: bool) -> Self {
        Self {
            hint_word_enabled: Some(enabled),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.impostor_count.is_none() && self.hint_word_enabled.is_none()
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(count) = self.impostor_count {
            settings.impostor_count = count;
        }
        if let Some(enabled) = self.hint_word_enabled {
            settings.hint_word_enabled = enabled;
        }
    }
}

/// One recorded vote: `voter` wants `target` out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub voter: PlayerId,
    pub target: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Uppercase 4-character code.
    pub code: String,
    pub host_player_id: PlayerId,
    /// Join order.
    pub players: Vec<Player>,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Bumped each time a round starts. Timers armed in an earlier round
    /// never act on a later one.
    #[serde(default)]
    pub round: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_word: Option<String>,
    /// Votes of the current Voting phase, in the order they were recorded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub votes: Vec<Vote>,
    /// Set only while in `Results`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<RoundResult>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Room {
    /// A fresh lobby whose only player is `host`.
    pub fn new(code: String, mut host: Player, created_at: OffsetDateTime) -> Self {
        host.is_host = true;
        host.role = Role::Unassigned;
        Self {
            code,
            host_player_id: host.id.clone(),
            players: vec![host],
            settings: Settings::default(),
            phase: GamePhase::Lobby,
            round: 0,
            secret_word: None,
            hint_word: None,
            votes: Vec::new(),
            result: None,
            created_at,
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn is_host(&self, id: &str) -> bool {
        self.host_player_id == id
    }

    pub fn impostors(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_impostor())
    }

    pub fn vote_of(&self, voter: &str) -> Option<&Vote> {
        self.votes.iter().find(|v| v.voter == voter)
    }

    /// Every player is an eligible voter.
    pub fn all_votes_in(&self) -> bool {
        !self.players.is_empty()
            && self.players.iter().all(|p| self.vote_of(&p.id).is_some())
    }

    /// Back to the lobby keeping roster and settings.
    pub fn reset_round(&mut self) {
        self.phase = GamePhase::Lobby;
        self.secret_word = None;
        self.hint_word = None;
        self.votes.clear();
        self.result = None;
        clear_roles(&mut self.players);
    }
}

pub fn require_player<'a>(room: &'a Room, id: &str) -> Result<&'a Player, DomainError> {
    room.player(id).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Player,
            format!("player {id} is not in room {}", room.code),
        )
    })
}

pub fn require_phase(
    room: &Room,
    expected: GamePhase,
    action: &'static str,
) -> Result<(), DomainError> {
    if room.phase != expected {
        return Err(DomainError::precondition(
            PreconditionKind::PhaseMismatch,
            format!("{action} requires phase {expected}, room {} is in {}", room.code, room.phase),
        ));
    }
    Ok(())
}

pub fn require_host(room: &Room, actor: &str, action: &'static str) -> Result<(), DomainError> {
    require_player(room, actor)?;
    if !room.is_host(actor) {
        return Err(DomainError::precondition(
            PreconditionKind::NotHost,
            format!("only the host may {action}"),
        ));
    }
    Ok(())
}
