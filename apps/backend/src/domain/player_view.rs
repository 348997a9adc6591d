//! Player view of a room - what one player is allowed to see.
//!
//! The room record holds everyone's role and the secret word. A UI must only
//! ever render a [`RoleCard`], never the raw room, for the local player.

use serde::Serialize;

use crate::domain::state::{require_player, GamePhase, Role, Room};
use crate::errors::domain::DomainError;

/// Role information visible to a single player for the current round.
///
/// - Crew members see the secret word, plus the hint when hints are enabled.
/// - Impostors never see the secret word; they see the hint only when
///   hints are enabled.
/// - Outside a round (Lobby) the role is `Unassigned` and both words are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCard {
    pub role: Role,
    pub secret_word: Option<String>,
    pub hint_word: Option<String>,
}

impl RoleCard {
    pub fn for_player(room: &Room, player_id: &str) -> Result<Self, DomainError> {
        let player = require_player(room, player_id)?;
        if room.phase == GamePhase::Lobby {
            return Ok(Self {
                role: Role::Unassigned,
                secret_word: None,
                hint_word: None,
            });
        }

        let hint_word = room
            .settings
            .hint_word_enabled
            .then(|| room.hint_word.clone())
            .flatten();

        let secret_word = match player.role {
            Role::Crew => room.secret_word.clone(),
            Role::Impostor | Role::Unassigned => None,
        };

        Ok(Self {
            role: player.role,
            secret_word,
            hint_word: if player.role == Role::Unassigned {
                None
            } else {
                hint_word
            },
        })
    }

    pub fn is_impostor(&self) -> bool {
        self.role == Role::Impostor
    }
}
