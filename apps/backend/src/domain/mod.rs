//! Domain layer: pure game logic types and helpers.

pub mod player_view;
pub mod roles;
pub mod rules;
pub mod state;
pub mod voting;
pub mod words;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_player_view;

// Re-exports for ergonomics
pub use player_view::RoleCard;
pub use roles::assign_roles;
pub use rules::{valid_name, valid_room_code, MIN_PLAYERS};
pub use state::{GamePhase, Player, PlayerId, Role, Room, Settings, SettingsPatch, Vote};
pub use voting::{
    most_voted, resolve_outcome, tally, Outcome, OutcomeReason, RoundResult, Tally, Winner,
};
pub use words::{random_entry, WordEntry};
