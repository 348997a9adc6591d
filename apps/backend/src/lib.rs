#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod repos;
pub mod services;
pub mod simulation;
pub mod state;
pub mod telemetry;
pub mod utils;


// Re-exports for public API
pub use adapters::{FileRoomStorage, MemoryRoomStorage, RoomChanged, RoomStorage};
pub use config::game::{GameConfig, StoreKind};
pub use domain::{
    GamePhase, Player, Role, RoleCard, Room, RoundResult, Settings, SettingsPatch, Winner,
};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use services::{GameFlowService, PlayerSession, RoomService};
pub use simulation::{CoinFlipGuess, FinalGuess, FixedGuess, RandomVoter, ScriptedVotes, VoteSource};
pub use state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
