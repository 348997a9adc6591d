//! Room fixtures for service tests.

use std::sync::Arc;

use impostor_backend::{AppState, FixedGuess, GameConfig, PlayerSession};

/// Host plus joined players, all bound to the same room.
pub struct Table {
    pub state: AppState,
    pub host: PlayerSession,
    pub guests: Vec<PlayerSession>,
}

impl Table {
    pub fn code(&self) -> &str {
        self.host.code()
    }

    /// Everyone, host first, in join order.
    pub fn everyone(&self) -> Vec<&PlayerSession> {
        std::iter::once(&self.host).chain(self.guests.iter()).collect()
    }

    /// Session of the player called `name`.
    pub fn by_name(&self, name: &str) -> &PlayerSession {
        self.everyone()
            .into_iter()
            .find(|s| s.me().map(|p| p.name == name).unwrap_or(false))
            .unwrap_or_else(|| panic!("no player named {name}"))
    }

    pub fn id_of(&self, name: &str) -> String {
        self.by_name(name).player_id().to_string()
    }
}

pub fn seeded_config(seed: u64) -> GameConfig {
    GameConfig {
        rng_seed: Some(seed),
        ..GameConfig::default()
    }
}

/// Seeded in-memory state whose final guess always has the given answer.
pub fn memory_state(seed: u64, final_guess: bool) -> AppState {
    AppState::from_config(seeded_config(seed))
        .expect("memory state")
        .with_final_guess(Arc::new(FixedGuess(final_guess)))
}

/// Build a lobby: the first name hosts, the rest join.
pub fn table(state: AppState, names: &[&str]) -> Table {
    let (host_name, guest_names) = names.split_first().expect("at least the host");
    let host = state.create_session(host_name).expect("create room");
    let guests = guest_names
        .iter()
        .map(|name| state.join_session(host.code(), name).expect("join room"))
        .collect();
    Table {
        state,
        host,
        guests,
    }
}

/// Start a round and bring it to Voting through the host.
pub fn to_voting(table: &Table) {
    table.host.start_game().expect("start");
    table.host.continue_to_discussion().expect("continue");
    table.host.advance_to_voting().expect("advance");
}
