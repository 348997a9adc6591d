//! Drives one room through repeated rounds.

use impostor_backend::domain::state::SettingsPatch;
use impostor_backend::errors::domain::InfraErrorKind;
use impostor_backend::{
    AppError, AppState, DomainError, GameConfig, PlayerSession, RandomVoter, StoreKind,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::metrics::RoundMetrics;

#[derive(Debug, Clone)]
pub struct SimulationSetup {
    pub players: usize,
    pub impostors: usize,
    pub hints: bool,
    pub guess_probability: f64,
    pub seed: Option<u64>,
}

pub struct Simulator {
    state: AppState,
    host: PlayerSession,
    /// Source of per-round voter seeds
    seeds: ChaCha8Rng,
}

impl Simulator {
    pub fn new(setup: &SimulationSetup) -> Result<Self, AppError> {
        // Environment settings apply, but rooms always stay in memory.
        let config = GameConfig {
            rng_seed: setup.seed,
            final_guess_probability: setup.guess_probability,
            store: StoreKind::Memory,
            ..GameConfig::from_env()?
        };
        let state = AppState::from_config(config)?;

        let host = state.create_session("Player 1")?;
        for n in 2..=setup.players {
            state.join_session(host.code(), &format!("Player {n}"))?;
        }
        host.update_settings(SettingsPatch {
            impostor_count: Some(setup.impostors),
            hint_word_enabled: Some(setup.hints),
        })?;

        let seeds = match setup.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };

        Ok(Self { state, host, seeds })
    }

    pub fn code(&self) -> &str {
        self.host.code()
    }

    /// Start, discuss, vote, resolve and reset one round.
    pub fn play_round(&mut self, round: u32) -> Result<RoundMetrics, DomainError> {
        let started = self.host.start_game()?;
        self.host.continue_to_discussion()?;
        self.host.advance_to_voting()?;

        let voter = RandomVoter::new(Some(self.seeds.next_u64()));
        let resolved = self
            .state
            .flow
            .fill_missing_votes(self.host.code(), &voter, &[])?;

        let result = resolved.result.clone().ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::Other("UNRESOLVED".into()),
                format!("round {round} ended without a result"),
            )
        })?;
        debug!(round, voted_out = %result.voted_out_name, winner = ?result.winner, "Round played");

        let metrics = RoundMetrics::new(round, &started, &result);
        self.host.new_round()?;
        Ok(metrics)
    }
}
