use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::adapters::file_store::DEFAULT_LOCK_RETRIES;
use crate::error::AppError;
use crate::repos::rooms::DEFAULT_CODE_ATTEMPTS;

pub const DEFAULT_DISCUSSION_SECS: u64 = 30;
pub const DEFAULT_FINAL_GUESS_PROBABILITY: f64 = 0.5;

/// Which room storage adapter to build
#[derive(Debug, Clone, PartialEq)]
pub enum StoreKind {
    /// Rooms live in process memory
    Memory,
    /// Rooms live in a JSON blob shared through the file system
    File(PathBuf),
}

/// Runtime settings for the game core
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Length of the discussion phase before voting opens automatically
    pub discussion: Duration,
    /// Room code generation attempts before giving up
    pub code_attempts: u32,
    /// Chance that remaining impostors guess the word after one of them is
    /// voted out
    pub final_guess_probability: f64,
    /// Seed for gameplay randomness; `None` draws from OS entropy
    pub rng_seed: Option<u64>,
    pub store: StoreKind,
    /// File lock attempts for the shared blob store
    pub store_lock_retries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            discussion: Duration::from_secs(DEFAULT_DISCUSSION_SECS),
            code_attempts: DEFAULT_CODE_ATTEMPTS,
            final_guess_probability: DEFAULT_FINAL_GUESS_PROBABILITY,
            rng_seed: None,
            store: StoreKind::Memory,
            store_lock_retries: DEFAULT_LOCK_RETRIES,
        }
    }
}

impl GameConfig {
    /// Build from `IMPOSTOR_*` environment variables; unset variables keep
    /// their defaults, malformed ones are errors.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let discussion = parsed_var::<u64>("IMPOSTOR_DISCUSSION_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.discussion);

        let code_attempts =
            parsed_var::<u32>("IMPOSTOR_CODE_RETRIES")?.unwrap_or(defaults.code_attempts);
        if code_attempts == 0 {
            return Err(AppError::config("IMPOSTOR_CODE_RETRIES must be at least 1"));
        }

        let final_guess_probability = parsed_var::<f64>("IMPOSTOR_FINAL_GUESS_PROBABILITY")?
            .unwrap_or(defaults.final_guess_probability);
        if !(0.0..=1.0).contains(&final_guess_probability) {
            return Err(AppError::config(format!(
                "IMPOSTOR_FINAL_GUESS_PROBABILITY must be within 0..=1, \
                 got {final_guess_probability}"
            )));
        }

        let rng_seed = parsed_var::<u64>("IMPOSTOR_RNG_SEED")?;

        let store = match optional_var("IMPOSTOR_STORE_PATH") {
            Some(path) => StoreKind::File(PathBuf::from(path)),
            None => StoreKind::Memory,
        };

        let store_lock_retries = parsed_var::<u32>("IMPOSTOR_STORE_LOCK_RETRIES")?
            .unwrap_or(defaults.store_lock_retries);

        Ok(Self {
            discussion,
            code_attempts,
            final_guess_probability,
            rng_seed,
            store,
            store_lock_retries,
        })
    }
}

/// Non-empty environment variable, if set
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an optional environment variable or return a config error
fn parsed_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match optional_var(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| {
                AppError::config(format!(
                    "Environment variable '{name}' has invalid value '{raw}'"
                ))
            }),
    }
}
