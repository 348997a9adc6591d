use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::adapters::{FileRoomStorage, MemoryRoomStorage, RoomStorage};
use crate::config::game::{GameConfig, StoreKind};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::services::{GameFlowService, PlayerSession, RoomService};
use crate::simulation::FinalGuess;

/// Shared resources for every client in this process
#[derive(Clone)]
pub struct AppState {
    pub config: GameConfig,
    pub store: Arc<dyn RoomStorage>,
    pub rooms: RoomService,
    pub flow: Arc<GameFlowService>,
    /// Set when rooms live in the shared file store
    file_store: Option<Arc<FileRoomStorage>>,
}

impl AppState {
    /// Build the store selected by `config` and the services on top of it
    pub fn from_config(config: GameConfig) -> Result<Self, AppError> {
        match &config.store {
            StoreKind::Memory => Ok(Self::with_store(
                Arc::new(MemoryRoomStorage::new()),
                None,
                config,
            )),
            StoreKind::File(path) => {
                let file = Arc::new(FileRoomStorage::open_with_retries(
                    path.clone(),
                    config.store_lock_retries,
                )?);
                info!(path = %path.display(), "Using file room store");
                let store: Arc<dyn RoomStorage> = file.clone();
                Ok(Self::with_store(store, Some(file), config))
            }
        }
    }

    /// In-memory state with default settings
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryRoomStorage::new()), None, GameConfig::default())
    }

    /// Services over a caller-provided store
    pub fn from_store(store: Arc<dyn RoomStorage>, config: GameConfig) -> Self {
        Self::with_store(store, None, config)
    }

    fn with_store(
        store: Arc<dyn RoomStorage>,
        file_store: Option<Arc<FileRoomStorage>>,
        config: GameConfig,
    ) -> Self {
        let rooms = RoomService::new(store.clone(), config.code_attempts);
        let flow = Arc::new(GameFlowService::new(store.clone(), &config));
        Self {
            config,
            store,
            rooms,
            flow,
            file_store,
        }
    }

    /// Rebuild the game flow with another final-guess strategy.
    pub fn with_final_guess(mut self, final_guess: Arc<dyn FinalGuess>) -> Self {
        self.flow = Arc::new(
            GameFlowService::new(self.store.clone(), &self.config).with_final_guess(final_guess),
        );
        self
    }

    pub fn create_session(&self, host_name: &str) -> Result<PlayerSession, DomainError> {
        PlayerSession::create(self.rooms.clone(), self.flow.clone(), host_name)
    }

    pub fn join_session(
        &self,
        code: &str,
        player_name: &str,
    ) -> Result<PlayerSession, DomainError> {
        PlayerSession::join(self.rooms.clone(), self.flow.clone(), code, player_name)
    }

    /// Poll the shared file for other processes' changes. `None` for the
    /// memory store, which has no outside writers.
    pub fn spawn_store_watcher(
        &self,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Option<JoinHandle<()>> {
        self.file_store
            .as_ref()
            .map(|file| Arc::clone(file).spawn_watcher(interval, cancel))
    }
}
