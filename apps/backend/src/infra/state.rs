use std::sync::Arc;

use tracing::info;

use crate::config::db::{StoreConfig, StoreKind};
use crate::config::game::GameConfig;
use crate::config::settings::GameSettings;
use crate::domain::challenge_picker::{ChallengePicker, RandomPicker};
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::services::game_controller::GameController;
use crate::services::state_feed::StateFeed;
use crate::state::app_state::AppState;
use crate::store::{DocumentStore, MemoryStore, SeaStore};

/// Builder for AppState, shared by `main` and tests.
pub struct StateBuilder {
    store_config: StoreConfig,
    game_config: GameConfig,
    settings: GameSettings,
    picker: Option<Arc<dyn ChallengePicker>>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            store_config: StoreConfig::memory(),
            game_config: GameConfig::default(),
            settings: GameSettings::default(),
            picker: None,
            store: None,
        }
    }

    pub fn with_store_config(mut self, config: StoreConfig) -> Self {
        self.store_config = config;
        self
    }

    pub fn with_game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_picker(mut self, picker: Arc<dyn ChallengePicker>) -> Self {
        self.picker = Some(picker);
        self
    }

    /// Use an already-built store; overrides the store config.
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let setup = Arc::new(self.game_config.build_setup()?);

        let store = match self.store {
            Some(store) => store,
            None => open_store(&self.store_config, self.settings.feed_capacity).await?,
        };

        let picker: Arc<dyn ChallengePicker> = match self.picker {
            Some(picker) => picker,
            None => Arc::new(RandomPicker::new(self.settings.challenge_seed)),
        };

        let path = self.settings.document_path;
        let controller = Arc::new(GameController::new(
            store.clone(),
            setup.clone(),
            picker,
            path.clone(),
        ));
        let feed = Arc::new(StateFeed::start(store.clone(), setup, path.clone()).await?);

        info!(store = store.kind().as_str(), path = %path, "Application state ready");
        Ok(AppState::new(controller, feed))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

async fn open_store(
    config: &StoreConfig,
    feed_capacity: usize,
) -> Result<Arc<dyn DocumentStore>, AppError> {
    match (config.kind, config.url.as_deref()) {
        (StoreKind::Memory, _) => Ok(Arc::new(MemoryStore::new(feed_capacity))),
        (kind, Some(url)) => {
            let conn = connect_db(url).await?;
            Ok(Arc::new(SeaStore::new(conn, kind, feed_capacity)))
        }
        (kind, None) => Err(AppError::config(format!(
            "Store '{}' needs a database URL",
            kind.as_str()
        ))),
    }
}
