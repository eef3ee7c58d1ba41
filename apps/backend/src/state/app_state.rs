use std::sync::Arc;

use crate::domain::setup::GameSetup;
use crate::services::game_controller::GameController;
use crate::services::state_feed::StateFeed;
use crate::store::DocumentStore;

/// Application state shared by all workers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<GameController>,
    /// Decoded snapshot stream used by websocket sessions
    pub feed: Arc<StateFeed>,
}

impl AppState {
    pub fn new(controller: Arc<GameController>, feed: Arc<StateFeed>) -> Self {
        Self { controller, feed }
    }

    pub fn setup(&self) -> &Arc<GameSetup> {
        self.controller.setup()
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        self.controller.store()
    }
}
