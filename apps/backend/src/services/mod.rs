pub mod game_controller;
pub mod state_feed;

pub use game_controller::{GameController, MutationOutcome};
pub use state_feed::{StateFeed, SyncedState};
