//! Domain layer: pure game logic types and helpers.

pub mod challenge_picker;
pub mod decode;
pub mod rules;
pub mod setup;
pub mod state;
pub mod station_graph;
pub mod view;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_decode;
#[cfg(test)]
mod tests_props_rules;
#[cfg(test)]
mod tests_rules;
#[cfg(test)]
mod tests_view;

// Re-exports for ergonomics
pub use challenge_picker::{ChallengePicker, RandomPicker, SequencePicker};
pub use setup::GameSetup;
pub use state::{ChallengeRecord, GameState, Role, Teams};
pub use station_graph::StationGraph;
pub use view::{ChallengeFilter, GameView, PlayerView};
