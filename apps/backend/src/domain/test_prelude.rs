//! Shared helpers for domain tests.
//!
//! Env knobs:
//! - PROPTEST_CASES: number of cases per property (default 32)

use proptest::prelude::ProptestConfig;

use super::challenge_picker::SequencePicker;
use super::setup::GameSetup;
use crate::config::game::GameConfig;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(32)
        .max(1);

    ProptestConfig {
        failure_persistence: None,
        cases,
        ..ProptestConfig::default()
    }
}

/// The Hong Kong game.
pub fn hk_setup() -> GameSetup {
    GameConfig::default()
        .build_setup()
        .expect("default game config is valid")
}

/// Always draws the first prompt.
pub fn first_prompt() -> SequencePicker {
    SequencePicker::new(vec![0])
}
