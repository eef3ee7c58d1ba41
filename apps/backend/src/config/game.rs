//! Static game reference data: roster, station graph, prompts.
//!
//! Defaults reproduce the Hong Kong game. `HIDESEEK_GAME_CONFIG` may point at a
//! JSON file with the same shape to replace them wholesale.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::setup::GameSetup;
use crate::error::AppError;

pub const GAME_CONFIG_ENV: &str = "HIDESEEK_GAME_CONFIG";

const DEFAULT_PLAYERS: [&str; 6] = ["Alice", "Bob", "Charlie", "David", "Eve", "Frank"];

const DEFAULT_STATIONS: [&str; 8] = [
    "Central",
    "Admiralty",
    "Tsim Sha Tsui",
    "Mong Kok",
    "Prince Edward",
    "Sham Shui Po",
    "Wan Chai",
    "Star Ferry",
];

const DEFAULT_EDGES: [(&str, &str); 7] = [
    ("Central", "Admiralty"),
    ("Central", "Star Ferry"),
    ("Admiralty", "Wan Chai"),
    ("Wan Chai", "Tsim Sha Tsui"),
    ("Tsim Sha Tsui", "Mong Kok"),
    ("Mong Kok", "Prince Edward"),
    ("Prince Edward", "Sham Shui Po"),
];

const DEFAULT_CHALLENGES: [&str; 6] = [
    "Sing a Cantonese nursery rhyme",
    "Spell 'Hong Kong' backwards",
    "Do 10 jumping jacks in public",
    "Say a station fact out loud",
    "Translate 'Hello' into Cantonese",
    "Name 3 MTR stations in 10 seconds",
];

const DEFAULT_START_STATION: &str = "Central";
const DEFAULT_SEEKER_TEAM_SIZE: usize = 3;

fn default_seeker_team_size() -> usize {
    DEFAULT_SEEKER_TEAM_SIZE
}

/// Game reference data as loaded from configuration.
///
/// Edges are undirected; adjacency is derived from them when the
/// [`GameSetup`] is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub players: Vec<String>,
    pub stations: Vec<String>,
    pub edges: Vec<(String, String)>,
    pub start_station: String,
    pub challenges: Vec<String>,
    #[serde(default = "default_seeker_team_size")]
    pub seeker_team_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYERS.iter().map(|p| p.to_string()).collect(),
            stations: DEFAULT_STATIONS.iter().map(|s| s.to_string()).collect(),
            edges: DEFAULT_EDGES
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            start_station: DEFAULT_START_STATION.to_string(),
            challenges: DEFAULT_CHALLENGES.iter().map(|c| c.to_string()).collect(),
            seeker_team_size: DEFAULT_SEEKER_TEAM_SIZE,
        }
    }
}

impl GameConfig {
    /// Load from the file named by `HIDESEEK_GAME_CONFIG`, or the defaults when unset.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var(GAME_CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!(
                "Unable to read game config '{}': {e}",
                path.display()
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            AppError::config(format!(
                "Invalid game config '{}': {e}",
                path.display()
            ))
        })
    }

    /// Validate the reference data and derive the station graph.
    pub fn build_setup(&self) -> Result<GameSetup, AppError> {
        GameSetup::new(
            self.players.clone(),
            &self.stations,
            &self.edges,
            self.start_station.clone(),
            self.challenges.clone(),
            self.seeker_team_size,
        )
        .map_err(|e| AppError::config(format!("Invalid game config: {e}")))
    }
}
