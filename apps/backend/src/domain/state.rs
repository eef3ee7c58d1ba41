use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A player's side in the game, derived from team membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Seeker,
    Hider,
}

/// The three team lists, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Teams {
    pub seekers1: Vec<String>,
    pub seekers2: Vec<String>,
    pub hiders: Vec<String>,
}

impl Teams {
    /// Seeker if listed in either seeker team, otherwise hider.
    pub fn role_of(&self, player: &str) -> Role {
        let is_seeker = self
            .seekers1
            .iter()
            .chain(self.seekers2.iter())
            .any(|p| p == player);
        if is_seeker {
            Role::Seeker
        } else {
            Role::Hider
        }
    }

    /// Every listed member across the three teams, duplicates included.
    pub fn members(&self) -> impl Iterator<Item = &String> + '_ {
        self.seekers1
            .iter()
            .chain(self.seekers2.iter())
            .chain(self.hiders.iter())
    }
}

/// One challenge drawn on arrival at a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChallengeRecord {
    pub player: String,
    pub station: String,
    pub challenge: String,
    pub completed: bool,
}

/// The shared game document.
///
/// Field names are the persisted wire format. `Default` is the empty state
/// exposed before the first team assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameState {
    pub teams: Teams,
    pub coins: i64,
    /// Carried through unchanged; element shape is opaque. Older documents
    /// may omit it.
    #[serde(default)]
    pub questions: Vec<Value>,
    pub locations: BTreeMap<String, String>,
    pub challenges: Vec<ChallengeRecord>,
}

impl GameState {
    pub fn location_of(&self, player: &str) -> Option<&str> {
        self.locations.get(player).map(String::as_str)
    }
}
