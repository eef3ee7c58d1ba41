//! Per-viewer projection of the shared document.
//!
//! Nothing here is persisted. Filters and roles are recomputed on every call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::setup::GameSetup;
use super::state::{ChallengeRecord, GameState, Role, Teams};
use crate::errors::domain::{DomainError, ValidationKind};

/// Challenge list filter. Wire names: `all`, `done`, `notdone`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeFilter {
    #[default]
    All,
    Done,
    #[serde(rename = "notdone")]
    NotDone,
}

impl ChallengeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeFilter::All => "all",
            ChallengeFilter::Done => "done",
            ChallengeFilter::NotDone => "notdone",
        }
    }

    pub fn admits(&self, record: &ChallengeRecord) -> bool {
        match self {
            ChallengeFilter::All => true,
            ChallengeFilter::Done => record.completed,
            ChallengeFilter::NotDone => !record.completed,
        }
    }
}

impl fmt::Display for ChallengeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChallengeFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ChallengeFilter::All),
            "done" => Ok(ChallengeFilter::Done),
            "notdone" => Ok(ChallengeFilter::NotDone),
            other => Err(DomainError::validation(
                ValidationKind::InvalidFilter,
                format!("Unknown filter '{other}' (expected all, done or notdone)"),
            )),
        }
    }
}

/// A challenge together with its position in the full list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedChallenge {
    pub index: usize,
    #[serde(flatten)]
    pub record: ChallengeRecord,
}

pub fn filter_challenges(state: &GameState, filter: ChallengeFilter) -> Vec<IndexedChallenge> {
    state
        .challenges
        .iter()
        .enumerate()
        .filter(|(_, c)| filter.admits(c))
        .map(|(index, record)| IndexedChallenge {
            index,
            record: record.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub role: Role,
    pub location: Option<String>,
    pub reachable: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameView {
    pub version: i32,
    pub filter: ChallengeFilter,
    pub teams: Teams,
    pub coins: i64,
    pub players: Vec<PlayerView>,
    pub challenges: Vec<IndexedChallenge>,
}

pub fn player_view(state: &GameState, setup: &GameSetup, name: &str) -> PlayerView {
    let location = state.location_of(name).map(str::to_string);
    let reachable = location
        .as_deref()
        .map(|loc| setup.graph().neighbors(loc).to_vec())
        .unwrap_or_default();

    PlayerView {
        name: name.to_string(),
        role: state.teams.role_of(name),
        location,
        reachable,
    }
}

/// Project the document for one viewer. Players are listed in roster order.
pub fn project(
    state: &GameState,
    version: i32,
    setup: &GameSetup,
    filter: ChallengeFilter,
) -> GameView {
    GameView {
        version,
        filter,
        teams: state.teams.clone(),
        coins: state.coins,
        players: setup
            .roster()
            .iter()
            .map(|p| player_view(state, setup, p))
            .collect(),
        challenges: filter_challenges(state, filter),
    }
}
