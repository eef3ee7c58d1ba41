use std::collections::HashSet;

use super::station_graph::StationGraph;
use crate::errors::domain::{DomainError, ValidationKind};

/// Validated static reference data for one game.
///
/// Never persisted; every rule function and projection reads it alongside the
/// shared document.
#[derive(Debug, Clone)]
pub struct GameSetup {
    roster: Vec<String>,
    graph: StationGraph,
    start_station: String,
    challenge_pool: Vec<String>,
    seeker_team_size: usize,
}

impl GameSetup {
    pub fn new(
        roster: Vec<String>,
        stations: &[String],
        edges: &[(String, String)],
        start_station: String,
        challenge_pool: Vec<String>,
        seeker_team_size: usize,
    ) -> Result<Self, DomainError> {
        if roster.is_empty() {
            return Err(invalid("Roster must contain at least one player"));
        }
        let mut seen = HashSet::with_capacity(roster.len());
        for player in &roster {
            if player.trim().is_empty() {
                return Err(invalid("Player names must not be blank"));
            }
            if !seen.insert(player.as_str()) {
                return Err(invalid(format!("Player '{player}' is listed more than once")));
            }
        }

        let graph = StationGraph::from_edges(stations, edges)?;
        if !graph.contains(&start_station) {
            return Err(DomainError::validation(
                ValidationKind::UnknownStation,
                format!("Start station '{start_station}' is not a known station"),
            ));
        }

        if challenge_pool.is_empty() {
            return Err(invalid("Challenge pool must not be empty"));
        }
        if seeker_team_size == 0 {
            return Err(invalid("Seeker team size must be positive"));
        }

        Ok(Self {
            roster,
            graph,
            start_station,
            challenge_pool,
            seeker_team_size,
        })
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn is_player(&self, name: &str) -> bool {
        self.roster.iter().any(|p| p == name)
    }

    pub fn graph(&self) -> &StationGraph {
        &self.graph
    }

    pub fn start_station(&self) -> &str {
        &self.start_station
    }

    pub fn challenge_pool(&self) -> &[String] {
        &self.challenge_pool
    }

    pub fn seeker_team_size(&self) -> usize {
        self.seeker_team_size
    }
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::Other("INVALID_SETUP".into()), detail)
}
