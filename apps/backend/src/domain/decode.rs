//! Validated decode of stored documents.
//!
//! Anything that does not parse into [`GameState`] or that breaks its
//! invariants against the configured setup is reported as `DataCorruption`.

use std::collections::HashSet;

use serde_json::Value;

use super::setup::GameSetup;
use super::state::GameState;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub fn decode_state(body: &Value, setup: &GameSetup) -> Result<GameState, DomainError> {
    let state: GameState = serde_json::from_value(body.clone())
        .map_err(|e| corrupt(format!("Game document does not parse: {e}")))?;

    let mut seen = HashSet::new();
    for member in state.teams.members() {
        if !seen.insert(member.as_str()) {
            return Err(corrupt(format!("'{member}' appears in more than one team slot")));
        }
    }

    for (player, station) in &state.locations {
        if !setup.graph().contains(station) {
            return Err(corrupt(format!(
                "{player} is located at unknown station '{station}'"
            )));
        }
    }

    for (i, record) in state.challenges.iter().enumerate() {
        if !setup.graph().contains(&record.station) {
            return Err(corrupt(format!(
                "Challenge {i} references unknown station '{}'",
                record.station
            )));
        }
    }

    Ok(state)
}

pub fn encode_state(state: &GameState) -> Result<Value, DomainError> {
    serde_json::to_value(state).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("ENCODE".into()),
            format!("Failed to encode game document: {e}"),
        )
    })
}

fn corrupt(detail: String) -> DomainError {
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}
