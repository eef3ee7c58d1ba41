//! Pure game transitions.
//!
//! Each function takes the current document and returns the next full
//! document or a rejection. Nothing here touches the store.

use super::challenge_picker::ChallengePicker;
use super::setup::GameSetup;
use super::state::{ChallengeRecord, GameState, Teams};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Fresh game: split the roster into teams and put everyone at the start.
///
/// The first `seeker_team_size` players seek in team 1, the next block in
/// team 2, any remainder hides.
pub fn assign_teams(setup: &GameSetup) -> GameState {
    let size = setup.seeker_team_size();
    let roster = setup.roster();
    let first_end = size.min(roster.len());
    let second_end = (2 * size).min(roster.len());

    let teams = Teams {
        seekers1: roster[..first_end].to_vec(),
        seekers2: roster[first_end..second_end].to_vec(),
        hiders: roster[second_end..].to_vec(),
    };

    let locations = roster
        .iter()
        .map(|p| (p.clone(), setup.start_station().to_string()))
        .collect();

    GameState {
        teams,
        coins: 0,
        questions: Vec::new(),
        locations,
        challenges: Vec::new(),
    }
}

/// Move `player` to an adjacent station and draw a challenge there.
pub fn move_player(
    state: &GameState,
    setup: &GameSetup,
    player: &str,
    destination: &str,
    picker: &dyn ChallengePicker,
) -> Result<GameState, DomainError> {
    if !setup.is_player(player) {
        return Err(DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("'{player}' is not on the roster"),
        ));
    }
    if !setup.graph().contains(destination) {
        return Err(DomainError::validation(
            ValidationKind::UnknownStation,
            format!("'{destination}' is not a known station"),
        ));
    }

    let Some(current) = state.location_of(player) else {
        return Err(DomainError::validation(
            ValidationKind::InvalidMove,
            format!("{player} has no location; assign teams first"),
        ));
    };
    if !setup.graph().is_adjacent(current, destination) {
        return Err(DomainError::validation(
            ValidationKind::InvalidMove,
            format!("{destination} is not adjacent to {current}"),
        ));
    }

    let pool = setup.challenge_pool();
    let idx = picker.pick_index(pool.len()).min(pool.len().saturating_sub(1));
    let challenge = pool.get(idx).cloned().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::Other("EMPTY_POOL".into()),
            "Challenge pool is empty",
        )
    })?;

    let mut next = state.clone();
    next.locations
        .insert(player.to_string(), destination.to_string());
    next.challenges.push(ChallengeRecord {
        player: player.to_string(),
        station: destination.to_string(),
        challenge,
        completed: false,
    });
    Ok(next)
}

/// Flip the completion flag of the challenge at `index`.
pub fn toggle_challenge(state: &GameState, index: usize) -> Result<GameState, DomainError> {
    let mut next = state.clone();
    let len = next.challenges.len();
    let record = next.challenges.get_mut(index).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Challenge,
            format!("Challenge index {index} out of range (have {len})"),
        )
    })?;
    record.completed = !record.completed;
    Ok(next)
}
