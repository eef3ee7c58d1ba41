//! Scenario tests for assign / move / toggle on the Hong Kong setup.

use super::rules::{assign_teams, move_player, toggle_challenge};
use super::state::GameState;
use super::test_prelude::{first_prompt, hk_setup};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

#[test]
fn default_roster_splits_into_two_seeker_teams() {
    let setup = hk_setup();
    let state = assign_teams(&setup);

    assert_eq!(state.teams.seekers1, ["Alice", "Bob", "Charlie"]);
    assert_eq!(state.teams.seekers2, ["David", "Eve", "Frank"]);
    assert!(state.teams.hiders.is_empty());
    assert_eq!(state.coins, 0);
    assert!(state.challenges.is_empty());
    assert!(state.questions.is_empty());
    for player in setup.roster() {
        assert_eq!(state.location_of(player), Some("Central"));
    }
}

#[test]
fn assign_resets_a_game_in_progress() {
    let setup = hk_setup();
    let mut state = assign_teams(&setup);
    state = move_player(&state, &setup, "Alice", "Admiralty", &first_prompt()).unwrap();
    state.coins = 12;

    let fresh = assign_teams(&setup);
    assert_eq!(fresh, assign_teams(&setup));
    assert_eq!(fresh.coins, 0);
    assert!(fresh.challenges.is_empty());
    assert_eq!(fresh.location_of("Alice"), Some("Central"));
}

#[test]
fn non_adjacent_move_is_rejected() {
    let setup = hk_setup();
    let state = assign_teams(&setup);

    let err = move_player(&state, &setup, "Alice", "Wan Chai", &first_prompt()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidMove, _)
    ));
}

#[test]
fn adjacent_move_appends_one_open_challenge() {
    let setup = hk_setup();
    let state = assign_teams(&setup);

    let next = move_player(&state, &setup, "Alice", "Admiralty", &first_prompt()).unwrap();

    assert_eq!(next.location_of("Alice"), Some("Admiralty"));
    assert_eq!(next.challenges.len(), 1);
    let record = &next.challenges[0];
    assert_eq!(record.player, "Alice");
    assert_eq!(record.station, "Admiralty");
    assert_eq!(record.challenge, "Sing a Cantonese nursery rhyme");
    assert!(!record.completed);
    assert_eq!(next.teams, state.teams);
    assert_eq!(next.coins, state.coins);
}

#[test]
fn move_before_assignment_is_invalid() {
    let setup = hk_setup();
    let err = move_player(
        &GameState::default(),
        &setup,
        "Alice",
        "Admiralty",
        &first_prompt(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidMove, _)
    ));
}

#[test]
fn unknown_player_and_station_are_rejected() {
    let setup = hk_setup();
    let state = assign_teams(&setup);

    let err = move_player(&state, &setup, "Mallory", "Admiralty", &first_prompt()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UnknownPlayer, _)
    ));

    let err = move_player(&state, &setup, "Alice", "Lantau", &first_prompt()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UnknownStation, _)
    ));
}

#[test]
fn toggle_flips_and_out_of_range_is_not_found() {
    let setup = hk_setup();
    let state = assign_teams(&setup);
    let state = move_player(&state, &setup, "Bob", "Star Ferry", &first_prompt()).unwrap();

    let once = toggle_challenge(&state, 0).unwrap();
    assert!(once.challenges[0].completed);
    assert_eq!(once.locations, state.locations);

    let err = toggle_challenge(&state, 1).unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Challenge, _)
    ));
}
