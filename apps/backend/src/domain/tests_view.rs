use super::rules::{assign_teams, move_player, toggle_challenge};
use super::state::{GameState, Role};
use super::test_prelude::{first_prompt, hk_setup};
use super::view::{filter_challenges, player_view, project, ChallengeFilter};
use crate::errors::domain::{DomainError, ValidationKind};

#[test]
fn filter_parses_wire_names_only() {
    assert_eq!("all".parse::<ChallengeFilter>().unwrap(), ChallengeFilter::All);
    assert_eq!("done".parse::<ChallengeFilter>().unwrap(), ChallengeFilter::Done);
    assert_eq!(
        "notdone".parse::<ChallengeFilter>().unwrap(),
        ChallengeFilter::NotDone
    );
    let err = "not_done".parse::<ChallengeFilter>().unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidFilter, _)
    ));
    assert_eq!(
        serde_json::to_value(ChallengeFilter::NotDone).unwrap(),
        serde_json::json!("notdone")
    );
}

#[test]
fn filtered_challenges_keep_original_indices() {
    let setup = hk_setup();
    let mut state = assign_teams(&setup);
    state = move_player(&state, &setup, "Alice", "Admiralty", &first_prompt()).unwrap();
    state = move_player(&state, &setup, "Bob", "Star Ferry", &first_prompt()).unwrap();
    state = move_player(&state, &setup, "Alice", "Wan Chai", &first_prompt()).unwrap();
    state = toggle_challenge(&state, 1).unwrap();

    let done: Vec<usize> = filter_challenges(&state, ChallengeFilter::Done)
        .iter()
        .map(|c| c.index)
        .collect();
    let open: Vec<usize> = filter_challenges(&state, ChallengeFilter::NotDone)
        .iter()
        .map(|c| c.index)
        .collect();

    assert_eq!(done, [1]);
    assert_eq!(open, [0, 2]);
}

#[test]
fn indexed_challenge_serializes_flat() {
    let setup = hk_setup();
    let state = assign_teams(&setup);
    let state = move_player(&state, &setup, "Eve", "Admiralty", &first_prompt()).unwrap();
    let listed = filter_challenges(&state, ChallengeFilter::All);

    let value = serde_json::to_value(&listed[0]).unwrap();
    assert_eq!(value["index"], 0);
    assert_eq!(value["player"], "Eve");
    assert_eq!(value["completed"], false);
}

#[test]
fn player_view_before_assignment_is_empty() {
    let setup = hk_setup();
    let view = player_view(&GameState::default(), &setup, "Alice");

    assert_eq!(view.role, Role::Hider);
    assert_eq!(view.location, None);
    assert!(view.reachable.is_empty());
}

#[test]
fn projection_lists_roster_with_reachable_stations() {
    let setup = hk_setup();
    let state = assign_teams(&setup);
    let view = project(&state, 1, &setup, ChallengeFilter::NotDone);

    assert_eq!(view.players.len(), 6);
    let alice = &view.players[0];
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.role, Role::Seeker);
    assert_eq!(alice.location.as_deref(), Some("Central"));
    assert_eq!(alice.reachable, ["Admiralty", "Star Ferry"]);
    assert_eq!(view.filter, ChallengeFilter::NotDone);
}
