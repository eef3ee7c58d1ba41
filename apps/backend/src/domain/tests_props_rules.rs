//! Property tests for the game transitions and the view projection.

use proptest::prelude::*;

use super::challenge_picker::SequencePicker;
use super::rules::{assign_teams, move_player, toggle_challenge};
use super::state::{GameState, Role};
use super::test_prelude::{self, hk_setup};
use super::view::{filter_challenges, project, ChallengeFilter};

/// Play a sequence of (player index, neighbour index) walks from a fresh game.
fn play_walk(steps: &[(usize, usize, usize)]) -> GameState {
    let setup = hk_setup();
    let mut state = assign_teams(&setup);
    for &(p, n, prompt) in steps {
        let player = &setup.roster()[p % setup.roster().len()];
        let here = state.location_of(player).unwrap_or_default().to_string();
        let neighbours = setup.graph().neighbors(&here);
        let dest = neighbours[n % neighbours.len()].clone();
        state = move_player(&state, &setup, player, &dest, &SequencePicker::new(vec![prompt]))
            .expect("adjacent move is legal");
    }
    state
}

fn walk_strategy() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0usize..6, 0usize..4, 0usize..6), 0..12)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the derived adjacency is symmetric.
    #[test]
    fn prop_adjacency_is_symmetric(a in 0usize..8, b in 0usize..8) {
        let setup = hk_setup();
        let stations = setup.graph().stations();
        let (x, y) = (&stations[a], &stations[b]);
        prop_assert_eq!(setup.graph().is_adjacent(x, y), setup.graph().is_adjacent(y, x));
    }

    /// Property: a move lands iff the destination is adjacent.
    #[test]
    fn prop_move_succeeds_iff_adjacent(
        steps in walk_strategy(),
        player in 0usize..6,
        dest in 0usize..8,
    ) {
        let setup = hk_setup();
        let state = play_walk(&steps);
        let name = &setup.roster()[player];
        let target = &setup.graph().stations()[dest];
        let here = state.location_of(name).unwrap_or_default().to_string();

        let result = move_player(&state, &setup, name, target, &SequencePicker::new(vec![0]));
        if setup.graph().is_adjacent(&here, target) {
            let next = result.expect("adjacent move");
            prop_assert_eq!(next.location_of(name), Some(target.as_str()));
            prop_assert_eq!(next.challenges.len(), state.challenges.len() + 1);
            let last = next.challenges.last().expect("appended");
            prop_assert!(!last.completed);
            prop_assert_eq!(&next.challenges[..state.challenges.len()], &state.challenges[..]);
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// Property: every roster player is in exactly one team after assignment.
    #[test]
    fn prop_assignment_partitions_roster(steps in walk_strategy()) {
        let setup = hk_setup();
        let _ = play_walk(&steps);
        let state = assign_teams(&setup);
        for player in setup.roster() {
            let count = state.teams.members().filter(|m| *m == player).count();
            prop_assert_eq!(count, 1);
            prop_assert_eq!(state.location_of(player), Some("Central"));
        }
        prop_assert!(state.challenges.is_empty());
    }

    /// Property: toggle is an involution and touches one flag only.
    #[test]
    fn prop_toggle_twice_restores(steps in walk_strategy(), pick in 0usize..12) {
        let state = play_walk(&steps);
        prop_assume!(!state.challenges.is_empty());
        let idx = pick % state.challenges.len();

        let once = toggle_challenge(&state, idx).expect("in range");
        prop_assert_eq!(once.challenges[idx].completed, !state.challenges[idx].completed);
        let twice = toggle_challenge(&once, idx).expect("in range");
        prop_assert_eq!(twice, state);
    }

    /// Property: done and notdone partition all, keeping original indices.
    #[test]
    fn prop_filters_partition_challenges(
        steps in walk_strategy(),
        toggles in prop::collection::vec(0usize..12, 0..6),
    ) {
        let mut state = play_walk(&steps);
        let len = state.challenges.len();
        if len > 0 {
            for t in toggles {
                state = toggle_challenge(&state, t % len).expect("in range");
            }
        }

        let all = filter_challenges(&state, ChallengeFilter::All);
        let done = filter_challenges(&state, ChallengeFilter::Done);
        let open = filter_challenges(&state, ChallengeFilter::NotDone);

        prop_assert_eq!(all.len(), done.len() + open.len());
        let mut merged: Vec<usize> = done.iter().chain(open.iter()).map(|c| c.index).collect();
        merged.sort_unstable();
        let all_idx: Vec<usize> = all.iter().map(|c| c.index).collect();
        prop_assert_eq!(merged, all_idx);
        for c in done.iter().chain(open.iter()) {
            prop_assert_eq!(&c.record, &state.challenges[c.index]);
        }
    }

    /// Property: role and reachable stations follow the document.
    #[test]
    fn prop_view_matches_document(steps in walk_strategy()) {
        let setup = hk_setup();
        let state = play_walk(&steps);
        let view = project(&state, 3, &setup, ChallengeFilter::All);

        prop_assert_eq!(view.version, 3);
        for pv in &view.players {
            prop_assert_eq!(pv.role, Role::Seeker);
            let loc = pv.location.as_deref().expect("assigned");
            prop_assert_eq!(&pv.reachable[..], setup.graph().neighbors(loc));
        }
    }
}
