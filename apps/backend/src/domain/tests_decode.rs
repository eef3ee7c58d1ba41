use serde_json::json;

use super::decode::{decode_state, encode_state};
use super::rules::assign_teams;
use super::state::GameState;
use super::test_prelude::hk_setup;
use crate::errors::domain::{DomainError, InfraErrorKind};

fn is_corruption(err: &DomainError) -> bool {
    matches!(err, DomainError::Infra(InfraErrorKind::DataCorruption, _))
}

#[test]
fn decodes_an_encoded_assignment() {
    let setup = hk_setup();
    let state = assign_teams(&setup);
    let body = encode_state(&state).unwrap();
    assert_eq!(decode_state(&body, &setup).unwrap(), state);
}

#[test]
fn empty_document_decodes_to_default() {
    let body = json!({
        "teams": {"seekers1": [], "seekers2": [], "hiders": []},
        "coins": 0, "questions": [], "locations": {}, "challenges": []
    });
    assert_eq!(decode_state(&body, &hk_setup()).unwrap(), GameState::default());
}

#[test]
fn rejects_wrong_shapes() {
    let setup = hk_setup();
    for body in [
        json!(null),
        json!("teams"),
        json!({"teams": {}}),
        json!({
            "teams": {"seekers1": [], "seekers2": [], "hiders": []},
            "coins": "lots", "questions": [], "locations": {}, "challenges": []
        }),
        json!({
            "teams": {"seekers1": [], "seekers2": [], "hiders": []},
            "coins": 0, "questions": [], "locations": {}, "challenges": [],
            "extra": true
        }),
    ] {
        let err = decode_state(&body, &setup).unwrap_err();
        assert!(is_corruption(&err), "expected corruption for {body}");
    }
}

#[test]
fn rejects_duplicate_team_membership() {
    let body = json!({
        "teams": {"seekers1": ["Alice"], "seekers2": ["Alice"], "hiders": []},
        "coins": 0, "questions": [], "locations": {}, "challenges": []
    });
    assert!(is_corruption(&decode_state(&body, &hk_setup()).unwrap_err()));
}

#[test]
fn rejects_unknown_stations() {
    let body = json!({
        "teams": {"seekers1": ["Alice"], "seekers2": [], "hiders": []},
        "coins": 0, "questions": [], "locations": {"Alice": "Atlantis"}, "challenges": []
    });
    let err = decode_state(&body, &hk_setup()).unwrap_err();
    assert!(is_corruption(&err));
    assert!(err.to_string().contains("Atlantis"));
}

#[test]
fn missing_questions_defaults_to_empty() {
    let body = json!({
        "teams": {"seekers1": ["Alice"], "seekers2": [], "hiders": []},
        "coins": 2, "locations": {"Alice": "Central"}, "challenges": []
    });
    let state = decode_state(&body, &hk_setup()).unwrap();
    assert!(state.questions.is_empty());
    assert_eq!(state.coins, 2);
}

#[test]
fn missing_required_fields_are_still_corruption() {
    let body = json!({
        "teams": {"seekers1": [], "seekers2": [], "hiders": []},
        "questions": [], "locations": {}, "challenges": []
    });
    assert!(is_corruption(&decode_state(&body, &hk_setup()).unwrap_err()));
}
