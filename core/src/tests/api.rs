use super::*;
use crate::error::ClientError;

#[test]
fn test_creature_types_decode() {
    let body = r#"[
        {"type": "dragon", "description": "High health and strength, but slower.",
         "stat_biases": {"speed": -3, "health": 5, "defense": 0, "strength": 2, "luck": 0}},
        {"type": "gnome", "description": "Lucky and fast, but physically weak."}
    ]"#;
    let types: Vec<CreatureTypeInfo> = serde_json::from_str(body).unwrap();
    assert_eq!(types[0].creature_type, "dragon");
    assert_eq!(types[0].stat_biases.speed, -3);
    assert_eq!(types[1].stat_biases, StatBlock::default());
}

#[test]
fn test_match_record_maps_slots_in_order() {
    let snapshot: MatchSnapshot = record("Bob", 8, "Rex", 10, false).into();
    assert_eq!(snapshot.slot_a.name, "Rex");
    assert_eq!(snapshot.slot_b.name, "Bob");
    assert_eq!(snapshot.slot(Slot::B).hp, 8);
    assert_eq!(snapshot.slot_b.creature_type, "gnome");
}

#[test]
fn test_allocate_response_decode() {
    let body = r#"{"success": true, "creature_id": "bob-id",
        "updated_stats": {"speed": 11, "health": 20, "defense": 15, "strength": 8, "luck": 10}}"#;
    let response: AllocateStatsResponse = serde_json::from_str(body).unwrap();
    assert!(response.success);
    assert_eq!(response.updated_stats, Some(StatBlock::new(11, 20, 15, 8, 10)));
}

#[test]
fn test_request_paths_and_bodies() {
    let request = ApiRequest::SubmitMove {
        game_id: String::from("abc"),
        body: SubmitMoveRequest {
            creature_id: String::from("bob-id"),
            move_type: MoveType::from("defend"),
        },
    };
    assert_eq!(request.method(), "POST");
    assert_eq!(request.path(), "/game/abc/move");
    assert_eq!(
        request.body(),
        Some(serde_json::json!({"creature_id": "bob-id", "move_type": "defend"}))
    );

    let request = ApiRequest::GetState {
        game_id: String::from("abc"),
    };
    assert_eq!(request.method(), "GET");
    assert_eq!(request.path(), "/game/abc/state");
    assert_eq!(request.body(), None);

    let request = ApiRequest::StartGame(StartGameRequest {
        num_players: 1,
        creature_ids: vec![String::from("bob-id")],
        tournament_size: 8,
    });
    assert_eq!(request.path(), "/game/start");
    assert_eq!(request.body().unwrap()["tournament_size"], 8);
}

#[test]
fn test_failure_from_string_detail() {
    let err = failure_from_body(404, r#"{"detail": "Game not found"}"#);
    assert_eq!(
        err,
        ClientError::NetworkFailure {
            status: Some(404),
            detail: String::from("Game not found")
        }
    );
    assert_eq!(err.to_string(), "request failed (404): Game not found");
}

#[test]
fn test_failure_from_validation_detail() {
    let body = r#"{"detail": [
        {"loc": ["body", "name"], "msg": "field required", "type": "value_error.missing"},
        {"loc": ["body", "creature_type"], "msg": "field required", "type": "value_error.missing"}
    ]}"#;
    match failure_from_body(422, body) {
        ClientError::NetworkFailure { status, detail } => {
            assert_eq!(status, Some(422));
            assert_eq!(detail, "field required; field required");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_failure_without_detail() {
    match failure_from_body(500, "Internal Server Error") {
        ClientError::NetworkFailure { detail, .. } => {
            assert_eq!(detail, "server returned an error")
        }
        other => panic!("unexpected error {:?}", other),
    }
}
