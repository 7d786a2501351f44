mod api;
mod properties;

use crate::api::*;
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

fn creature(id: &str, name: &str, hp: i32, max_hp: i32) -> CreatureView {
    CreatureView {
        id: id.to_string(),
        name: name.to_string(),
        creature_type: String::from("dragon"),
        hp,
        max_hp,
    }
}

fn snapshot(slot_a: CreatureView, slot_b: CreatureView) -> MatchSnapshot {
    MatchSnapshot {
        match_id: Some(String::from("m1")),
        round_index: 0,
        slot_a,
        slot_b,
        is_complete: false,
        winner_name: None,
        latest_messages: vec![],
    }
}

fn profile(name: &str) -> PlayerProfile {
    let mut profile = PlayerProfile::new(name, "dragon", StatBlock::default());
    profile.creature_id = Some(format!("{}-id", name.to_lowercase()));
    profile
}

/// Wire record with the player in slot 1 or 2
fn record(player: &str, player_hp: i32, opponent: &str, opponent_hp: i32, player_first: bool) -> MatchRecord {
    let player_id = format!("{}-id", player.to_lowercase());
    let opponent_id = format!("{}-id", opponent.to_lowercase());
    let (a, b) = if player_first {
        ((player_id, player, player_hp), (opponent_id, opponent, opponent_hp))
    } else {
        ((opponent_id, opponent, opponent_hp), (player_id, player, player_hp))
    };
    MatchRecord {
        match_id: Some(format!("{}-vs-{}", a.1, b.1)),
        creature1_id: a.0,
        creature1_name: a.1.to_string(),
        creature1_type: String::from("dragon"),
        creature1_hp: a.2,
        creature1_max_hp: 20,
        creature2_id: b.0,
        creature2_name: b.1.to_string(),
        creature2_type: String::from("gnome"),
        creature2_hp: b.2,
        creature2_max_hp: 20,
        current_round: 0,
        is_complete: false,
        winner_name: None,
        latest_results: vec![],
    }
}

fn type_catalogue() -> Vec<CreatureTypeInfo> {
    vec![
        CreatureTypeInfo {
            creature_type: String::from("dragon"),
            description: String::from("High health and strength, but slower."),
            stat_biases: StatBlock::new(-3, 5, 0, 2, 0),
        },
        CreatureTypeInfo {
            creature_type: String::from("gnome"),
            description: String::from("Lucky and fast, but physically weak."),
            stat_biases: StatBlock::new(3, 0, 0, -3, 4),
        },
    ]
}

/// Drive a fresh client to the battle screen with Bob against Rex.
///
/// `player_first` decides which slot the server puts Bob in.
fn battle_state(player_first: bool) -> crate::state::ClientState {
    use crate::engine::{ApiEvent, Intent};

    let mut state = crate::state::ClientState::default();
    state.boot();
    state.receive(ApiEvent::TypesLoaded(type_catalogue()));
    state
        .dispatch(Intent::SetName {
            name: String::from("Bob"),
        })
        .unwrap();
    state
        .dispatch(Intent::SelectType {
            creature_type: String::from("dragon"),
        })
        .unwrap();
    state.dispatch(Intent::StartGame).unwrap();
    state.receive(ApiEvent::CreatureCreated(CreatedCreature {
        id: String::from("bob-id"),
    }));
    state.receive(ApiEvent::GameStarted(StartGameResponse {
        game_id: String::from("g1"),
        current_match: Some(record("Bob", 20, "Rex", 20, player_first)),
    }));
    state
}

// ==========================================
// SCRIPTED GAME SERVICE
// ==========================================

/// In-memory game service that replays queued responses
#[derive(Default)]
struct FakeApi {
    types: Vec<CreatureTypeInfo>,
    start: Option<StartGameResponse>,
    moves: std::collections::VecDeque<crate::error::ClientResult<MoveResponse>>,
    states: std::collections::VecDeque<crate::error::ClientResult<GameStateResponse>>,
    allocation_reply: Option<AllocateStatsResponse>,
    /// Endpoints hit, in order
    calls: Vec<String>,
    created: Vec<CreateCreatureRequest>,
    allocations: Vec<AllocateStatsRequest>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            types: type_catalogue(),
            ..Default::default()
        }
    }
}

impl GameApi for FakeApi {
    fn creature_types(&mut self) -> crate::error::ClientResult<Vec<CreatureTypeInfo>> {
        self.calls.push(String::from("types"));
        Ok(self.types.clone())
    }

    fn create_creature(
        &mut self,
        request: &CreateCreatureRequest,
    ) -> crate::error::ClientResult<CreatedCreature> {
        self.calls.push(String::from("create"));
        self.created.push(request.clone());
        Ok(CreatedCreature {
            id: format!("{}-id", request.name.to_lowercase()),
        })
    }

    fn start_game(
        &mut self,
        _request: &StartGameRequest,
    ) -> crate::error::ClientResult<StartGameResponse> {
        self.calls.push(String::from("start"));
        self.start
            .clone()
            .ok_or_else(|| crate::error::ClientError::network("no game scripted"))
    }

    fn submit_move(
        &mut self,
        _game_id: &str,
        request: &SubmitMoveRequest,
    ) -> crate::error::ClientResult<MoveResponse> {
        self.calls.push(format!("move:{}", request.move_type.as_str()));
        self.moves
            .pop_front()
            .unwrap_or_else(|| Err(crate::error::ClientError::network("no move scripted")))
    }

    fn game_state(&mut self, _game_id: &str) -> crate::error::ClientResult<GameStateResponse> {
        self.calls.push(String::from("state"));
        self.states
            .pop_front()
            .unwrap_or_else(|| Err(crate::error::ClientError::network("no state scripted")))
    }

    fn allocate_stats(
        &mut self,
        _game_id: &str,
        request: &AllocateStatsRequest,
    ) -> crate::error::ClientResult<AllocateStatsResponse> {
        self.calls.push(String::from("allocate"));
        self.allocations.push(request.clone());
        self.allocation_reply
            .clone()
            .ok_or_else(|| crate::error::ClientError::network("no allocation scripted"))
    }
}
