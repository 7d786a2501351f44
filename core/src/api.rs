//! Wire types for the game service and the transport seam
//!
//! Shapes mirror the backend's JSON exactly (snake_case, flat match
//! records). Everything the rest of the crate touches is converted into the
//! types in `types`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::types::*;

/// Entry of `GET /creatures/types`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatureTypeInfo {
    #[serde(rename = "type")]
    pub creature_type: CreatureTypeId,
    #[serde(default)]
    pub description: String,
    /// Modifiers applied on top of base stats; may be negative
    #[serde(default)]
    pub stat_biases: StatBlock,
}

/// Body of `POST /creatures`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateCreatureRequest {
    pub name: String,
    pub creature_type: CreatureTypeId,
    pub stat_allocations: StatBlock,
}

/// Response of `POST /creatures`; only the id matters to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedCreature {
    pub id: CreatureId,
}

/// Body of `POST /game/start`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StartGameRequest {
    pub num_players: u32,
    pub creature_ids: Vec<CreatureId>,
    pub tournament_size: u32,
}

/// Flat match record as the server encodes it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchRecord {
    #[serde(default)]
    pub match_id: Option<String>,
    pub creature1_id: CreatureId,
    pub creature1_name: String,
    #[serde(default)]
    pub creature1_type: CreatureTypeId,
    pub creature1_hp: i32,
    pub creature1_max_hp: i32,
    pub creature2_id: CreatureId,
    pub creature2_name: String,
    #[serde(default)]
    pub creature2_type: CreatureTypeId,
    pub creature2_hp: i32,
    pub creature2_max_hp: i32,
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub winner_name: Option<String>,
    #[serde(default)]
    pub latest_results: Vec<String>,
}

impl From<MatchRecord> for MatchSnapshot {
    fn from(record: MatchRecord) -> Self {
        Self {
            match_id: record.match_id,
            round_index: record.current_round,
            slot_a: CreatureView {
                id: record.creature1_id,
                name: record.creature1_name,
                creature_type: record.creature1_type,
                hp: record.creature1_hp,
                max_hp: record.creature1_max_hp,
            },
            slot_b: CreatureView {
                id: record.creature2_id,
                name: record.creature2_name,
                creature_type: record.creature2_type,
                hp: record.creature2_hp,
                max_hp: record.creature2_max_hp,
            },
            is_complete: record.is_complete,
            winner_name: record.winner_name,
            latest_messages: record.latest_results,
        }
    }
}

/// Response of `POST /game/start`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StartGameResponse {
    pub game_id: GameId,
    #[serde(default)]
    pub current_match: Option<MatchRecord>,
}

/// Body of `POST /game/{id}/move`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitMoveRequest {
    pub creature_id: CreatureId,
    pub move_type: MoveType,
}

/// Response of `POST /game/{id}/move`.
///
/// The post-match flags are optional on the wire; an absent flag reads as
/// false / zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveResponse {
    #[serde(default)]
    pub current_match: Option<MatchRecord>,
    #[serde(default)]
    pub tournament_complete: bool,
    #[serde(default)]
    pub champion_name: Option<String>,
    #[serde(default)]
    pub match_just_completed: Option<bool>,
    #[serde(default)]
    pub player_won_match: Option<bool>,
    #[serde(default)]
    pub stat_points_available: Option<u32>,
    #[serde(default)]
    pub current_stats: Option<StatBlock>,
}

/// Response of `GET /game/{id}/state`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateResponse {
    #[serde(default)]
    pub game_id: Option<GameId>,
    #[serde(default)]
    pub current_match: Option<MatchRecord>,
    #[serde(default)]
    pub tournament_complete: bool,
    #[serde(default)]
    pub champion_name: Option<String>,
}

/// Body of `POST /game/{id}/allocate-stats`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocateStatsRequest {
    pub creature_id: CreatureId,
    pub stat_allocations: StatBlock,
}

/// Confirmation of `POST /game/{id}/allocate-stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocateStatsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub creature_id: Option<CreatureId>,
    #[serde(default)]
    pub updated_stats: Option<StatBlock>,
}

/// Error body of a non-2xx response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

/// Build a `NetworkFailure` from a status code and whatever body came back.
///
/// `detail` is passed through when present: either a plain string or, for
/// validation errors, a list whose `msg` fields are joined.
pub fn failure_from_body(status: u16, body: &str) -> ClientError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .map(|detail| match detail {
            Value::String(s) => s,
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| String::from("server returned an error"));
    ClientError::NetworkFailure {
        status: Some(status),
        detail,
    }
}

/// Which endpoint a request targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum RequestKind {
    LoadCreatureTypes,
    CreateCreature,
    StartGame,
    SubmitMove,
    GetState,
    AllocateStats,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::LoadCreatureTypes => "loadCreatureTypes",
            RequestKind::CreateCreature => "createCreature",
            RequestKind::StartGame => "startGame",
            RequestKind::SubmitMove => "submitMove",
            RequestKind::GetState => "getState",
            RequestKind::AllocateStats => "allocateStats",
        }
    }
}

/// A call the reducer wants its host to make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    LoadCreatureTypes,
    CreateCreature(CreateCreatureRequest),
    StartGame(StartGameRequest),
    SubmitMove {
        game_id: GameId,
        body: SubmitMoveRequest,
    },
    GetState {
        game_id: GameId,
    },
    AllocateStats {
        game_id: GameId,
        body: AllocateStatsRequest,
    },
}

impl ApiRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            ApiRequest::LoadCreatureTypes => RequestKind::LoadCreatureTypes,
            ApiRequest::CreateCreature(_) => RequestKind::CreateCreature,
            ApiRequest::StartGame(_) => RequestKind::StartGame,
            ApiRequest::SubmitMove { .. } => RequestKind::SubmitMove,
            ApiRequest::GetState { .. } => RequestKind::GetState,
            ApiRequest::AllocateStats { .. } => RequestKind::AllocateStats,
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            ApiRequest::LoadCreatureTypes | ApiRequest::GetState { .. } => "GET",
            _ => "POST",
        }
    }

    /// Path relative to the API base
    pub fn path(&self) -> String {
        match self {
            ApiRequest::LoadCreatureTypes => String::from("/creatures/types"),
            ApiRequest::CreateCreature(_) => String::from("/creatures"),
            ApiRequest::StartGame(_) => String::from("/game/start"),
            ApiRequest::SubmitMove { game_id, .. } => format!("/game/{}/move", game_id),
            ApiRequest::GetState { game_id } => format!("/game/{}/state", game_id),
            ApiRequest::AllocateStats { game_id, .. } => {
                format!("/game/{}/allocate-stats", game_id)
            }
        }
    }

    /// JSON body for POST requests
    pub fn body(&self) -> Option<Value> {
        let encoded = match self {
            ApiRequest::LoadCreatureTypes | ApiRequest::GetState { .. } => return None,
            ApiRequest::CreateCreature(body) => serde_json::to_value(body),
            ApiRequest::StartGame(body) => serde_json::to_value(body),
            ApiRequest::SubmitMove { body, .. } => serde_json::to_value(body),
            ApiRequest::AllocateStats { body, .. } => serde_json::to_value(body),
        };
        encoded.ok()
    }
}

/// The remote game service.
///
/// Implemented over HTTP by the terminal client and by in-memory fakes in
/// tests. Non-2xx statuses map to [`ClientError::NetworkFailure`].
pub trait GameApi {
    fn creature_types(&mut self) -> ClientResult<Vec<CreatureTypeInfo>>;

    fn create_creature(&mut self, request: &CreateCreatureRequest)
        -> ClientResult<CreatedCreature>;

    fn start_game(&mut self, request: &StartGameRequest) -> ClientResult<StartGameResponse>;

    fn submit_move(
        &mut self,
        game_id: &str,
        request: &SubmitMoveRequest,
    ) -> ClientResult<MoveResponse>;

    fn game_state(&mut self, game_id: &str) -> ClientResult<GameStateResponse>;

    fn allocate_stats(
        &mut self,
        game_id: &str,
        request: &AllocateStatsRequest,
    ) -> ClientResult<AllocateStatsResponse>;
}
