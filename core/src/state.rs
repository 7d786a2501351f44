use serde::{Deserialize, Serialize};

use crate::allocation::StatDraft;
use crate::api::CreatureTypeInfo;
use crate::types::*;

/// Points a new creature can distribute on the setup screen (at most)
pub const SETUP_STAT_POINTS: i32 = 6;
/// Points granted after each won match (exactly)
pub const LEVEL_UP_STAT_POINTS: i32 = 3;
/// Default game service location
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
/// Creatures per tournament bracket
pub const DEFAULT_TOURNAMENT_SIZE: u32 = 8;
/// Human players per run
pub const DEFAULT_NUM_PLAYERS: u32 = 1;
/// Cosmetic pause before move buttons come back after a round
pub const RESUME_DELAY_MS: u32 = 1_000;
/// Pause on the elimination message before returning to setup
pub const RESET_DELAY_MS: u32 = 3_000;
/// Per-request timeout for HTTP transports
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub api_base: String,
    pub num_players: u32,
    pub tournament_size: u32,
    pub resume_delay_ms: u32,
    pub reset_delay_ms: u32,
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::from(DEFAULT_API_BASE),
            num_players: DEFAULT_NUM_PLAYERS,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            resume_delay_ms: RESUME_DELAY_MS,
            reset_delay_ms: RESET_DELAY_MS,
            request_timeout_ms: REQUEST_TIMEOUT_MS,
        }
    }
}

/// Screen the user is looking at
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Setup,
    Battle,
    LevelUp,
    Victory,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Setup => "setup",
            Screen::Battle => "battle",
            Screen::LevelUp => "levelUp",
            Screen::Victory => "victory",
        }
    }

    /// Edges of the screen machine:
    /// `Setup -> Battle <-> LevelUp`, `Battle -> Victory`,
    /// `Battle -> Setup` (elimination) and `Victory -> Setup` (reset).
    pub fn can_transition_to(self, next: Screen) -> bool {
        use Screen::*;
        matches!(
            (self, next),
            (Setup, Battle)
                | (Battle, Battle)
                | (Battle, LevelUp)
                | (LevelUp, Battle)
                | (Battle, Victory)
                | (Battle, Setup)
                | (Victory, Setup)
        )
    }
}

/// Derived per response, never stored across matches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub player_slot: Slot,
    pub screen: Screen,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// User-visible notification, shown until dismissed or replaced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: &str) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.to_string(),
        }
    }

    pub fn warning(message: &str) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.to_string(),
        }
    }
}

/// Level-up screen state: confirmed baseline plus the pending draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUpStage {
    pub baseline: StatBlock,
    pub draft: StatDraft,
    /// Allocation sent to the server, kept to check the confirmation
    pub submitted: Option<StatBlock>,
}

/// All transient client state for one tournament run.
///
/// Mutated only through `dispatch` and `receive` (see `engine`).
#[derive(Debug, Clone)]
pub struct ClientState {
    pub config: ClientConfig,
    /// Catalogue from `GET /creatures/types`, kept across resets
    pub creature_types: Vec<CreatureTypeInfo>,
    pub screen: Screen,

    // Setup screen inputs
    pub name_input: String,
    pub selected_type: Option<CreatureTypeId>,
    pub setup_draft: StatDraft,

    // Tournament run
    pub profile: Option<PlayerProfile>,
    pub game_id: Option<GameId>,
    pub snapshot: Option<MatchSnapshot>,
    pub view_state: Option<ViewState>,
    pub battle_log: Vec<String>,
    pub moves_enabled: bool,
    pub awaiting_next_match: bool,
    pub eliminated: bool,
    pub level_up: Option<LevelUpStage>,
    /// Last confirmed stats of the player's creature, if the server sent them
    pub known_stats: Option<StatBlock>,
    pub outcome: Option<TournamentOutcome>,

    pub notice: Option<Notice>,
    /// Request currently outstanding; input is gated while set
    pub in_flight: Option<crate::api::RequestKind>,
}

impl ClientState {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            creature_types: Vec::new(),
            screen: Screen::Setup,
            name_input: String::new(),
            selected_type: None,
            setup_draft: StatDraft::setup(),
            profile: None,
            game_id: None,
            snapshot: None,
            view_state: None,
            battle_log: Vec::new(),
            moves_enabled: false,
            awaiting_next_match: false,
            eliminated: false,
            level_up: None,
            known_stats: None,
            outcome: None,
            notice: None,
            in_flight: None,
        }
    }

    /// Drop everything belonging to the current run and return to setup.
    /// The creature type catalogue and configuration survive.
    pub fn reset(&mut self) {
        let config = std::mem::take(&mut self.config);
        let creature_types = std::mem::take(&mut self.creature_types);
        *self = Self::new(config);
        self.creature_types = creature_types;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Name entered on the setup screen, trimmed
    pub fn trimmed_name(&self) -> &str {
        self.name_input.trim()
    }

    pub fn can_start(&self) -> bool {
        !self.trimmed_name().is_empty() && self.selected_type.is_some()
    }

    pub fn creature_id(&self) -> Option<&CreatureId> {
        self.profile.as_ref().and_then(|p| p.creature_id.as_ref())
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
