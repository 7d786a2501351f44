//! View types for UI serialization
//!
//! This module provides view structs for sending client state to frontends.
//! Views are rebuilt from `ClientState` on demand and never stored.

use serde::{Deserialize, Serialize};

use crate::api::CreatureTypeInfo;
use crate::reconciler::{resolve_player_slot, to_display_pair};
use crate::state::*;
use crate::types::*;

/// HP bar colouring
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HpBand {
    Healthy,
    /// 50 % or less
    Low,
    /// 25 % or less
    Critical,
}

impl HpBand {
    pub fn from_percent(percent: u8) -> Self {
        if percent <= 25 {
            HpBand::Critical
        } else if percent <= 50 {
            HpBand::Low
        } else {
            HpBand::Healthy
        }
    }
}

/// One creature as drawn on the battle screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatureDisplay {
    pub id: CreatureId,
    pub name: String,
    pub creature_type: CreatureTypeId,
    pub hp: i32,
    pub max_hp: i32,
    pub hp_percent: u8,
    pub hp_band: HpBand,
}

impl From<&CreatureView> for CreatureDisplay {
    fn from(creature: &CreatureView) -> Self {
        let hp_percent = hp_percent(creature.hp, creature.max_hp);
        Self {
            id: creature.id.clone(),
            name: creature.name.clone(),
            creature_type: creature.creature_type.clone(),
            hp: creature.hp,
            max_hp: creature.max_hp,
            hp_percent,
            hp_band: HpBand::from_percent(hp_percent),
        }
    }
}

fn hp_percent(hp: i32, max_hp: i32) -> u8 {
    if max_hp <= 0 {
        return 0;
    }
    let hp = hp.clamp(0, max_hp) as i64;
    ((hp * 100) / max_hp as i64) as u8
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetupView {
    pub creature_types: Vec<CreatureTypeInfo>,
    pub selected_type: Option<CreatureTypeId>,
    pub name: String,
    pub allocation: StatBlock,
    pub points_remaining: i32,
    pub can_start: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BattleView {
    /// One-based round number for display
    pub round: u32,
    pub player: CreatureDisplay,
    pub opponent: CreatureDisplay,
    pub player_slot: Slot,
    pub log: Vec<String>,
    pub moves: Vec<String>,
    pub moves_enabled: bool,
    pub show_next_match: bool,
    pub match_complete: bool,
    pub winner_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LevelUpView {
    pub baseline: StatBlock,
    pub allocation: StatBlock,
    /// Baseline plus the current draft
    pub preview: StatBlock,
    pub points_remaining: i32,
    pub can_confirm: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VictoryView {
    pub champion_name: Option<String>,
    pub player_is_champion: bool,
}

/// The complete client view sent to the renderer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub screen: Screen,
    pub setup: Option<SetupView>,
    /// Present whenever a match is loaded, including behind the level-up screen
    pub battle: Option<BattleView>,
    pub level_up: Option<LevelUpView>,
    pub victory: Option<VictoryView>,
    pub notice: Option<Notice>,
    /// A request is outstanding
    pub busy: bool,
}

impl GameView {
    /// Construct a GameView from the current client state
    pub fn from_state(state: &ClientState) -> Self {
        let setup = (state.screen == Screen::Setup).then(|| SetupView {
            creature_types: state.creature_types.clone(),
            selected_type: state.selected_type.clone(),
            name: state.name_input.clone(),
            allocation: *state.setup_draft.allocation(),
            points_remaining: state.setup_draft.remaining(),
            can_start: state.can_start() && !state.is_busy(),
        });

        let battle = match (&state.snapshot, &state.profile) {
            (Some(snapshot), Some(profile)) => {
                let slot = state
                    .view_state
                    .map(|v| v.player_slot)
                    .unwrap_or_else(|| resolve_player_slot(snapshot, profile));
                Some(battle_view(state, snapshot, slot))
            }
            _ => None,
        };

        let level_up = state.level_up.as_ref().map(|stage| LevelUpView {
            baseline: stage.baseline,
            allocation: *stage.draft.allocation(),
            preview: stage.baseline.plus(stage.draft.allocation()),
            points_remaining: stage.draft.remaining(),
            can_confirm: stage.draft.is_submittable() && !state.is_busy(),
        });

        let victory = state.outcome.as_ref().map(|outcome| VictoryView {
            champion_name: outcome.champion_name.clone(),
            player_is_champion: match (&outcome.champion_name, &state.profile) {
                (Some(champion), Some(profile)) => *champion == profile.name,
                _ => false,
            },
        });

        Self {
            screen: state.screen,
            setup,
            battle,
            level_up,
            victory,
            notice: state.notice.clone(),
            busy: state.is_busy(),
        }
    }
}

fn battle_view(state: &ClientState, snapshot: &MatchSnapshot, player_slot: Slot) -> BattleView {
    let pair = to_display_pair(snapshot, player_slot);
    BattleView {
        round: snapshot.round_index + 1,
        player: CreatureDisplay::from(&pair.player),
        opponent: CreatureDisplay::from(&pair.opponent),
        player_slot,
        log: state.battle_log.clone(),
        moves: MOVE_BUTTONS.iter().map(|m| m.to_string()).collect(),
        moves_enabled: state.moves_enabled && !state.is_busy(),
        show_next_match: state.awaiting_next_match,
        match_complete: snapshot.is_complete,
        winner_name: snapshot.winner_name.clone(),
    }
}
