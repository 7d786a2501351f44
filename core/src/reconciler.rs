//! Match view reconciliation
//!
//! The server reports matches as `creature1`/`creature2` and makes no promise
//! about which of the two is the player. Everything that needs "my creature"
//! goes through `resolve_player_slot` and `to_display_pair`, and every move
//! response goes through `next_transition` to pick the next screen.

use serde::{Deserialize, Serialize};

use crate::api::MoveResponse;
use crate::error::{ClientError, ClientResult};
use crate::log;
use crate::state::{Screen, ViewState};
use crate::types::*;

/// Slot used when the player's creature cannot be identified
pub const FALLBACK_SLOT: Slot = Slot::A;

/// Find the player's slot by name.
///
/// `A` iff slot A's name equals the profile name and slot B's does not;
/// `B` for the mirror case. Neither or both matching is a desync.
pub fn try_resolve_player_slot(
    snapshot: &MatchSnapshot,
    profile: &PlayerProfile,
) -> ClientResult<Slot> {
    let in_a = snapshot.slot_a.name == profile.name;
    let in_b = snapshot.slot_b.name == profile.name;
    match (in_a, in_b) {
        (true, false) => Ok(Slot::A),
        (false, true) => Ok(Slot::B),
        _ => Err(ClientError::Desync {
            profile_name: profile.name.clone(),
            slot_a: snapshot.slot_a.name.clone(),
            slot_b: snapshot.slot_b.name.clone(),
        }),
    }
}

/// Like [`try_resolve_player_slot`], but never fails: a desync is logged and
/// answered with [`FALLBACK_SLOT`] so rendering can continue.
pub fn resolve_player_slot(snapshot: &MatchSnapshot, profile: &PlayerProfile) -> Slot {
    try_resolve_player_slot(snapshot, profile).unwrap_or_else(|err| {
        log::warn(&format!("{}; rendering slot {:?} as player", err, FALLBACK_SLOT));
        FALLBACK_SLOT
    })
}

/// The two sides of a match from the player's point of view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPair {
    pub player: CreatureView,
    pub opponent: CreatureView,
}

/// Remap raw slots so the player always renders in the same position.
pub fn to_display_pair(snapshot: &MatchSnapshot, slot: Slot) -> DisplayPair {
    DisplayPair {
        player: snapshot.slot(slot).clone(),
        opponent: snapshot.slot(slot.other()).clone(),
    }
}

/// Result of reconciling one snapshot against the profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub view_state: ViewState,
    pub pair: DisplayPair,
    /// Set when the slot had to fall back
    pub desync: Option<ClientError>,
}

/// Recompute the view state for a fresh snapshot.
pub fn reconcile(snapshot: &MatchSnapshot, profile: &PlayerProfile, screen: Screen) -> Reconciled {
    let (player_slot, desync) = match try_resolve_player_slot(snapshot, profile) {
        Ok(slot) => (slot, None),
        Err(err) => {
            log::warn(&format!("{}; rendering slot {:?} as player", err, FALLBACK_SLOT));
            (FALLBACK_SLOT, Some(err))
        }
    };
    Reconciled {
        view_state: ViewState {
            player_slot,
            screen,
        },
        pair: to_display_pair(snapshot, player_slot),
        desync,
    }
}

/// What the UI should do after a move resolves
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Transition {
    /// Tournament over; `None` when the server named no champion
    ShowVictory { champion_name: Option<String> },
    /// Player won and has points to spend; stats are the server's baseline
    ShowLevelUp { current_stats: Option<StatBlock> },
    /// Player lost the match; the run ends after a delay
    Eliminated,
    /// Player won, nothing to spend; offer the next-match control
    AwaitNextMatch,
    /// Match continues; re-enable moves after the cosmetic delay
    ContinueRound,
}

/// Decide the next transition from a move response.
///
/// Evaluated in priority order:
/// 1. tournament complete: victory. The backend also ends the run when the
///    player is knocked out; that arrives as a completed tournament with no
///    champion and a lost match, and is reported as elimination.
/// 2. match just completed, player won, points available: level-up.
/// 3. match just completed, player lost: eliminated.
/// 4. match just completed: await next match.
/// 5. anything else: continue the round.
///
/// `player_won_match` is only read when `match_just_completed` is set.
pub fn next_transition(result: &MoveResponse) -> Transition {
    let just_completed = result.match_just_completed.unwrap_or(false);
    let player_won = just_completed && result.player_won_match.unwrap_or(false);
    let points = result.stat_points_available.unwrap_or(0);

    if result.tournament_complete {
        if result.champion_name.is_none() && just_completed && !player_won {
            return Transition::Eliminated;
        }
        return Transition::ShowVictory {
            champion_name: result.champion_name.clone(),
        };
    }

    match (just_completed, player_won) {
        (true, true) if points > 0 => Transition::ShowLevelUp {
            current_stats: result.current_stats,
        },
        (true, false) => Transition::Eliminated,
        (true, true) => Transition::AwaitNextMatch,
        _ => Transition::ContinueRound,
    }
}
