use serde::{Deserialize, Serialize};

/// Server-issued creature identifier
pub type CreatureId = String;
/// Server-issued game (tournament run) identifier
pub type GameId = String;
/// Creature type key as published by `GET /creatures/types` (e.g. `"dragon"`)
pub type CreatureTypeId = String;

/// The five stats a creature is built from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Speed,
    Health,
    Defense,
    Strength,
    Luck,
}

impl Stat {
    /// All stats in display order
    pub const ALL: [Stat; 5] = [
        Stat::Speed,
        Stat::Health,
        Stat::Defense,
        Stat::Strength,
        Stat::Luck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Speed => "speed",
            Stat::Health => "health",
            Stat::Defense => "defense",
            Stat::Strength => "strength",
            Stat::Luck => "luck",
        }
    }

    pub fn parse(key: &str) -> Option<Stat> {
        Stat::ALL
            .into_iter()
            .find(|stat| stat.as_str().eq_ignore_ascii_case(key.trim()))
    }
}

/// Stat values keyed by [`Stat`].
///
/// Used for base stats, allocations and type biases alike. Biases can be
/// negative, so values are signed; allocation rules live in `allocation`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatBlock {
    pub speed: i32,
    pub health: i32,
    pub defense: i32,
    pub strength: i32,
    pub luck: i32,
}

impl StatBlock {
    pub fn new(speed: i32, health: i32, defense: i32, strength: i32, luck: i32) -> Self {
        Self {
            speed,
            health,
            defense,
            strength,
            luck,
        }
    }

    /// A block with a single stat set
    pub fn only(stat: Stat, value: i32) -> Self {
        let mut block = Self::default();
        block.set(stat, value);
        block
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Speed => self.speed,
            Stat::Health => self.health,
            Stat::Defense => self.defense,
            Stat::Strength => self.strength,
            Stat::Luck => self.luck,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        match stat {
            Stat::Speed => self.speed = value,
            Stat::Health => self.health = value,
            Stat::Defense => self.defense = value,
            Stat::Strength => self.strength = value,
            Stat::Luck => self.luck = value,
        }
    }

    /// Sum of all five stats, saturating at the `i32` bounds
    pub fn total(&self) -> i32 {
        Stat::ALL
            .iter()
            .fold(0i32, |sum, stat| sum.saturating_add(self.get(*stat)))
    }

    /// Pointwise saturating sum, without any budget checks
    pub fn plus(&self, other: &StatBlock) -> StatBlock {
        let mut out = *self;
        for stat in Stat::ALL {
            out.set(stat, self.get(stat).saturating_add(other.get(stat)));
        }
        out
    }

    /// Iterate `(stat, value)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }
}

/// Server-assigned position of a creature within a match record.
///
/// `A` is the wire's `creature1_*`, `B` is `creature2_*`. Which one the player
/// occupies is not stable across matches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

/// One side of a match as the server reports it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatureView {
    pub id: CreatureId,
    pub name: String,
    pub creature_type: CreatureTypeId,
    pub hp: i32,
    pub max_hp: i32,
}

/// The current match, replaced wholesale on every server response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub match_id: Option<String>,
    /// Zero-based round counter as sent by the server
    pub round_index: u32,
    pub slot_a: CreatureView,
    pub slot_b: CreatureView,
    pub is_complete: bool,
    pub winner_name: Option<String>,
    pub latest_messages: Vec<String>,
}

impl MatchSnapshot {
    pub fn slot(&self, slot: Slot) -> &CreatureView {
        match slot {
            Slot::A => &self.slot_a,
            Slot::B => &self.slot_b,
        }
    }
}

/// The player's creature as built on the setup screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,
    pub chosen_type: CreatureTypeId,
    pub stat_allocation: StatBlock,
    /// Set once `POST /creatures` succeeds
    pub creature_id: Option<CreatureId>,
}

impl PlayerProfile {
    pub fn new(name: &str, chosen_type: &str, stat_allocation: StatBlock) -> Self {
        Self {
            name: name.to_string(),
            chosen_type: chosen_type.to_string(),
            stat_allocation,
            creature_id: None,
        }
    }
}

/// Terminal result of a tournament run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TournamentOutcome {
    /// Absent when the server completes the run without naming a champion
    pub champion_name: Option<String>,
}

/// Opaque move token sent as `move_type`.
///
/// The backend owns the set of valid moves; the client only knows which
/// buttons to draw (see [`MOVE_BUTTONS`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MoveType(pub String);

impl MoveType {
    pub fn new(token: &str) -> Self {
        Self(token.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MoveType {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Move buttons offered on the battle screen
pub const MOVE_BUTTONS: [&str; 3] = ["attack", "defend", "special"];
