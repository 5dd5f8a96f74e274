//! Serializable snapshot views.
//!
//! These are the read-only shapes handed to hosts by `get_state()` and
//! `get_map()`. They are built fresh after every tick and are never written
//! back into the engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Disorder, Gender, ItemCategory, Job, Terrain};
use crate::ids::AgentId;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Integer grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// The position shifted by `(dx, dy)`, saturating at the `i32` bounds.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

// ---------------------------------------------------------------------------
// Agent views
// ---------------------------------------------------------------------------

/// Hunger and energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StatsView {
    /// Current hunger, 0 (sated) to `max_hunger` (starving).
    pub hunger: f64,
    /// Current energy. Reaching 0 is death.
    pub energy: f64,
    /// Hunger ceiling.
    pub max_hunger: f64,
    /// Energy ceiling.
    pub max_energy: f64,
}

/// A single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemView {
    /// Display name.
    pub name: String,
    /// Category.
    pub category: ItemCategory,
    /// Combat bonus.
    pub power: u32,
    /// Trade value in gold.
    pub value: u32,
}

/// Equipped items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EquipmentView {
    /// Weapon slot.
    pub hand: Option<ItemView>,
    /// Armor slot.
    pub body: Option<ItemView>,
}

/// An inventory as seen from outside.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InventoryView {
    /// Carried items, oldest first.
    pub items: Vec<ItemView>,
    /// Gold balance.
    pub gold: u32,
    /// Equipment slots.
    pub equipment: EquipmentView,
}

/// The agent's most recent utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpeechView {
    /// What was said.
    pub text: String,
    /// Tick the utterance was made.
    pub tick: u64,
}

/// Big Five personality traits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TraitsView {
    /// Curiosity; drives meme susceptibility.
    pub openness: f64,
    /// Orderliness.
    pub conscientiousness: f64,
    /// Sociability.
    pub extraversion: f64,
    /// Cooperativeness.
    pub agreeableness: f64,
    /// Emotional volatility.
    pub neuroticism: f64,
}

/// Psychological state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PsycheView {
    /// Fixed traits.
    pub traits: TraitsView,
    /// Sanity, 0 to 100.
    pub sanity: f64,
    /// Acquired disorders in acquisition order.
    pub disorders: Vec<Disorder>,
}

/// Full view of a living agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentView {
    /// Identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Hex render colour.
    pub color: String,
    /// Economic role.
    pub job: Job,
    /// Dead flag. Always `false` in a world snapshot.
    pub is_dead: bool,
    /// Hunger and energy.
    pub stats: StatsView,
    /// Items and gold.
    pub inventory: InventoryView,
    /// Last utterance, if any.
    pub speech: Option<SpeechView>,
    /// Gender.
    pub gender: Gender,
    /// Clan name, if affiliated.
    pub clan: Option<String>,
    /// Age in ticks.
    pub age: u64,
    /// Generation, 1 for founders.
    pub generation: u32,
    /// Traits, sanity, and disorders.
    pub psyche: PsycheView,
}

/// A corpse on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CorpseView {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Name of the deceased.
    pub name: String,
    /// Possessions at the moment of death.
    pub inventory: InventoryView,
    /// Killer, if slain by another agent.
    pub killer: Option<AgentId>,
    /// Ticks remaining before removal.
    pub decay: u32,
}

// ---------------------------------------------------------------------------
// World views
// ---------------------------------------------------------------------------

/// A broadcast event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventEntry {
    /// Tick the event was broadcast.
    pub tick: u64,
    /// Message.
    pub text: String,
}

/// The per-tick world snapshot returned by `get_state()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldState {
    /// Current tick.
    pub tick: u64,
    /// Hour of day, 0 to 23.
    pub time: u32,
    /// Grid width.
    pub width: u32,
    /// Grid height.
    pub height: u32,
    /// Living agents.
    pub agents: Vec<AgentView>,
    /// Corpses not yet decayed.
    pub corpses: Vec<CorpseView>,
    /// Up to five most recent broadcasts, oldest first.
    pub events: Vec<EventEntry>,
}

/// The terrain grid returned by `get_map()`. Indexed `grid[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MapView {
    /// Grid width.
    pub width: u32,
    /// Grid height.
    pub height: u32,
    /// Rows of tiles.
    pub grid: Vec<Vec<Terrain>>,
}
