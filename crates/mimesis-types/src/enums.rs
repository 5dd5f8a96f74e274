//! Enumeration types for the Mimesis simulation.
//!
//! Every closed set of values the engine branches on lives here so that the
//! world, agent, and core crates (and the snapshot consumers) agree on one
//! canonical spelling.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// A single tile of the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Terrain {
    /// Open ground. Walkable, forageable.
    Grass,
    /// Solid rock or a built wall. Blocks movement, yields ore nearby.
    Wall,
    /// Lakes and ponds. Blocks movement.
    Water,
    /// Woodland. Walkable, yields wood and berries.
    Forest,
}

impl Terrain {
    /// Whether an agent may step onto this tile.
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Grass | Self::Forest)
    }

    /// Whether berries can be foraged on this tile.
    pub const fn is_forageable(self) -> bool {
        matches!(self, Self::Grass | Self::Forest)
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// An agent's economic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Job {
    /// Harvests wood in forests and builds walls.
    Lumberjack,
    /// Polices thieves and monsters.
    Guard,
    /// Forages fiber and berries.
    Gatherer,
    /// Mines ore near walls and forges swords.
    Blacksmith,
    /// Steals from nearby agents.
    Thief,
    /// Buys goods for gold.
    Trader,
    /// Nocturnal hostile spawned at night.
    Monster,
}

impl Job {
    /// Jobs a civilian may be assigned at creation or birth.
    pub const CIVILIAN: [Self; 5] = [
        Self::Lumberjack,
        Self::Guard,
        Self::Gatherer,
        Self::Blacksmith,
        Self::Thief,
    ];

    /// Whether this job is the monster job.
    pub const fn is_monster(self) -> bool {
        matches!(self, Self::Monster)
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Biological sex used for reproduction pairing and clan inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Gender {
    /// Male. Passes the clan to offspring.
    #[serde(rename = "M")]
    Male,
    /// Female.
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// The other gender.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The fixed action menu scored by the decision engine.
///
/// Declaration order is the canonical tie-break order: when two actions
/// score equally, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ActionType {
    /// Random single-step walk.
    Move,
    /// Consume carried food.
    Eat,
    /// Recover energy.
    Sleep,
    /// Do nothing in particular.
    Idle,
    /// Fight a nearby agent.
    Attack,
    /// Harvest from the current tile.
    Gather,
    /// Turn materials into an item.
    Craft,
    /// Sell an item to a nearby trader.
    Trade,
    /// Take from a nearby agent.
    Steal,
    /// Wall off the current tile.
    Build,
    /// Produce an offspring with a nearby partner.
    Reproduce,
}

impl ActionType {
    /// The full menu in canonical order.
    pub const ALL: [Self; 11] = [
        Self::Move,
        Self::Eat,
        Self::Sleep,
        Self::Idle,
        Self::Attack,
        Self::Gather,
        Self::Craft,
        Self::Trade,
        Self::Steal,
        Self::Build,
        Self::Reproduce,
    ];
}

// ---------------------------------------------------------------------------
// Memetics
// ---------------------------------------------------------------------------

/// The emotional category a meme belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Sentiment {
    /// Threats and challenges.
    Hostile,
    /// Greetings and goodwill.
    Friendly,
    /// Alarms and pleas.
    Fearful,
    /// Small talk.
    Neutral,
}

impl Sentiment {
    /// Every sentiment bucket a host carries.
    pub const ALL: [Self; 4] = [Self::Hostile, Self::Friendly, Self::Fearful, Self::Neutral];
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Broad classification of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ItemCategory {
    /// Raw crafting or building material.
    Resource,
    /// Edible item.
    Food,
    /// Hand-slot equipment adding combat power.
    Weapon,
    /// Body-slot equipment.
    Armor,
    /// Anything else.
    Other,
}

/// Equipment slot on an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum EquipSlot {
    /// Weapon slot.
    Hand,
    /// Armor slot.
    Body,
}

impl ItemCategory {
    /// The slot an item of this category is equipped into, if any.
    pub const fn slot(self) -> Option<EquipSlot> {
        match self {
            Self::Weapon => Some(EquipSlot::Hand),
            Self::Armor => Some(EquipSlot::Body),
            Self::Resource | Self::Food | Self::Other => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Psychology
// ---------------------------------------------------------------------------

/// A permanent behavioral modifier acquired when sanity collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Disorder {
    /// Attacks nearby agents without provocation.
    Paranoia,
    /// Prone to distraction and random outbursts.
    Schizophrenia,
    /// Refuses to part with possessions.
    HoardingOcd,
    /// Flees from hostiles.
    Phobia,
    /// Overestimates its own fighting ability.
    Megalomania,
}

/// The category of an episodic memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EpisodeKind {
    /// Nothing remarkable.
    Neutral,
    /// Gathering, eating, building.
    Work,
    /// A successful craft or birth.
    Achievement,
    /// A failed craft.
    Failure,
    /// Hits and misses dealt.
    Combat,
    /// Damage received.
    Pain,
    /// Buying and selling.
    Trade,
    /// Stealing or being stolen from.
    Theft,
    /// Picking up a meme.
    Learning,
    /// Hunger damage.
    Starvation,
    /// Death.
    Death,
}
