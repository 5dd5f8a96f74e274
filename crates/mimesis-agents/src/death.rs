//! Death causes, corpses, and death notices.
//!
//! When an agent dies it leaves a [`Corpse`] holding a copy of its final
//! inventory. The corpse decays by one each tick and is removed at zero.
//! The dying call returns a [`DeathNotice`] that the scheduler turns into a
//! corpse on the map and a broadcast event.

use mimesis_types::{AgentId, CorpseView, Position};

use crate::inventory::Inventory;

/// Ticks a fresh corpse remains on the map.
pub const CORPSE_DECAY_TICKS: u32 = 100;

// ---------------------------------------------------------------------------
// Causes
// ---------------------------------------------------------------------------

/// Where incoming damage came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageSource {
    /// Another agent's attack.
    Agent {
        /// The attacker.
        id: AgentId,
        /// The attacker's name.
        name: String,
    },
    /// A nocturnal creature caught in daylight.
    Sunlight,
    /// Hunger at its maximum.
    Starvation,
}

/// Why an agent died.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeathCause {
    /// Killed by another agent.
    Slain {
        /// The killer.
        killer: AgentId,
        /// The killer's name.
        killer_name: String,
    },
    /// Burned by daylight.
    Sunlight,
    /// Starved.
    Starvation,
    /// Died of old age.
    OldAge,
}

impl From<DamageSource> for DeathCause {
    fn from(source: DamageSource) -> Self {
        match source {
            DamageSource::Agent { id, name } => Self::Slain {
                killer: id,
                killer_name: name,
            },
            DamageSource::Sunlight => Self::Sunlight,
            DamageSource::Starvation => Self::Starvation,
        }
    }
}

impl DeathCause {
    /// The killer, if any.
    pub const fn killer(&self) -> Option<AgentId> {
        match self {
            Self::Slain { killer, .. } => Some(*killer),
            Self::Sunlight | Self::Starvation | Self::OldAge => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Corpse
// ---------------------------------------------------------------------------

/// Remains left on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpse {
    /// Where the agent died.
    pub pos: Position,
    /// Display name, "Corpse of ...".
    pub name: String,
    /// Copy of the final inventory.
    pub inventory: Inventory,
    /// The killer, if slain.
    pub killer: Option<AgentId>,
    /// Ticks until removal.
    pub decay: u32,
}

impl Corpse {
    /// Remains of `name` at `pos`.
    pub fn new(pos: Position, name: &str, inventory: Inventory, killer: Option<AgentId>) -> Self {
        Self {
            pos,
            name: format!("Corpse of {name}"),
            inventory,
            killer,
            decay: CORPSE_DECAY_TICKS,
        }
    }

    /// Advance decay by one tick. Returns `false` once fully decayed.
    pub const fn decay_one(&mut self) -> bool {
        self.decay = self.decay.saturating_sub(1);
        self.decay > 0
    }

    /// Build the serializable view.
    pub fn to_view(&self) -> CorpseView {
        CorpseView {
            x: self.pos.x,
            y: self.pos.y,
            name: self.name.clone(),
            inventory: self.inventory.to_view(),
            killer: self.killer,
            decay: self.decay,
        }
    }
}

// ---------------------------------------------------------------------------
// DeathNotice
// ---------------------------------------------------------------------------

/// Everything the world needs to record a death.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a death notice carries the corpse; dropping it loses the body"]
pub struct DeathNotice {
    /// The deceased.
    pub agent: AgentId,
    /// Name of the deceased.
    pub name: String,
    /// How they died.
    pub cause: DeathCause,
    /// Their remains.
    pub corpse: Corpse,
}

impl DeathNotice {
    /// The broadcast line for this death.
    pub fn announcement(&self) -> String {
        match &self.cause {
            DeathCause::Slain { killer, .. } if *killer == self.agent => {
                format!("{} died.", self.name)
            }
            DeathCause::Slain { killer_name, .. } => {
                format!("{} killed by {killer_name}!", self.name)
            }
            DeathCause::Sunlight => format!("{} burned in the sunlight.", self.name),
            DeathCause::Starvation => format!("{} starved to death.", self.name),
            DeathCause::OldAge => format!("{} died of old age.", self.name),
        }
    }
}
