//! Clans: named kinship groups.
//!
//! Membership and enmity are recorded but not consulted by decisions.
//! Founders join one of the three founding clans; children inherit the
//! father's clan and are registered on birth.

use std::collections::{BTreeMap, BTreeSet};

use mimesis_types::AgentId;
use rand::Rng;
use rand::seq::IndexedRandom;

/// The founding clans and their colours.
pub const FOUNDING_CLANS: [(&str, &str); 3] = [
    ("Ashborn", "#E57373"),
    ("Rivermark", "#4FC3F7"),
    ("Stonehelm", "#A1887F"),
];

/// A named kinship group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clan {
    /// Clan name.
    pub name: String,
    /// Banner colour.
    pub color: String,
    members: BTreeSet<AgentId>,
    enemies: BTreeSet<String>,
}

impl Clan {
    /// An empty clan.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            members: BTreeSet::new(),
            enemies: BTreeSet::new(),
        }
    }

    /// Current members.
    pub const fn members(&self) -> &BTreeSet<AgentId> {
        &self.members
    }

    /// Whether `other` is at war with this clan.
    pub fn is_enemy(&self, other: &str) -> bool {
        self.enemies.contains(other)
    }
}

/// Every clan in the world, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClanRegistry {
    clans: BTreeMap<String, Clan>,
}

impl ClanRegistry {
    /// A registry holding the founding clans.
    pub fn founding() -> Self {
        let clans = FOUNDING_CLANS
            .iter()
            .map(|(name, color)| ((*name).to_owned(), Clan::new(*name, *color)))
            .collect();
        Self { clans }
    }

    /// Pick a founding clan name at random.
    pub fn random_founding(rng: &mut impl Rng) -> Option<&'static str> {
        FOUNDING_CLANS.choose(rng).map(|(name, _)| *name)
    }

    /// Look up a clan.
    pub fn get(&self, name: &str) -> Option<&Clan> {
        self.clans.get(name)
    }

    /// All clans in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Clan> {
        self.clans.values()
    }

    /// Register `agent` with `clan`. Returns `false` if the clan is unknown.
    pub fn join(&mut self, clan: &str, agent: AgentId) -> bool {
        self.clans
            .get_mut(clan)
            .is_some_and(|c| c.members.insert(agent))
    }

    /// Remove `agent` from `clan`.
    pub fn leave(&mut self, clan: &str, agent: AgentId) {
        if let Some(c) = self.clans.get_mut(clan) {
            c.members.remove(&agent);
        }
    }

    /// Record that `clan` is at war with `other`. Idempotent.
    pub fn declare_war(&mut self, clan: &str, other: &str) -> bool {
        match self.clans.get_mut(clan) {
            Some(c) if c.name != other => {
                c.enemies.insert(other.to_owned());
                true
            }
            _ => false,
        }
    }

    /// Whether `clan` has declared war on `other`.
    pub fn is_enemy(&self, clan: &str, other: &str) -> bool {
        self.clans.get(clan).is_some_and(|c| c.is_enemy(other))
    }
}
