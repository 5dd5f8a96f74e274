//! Agent state, psychology, memetics, and per-agent mechanics for the
//! Mimesis simulation.
//!
//! This crate holds everything that operates on one or two agents without
//! looking at the wider world. It sits between `mimesis-types` (identifiers
//! and snapshot views) and `mimesis-core` (decision, execution, scheduling).
//!
//! # Modules
//!
//! - [`actions`] -- Combat, theft, and trade between two agents.
//! - [`agent`] -- The [`Agent`] record, damage, and death.
//! - [`behavior`] -- Job behavior table ([`JobProfile`]).
//! - [`clan`] -- Kinship groups and the founding clans.
//! - [`config`] -- Tunable vitals ([`VitalsConfig`]).
//! - [`crafting`] -- Recipes and all-or-nothing crafting.
//! - [`death`] -- Death causes, corpses, and death notices.
//! - [`error`] -- Error types ([`AgentError`]).
//! - [`inventory`] -- Items, carried list, gold, and equipment.
//! - [`language`] -- Procedural flavor sentences.
//! - [`memetics`] -- Memes, mutation, and infection.
//! - [`memory`] -- Rolling log and episodic memory.
//! - [`psychology`] -- Traits, sanity, and disorders.
//! - [`reproduction`] -- Offspring and trait inheritance.
//! - [`vitals`] -- Aging and starvation before each action.

pub mod actions;
pub mod agent;
pub mod behavior;
pub mod clan;
pub mod config;
pub mod crafting;
pub mod death;
pub mod error;
pub mod inventory;
pub mod language;
pub mod memetics;
pub mod memory;
pub mod psychology;
pub mod reproduction;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use agent::{Agent, AgentParams, Stats};
pub use behavior::{JobProfile, profile};
pub use clan::{Clan, ClanRegistry};
pub use config::VitalsConfig;
pub use crafting::Recipe;
pub use death::{Corpse, DamageSource, DeathCause, DeathNotice};
pub use error::AgentError;
pub use inventory::{Inventory, Item};
pub use memetics::{Meme, MemeticHost};
pub use memory::{Episode, Journal};
pub use psychology::{Personality, Psyche};
