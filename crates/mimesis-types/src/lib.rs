//! Shared type definitions for the Mimesis simulation.
//!
//! This crate is the single source of truth for identifiers, closed
//! enumerations, and the serializable snapshot shapes used across the
//! workspace. Snapshot types flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for agents and memes
//! - [`enums`] -- Jobs, terrain, actions, sentiments, disorders
//! - [`views`] -- Snapshot views returned by `get_state()` and `get_map()`

pub mod enums;
pub mod ids;
pub mod views;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ActionType, Disorder, EpisodeKind, EquipSlot, Gender, ItemCategory, Job, Sentiment, Terrain,
};
pub use ids::{AgentId, MemeId};
pub use views::{
    AgentView, CorpseView, EquipmentView, EventEntry, InventoryView, ItemView, MapView, Position,
    PsycheView, SpeechView, StatsView, TraitsView, WorldState,
};
