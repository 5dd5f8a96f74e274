//! World clock, decision engine, tick cycle, and engine facade for the
//! Mimesis simulation.
//!
//! This crate owns the 4-phase tick cycle that drives the simulation:
//! Clock, Night spawn, Agents, and Cleanup. Hosts talk to [`Engine`].
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter and hour of day with the night window.
//! - [`config`] -- Configuration loading from `mimesis-config.yaml` into
//!   strongly-typed structs.
//! - [`decision`] -- Utility scoring that turns an agent's state and
//!   surroundings into one [`Decision`].
//! - [`engine`] -- The [`Engine`] facade: update, snapshot, map, broadcast.
//! - [`execute`] -- Applies a decision to the world.
//! - [`perception`] -- Neighbor queries by Euclidean radius.
//! - [`runner`] -- Async tick loop with pacing and stop conditions.
//! - [`snapshot`] -- Owned, serializable views of the world.
//! - [`state`] -- [`SimulationState`], everything one world holds.
//! - [`tick`] -- The tick cycle itself.
//!
//! [`Decision`]: decision::Decision
//! [`SimulationState`]: state::SimulationState

pub mod clock;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod execute;
pub mod perception;
pub mod runner;
pub mod snapshot;
pub mod state;
pub mod tick;

mod population;
mod speech;

pub use config::SimulationConfig;
pub use engine::Engine;
pub use error::{EngineError, TickError};
pub use runner::{NoOpCallback, SimulationEndReason, SimulationResult, TickCallback, run_simulation};
pub use state::SimulationState;
pub use tick::{TickSummary, run_tick};
