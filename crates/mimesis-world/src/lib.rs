//! Terrain and world-level broadcast state for the Mimesis simulation.
//!
//! # Modules
//!
//! - [`terrain`] -- The procedurally generated [`TerrainGrid`] and its
//!   passability and adjacency queries.
//! - [`events`] -- The five-entry broadcast [`EventLog`].
//! - [`error`] -- Error types for grid construction and writes.

pub mod error;
pub mod events;
pub mod terrain;

pub use error::WorldError;
pub use events::{EVENT_LOG_CAPACITY, EventLog};
pub use terrain::TerrainGrid;
