//! Error types for the mimesis-core crate.
//!
//! [`TickError`] covers failures inside one tick; the scheduler logs
//! per-agent errors and carries on with the next agent. [`EngineError`] is
//! the construction-time failure that prevents an engine from starting.

use mimesis_agents::AgentError;
use mimesis_types::AgentId;
use mimesis_world::WorldError;

use crate::clock::ClockError;
use crate::config::ConfigError;

/// Errors raised while running a tick.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The clock could not advance.
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    /// An agent mechanic failed.
    #[error("agent {agent} failed: {source}")]
    Agent {
        /// The acting agent.
        agent: AgentId,
        /// The underlying failure.
        source: AgentError,
    },

    /// A roster index no longer points at an agent.
    #[error("no agent at roster index {index}")]
    MissingAgent {
        /// The stale index.
        index: usize,
    },

    /// The terrain rejected an update.
    #[error("world error: {0}")]
    World(#[from] WorldError),
}

/// Errors that prevent an engine from being constructed.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The clock rejected the time settings.
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    /// The terrain could not be generated.
    #[error("world error: {0}")]
    World(#[from] WorldError),
}
