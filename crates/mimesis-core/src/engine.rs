//! The engine facade hosts talk to.
//!
//! [`Engine`] owns one [`SimulationState`] and exposes the four contract
//! operations: [`Engine::update`], [`Engine::get_state`],
//! [`Engine::get_map`], and [`Engine::broadcast_event`]. Hosts construct
//! it once and keep it for the life of the process.

use mimesis_types::{MapView, WorldState};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};

use crate::config::SimulationConfig;
use crate::error::{EngineError, TickError};
use crate::population::seed_population;
use crate::snapshot;
use crate::state::SimulationState;
use crate::tick::{TickSummary, run_tick};

/// A running Mimesis world.
#[derive(Debug)]
pub struct Engine {
    state: SimulationState,
}

impl Engine {
    /// Build a populated world seeded from `config.world.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the configuration is invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, EngineError> {
        let rng = StdRng::seed_from_u64(config.world.seed);
        Self::with_rng(config, rng)
    }

    /// Build a populated world drawing from an injected random source.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the configuration is invalid.
    pub fn with_rng(config: SimulationConfig, rng: StdRng) -> Result<Self, EngineError> {
        let mut state = SimulationState::new(config, rng)?;
        let placed = seed_population(&mut state);
        info!(
            agents = placed,
            width = state.grid().width(),
            height = state.grid().height(),
            "Engine ready"
        );
        Ok(Self { state })
    }

    /// Wrap a prepared state without seeding any agents.
    pub const fn from_state(state: SimulationState) -> Self {
        Self { state }
    }

    /// Advance exactly one tick.
    ///
    /// A tick that cannot run (the tick counter is exhausted) is logged and
    /// leaves the world unchanged.
    pub fn update(&mut self) {
        if let Err(err) = self.update_with_summary() {
            error!(tick = self.state.tick(), %err, "Tick could not run");
        }
    }

    /// Advance exactly one tick and report what happened.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Clock`] if the tick counter would overflow.
    pub fn update_with_summary(&mut self) -> Result<TickSummary, TickError> {
        run_tick(&mut self.state)
    }

    /// Serializable snapshot of the world; dead agents are omitted.
    pub fn get_state(&self) -> WorldState {
        snapshot::world_state(&self.state)
    }

    /// The terrain grid.
    pub fn get_map(&self) -> MapView {
        snapshot::map_view(&self.state)
    }

    /// Append an entry to the broadcast log.
    pub fn broadcast_event(&mut self, text: impl Into<String>) {
        self.state.broadcast(text);
    }

    /// Number of living agents.
    pub fn population(&self) -> usize {
        self.state.living_count()
    }

    /// Current tick.
    pub const fn tick(&self) -> u64 {
        self.state.tick()
    }

    /// Read access to the whole state.
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Write access for scenario setup.
    pub const fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Give up the engine and keep its state.
    pub fn into_state(self) -> SimulationState {
        self.state
    }
}
