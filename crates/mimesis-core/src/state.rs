//! The simulation context object.
//!
//! [`SimulationState`] owns everything one world needs: clock, terrain,
//! roster, corpses, broadcast log, clans, the random source, and the
//! configuration. It is constructed once by the host and passed to every
//! entry point; there is no global world.

use mimesis_agents::{Agent, ClanRegistry, Corpse, DeathNotice};
use mimesis_types::{AgentId, Position};
use mimesis_world::{EventLog, TerrainGrid};
use rand::rngs::StdRng;
use tracing::info;

use crate::clock::WorldClock;
use crate::config::SimulationConfig;
use crate::error::EngineError;

/// Attempts made to find a free tile before giving up on placement.
pub const PLACEMENT_ATTEMPTS: u32 = 100;

/// Things that happened during the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TickCounters {
    pub(crate) births: u32,
    pub(crate) deaths: u32,
    pub(crate) monsters_spawned: u32,
    pub(crate) failures: u32,
}

/// All state of one simulated world.
#[derive(Debug)]
pub struct SimulationState {
    pub(crate) clock: WorldClock,
    pub(crate) grid: TerrainGrid,
    pub(crate) agents: Vec<Agent>,
    pub(crate) corpses: Vec<Corpse>,
    pub(crate) events: EventLog,
    pub(crate) clans: ClanRegistry,
    pub(crate) rng: StdRng,
    pub(crate) config: SimulationConfig,
    pub(crate) counters: TickCounters,
    serial: u64,
}

impl SimulationState {
    /// An empty world with freshly generated terrain.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the configuration is invalid.
    pub fn new(config: SimulationConfig, mut rng: StdRng) -> Result<Self, EngineError> {
        config.validate()?;
        let grid = TerrainGrid::generate(config.world.width, config.world.height, &mut rng)?;
        Self::with_grid(config, grid, rng)
    }

    /// An empty world on the given terrain.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the configuration is invalid.
    pub fn with_grid(
        config: SimulationConfig,
        grid: TerrainGrid,
        rng: StdRng,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let clock = WorldClock::new(&config.world, &config.time)?;
        Ok(Self {
            clock,
            grid,
            agents: Vec::new(),
            corpses: Vec::new(),
            events: EventLog::new(),
            clans: ClanRegistry::founding(),
            rng,
            config,
            counters: TickCounters::default(),
            serial: 0,
        })
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// Current tick.
    pub const fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// The clock.
    pub const fn clock(&self) -> &WorldClock {
        &self.clock
    }

    /// Whether it is currently night.
    pub const fn is_night(&self) -> bool {
        self.clock.is_night()
    }

    /// The terrain.
    pub const fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    /// The roster, including agents that died this tick.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Corpses on the map.
    pub fn corpses(&self) -> &[Corpse] {
        &self.corpses
    }

    /// Recent broadcast events.
    pub const fn events(&self) -> &EventLog {
        &self.events
    }

    /// Clans.
    pub const fn clans(&self) -> &ClanRegistry {
        &self.clans
    }

    /// Configuration.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of living agents.
    pub fn living_count(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }

    /// Number of living monsters.
    pub fn monster_count(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.alive && a.job.is_monster())
            .count()
    }

    /// Look up an agent by id.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Roster index of an agent.
    pub fn agent_index(&self, id: AgentId) -> Option<usize> {
        self.agents.iter().position(|a| a.id == id)
    }

    // -----------------------------------------------------------------------
    // Setup access
    // -----------------------------------------------------------------------

    /// Mutable roster, for scenario setup.
    pub const fn agents_mut(&mut self) -> &mut Vec<Agent> {
        &mut self.agents
    }

    /// Mutable terrain, for scenario setup.
    pub const fn grid_mut(&mut self) -> &mut TerrainGrid {
        &mut self.grid
    }

    /// Mutable clock, for scenario setup.
    pub const fn clock_mut(&mut self) -> &mut WorldClock {
        &mut self.clock
    }

    /// The shared random source.
    pub const fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Add an agent to the roster and register it with its clan.
    pub fn add_agent(&mut self, agent: Agent) {
        if let Some(clan) = agent.clan.as_deref() {
            self.clans.join(clan, agent.id);
        }
        self.agents.push(agent);
    }

    /// Append a broadcast event stamped with the current tick.
    pub fn broadcast(&mut self, text: impl Into<String>) {
        let tick = self.clock.tick();
        self.events.push(tick, text);
    }

    /// Next name in a numbered series, e.g. `Citoyen-11`.
    pub(crate) fn next_name(&mut self, prefix: &str) -> String {
        let name = format!("{prefix}-{}", self.serial);
        self.serial = self.serial.saturating_add(1);
        name
    }

    /// Turn a death notice into a corpse and a broadcast.
    pub(crate) fn record_death(&mut self, notice: DeathNotice) {
        let line = notice.announcement();
        info!(tick = self.clock.tick(), agent = %notice.agent, "{line}");
        self.broadcast(line);
        self.corpses.push(notice.corpse);
        self.counters.deaths = self.counters.deaths.saturating_add(1);
    }

    /// Whether a living agent other than `except` stands on `pos`.
    pub(crate) fn is_occupied(&self, pos: Position, except: Option<usize>) -> bool {
        self.agents
            .iter()
            .enumerate()
            .any(|(i, a)| Some(i) != except && a.alive && a.pos == pos)
    }

    /// A random walkable, unoccupied tile, if one turns up in
    /// [`PLACEMENT_ATTEMPTS`] draws.
    pub(crate) fn find_open_tile(&mut self) -> Option<Position> {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let pos = self.grid.random_position(&mut self.rng);
            if self.grid.is_passable(pos) && !self.is_occupied(pos, None) {
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Small worlds for unit tests.

    use mimesis_types::{Gender, Job, Terrain};
    use rand::SeedableRng;

    use super::*;

    /// A 10x10 grass world with no agents.
    pub(crate) fn grass_state(seed: u64) -> SimulationState {
        let grid = match TerrainGrid::filled(10, 10, Terrain::Grass) {
            Ok(g) => g,
            Err(e) => panic!("10x10 grid is valid: {e}"),
        };
        match SimulationState::with_grid(SimulationConfig::default(), grid, StdRng::seed_from_u64(seed)) {
            Ok(s) => s,
            Err(e) => panic!("default config is valid: {e}"),
        }
    }

    /// Place a calm male citizen and return its roster index.
    pub(crate) fn place(state: &mut SimulationState, job: Job, x: i32, y: i32) -> usize {
        let name = state.next_name("Citoyen");
        let vitals = state.config.agents.clone();
        let mut agent = Agent::random_citizen(name, Some(job), Position::new(x, y), &vitals, &mut state.rng);
        agent.psyche.traits.neuroticism = 0.1;
        agent.gender = Gender::Male;
        state.add_agent(agent);
        state.agents.len().saturating_sub(1)
    }

    /// The agent at `index`, panicking in tests if absent.
    pub(crate) fn at(state: &SimulationState, index: usize) -> &Agent {
        match state.agents.get(index) {
            Some(a) => a,
            None => panic!("no agent at {index}"),
        }
    }

    /// Mutable access to the agent at `index`.
    pub(crate) fn at_mut(state: &mut SimulationState, index: usize) -> &mut Agent {
        match state.agents.get_mut(index) {
            Some(a) => a,
            None => panic!("no agent at {index}"),
        }
    }
}
