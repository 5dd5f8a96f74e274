//! Tick cycle: one discrete step of the Mimesis world.
//!
//! Each tick runs through these phases:
//!
//! 1. **Clock** -- advance the tick counter and, every `ticks_per_hour`
//!    ticks, the hour of day.
//!
//! 2. **Night spawn** -- at night, roll for a new monster while fewer than
//!    `max_monsters` are alive.
//!
//! 3. **Agents** -- for every agent on the roster at the start of the phase
//!    that is still alive, count down its speech cooldown, ask
//!    [`decide`] for an action, and hand the decision straight to the
//!    executor. Children born during this phase first act next tick. A
//!    failure while handling one agent is logged and the phase moves on.
//!
//! 4. **Cleanup** -- prune dead agents from the roster and their clans,
//!    then decay corpses and drop the fully decayed.

use mimesis_agents::agent::random_gender;
use mimesis_agents::{Agent, AgentParams, Corpse, Personality};
use mimesis_types::Job;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::decision::{DecisionContext, decide};
use crate::error::TickError;
use crate::execute::execute;
use crate::state::{SimulationState, TickCounters};

/// Name every spawned monster carries.
pub const MONSTER_NAME: &str = "Nightmare";

/// Broadcast when a monster spawns.
pub const MONSTER_ANNOUNCEMENT: &str = "A shadow rises...";

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Hour of day after the clock advanced.
    pub hour: u32,
    /// Whether the tick ran at night.
    pub is_night: bool,
    /// Living agents at the end of the tick.
    pub living: usize,
    /// Living monsters at the end of the tick.
    pub monsters: usize,
    /// Children born this tick.
    pub births: u32,
    /// Agents that died this tick.
    pub deaths: u32,
    /// Monsters spawned this tick.
    pub monsters_spawned: u32,
    /// Agents whose turn failed and was skipped.
    pub failures: u32,
    /// Corpses remaining after decay.
    pub corpses: usize,
}

/// Execute one complete tick.
///
/// # Errors
///
/// Returns [`TickError::Clock`] if the tick counter would overflow. Per-agent
/// failures never surface here; they are logged and counted in
/// [`TickSummary::failures`].
pub fn run_tick(state: &mut SimulationState) -> Result<TickSummary, TickError> {
    state.counters = TickCounters::default();

    // --- Phase 1: Clock ---
    let tick = state.clock.advance()?;
    let is_night = state.clock.is_night();
    debug!(tick, hour = state.clock.hour(), is_night, "Tick started");

    // --- Phase 2: Night spawn ---
    if is_night {
        spawn_monster(state);
    }

    // --- Phase 3: Agents ---
    let roster_len = state.agents.len();
    for idx in 0..roster_len {
        if let Err(err) = take_turn(state, idx) {
            state.counters.failures = state.counters.failures.saturating_add(1);
            warn!(tick, index = idx, %err, "Agent turn failed");
        }
    }

    // --- Phase 4: Cleanup ---
    prune_dead(state);
    state.corpses.retain_mut(Corpse::decay_one);

    let summary = TickSummary {
        tick,
        hour: state.clock.hour(),
        is_night,
        living: state.living_count(),
        monsters: state.monster_count(),
        births: state.counters.births,
        deaths: state.counters.deaths,
        monsters_spawned: state.counters.monsters_spawned,
        failures: state.counters.failures,
        corpses: state.corpses.len(),
    };
    info!(
        tick,
        hour = summary.hour,
        living = summary.living,
        births = summary.births,
        deaths = summary.deaths,
        monsters = summary.monsters,
        "Tick complete"
    );
    Ok(summary)
}

/// Decide and act for one roster entry.
fn take_turn(state: &mut SimulationState, idx: usize) -> Result<(), TickError> {
    let agent = state
        .agents
        .get_mut(idx)
        .ok_or(TickError::MissingAgent { index: idx })?;
    if !agent.alive {
        return Ok(());
    }
    agent.tick_cooldown();

    let living = state.living_count();
    let max_population = usize::try_from(state.config.population.max_population).unwrap_or(usize::MAX);
    let ctx = DecisionContext {
        grid: &state.grid,
        is_night: state.clock.is_night(),
        living,
        max_population,
        vitals: &state.config.agents,
    };
    let decision = decide(&state.agents, idx, &ctx, &mut state.rng);
    debug!(
        tick = state.clock.tick(),
        index = idx,
        action = ?decision.action,
        intent = ?decision.intent,
        "Decision made"
    );
    execute(state, idx, &decision)
}

/// Roll for a night monster. Returns `true` if one spawned.
fn spawn_monster(state: &mut SimulationState) -> bool {
    let roll: f64 = state.rng.random();
    if roll >= state.config.population.monster_spawn_chance {
        return false;
    }
    let cap = usize::try_from(state.config.population.max_monsters).unwrap_or(usize::MAX);
    if state.monster_count() >= cap {
        return false;
    }
    let Some(pos) = state.find_open_tile() else {
        debug!(tick = state.clock.tick(), "No open tile for a monster");
        return false;
    };

    let traits = Personality::random(&mut state.rng);
    let gender = random_gender(&mut state.rng);
    let monster = Agent::new(
        AgentParams {
            name: String::from(MONSTER_NAME),
            job: Job::Monster,
            gender,
            pos,
            age: 0,
            generation: 1,
            clan: None,
            traits,
        },
        &state.config.agents,
        &mut state.rng,
    );
    info!(
        tick = state.clock.tick(),
        agent = %monster.id,
        x = pos.x,
        y = pos.y,
        "Monster spawned"
    );
    state.add_agent(monster);
    state.broadcast(MONSTER_ANNOUNCEMENT);
    state.counters.monsters_spawned = state.counters.monsters_spawned.saturating_add(1);
    true
}

/// Drop dead agents from the roster and from their clans.
fn prune_dead(state: &mut SimulationState) {
    let SimulationState { agents, clans, .. } = state;
    agents.retain(|agent| {
        if !agent.alive
            && let Some(clan) = agent.clan.as_deref()
        {
            clans.leave(clan, agent.id);
        }
        agent.alive
    });
}

#[cfg(test)]
mod tests {
    use mimesis_agents::DamageSource;
    use mimesis_types::Terrain;
    use mimesis_world::TerrainGrid;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::SimulationConfig;
    use crate::state::testing::{at, at_mut, grass_state, place};

    fn tick(state: &mut SimulationState) -> TickSummary {
        match run_tick(state) {
            Ok(s) => s,
            Err(e) => panic!("tick failed: {e}"),
        }
    }

    fn haunted_state(seed: u64) -> SimulationState {
        let mut config = SimulationConfig::default();
        config.population.monster_spawn_chance = 1.0;
        let grid = match TerrainGrid::filled(10, 10, Terrain::Grass) {
            Ok(g) => g,
            Err(e) => panic!("grid is valid: {e}"),
        };
        let mut state = match SimulationState::with_grid(config, grid, StdRng::seed_from_u64(seed)) {
            Ok(s) => s,
            Err(e) => panic!("config is valid: {e}"),
        };
        state.clock_mut().set_hour(23);
        state
    }

    #[test]
    fn tick_advances_clock() {
        let mut state = grass_state(1);
        let summary = tick(&mut state);
        assert_eq!(summary.tick, 1);
        assert_eq!(state.tick(), 1);
        for _ in 1..30 {
            let _ = tick(&mut state);
        }
        assert_eq!(state.clock().hour(), 9);
    }

    #[test]
    fn monsters_spawn_at_night_up_to_the_cap() {
        let mut state = haunted_state(2);
        let first = tick(&mut state);
        assert_eq!(first.monsters_spawned, 1);
        assert!(state.events().iter().any(|e| e.text == MONSTER_ANNOUNCEMENT));
        for _ in 0..10 {
            let _ = tick(&mut state);
        }
        assert_eq!(state.monster_count(), 3);
        let monster = state.agents().iter().find(|a| a.job == Job::Monster);
        assert!(monster.is_some_and(|m| m.name == MONSTER_NAME && m.clan.is_none()));
    }

    #[test]
    fn no_monsters_by_day() {
        let mut state = haunted_state(3);
        state.clock_mut().set_hour(12);
        for _ in 0..10 {
            assert_eq!(tick(&mut state).monsters_spawned, 0);
        }
    }

    #[test]
    fn every_living_agent_acts_once() {
        let mut state = grass_state(4);
        for i in 0..4 {
            place(&mut state, Job::Gatherer, i * 2, 0);
        }
        let _ = tick(&mut state);
        assert!(state.agents().iter().all(|a| a.last_action.is_some()));
    }

    #[test]
    fn dead_agents_are_pruned_and_corpses_decay() {
        let mut state = grass_state(5);
        let idx = place(&mut state, Job::Gatherer, 3, 3);
        place(&mut state, Job::Gatherer, 6, 6);
        let id = at(&state, idx).id;
        let clan_name = String::from("Rivermark");
        at_mut(&mut state, idx).clan = Some(clan_name.clone());
        state.clans.join(&clan_name, id);

        let notice = at_mut(&mut state, idx).take_damage(1000.0, DamageSource::Sunlight, 0);
        let Some(notice) = notice else {
            panic!("lethal damage yields a notice");
        };
        state.record_death(notice);

        let summary = tick(&mut state);
        assert_eq!(state.agents().len(), 1);
        assert!(state.agent(id).is_none());
        assert!(state.clans().get(&clan_name).is_some_and(|c| !c.members().contains(&id)));
        assert_eq!(summary.corpses, 1);
        assert_eq!(state.corpses().first().map(|c| c.decay), Some(99));

        if let Some(corpse) = state.corpses.first_mut() {
            corpse.decay = 1;
        }
        assert_eq!(tick(&mut state).corpses, 0);
    }

    #[test]
    fn children_wait_until_next_tick() {
        let mut state = grass_state(6);
        let adult = state.config().agents.adult_age() + 10;
        let father = place(&mut state, Job::Gatherer, 4, 4);
        let mother = place(&mut state, Job::Gatherer, 5, 4);
        at_mut(&mut state, father).age = adult;
        let m = at_mut(&mut state, mother);
        m.age = adult;
        m.gender = mimesis_types::Gender::Female;

        let summary = tick(&mut state);
        assert!(summary.births >= 1);
        for child in state.agents().iter().filter(|a| a.age == 0) {
            assert!(child.last_action.is_none());
        }
    }

    #[test]
    fn empty_world_ticks_cleanly() {
        let mut state = grass_state(7);
        let summary = tick(&mut state);
        assert_eq!(summary.living, 0);
        assert_eq!(summary.failures, 0);
    }
}
