//! Action execution.
//!
//! [`execute`] applies one [`Decision`] to one agent. Every action first
//! runs the vital prelude (aging, old age, starvation); an agent that dies
//! there does nothing else. The decision's utterance is spoken next, then
//! the action itself runs.
//!
//! Shortfalls (no food, no materials, a blocked step) are logged to the
//! agent's own journal and are not errors. A target that died, left reach,
//! or vanished from the roster turns the action into a no-op.

use mimesis_agents::actions::combat::{CombatContext, CombatRolls, apply_attack, resolve_attack};
use mimesis_agents::actions::theft::{TheftRolls, apply_theft, resolve_theft};
use mimesis_agents::actions::trade::sell;
use mimesis_agents::crafting::craft;
use mimesis_agents::inventory::{BERRIES, FIBER, ORE, WOOD};
use mimesis_agents::language::{Deed, Mood, compose};
use mimesis_agents::reproduction::{conceive, is_compatible_partner};
use mimesis_agents::vitals::apply_vitals;
use mimesis_agents::{Agent, DamageSource, Item};
use mimesis_types::{ActionType, AgentId, EpisodeKind, ItemCategory, Sentiment, Terrain};
use rand::Rng;
use tracing::debug;

use crate::decision::{Decision, Intent};
use crate::error::TickError;
use crate::perception::NEARBY_RADIUS;
use crate::speech;
use crate::state::SimulationState;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MOVE_HUNGER_PERIOD: u64 = 5;
const MOVE_HUNGER: f64 = 1.0;

const SLEEP_HUNGER_PERIOD: u64 = 10;
const SLEEP_HUNGER: f64 = 1.0;

const IDLE_HUNGER_PERIOD: u64 = 10;
const IDLE_HUNGER: f64 = 0.5;
const FLAVOR_CHANCE: f64 = 0.05;

/// Damage a monster takes for idling in daylight.
pub const SUNLIGHT_DAMAGE: f64 = 20.0;

const GATHER_HUNGER_PERIOD: u64 = 5;
const GATHER_HUNGER: f64 = 2.0;
const RESOURCE_CHANCE: f64 = 0.6;
const FORAGE_CHANCE: f64 = 0.3;

/// Wood consumed by one build.
pub const BUILD_WOOD: usize = 4;

/// Name series for newborns.
pub(crate) const CITIZEN_PREFIX: &str = "Citoyen";

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Apply `decision` to `roster[idx]`.
///
/// # Errors
///
/// Returns [`TickError::MissingAgent`] for a stale index, or a wrapped
/// failure from a mechanic that should not fail for a valid decision.
pub fn execute(
    state: &mut SimulationState,
    idx: usize,
    decision: &Decision,
) -> Result<(), TickError> {
    let tick = state.clock.tick();
    let agent = actor(&mut state.agents, idx)?;
    if !agent.alive {
        return Ok(());
    }
    agent.last_action = Some(decision.action);

    if let Some(notice) = apply_vitals(agent, &state.config.agents, tick, &mut state.rng) {
        state.record_death(notice);
        return Ok(());
    }

    if let Some(sentiment) = decision.utterance {
        speech::say(state, idx, sentiment);
    }

    match decision.action {
        ActionType::Move => step(state, idx),
        ActionType::Eat => eat(state, idx),
        ActionType::Sleep => sleep(state, idx),
        ActionType::Idle => idle(state, idx),
        ActionType::Attack => attack(state, idx, decision.intent),
        ActionType::Gather => gather(state, idx),
        ActionType::Craft => craft_item(state, idx, decision.intent),
        ActionType::Trade => trade(state, idx, decision.intent),
        ActionType::Steal => steal(state, idx, decision.intent),
        ActionType::Build => build(state, idx),
        ActionType::Reproduce => reproduce(state, idx, decision.intent),
    }
}

// ---------------------------------------------------------------------------
// Solo actions
// ---------------------------------------------------------------------------

/// Random single step, possibly staying put.
fn step(state: &mut SimulationState, idx: usize) -> Result<(), TickError> {
    let tick = state.clock.tick();
    let dx = state.rng.random_range(-1..=1);
    let dy = state.rng.random_range(-1..=1);
    let from = actor(&mut state.agents, idx)?.pos;
    let to = from.offset(dx, dy);
    let open = to != from
        && state.grid.in_bounds(to)
        && state.grid.is_passable(to)
        && !state.is_occupied(to, Some(idx));

    let agent = actor(&mut state.agents, idx)?;
    if open {
        agent.pos = to;
    }
    agent.stats.spend_energy(state.config.agents.move_energy_cost);
    if tick % MOVE_HUNGER_PERIOD == 0 {
        agent.stats.add_hunger(MOVE_HUNGER);
    }
    Ok(())
}

fn eat(state: &mut SimulationState, idx: usize) -> Result<(), TickError> {
    let tick = state.clock.tick();
    let vitals = &state.config.agents;
    let agent = actor(&mut state.agents, idx)?;
    match agent.inventory.take_first_of(ItemCategory::Food) {
        Some(food) => {
            agent.stats.relieve_hunger(vitals.eat_relief);
            agent.stats.spend_energy(vitals.eat_energy_cost);
            let line = format!("Ate {}.", food.name().to_lowercase());
            agent.log_event(tick, EpisodeKind::Work, line, 1.0);
        }
        None => agent.log_event(tick, EpisodeKind::Failure, "Nothing to eat.", 0.0),
    }
    Ok(())
}

fn sleep(state: &mut SimulationState, idx: usize) -> Result<(), TickError> {
    let tick = state.clock.tick();
    let agent = actor(&mut state.agents, idx)?;
    agent.stats.restore_energy(state.config.agents.sleep_recovery);
    if tick % SLEEP_HUNGER_PERIOD == 0 {
        agent.stats.add_hunger(SLEEP_HUNGER);
    }
    Ok(())
}

fn idle(state: &mut SimulationState, idx: usize) -> Result<(), TickError> {
    let tick = state.clock.tick();
    let daylight = !state.clock.is_night();
    let flavor_roll: f64 = state.rng.random();
    let agent = actor(&mut state.agents, idx)?;
    agent.stats.spend_energy(state.config.agents.idle_energy_cost);
    if tick % IDLE_HUNGER_PERIOD == 0 {
        agent.stats.add_hunger(IDLE_HUNGER);
    }

    if agent.job.is_monster() && daylight {
        if let Some(notice) = agent.take_damage(SUNLIGHT_DAMAGE, DamageSource::Sunlight, tick) {
            state.record_death(notice);
        }
        return Ok(());
    }

    if flavor_roll < FLAVOR_CHANCE {
        let mood = if agent.stats.hunger_fraction() > 0.8 {
            Mood::Pain
        } else if agent.psyche.sanity() < 50.0 {
            Mood::Fearful
        } else {
            Mood::Neutral
        };
        let line = compose(None, Deed::Idle, None, mood, &mut state.rng);
        agent.log_event(tick, EpisodeKind::Neutral, line, 0.0);
    }
    Ok(())
}

/// Job- and terrain-dependent harvest plus an independent forage.
fn gather(state: &mut SimulationState, idx: usize) -> Result<(), TickError> {
    let tick = state.clock.tick();
    let pos = actor(&mut state.agents, idx)?.pos;
    let tile = state.grid.get(pos);
    let near_wall = state.grid.is_on_or_adjacent(pos, Terrain::Wall);
    let resource_roll: f64 = state.rng.random();
    let forage_roll: f64 = state.rng.random();

    let agent = actor(&mut state.agents, idx)?;
    let profile = agent.profile();
    let loot = if profile.mines_ore && near_wall {
        Some(ORE)
    } else if tile == Terrain::Forest {
        Some(WOOD)
    } else if profile.forages && tile == Terrain::Grass {
        Some(FIBER)
    } else {
        None
    };

    agent.stats.spend_energy(state.config.agents.gather_energy_cost);
    if tick % GATHER_HUNGER_PERIOD == 0 {
        agent.stats.add_hunger(GATHER_HUNGER);
    }

    let mut found = false;
    if let Some(name) = loot
        && resource_roll < RESOURCE_CHANCE
    {
        stash(agent, Item::resource(name), format!("Gathered {name}."), tick);
        found = true;
    }
    if tile.is_forageable() && forage_roll < FORAGE_CHANCE {
        stash(agent, Item::food(BERRIES), String::from("Found berries."), tick);
        found = true;
    }
    if !found {
        agent.log_event(tick, EpisodeKind::Work, "Failed gather.", 0.0);
    }
    debug!(tick, agent = %agent.id, ?tile, ?loot, found, "gather");
    Ok(())
}

fn stash(agent: &mut Agent, item: Item, success: String, tick: u64) {
    let name = item.name().to_owned();
    if agent.inventory.add(item) {
        agent.log_event(tick, EpisodeKind::Work, success, 1.0);
    } else {
        agent.log_event(tick, EpisodeKind::Failure, format!("No room for {name}."), -0.5);
    }
}

fn craft_item(state: &mut SimulationState, idx: usize, intent: Intent) -> Result<(), TickError> {
    let tick = state.clock.tick();
    let agent = actor(&mut state.agents, idx)?;
    let Intent::Craft { recipe } = intent else {
        agent.log_event(tick, EpisodeKind::Failure, "Failed craft.", -1.0);
        return Ok(());
    };
    match craft(&mut agent.inventory, recipe) {
        Ok(crafted) => {
            debug!(tick, agent = %agent.id, ?recipe, equipped = crafted.equipped, "crafted");
            agent.log_event(
                tick,
                EpisodeKind::Achievement,
                format!("Crafted {}!", recipe.name()),
                5.0,
            );
        }
        Err(err) => {
            debug!(tick, agent = %agent.id, %err, "craft failed");
            agent.log_event(tick, EpisodeKind::Failure, "Failed craft.", -1.0);
        }
    }
    Ok(())
}

/// Turn the agent's tile into a wall.
fn build(state: &mut SimulationState, idx: usize) -> Result<(), TickError> {
    let tick = state.clock.tick();
    let agent = actor(&mut state.agents, idx)?;
    let pos = agent.pos;
    if agent.inventory.count(WOOD) < BUILD_WOOD {
        agent.log_event(tick, EpisodeKind::Failure, "Not enough wood to build.", -1.0);
        return Ok(());
    }

    state.grid.set(pos, Terrain::Wall)?;
    let agent = actor(&mut state.agents, idx)?;
    agent.inventory.remove(WOOD, BUILD_WOOD);
    agent.log_event(tick, EpisodeKind::Achievement, "Built a wall.", 3.0);
    debug!(tick, agent = %agent.id, x = pos.x, y = pos.y, "wall built");
    Ok(())
}

// ---------------------------------------------------------------------------
// Targeted actions
// ---------------------------------------------------------------------------

fn attack(state: &mut SimulationState, idx: usize, intent: Intent) -> Result<(), TickError> {
    let Intent::Attack { target } = intent else {
        return Ok(());
    };
    let Some(other) = reachable(state, idx, target) else {
        debug!(tick = state.clock.tick(), %target, "attack target out of reach");
        return Ok(());
    };

    if !actor(&mut state.agents, idx)?.job.is_monster() {
        speech::say(state, idx, Sentiment::Hostile);
    }

    let tick = state.clock.tick();
    let rolls = CombatRolls::draw(&mut state.rng);
    let (attacker, defender) = pair_mut(&mut state.agents, idx, other)
        .ok_or(TickError::MissingAgent { index: other })?;
    let outcome = resolve_attack(&CombatContext::between(attacker, defender), rolls);
    if let Some(notice) = apply_attack(attacker, defender, outcome, tick) {
        state.record_death(notice);
    }
    Ok(())
}

fn steal(state: &mut SimulationState, idx: usize, intent: Intent) -> Result<(), TickError> {
    let Intent::Steal { victim } = intent else {
        return Ok(());
    };
    let Some(other) = reachable(state, idx, victim) else {
        debug!(tick = state.clock.tick(), %victim, "theft victim out of reach");
        return Ok(());
    };

    let tick = state.clock.tick();
    let verdict = resolve_theft(TheftRolls::draw(&mut state.rng));
    let (thief, mark) = pair_mut(&mut state.agents, idx, other)
        .ok_or(TickError::MissingAgent { index: other })?;
    let loot = apply_theft(thief, mark, verdict, tick);
    debug!(tick, thief = %thief.id, victim = %mark.id, ?verdict, ?loot, "theft");
    Ok(())
}

fn trade(state: &mut SimulationState, idx: usize, intent: Intent) -> Result<(), TickError> {
    let Intent::Trade { partner } = intent else {
        return Ok(());
    };
    let Some(other) = reachable(state, idx, partner) else {
        debug!(tick = state.clock.tick(), %partner, "trade partner out of reach");
        return Ok(());
    };

    let tick = state.clock.tick();
    let (seller, buyer) = pair_mut(&mut state.agents, idx, other)
        .ok_or(TickError::MissingAgent { index: other })?;
    let outcome = sell(seller, buyer, tick);
    debug!(tick, seller = %seller.id, buyer = %buyer.id, ?outcome, "trade");
    Ok(())
}

fn reproduce(state: &mut SimulationState, idx: usize, intent: Intent) -> Result<(), TickError> {
    let Intent::Reproduce { partner } = intent else {
        return Ok(());
    };
    let Some(other) = reachable(state, idx, partner) else {
        debug!(tick = state.clock.tick(), %partner, "mate out of reach");
        return Ok(());
    };
    let cap = usize::try_from(state.config.population.max_population).unwrap_or(usize::MAX);
    if state.living_count() >= cap {
        return Ok(());
    }

    let tick = state.clock.tick();
    let name = state.next_name(CITIZEN_PREFIX);
    let (initiator, mate) = pair_mut(&mut state.agents, idx, other)
        .ok_or(TickError::MissingAgent { index: other })?;
    if !is_compatible_partner(initiator, mate, &state.config.agents) {
        debug!(tick, agent = %initiator.id, mate = %mate.id, "mate no longer compatible");
        return Ok(());
    }
    let parent = initiator.id;
    let child = conceive(initiator, mate, name, tick, &state.config.agents, &mut state.rng)
        .map_err(|source| TickError::Agent {
            agent: parent,
            source,
        })?;

    let line = format!("{} was born.", child.name);
    state.add_agent(child);
    state.counters.births = state.counters.births.saturating_add(1);
    state.broadcast(line);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn actor(agents: &mut [Agent], idx: usize) -> Result<&mut Agent, TickError> {
    agents
        .get_mut(idx)
        .ok_or(TickError::MissingAgent { index: idx })
}

/// Roster index of `id` if it is alive, distinct from `me`, and within reach.
fn reachable(state: &SimulationState, me: usize, id: AgentId) -> Option<usize> {
    let origin = state.agents.get(me)?.pos;
    let index = state.agent_index(id)?;
    let other = state.agents.get(index)?;
    (index != me && other.alive && origin.distance(other.pos) <= NEARBY_RADIUS).then_some(index)
}

/// Two distinct agents borrowed mutably at once, in argument order.
fn pair_mut(agents: &mut [Agent], a: usize, b: usize) -> Option<(&mut Agent, &mut Agent)> {
    if a < b {
        let (left, right) = agents.split_at_mut_checked(b)?;
        Some((left.get_mut(a)?, right.first_mut()?))
    } else if b < a {
        let (left, right) = agents.split_at_mut_checked(a)?;
        Some((right.first_mut()?, left.get_mut(b)?))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
