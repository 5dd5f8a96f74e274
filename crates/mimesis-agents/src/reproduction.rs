//! Reproduction and trait inheritance.
//!
//! A reproducing pair yields exactly one child placed at the initiator's
//! position:
//!
//! - age 0, generation one past the older lineage
//! - clan inherited from the father (the initiator if male, else the partner)
//! - each trait is the parents' mean plus jitter in `[-0.1, 0.1]`, clamped
//! - gender drawn at random, job drawn from the civilian roles
//!
//! The initiator pays the energy cost; the partner pays nothing.

use mimesis_types::{Gender, Job};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;

use crate::agent::{Agent, AgentParams, random_gender};
use crate::config::VitalsConfig;
use crate::error::AgentError;
use crate::psychology::Personality;

/// Whether `agent` is personally able to reproduce right now.
///
/// Checks adulthood, energy, hunger, and that the agent is a living
/// non-monster. Population cap and partner availability are the caller's.
pub fn can_reproduce(agent: &Agent, config: &VitalsConfig) -> bool {
    agent.alive
        && !agent.job.is_monster()
        && agent.is_adult(config)
        && agent.stats.energy >= config.reproduce_min_energy
        && agent.stats.hunger <= config.reproduce_max_hunger
}

/// Whether `partner` is a valid mate for `initiator`.
pub fn is_compatible_partner(initiator: &Agent, partner: &Agent, config: &VitalsConfig) -> bool {
    partner.id != initiator.id
        && partner.alive
        && !partner.job.is_monster()
        && partner.gender == initiator.gender.opposite()
        && partner.is_adult(config)
}

/// Create the child of `initiator` and `partner`.
///
/// Charges the initiator's energy and logs the birth in both parents'
/// journals. Fails without side effects if the pair is not compatible.
pub fn conceive(
    initiator: &mut Agent,
    partner: &mut Agent,
    name: String,
    tick: u64,
    config: &VitalsConfig,
    rng: &mut impl Rng,
) -> Result<Agent, AgentError> {
    if !initiator.alive || initiator.job.is_monster() {
        return Err(AgentError::ReproductionFailed {
            reason: format!("{} cannot reproduce", initiator.name),
        });
    }
    if !is_compatible_partner(initiator, partner, config) {
        return Err(AgentError::ReproductionFailed {
            reason: format!("{} is not a compatible partner", partner.name),
        });
    }

    let clan = if initiator.gender == Gender::Male {
        initiator.clan.clone()
    } else {
        partner.clan.clone()
    };
    let traits = Personality::inherit(&initiator.psyche.traits, &partner.psyche.traits, rng);
    let job = Job::CIVILIAN.choose(rng).copied().unwrap_or(Job::Gatherer);
    let gender = random_gender(rng);

    let child = Agent::new(
        AgentParams {
            name,
            job,
            gender,
            pos: initiator.pos,
            age: 0,
            generation: initiator.generation.max(partner.generation).saturating_add(1),
            clan,
            traits,
        },
        config,
        rng,
    );

    initiator.stats.spend_energy(config.reproduce_energy_cost);
    let line = format!("Had a child, {}.", child.name);
    initiator.log_event(tick, mimesis_types::EpisodeKind::Achievement, line.clone(), 8.0);
    partner.log_event(tick, mimesis_types::EpisodeKind::Achievement, line, 8.0);

    info!(
        tick,
        child = %child.id,
        name = %child.name,
        generation = child.generation,
        clan = child.clan.as_deref().unwrap_or("-"),
        "agent born"
    );
    Ok(child)
}
