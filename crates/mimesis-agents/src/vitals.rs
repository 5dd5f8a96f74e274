//! Vital mechanics applied before every action.
//!
//! Each time an agent acts it first goes through this prelude:
//!
//! 1. Age increments by one tick
//! 2. Past the longevity threshold, a small constant chance of dying of old age
//! 3. Non-monsters at maximum hunger take starvation damage
//!
//! A death in the prelude ends the agent's turn; the caller skips the action.

use rand::Rng;
use tracing::debug;

use crate::agent::Agent;
use crate::config::VitalsConfig;
use crate::death::{DamageSource, DeathCause, DeathNotice};

/// Apply the per-action vital prelude, drawing the old-age roll from `rng`.
///
/// The roll is only drawn once the agent is past its longevity threshold.
pub fn apply_vitals(
    agent: &mut Agent,
    config: &VitalsConfig,
    tick: u64,
    rng: &mut impl Rng,
) -> Option<DeathNotice> {
    let roll = if agent.age.saturating_add(1) > config.longevity_age() {
        rng.random::<f64>()
    } else {
        1.0
    };
    apply_vitals_with_roll(agent, config, tick, roll)
}

/// Apply the per-action vital prelude with a pre-drawn old-age roll.
pub fn apply_vitals_with_roll(
    agent: &mut Agent,
    config: &VitalsConfig,
    tick: u64,
    old_age_roll: f64,
) -> Option<DeathNotice> {
    if !agent.alive {
        return None;
    }

    agent.age = agent.age.saturating_add(1);

    if agent.age > config.longevity_age() && old_age_roll < config.old_age_death_chance {
        debug!(tick, agent = %agent.id, age = agent.age, "old age claimed agent");
        return agent.die(DeathCause::OldAge, tick);
    }

    if !agent.job.is_monster() && agent.stats.is_starving() {
        return agent.take_damage(config.starvation_damage, DamageSource::Starvation, tick);
    }

    None
}
