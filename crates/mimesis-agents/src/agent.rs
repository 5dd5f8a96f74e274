//! Agent state and lifecycle.
//!
//! An [`Agent`] owns everything about one inhabitant: identity, vitals,
//! psyche, inventory, memetic host, journal, and the set of agents it
//! remembers as hostile. Agents are created either as seed citizens
//! ([`Agent::random_citizen`]) or from explicit [`AgentParams`] (trader,
//! monsters, offspring).
//!
//! Damage is the only path to violent death: [`Agent::take_damage`] clamps
//! energy at zero and, when it lands there, marks the agent dead and hands
//! back a [`DeathNotice`] carrying the corpse.

use std::collections::BTreeSet;

use mimesis_types::{
    ActionType, AgentId, AgentView, Disorder, EpisodeKind, Gender, Job, Position, SpeechView,
    StatsView,
};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;

use crate::behavior::{JobProfile, profile};
use crate::config::VitalsConfig;
use crate::death::{Corpse, DamageSource, DeathCause, DeathNotice};
use crate::inventory::Inventory;
use crate::memetics::MemeticHost;
use crate::memory::Journal;
use crate::psychology::{Personality, Psyche};

/// Youngest starting age of a seed citizen, in years.
const SEED_MIN_YEARS: u64 = 18;

/// Oldest starting age of a seed citizen, in years.
const SEED_MAX_YEARS: u64 = 40;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Hunger and energy with their ceilings.
///
/// Every mutator clamps into `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    /// Current hunger; 0 is sated.
    pub hunger: f64,
    /// Current energy; 0 from damage is death.
    pub energy: f64,
    /// Hunger ceiling.
    pub max_hunger: f64,
    /// Energy ceiling.
    pub max_energy: f64,
}

impl Stats {
    /// Sated and fully rested.
    pub const fn fresh(max_hunger: f64, max_energy: f64) -> Self {
        Self {
            hunger: 0.0,
            energy: max_energy,
            max_hunger,
            max_energy,
        }
    }

    /// Lose energy, never below zero.
    pub fn spend_energy(&mut self, amount: f64) {
        self.energy = (self.energy - amount).clamp(0.0, self.max_energy);
    }

    /// Gain energy, never above the ceiling.
    pub fn restore_energy(&mut self, amount: f64) {
        self.energy = (self.energy + amount).clamp(0.0, self.max_energy);
    }

    /// Grow hungrier, never above the ceiling.
    pub fn add_hunger(&mut self, amount: f64) {
        self.hunger = (self.hunger + amount).clamp(0.0, self.max_hunger);
    }

    /// Become less hungry, never below zero.
    pub fn relieve_hunger(&mut self, amount: f64) {
        self.hunger = (self.hunger - amount).clamp(0.0, self.max_hunger);
    }

    /// Hunger as a fraction of the ceiling.
    pub fn hunger_fraction(&self) -> f64 {
        if self.max_hunger > 0.0 {
            self.hunger / self.max_hunger
        } else {
            0.0
        }
    }

    /// Missing energy as a fraction of the ceiling.
    pub fn fatigue_fraction(&self) -> f64 {
        if self.max_energy > 0.0 {
            (self.max_energy - self.energy) / self.max_energy
        } else {
            0.0
        }
    }

    /// Whether hunger sits at its ceiling.
    pub fn is_starving(&self) -> bool {
        self.hunger >= self.max_hunger
    }

    /// Build the serializable view.
    pub const fn to_view(&self) -> StatsView {
        StatsView {
            hunger: self.hunger,
            energy: self.energy,
            max_hunger: self.max_hunger,
            max_energy: self.max_energy,
        }
    }
}

// ---------------------------------------------------------------------------
// AgentParams
// ---------------------------------------------------------------------------

/// Everything needed to create an agent.
#[derive(Debug, Clone)]
pub struct AgentParams {
    /// Display name.
    pub name: String,
    /// Economic role.
    pub job: Job,
    /// Gender.
    pub gender: Gender,
    /// Starting position.
    pub pos: Position,
    /// Starting age in ticks.
    pub age: u64,
    /// Generation; founders are 1.
    pub generation: u32,
    /// Clan affiliation.
    pub clan: Option<String>,
    /// Personality traits.
    pub traits: Personality,
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// One inhabitant of the world.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Grid position.
    pub pos: Position,
    /// Economic role.
    pub job: Job,
    /// Gender.
    pub gender: Gender,
    /// Age in ticks.
    pub age: u64,
    /// Generation; founders are 1.
    pub generation: u32,
    /// Clan affiliation.
    pub clan: Option<String>,
    /// Whether the agent is alive.
    pub alive: bool,
    /// Hunger and energy.
    pub stats: Stats,
    /// Traits, sanity, disorders.
    pub psyche: Psyche,
    /// Items, gold, equipment.
    pub inventory: Inventory,
    /// Vocabulary and immunity.
    pub memetics: MemeticHost,
    /// Rolling log and episodic memory.
    pub journal: Journal,
    /// Agents remembered as attackers or thieves.
    pub hostiles: BTreeSet<AgentId>,
    /// Last utterance.
    pub speech: Option<SpeechView>,
    /// Decisions left before the agent may speak again.
    pub speech_cooldown: u32,
    /// The most recently executed action.
    pub last_action: Option<ActionType>,
}

impl Agent {
    /// Create an agent from explicit parameters, fully rested and sated.
    pub fn new(params: AgentParams, config: &VitalsConfig, rng: &mut impl Rng) -> Self {
        let job_profile = profile(params.job);
        let max_energy = job_profile.max_energy.unwrap_or(config.max_energy);
        Self {
            id: AgentId::from_rng(rng),
            name: params.name,
            pos: params.pos,
            job: params.job,
            gender: params.gender,
            age: params.age,
            generation: params.generation,
            clan: params.clan,
            alive: true,
            stats: Stats::fresh(config.max_hunger, max_energy),
            psyche: Psyche::new(params.traits),
            inventory: Inventory::new(config.inventory_capacity),
            memetics: MemeticHost::new(params.traits.openness, rng),
            journal: Journal::new(),
            hostiles: BTreeSet::new(),
            speech: None,
            speech_cooldown: 0,
            last_action: None,
        }
    }

    /// A founder with a random civilian job, gender, age, and traits.
    ///
    /// Passing `job` pins the role instead of drawing one.
    pub fn random_citizen(
        name: String,
        job: Option<Job>,
        pos: Position,
        config: &VitalsConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let job = job
            .or_else(|| Job::CIVILIAN.choose(rng).copied())
            .unwrap_or(Job::Gatherer);
        let gender = random_gender(rng);
        let years = rng.random_range(SEED_MIN_YEARS..=SEED_MAX_YEARS);
        let traits = Personality::random(rng);
        Self::new(
            AgentParams {
                name,
                job,
                gender,
                pos,
                age: config.years(years),
                generation: 1,
                clan: None,
                traits,
            },
            config,
            rng,
        )
    }

    /// This agent's job behavior row.
    pub const fn profile(&self) -> &'static JobProfile {
        profile(self.job)
    }

    /// Whether the agent has reached adulthood.
    pub const fn is_adult(&self, config: &VitalsConfig) -> bool {
        self.age >= config.adult_age()
    }

    /// Social weight when spreading memes: one tenth of the carried-item count.
    pub fn prestige(&self) -> f64 {
        self.inventory.len() as f64 / 10.0
    }

    /// Whether `other` is someone this agent fights on sight.
    pub fn regards_as_hostile(&self, other: &Self) -> bool {
        other.job == Job::Monster || self.hostiles.contains(&other.id)
    }

    /// Record an event in the journal and feed its weight into sanity.
    pub fn log_event(&mut self, tick: u64, kind: EpisodeKind, text: impl Into<String>, weight: f64) {
        self.journal.record(tick, kind, text.into(), weight);
        for disorder in self.psyche.absorb(weight) {
            self.note_disorder(tick, disorder);
        }
    }

    /// Apply damage, remember the attacker, and die if energy reaches zero.
    ///
    /// Damage to an agent that is already dead is ignored.
    pub fn take_damage(&mut self, amount: f64, source: DamageSource, tick: u64) -> Option<DeathNotice> {
        if !self.alive {
            return None;
        }
        self.stats.spend_energy(amount.max(0.0));

        match &source {
            DamageSource::Agent { id, name } => {
                if *id != self.id {
                    self.hostiles.insert(*id);
                }
                self.log_event(tick, EpisodeKind::Pain, format!("Hurt by {name}!"), -5.0);
            }
            DamageSource::Sunlight => {
                self.log_event(tick, EpisodeKind::Pain, "The sun burns!", -5.0);
            }
            DamageSource::Starvation => {
                self.log_event(tick, EpisodeKind::Starvation, "Starving!", -3.0);
            }
        }

        if self.stats.energy <= 0.0 {
            self.die(DeathCause::from(source), tick)
        } else {
            None
        }
    }

    /// Mark the agent dead and produce its corpse.
    ///
    /// Returns `None` if the agent was already dead.
    pub fn die(&mut self, cause: DeathCause, tick: u64) -> Option<DeathNotice> {
        if !self.alive {
            return None;
        }
        self.alive = false;
        let line = match &cause {
            DeathCause::Slain { killer_name, .. } => format!("Killed by {killer_name}."),
            DeathCause::Sunlight => String::from("Burned away by the sun."),
            DeathCause::Starvation => String::from("Starved to death."),
            DeathCause::OldAge => String::from("Died of old age."),
        };
        self.journal.record(tick, EpisodeKind::Death, line, -10.0);

        info!(tick, agent = %self.id, name = %self.name, cause = ?cause, "agent died");

        let corpse = Corpse::new(self.pos, &self.name, self.inventory.clone(), cause.killer());
        Some(DeathNotice {
            agent: self.id,
            name: self.name.clone(),
            cause,
            corpse,
        })
    }

    /// Set the current utterance and start the silence cooldown.
    pub fn speak(&mut self, text: String, tick: u64, cooldown: u32) {
        self.speech = Some(SpeechView { text, tick });
        self.speech_cooldown = cooldown;
    }

    /// Count down the speech cooldown by one decision.
    pub const fn tick_cooldown(&mut self) {
        self.speech_cooldown = self.speech_cooldown.saturating_sub(1);
    }

    /// Build the serializable view.
    pub fn to_view(&self) -> AgentView {
        AgentView {
            id: self.id,
            name: self.name.clone(),
            x: self.pos.x,
            y: self.pos.y,
            color: self.profile().color.to_owned(),
            job: self.job,
            is_dead: !self.alive,
            stats: self.stats.to_view(),
            inventory: self.inventory.to_view(),
            speech: self.speech.clone(),
            gender: self.gender,
            clan: self.clan.clone(),
            age: self.age,
            generation: self.generation,
            psyche: self.psyche.to_view(),
        }
    }

    fn note_disorder(&mut self, tick: u64, disorder: Disorder) {
        info!(tick, agent = %self.id, name = %self.name, ?disorder, "disorder acquired");
        self.journal.record(
            tick,
            EpisodeKind::Neutral,
            format!("Something broke inside ({disorder:?})."),
            0.0,
        );
    }
}

/// Draw a gender with equal odds.
pub fn random_gender(rng: &mut impl Rng) -> Gender {
    if rng.random::<f64>() < 0.5 {
        Gender::Male
    } else {
        Gender::Female
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn citizen(rng: &mut StdRng) -> Agent {
        Agent::random_citizen(
            String::from("Citoyen-0"),
            None,
            Position::new(5, 5),
            &VitalsConfig::default(),
            rng,
        )
    }

    #[test]
    fn seed_citizen_starts_fresh() {
        let mut rng = StdRng::seed_from_u64(1);
        let agent = citizen(&mut rng);
        assert!(agent.alive);
        assert!(agent.stats.hunger.abs() < f64::EPSILON);
        assert!((agent.stats.energy - 100.0).abs() < f64::EPSILON);
        assert!(agent.hostiles.is_empty());
        assert_eq!(agent.generation, 1);
        assert!(agent.age >= 18 * 720 && agent.age <= 40 * 720);
        assert!(Job::CIVILIAN.contains(&agent.job));
    }

    #[test]
    fn damage_marks_attacker_hostile() {
        let mut rng = StdRng::seed_from_u64(2);
        let attacker = citizen(&mut rng);
        let mut victim = citizen(&mut rng);
        let source = DamageSource::Agent {
            id: attacker.id,
            name: attacker.name.clone(),
        };
        assert!(victim.take_damage(20.0, source, 3).is_none());
        assert!((victim.stats.energy - 80.0).abs() < f64::EPSILON);
        assert!(victim.hostiles.contains(&attacker.id));
        assert!(victim.journal.log_contains("Hurt by"));
    }

    #[test]
    fn lethal_damage_yields_one_corpse_with_inventory() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut victim = citizen(&mut rng);
        victim.inventory.add(crate::inventory::Item::new(
            "Gold",
            mimesis_types::ItemCategory::Resource,
            0,
            100,
        ));
        let notice = victim.take_damage(500.0, DamageSource::Sunlight, 9);
        let Some(notice) = notice else {
            panic!("victim should have died");
        };
        assert!(!victim.alive);
        assert!(victim.stats.energy.abs() < f64::EPSILON);
        assert_eq!(notice.corpse.inventory.items().first().map(crate::inventory::Item::name), Some("Gold"));
        assert!(victim.take_damage(5.0, DamageSource::Sunlight, 10).is_none());
    }

    #[test]
    fn self_damage_is_not_remembered() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut agent = citizen(&mut rng);
        let source = DamageSource::Agent {
            id: agent.id,
            name: agent.name.clone(),
        };
        let _ = agent.take_damage(1.0, source, 1);
        assert!(agent.hostiles.is_empty());
    }

    #[test]
    fn stats_stay_in_bounds() {
        let mut stats = Stats::fresh(100.0, 100.0);
        stats.spend_energy(250.0);
        assert!(stats.energy.abs() < f64::EPSILON);
        stats.restore_energy(250.0);
        assert!((stats.energy - 100.0).abs() < f64::EPSILON);
        stats.add_hunger(250.0);
        assert!(stats.is_starving());
        stats.relieve_hunger(250.0);
        assert!(stats.hunger.abs() < f64::EPSILON);
    }

    #[test]
    fn monster_gets_its_own_energy_ceiling() {
        let mut rng = StdRng::seed_from_u64(5);
        let monster = Agent::new(
            AgentParams {
                name: String::from("Nightmare"),
                job: Job::Monster,
                gender: Gender::Male,
                pos: Position::default(),
                age: 0,
                generation: 1,
                clan: None,
                traits: Personality::uniform(0.5),
            },
            &VitalsConfig::default(),
            &mut rng,
        );
        assert!((monster.stats.energy - 200.0).abs() < f64::EPSILON);
        assert_eq!(monster.to_view().color, "#FF0000");
    }

    #[test]
    fn cooldown_counts_down_to_zero() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut agent = citizen(&mut rng);
        agent.speak(String::from("Hello."), 4, 2);
        agent.tick_cooldown();
        agent.tick_cooldown();
        agent.tick_cooldown();
        assert_eq!(agent.speech_cooldown, 0);
        assert_eq!(agent.speech.as_ref().map(|s| s.tick), Some(4));
    }
}
