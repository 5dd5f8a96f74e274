//! Melee combat between two agents.
//!
//! ## Resolution
//!
//! 1. Roll against the hit chance `0.7 + (attacker energy - defender energy) / 200`;
//!    a roll at or above it misses
//! 2. Otherwise a 10% roll lets the defender dodge
//! 3. Otherwise, only if the defender holds a weapon, a 15% roll parries
//! 4. Otherwise the blow lands; an independent 10% roll makes it critical (x1.5)
//!
//! Damage is `10 + weapon power + job bonus`, or the job's flat damage when
//! it has one. The attacker pays the energy cost whatever the outcome.
//!
//! [`resolve_attack`] is pure: it takes pre-drawn [`CombatRolls`] so that
//! tests can force every branch. [`apply_attack`] mutates both agents.

use mimesis_types::{EpisodeKind, EquipSlot};
use rand::Rng;
use tracing::debug;

use crate::agent::Agent;
use crate::death::{DamageSource, DeathNotice};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Energy the attacker pays per swing.
pub const ATTACK_ENERGY_COST: f64 = 5.0;

/// Damage before weapon and job modifiers.
pub const BASE_DAMAGE: u32 = 10;

/// Hit chance between equally rested fighters.
pub const BASE_HIT_CHANCE: f64 = 0.7;

/// Energy difference that swings the hit chance by 1.0.
const ENERGY_SWING: f64 = 200.0;

/// Chance the defender dodges a blow that would hit.
pub const DODGE_CHANCE: f64 = 0.10;

/// Chance an armed defender parries a blow that was not dodged.
pub const PARRY_CHANCE: f64 = 0.15;

/// Chance a landed blow is critical.
pub const CRITICAL_CHANCE: f64 = 0.10;

/// Damage multiplier of a critical blow.
pub const CRITICAL_MULTIPLIER: f64 = 1.5;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The four independent rolls of one swing, each in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatRolls {
    /// Compared against the hit chance.
    pub hit: f64,
    /// Compared against [`DODGE_CHANCE`].
    pub dodge: f64,
    /// Compared against [`PARRY_CHANCE`].
    pub parry: f64,
    /// Compared against [`CRITICAL_CHANCE`].
    pub critical: f64,
}

impl CombatRolls {
    /// Draw all four rolls.
    pub fn draw(rng: &mut impl Rng) -> Self {
        Self {
            hit: rng.random(),
            dodge: rng.random(),
            parry: rng.random(),
            critical: rng.random(),
        }
    }
}

/// The numbers combat needs from both fighters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatContext {
    /// Attacker's current energy.
    pub attacker_energy: f64,
    /// Defender's current energy.
    pub defender_energy: f64,
    /// Power of the attacker's equipped weapon (0 if unarmed).
    pub weapon_power: u32,
    /// Attacker's job bonus.
    pub job_bonus: u32,
    /// Attacker's job flat damage, replacing the formula.
    pub flat_damage: Option<u32>,
    /// Whether the defender has a weapon equipped.
    pub defender_armed: bool,
}

impl CombatContext {
    /// Assemble the context for `attacker` striking `defender`.
    pub fn between(attacker: &Agent, defender: &Agent) -> Self {
        let profile = attacker.profile();
        Self {
            attacker_energy: attacker.stats.energy,
            defender_energy: defender.stats.energy,
            weapon_power: attacker.inventory.weapon_power(),
            job_bonus: profile.combat_bonus,
            flat_damage: profile.flat_damage,
            defender_armed: !defender.inventory.slot_is_empty(EquipSlot::Hand),
        }
    }

    /// Probability the swing connects before dodge and parry.
    pub fn hit_chance(&self) -> f64 {
        BASE_HIT_CHANCE + (self.attacker_energy - self.defender_energy) / ENERGY_SWING
    }

    /// Damage of a normal blow.
    pub fn base_damage(&self) -> u32 {
        self.flat_damage.unwrap_or_else(|| {
            BASE_DAMAGE
                .saturating_add(self.weapon_power)
                .saturating_add(self.job_bonus)
        })
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// How a swing ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatOutcome {
    /// The swing went wide.
    Miss,
    /// The defender stepped aside.
    Dodged,
    /// The defender's weapon turned the blow.
    Parried,
    /// The blow landed.
    Hit {
        /// Damage dealt.
        damage: f64,
        /// Whether the critical multiplier applied.
        critical: bool,
    },
}

/// Resolve one swing from pre-drawn rolls.
pub fn resolve_attack(ctx: &CombatContext, rolls: CombatRolls) -> CombatOutcome {
    if rolls.hit >= ctx.hit_chance() {
        return CombatOutcome::Miss;
    }
    if rolls.dodge < DODGE_CHANCE {
        return CombatOutcome::Dodged;
    }
    if ctx.defender_armed && rolls.parry < PARRY_CHANCE {
        return CombatOutcome::Parried;
    }
    let critical = rolls.critical < CRITICAL_CHANCE;
    let base = f64::from(ctx.base_damage());
    let damage = if critical {
        base * CRITICAL_MULTIPLIER
    } else {
        base
    };
    CombatOutcome::Hit { damage, critical }
}

/// Apply a resolved swing to both fighters.
///
/// Returns the defender's death notice if the blow was lethal.
pub fn apply_attack(
    attacker: &mut Agent,
    defender: &mut Agent,
    outcome: CombatOutcome,
    tick: u64,
) -> Option<DeathNotice> {
    attacker.stats.spend_energy(ATTACK_ENERGY_COST);
    debug!(
        tick,
        attacker = %attacker.id,
        defender = %defender.id,
        ?outcome,
        "attack resolved"
    );

    match outcome {
        CombatOutcome::Hit { damage, critical } => {
            let line = if critical {
                format!("Critical hit on {}!", defender.name)
            } else {
                format!("Hit {}!", defender.name)
            };
            attacker.log_event(tick, EpisodeKind::Combat, line, 2.0);
            let source = DamageSource::Agent {
                id: attacker.id,
                name: attacker.name.clone(),
            };
            defender.take_damage(damage, source, tick)
        }
        CombatOutcome::Miss => {
            attacker.log_event(tick, EpisodeKind::Combat, format!("Missed {}!", defender.name), -1.0);
            None
        }
        CombatOutcome::Dodged => {
            attacker.log_event(
                tick,
                EpisodeKind::Combat,
                format!("{} dodged!", defender.name),
                -1.0,
            );
            defender.log_event(tick, EpisodeKind::Combat, format!("Dodged {}.", attacker.name), 1.0);
            None
        }
        CombatOutcome::Parried => {
            attacker.log_event(
                tick,
                EpisodeKind::Combat,
                format!("{} parried!", defender.name),
                -1.0,
            );
            defender.log_event(tick, EpisodeKind::Combat, format!("Parried {}.", attacker.name), 1.0);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use mimesis_types::{Job, Position};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::VitalsConfig;
    use crate::inventory::Item;

    const SURE_HIT: CombatRolls = CombatRolls {
        hit: 0.0,
        dodge: 0.99,
        parry: 0.99,
        critical: 0.99,
    };

    fn fighter(job: Job, rng: &mut StdRng) -> Agent {
        Agent::random_citizen(
            String::from("Fighter"),
            Some(job),
            Position::new(1, 1),
            &VitalsConfig::default(),
            rng,
        )
    }

    fn ctx() -> CombatContext {
        CombatContext {
            attacker_energy: 100.0,
            defender_energy: 100.0,
            weapon_power: 0,
            job_bonus: 0,
            flat_damage: None,
            defender_armed: false,
        }
    }

    #[test]
    fn hit_chance_tracks_energy_gap() {
        let mut c = ctx();
        assert!((c.hit_chance() - 0.7).abs() < f64::EPSILON);
        c.defender_energy = 40.0;
        assert!((c.hit_chance() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn resolution_order_is_miss_dodge_parry_hit() {
        let mut c = ctx();
        c.defender_armed = true;
        let miss = CombatRolls { hit: 0.7, ..SURE_HIT };
        assert_eq!(resolve_attack(&c, miss), CombatOutcome::Miss);
        let dodge = CombatRolls { dodge: 0.05, parry: 0.0, ..SURE_HIT };
        assert_eq!(resolve_attack(&c, dodge), CombatOutcome::Dodged);
        let parry = CombatRolls { parry: 0.1, ..SURE_HIT };
        assert_eq!(resolve_attack(&c, parry), CombatOutcome::Parried);
        c.defender_armed = false;
        assert!(matches!(resolve_attack(&c, parry), CombatOutcome::Hit { .. }));
    }

    #[test]
    fn damage_includes_weapon_and_bonus() {
        let mut c = ctx();
        c.weapon_power = 20;
        c.job_bonus = 5;
        assert_eq!(
            resolve_attack(&c, SURE_HIT),
            CombatOutcome::Hit { damage: 35.0, critical: false }
        );
        let crit = CombatRolls { critical: 0.0, ..SURE_HIT };
        assert_eq!(
            resolve_attack(&c, crit),
            CombatOutcome::Hit { damage: 52.5, critical: true }
        );
    }

    #[test]
    fn flat_damage_overrides_formula() {
        let mut rng = StdRng::seed_from_u64(1);
        let monster = fighter(Job::Monster, &mut rng);
        let victim = fighter(Job::Gatherer, &mut rng);
        let c = CombatContext::between(&monster, &victim);
        assert_eq!(c.base_damage(), 20);
    }

    #[test]
    fn guard_context_reads_equipment() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut guard = fighter(Job::Guard, &mut rng);
        let Ok(()) = guard.inventory.equip(Item::new(
            "Blade",
            mimesis_types::ItemCategory::Weapon,
            20,
            0,
        )) else {
            panic!("empty hand accepts a weapon");
        };
        let victim = fighter(Job::Thief, &mut rng);
        let c = CombatContext::between(&guard, &victim);
        assert_eq!(c.base_damage(), 35);
        assert!(!c.defender_armed);
    }

    #[test]
    fn landed_blow_marks_attacker_hostile_and_costs_energy() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut attacker = fighter(Job::Guard, &mut rng);
        let mut defender = fighter(Job::Thief, &mut rng);
        let outcome = CombatOutcome::Hit { damage: 15.0, critical: false };
        assert!(apply_attack(&mut attacker, &mut defender, outcome, 4).is_none());
        assert!((attacker.stats.energy - 95.0).abs() < f64::EPSILON);
        assert!((defender.stats.energy - 85.0).abs() < f64::EPSILON);
        assert!(defender.hostiles.contains(&attacker.id));
        assert!(attacker.journal.log_contains("Hit Fighter!"));
    }

    #[test]
    fn miss_still_costs_energy() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut attacker = fighter(Job::Guard, &mut rng);
        let mut defender = fighter(Job::Thief, &mut rng);
        assert!(apply_attack(&mut attacker, &mut defender, CombatOutcome::Miss, 4).is_none());
        assert!((attacker.stats.energy - 95.0).abs() < f64::EPSILON);
        assert!((defender.stats.energy - 100.0).abs() < f64::EPSILON);
        assert!(defender.hostiles.is_empty());
    }

    #[test]
    fn lethal_blow_returns_death_notice() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut attacker = fighter(Job::Monster, &mut rng);
        let mut defender = fighter(Job::Gatherer, &mut rng);
        defender.stats.energy = 10.0;
        let outcome = CombatOutcome::Hit { damage: 20.0, critical: false };
        let Some(notice) = apply_attack(&mut attacker, &mut defender, outcome, 4) else {
            panic!("20 damage must kill a defender at 10 energy");
        };
        assert_eq!(notice.cause.killer(), Some(attacker.id));
        assert!(!defender.alive);
    }
}
