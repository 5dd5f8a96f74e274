//! Pickpocketing.
//!
//! ## Resolution
//!
//! 1. A 50% roll decides success
//! 2. On success the victim's newest carried item moves to the thief if the
//!    thief has room; otherwise up to 10 gold changes hands
//! 3. On failure a second 50% roll decides whether the victim noticed; a
//!    detected thief is remembered as hostile
//!
//! The thief pays the energy cost regardless of outcome.

use mimesis_types::EpisodeKind;
use rand::Rng;
use tracing::debug;

use crate::agent::Agent;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Energy cost of an attempt, regardless of outcome.
pub const THEFT_ENERGY_COST: f64 = 3.0;

/// Probability an attempt succeeds.
pub const SUCCESS_CHANCE: f64 = 0.5;

/// Probability a failed attempt is noticed.
pub const DETECTION_CHANCE: f64 = 0.5;

/// Most gold taken when no item can be carried off.
pub const MAX_GOLD_STOLEN: u32 = 10;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// The two rolls of an attempt, each in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TheftRolls {
    /// Compared against [`SUCCESS_CHANCE`].
    pub success: f64,
    /// Compared against [`DETECTION_CHANCE`] on failure.
    pub detection: f64,
}

impl TheftRolls {
    /// Draw both rolls.
    pub fn draw(rng: &mut impl Rng) -> Self {
        Self {
            success: rng.random(),
            detection: rng.random(),
        }
    }
}

/// How an attempt ended before anything moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TheftVerdict {
    /// The thief got their hands on something.
    Success,
    /// The attempt failed unnoticed.
    Unnoticed,
    /// The attempt failed and the victim saw it.
    Caught,
}

/// Decide an attempt from pre-drawn rolls.
pub fn resolve_theft(rolls: TheftRolls) -> TheftVerdict {
    if rolls.success < SUCCESS_CHANCE {
        TheftVerdict::Success
    } else if rolls.detection < DETECTION_CHANCE {
        TheftVerdict::Caught
    } else {
        TheftVerdict::Unnoticed
    }
}

/// What actually changed hands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loot {
    /// An item, by name.
    Item(String),
    /// Gold coins.
    Gold(u32),
    /// The victim had nothing the thief could take.
    Nothing,
}

/// Apply a verdict to thief and victim. Returns what was taken.
pub fn apply_theft(thief: &mut Agent, victim: &mut Agent, verdict: TheftVerdict, tick: u64) -> Loot {
    thief.stats.spend_energy(THEFT_ENERGY_COST);

    let loot = match verdict {
        TheftVerdict::Success => take_something(thief, victim),
        TheftVerdict::Unnoticed => {
            thief.log_event(tick, EpisodeKind::Failure, format!("Failed to rob {}.", victim.name), -1.0);
            Loot::Nothing
        }
        TheftVerdict::Caught => {
            victim.hostiles.insert(thief.id);
            victim.log_event(
                tick,
                EpisodeKind::Theft,
                format!("Caught {} stealing!", thief.name),
                -3.0,
            );
            thief.log_event(tick, EpisodeKind::Failure, format!("Caught by {}!", victim.name), -3.0);
            Loot::Nothing
        }
    };

    match &loot {
        Loot::Item(name) => {
            thief.log_event(
                tick,
                EpisodeKind::Theft,
                format!("Stole {name} from {}.", victim.name),
                3.0,
            );
        }
        Loot::Gold(amount) => {
            thief.log_event(
                tick,
                EpisodeKind::Theft,
                format!("Stole {amount} gold from {}.", victim.name),
                3.0,
            );
        }
        Loot::Nothing if verdict == TheftVerdict::Success => {
            thief.log_event(
                tick,
                EpisodeKind::Failure,
                format!("{} had nothing worth taking.", victim.name),
                -1.0,
            );
        }
        Loot::Nothing => {}
    }

    debug!(tick, thief = %thief.id, victim = %victim.id, ?verdict, ?loot, "theft resolved");
    loot
}

fn take_something(thief: &mut Agent, victim: &mut Agent) -> Loot {
    if thief.inventory.has_room()
        && let Some(item) = victim.inventory.pop_newest()
    {
        let name = item.name().to_owned();
        if thief.inventory.add(item) {
            return Loot::Item(name);
        }
    }
    let amount = victim.inventory.gold().min(MAX_GOLD_STOLEN);
    if amount > 0 && victim.inventory.spend_gold(amount) {
        thief.inventory.add_gold(amount);
        return Loot::Gold(amount);
    }
    Loot::Nothing
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
    use crate::inventory::{Item, WOOD};

    fn pair(rng: &mut StdRng) -> (Agent, Agent) {
        let config = VitalsConfig::default();
        let thief = Agent::random_citizen(
            String::from("Thief"),
            Some(Job::Thief),
            Position::new(1, 1),
            &config,
            rng,
        );
        let victim = Agent::random_citizen(
            String::from("Mark"),
            Some(Job::Gatherer),
            Position::new(2, 1),
            &config,
            rng,
        );
        (thief, victim)
    }

    #[test]
    fn verdicts_follow_rolls() {
        assert_eq!(resolve_theft(TheftRolls { success: 0.1, detection: 0.1 }), TheftVerdict::Success);
        assert_eq!(resolve_theft(TheftRolls { success: 0.9, detection: 0.1 }), TheftVerdict::Caught);
        assert_eq!(resolve_theft(TheftRolls { success: 0.9, detection: 0.9 }), TheftVerdict::Unnoticed);
    }

    #[test]
    fn success_takes_newest_item() {
        let mut rng = StdRng::seed_from_u64(1);
        let (mut thief, mut victim) = pair(&mut rng);
        victim.inventory.add(Item::resource(WOOD));
        victim.inventory.add(Item::food("Berries"));

        let loot = apply_theft(&mut thief, &mut victim, TheftVerdict::Success, 3);
        assert_eq!(loot, Loot::Item(String::from("Berries")));
        assert_eq!(victim.inventory.len(), 1);
        assert_eq!(thief.inventory.count("Berries"), 1);
        assert!((thief.stats.energy - 97.0).abs() < f64::EPSILON);
    }

    #[test]
    fn full_thief_takes_gold_instead() {
        let mut rng = StdRng::seed_from_u64(2);
        let (mut thief, mut victim) = pair(&mut rng);
        while thief.inventory.add(Item::resource(WOOD)) {}
        victim.inventory.add(Item::resource(WOOD));
        victim.inventory.add_gold(25);

        let loot = apply_theft(&mut thief, &mut victim, TheftVerdict::Success, 3);
        assert_eq!(loot, Loot::Gold(10));
        assert_eq!(victim.inventory.gold(), 15);
        assert_eq!(thief.inventory.gold(), 10);
        assert_eq!(victim.inventory.len(), 1);
    }

    #[test]
    fn caught_thief_becomes_hostile() {
        let mut rng = StdRng::seed_from_u64(3);
        let (mut thief, mut victim) = pair(&mut rng);
        victim.inventory.add(Item::resource(WOOD));

        let loot = apply_theft(&mut thief, &mut victim, TheftVerdict::Caught, 3);
        assert_eq!(loot, Loot::Nothing);
        assert!(victim.hostiles.contains(&thief.id));
        assert!(victim.journal.log_contains("Caught Thief"));
        assert!(thief.journal.log_contains("Caught by Mark"));
        assert_eq!(victim.inventory.len(), 1);
    }

    #[test]
    fn unnoticed_failure_changes_nothing_but_energy() {
        let mut rng = StdRng::seed_from_u64(4);
        let (mut thief, mut victim) = pair(&mut rng);
        victim.inventory.add_gold(50);
        let loot = apply_theft(&mut thief, &mut victim, TheftVerdict::Unnoticed, 3);
        assert_eq!(loot, Loot::Nothing);
        assert_eq!(victim.inventory.gold(), 50);
        assert!(victim.hostiles.is_empty());
        assert!((thief.stats.energy - 97.0).abs() < f64::EPSILON);
    }
}
