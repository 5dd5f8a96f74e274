//! Job behavior table.
//!
//! One [`JobProfile`] row per [`Job`] captures everything the decision
//! engine and action executor need to know about a role: render colour,
//! energy ceiling, combat modifiers, work scores, and capability flags.
//! Callers look the row up with [`profile`] instead of branching on the job.

use mimesis_types::Job;

use crate::crafting::Recipe;

/// Static description of a job.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobProfile {
    /// The job this row describes.
    pub job: Job,
    /// Hex render colour.
    pub color: &'static str,
    /// Energy ceiling; `None` uses the configured civilian maximum.
    pub max_energy: Option<f64>,
    /// Extra damage added to every attack.
    pub combat_bonus: u32,
    /// Fixed damage that replaces the usual formula.
    pub flat_damage: Option<u32>,
    /// Combat confidence without a strong weapon.
    pub confidence_floor: f64,
    /// Daytime gather score on the job's own resource tile.
    pub gather_affinity: f64,
    /// Daytime move bonus when off the job's resource tile.
    pub roam_bonus: f64,
    /// Recipe the job pursues whenever materials allow.
    pub signature_recipe: Option<Recipe>,
    /// Gathers wood in forests (any job gets wood there, this one seeks it).
    pub harvests_wood: bool,
    /// Mines ore on or next to walls.
    pub mines_ore: bool,
    /// Forages fiber on grass.
    pub forages: bool,
    /// Picks pockets.
    pub steals: bool,
    /// Hunts thieves and monsters.
    pub polices: bool,
    /// Turns wood into walls.
    pub builds: bool,
    /// Buys goods from sellers.
    pub trades_goods: bool,
    /// Active at night, burns by day, ignores hunger and sleep.
    pub nocturnal: bool,
    /// Takes part in speech and meme spread.
    pub speaks: bool,
}

/// Confidence granted by a strong weapon or a fighting job.
pub const FULL_CONFIDENCE: f64 = 1.0;

/// Confidence of an unarmed civilian.
pub const LOW_CONFIDENCE: f64 = 0.2;

const CIVILIAN: JobProfile = JobProfile {
    job: Job::Gatherer,
    color: "#BDBDBD",
    max_energy: None,
    combat_bonus: 0,
    flat_damage: None,
    confidence_floor: LOW_CONFIDENCE,
    gather_affinity: 0.0,
    roam_bonus: 0.0,
    signature_recipe: None,
    harvests_wood: false,
    mines_ore: false,
    forages: false,
    steals: false,
    polices: false,
    builds: false,
    trades_goods: false,
    nocturnal: false,
    speaks: true,
};

const LUMBERJACK: JobProfile = JobProfile {
    job: Job::Lumberjack,
    color: "#8D6E63",
    gather_affinity: 40.0,
    roam_bonus: 10.0,
    harvests_wood: true,
    builds: true,
    ..CIVILIAN
};

const GUARD: JobProfile = JobProfile {
    job: Job::Guard,
    color: "#5C6BC0",
    combat_bonus: 5,
    confidence_floor: FULL_CONFIDENCE,
    polices: true,
    ..CIVILIAN
};

const GATHERER: JobProfile = JobProfile {
    job: Job::Gatherer,
    color: "#66BB6A",
    gather_affinity: 30.0,
    forages: true,
    ..CIVILIAN
};

const BLACKSMITH: JobProfile = JobProfile {
    job: Job::Blacksmith,
    color: "#424242",
    gather_affinity: 40.0,
    roam_bonus: 10.0,
    signature_recipe: Some(Recipe::Sword),
    mines_ore: true,
    ..CIVILIAN
};

const THIEF: JobProfile = JobProfile {
    job: Job::Thief,
    color: "#212121",
    steals: true,
    ..CIVILIAN
};

const TRADER: JobProfile = JobProfile {
    job: Job::Trader,
    color: "#FFD700",
    trades_goods: true,
    ..CIVILIAN
};

const MONSTER: JobProfile = JobProfile {
    job: Job::Monster,
    color: "#FF0000",
    max_energy: Some(200.0),
    combat_bonus: 5,
    flat_damage: Some(20),
    confidence_floor: FULL_CONFIDENCE,
    nocturnal: true,
    speaks: false,
    ..CIVILIAN
};

/// The behavior row for a job.
pub const fn profile(job: Job) -> &'static JobProfile {
    match job {
        Job::Lumberjack => &LUMBERJACK,
        Job::Guard => &GUARD,
        Job::Gatherer => &GATHERER,
        Job::Blacksmith => &BLACKSMITH,
        Job::Thief => &THIEF,
        Job::Trader => &TRADER,
        Job::Monster => &MONSTER,
    }
}
