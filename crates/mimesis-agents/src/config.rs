//! Tunable parameters for agent vitals, aging, and reproduction.
//!
//! These values correspond to the `agents` key of `mimesis-config.yaml`.
//! The [`VitalsConfig`] struct bundles every tunable so that callers (tick
//! cycle, tests) can override defaults; any key missing from the YAML falls
//! back to the value in [`Default`].

use serde::Deserialize;

/// Configuration for per-action vital mechanics.
///
/// Energy and hunger are fractional so idling can drift by half a point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Hunger ceiling (default: 100).
    pub max_hunger: f64,

    /// Energy ceiling for civilians (default: 100). Job profiles may raise it.
    pub max_energy: f64,

    /// Ticks in one simulated year (default: 720).
    pub ticks_per_year: u64,

    /// Age in years at which an agent may reproduce (default: 18).
    pub adult_years: u64,

    /// Age in years past which old-age death becomes possible (default: 60).
    pub longevity_years: u64,

    /// Per-action probability of dying of old age past longevity (default: 0.001).
    pub old_age_death_chance: f64,

    /// Energy lost per action while at maximum hunger (default: 2).
    pub starvation_damage: f64,

    /// Energy cost of a move (default: 1).
    pub move_energy_cost: f64,

    /// Energy recovered by sleeping (default: 5).
    pub sleep_recovery: f64,

    /// Energy lost while idling (default: 0.5).
    pub idle_energy_cost: f64,

    /// Energy cost of a gather (default: 2).
    pub gather_energy_cost: f64,

    /// Hunger removed by eating one food item (default: 30).
    pub eat_relief: f64,

    /// Energy cost of eating (default: 1).
    pub eat_energy_cost: f64,

    /// Energy the initiator pays to reproduce (default: 30).
    pub reproduce_energy_cost: f64,

    /// Minimum initiator energy to reproduce (default: 80).
    pub reproduce_min_energy: f64,

    /// Maximum initiator hunger to reproduce (default: 30).
    pub reproduce_max_hunger: f64,

    /// Decisions of silence after speaking (default: 20).
    pub speech_cooldown: u32,

    /// Carried-item capacity of a new inventory (default: 10).
    pub inventory_capacity: usize,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            max_hunger: 100.0,
            max_energy: 100.0,
            ticks_per_year: 720,
            adult_years: 18,
            longevity_years: 60,
            old_age_death_chance: 0.001,
            starvation_damage: 2.0,
            move_energy_cost: 1.0,
            sleep_recovery: 5.0,
            idle_energy_cost: 0.5,
            gather_energy_cost: 2.0,
            eat_relief: 30.0,
            eat_energy_cost: 1.0,
            reproduce_energy_cost: 30.0,
            reproduce_min_energy: 80.0,
            reproduce_max_hunger: 30.0,
            speech_cooldown: 20,
            inventory_capacity: 10,
        }
    }
}

impl VitalsConfig {
    /// Age in ticks at which an agent becomes an adult.
    pub const fn adult_age(&self) -> u64 {
        self.adult_years.saturating_mul(self.ticks_per_year)
    }

    /// Age in ticks past which old-age death rolls begin.
    pub const fn longevity_age(&self) -> u64 {
        self.longevity_years.saturating_mul(self.ticks_per_year)
    }

    /// Convert whole years to ticks.
    pub const fn years(&self, years: u64) -> u64 {
        years.saturating_mul(self.ticks_per_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_in_ticks() {
        let config = VitalsConfig::default();
        assert_eq!(config.adult_age(), 12_960);
        assert_eq!(config.longevity_age(), 43_200);
        assert_eq!(config.years(20), 14_400);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let parsed: Result<VitalsConfig, _> =
            serde_json::from_str(r#"{ "starvation_damage": 5.0, "speech_cooldown": 3 }"#);
        let Ok(config) = parsed else {
            panic!("config should parse");
        };
        assert!((config.starvation_damage - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.speech_cooldown, 3);
        assert_eq!(config.inventory_capacity, 10);
    }
}
