//! Configuration loading and typed config structures for the Mimesis simulation.
//!
//! The canonical configuration lives in `mimesis-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, provides a loader, and validates the values the engine cannot
//! start without.

use std::path::Path;

use mimesis_agents::VitalsConfig;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of its allowed range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `mimesis-config.yaml`. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Grid size, seed, and pacing.
    #[serde(default)]
    pub world: WorldConfig,

    /// Day/night cycle.
    #[serde(default)]
    pub time: TimeConfig,

    /// Starting population and caps.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Run length.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Per-agent vitals.
    #[serde(default)]
    pub agents: VitalsConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                self.world.width, self.world.height
            )));
        }
        if self.time.ticks_per_hour == 0 {
            return Err(invalid("ticks_per_hour must be at least 1"));
        }
        for (label, hour) in [
            ("world.start_hour", self.world.start_hour),
            ("time.night_start_hour", self.time.night_start_hour),
            ("time.night_end_hour", self.time.night_end_hour),
        ] {
            if hour >= HOURS_PER_DAY {
                return Err(invalid(format!("{label} must be below 24, got {hour}")));
            }
        }
        for (label, p) in [
            ("population.monster_spawn_chance", self.population.monster_spawn_chance),
            ("agents.old_age_death_chance", self.agents.old_age_death_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{label} must be within [0, 1], got {p}")));
            }
        }
        if self.agents.max_hunger <= 0.0 || self.agents.max_energy <= 0.0 {
            return Err(invalid("agent stat ceilings must be positive"));
        }
        if self.agents.ticks_per_year == 0 {
            return Err(invalid("agents.ticks_per_year must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

/// Hours in one simulated day.
pub const HOURS_PER_DAY: u32 = 24;

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Grid width in tiles.
    #[serde(default = "default_dimension")]
    pub width: u32,

    /// Grid height in tiles.
    #[serde(default = "default_dimension")]
    pub height: u32,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Hour of day at tick 0.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,

    /// Real-time milliseconds per tick when driven by the runner.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            seed: default_seed(),
            start_hour: default_start_hour(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Day/night configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeConfig {
    /// Ticks in one simulated hour.
    #[serde(default = "default_ticks_per_hour")]
    pub ticks_per_hour: u64,

    /// First hour of night.
    #[serde(default = "default_night_start_hour")]
    pub night_start_hour: u32,

    /// First hour of day.
    #[serde(default = "default_night_end_hour")]
    pub night_end_hour: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            ticks_per_hour: default_ticks_per_hour(),
            night_start_hour: default_night_start_hour(),
            night_end_hour: default_night_end_hour(),
        }
    }
}

/// Population configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PopulationConfig {
    /// Civilians spawned at start, not counting the trader.
    #[serde(default = "default_initial_agents")]
    pub initial_agents: u32,

    /// Gold the starting trader carries.
    #[serde(default = "default_trader_gold")]
    pub trader_gold: u32,

    /// Living agents above which reproduction is blocked.
    #[serde(default = "default_max_population")]
    pub max_population: u32,

    /// Living monsters above which none spawn.
    #[serde(default = "default_max_monsters")]
    pub max_monsters: u32,

    /// Per-night-tick chance of a monster spawning.
    #[serde(default = "default_monster_spawn_chance")]
    pub monster_spawn_chance: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_agents: default_initial_agents(),
            trader_gold: default_trader_gold(),
            max_population: default_max_population(),
            max_monsters: default_max_monsters(),
            monster_spawn_chance: default_monster_spawn_chance(),
        }
    }
}

/// Simulation boundary parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Stop after this many ticks; 0 runs until stopped.
    #[serde(default)]
    pub max_ticks: u64,
}

const fn default_dimension() -> u32 {
    64
}

const fn default_seed() -> u64 {
    42
}

const fn default_start_hour() -> u32 {
    8
}

const fn default_tick_interval_ms() -> u64 {
    500
}

const fn default_ticks_per_hour() -> u64 {
    30
}

const fn default_night_start_hour() -> u32 {
    22
}

const fn default_night_end_hour() -> u32 {
    6
}

const fn default_initial_agents() -> u32 {
    10
}

const fn default_trader_gold() -> u32 {
    500
}

const fn default_max_population() -> u32 {
    60
}

const fn default_max_monsters() -> u32 {
    3
}

const fn default_monster_spawn_chance() -> f64 {
    0.05
}
