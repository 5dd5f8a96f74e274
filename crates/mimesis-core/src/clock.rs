//! World clock and day/night cycle.
//!
//! The clock counts ticks and derives the hour of day: every
//! `ticks_per_hour` ticks the hour advances by one, wrapping at 24. Night
//! spans from `night_start_hour` up to (not including) `night_end_hour`,
//! wrapping past midnight.

use crate::config::{HOURS_PER_DAY, TimeConfig, WorldConfig};

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// Invalid time configuration.
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// World clock tracking the tick counter and hour of day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldClock {
    tick: u64,
    hour: u32,
    ticks_per_hour: u64,
    night_start: u32,
    night_end: u32,
}

impl WorldClock {
    /// Create a clock at tick 0 and the configured start hour.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `ticks_per_hour` is 0 or any
    /// hour is 24 or more.
    pub fn new(world: &WorldConfig, time: &TimeConfig) -> Result<Self, ClockError> {
        if time.ticks_per_hour == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "ticks_per_hour must be at least 1".to_owned(),
            });
        }
        for hour in [world.start_hour, time.night_start_hour, time.night_end_hour] {
            if hour >= HOURS_PER_DAY {
                return Err(ClockError::InvalidConfig {
                    reason: format!("hour {hour} is outside 0..24"),
                });
            }
        }
        Ok(Self {
            tick: 0,
            hour: world.start_hour,
            ticks_per_hour: time.ticks_per_hour,
            night_start: time.night_start_hour,
            night_end: time.night_end_hour,
        })
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        if self.tick.checked_rem(self.ticks_per_hour) == Some(0) {
            self.hour = self.hour.saturating_add(1) % HOURS_PER_DAY;
        }
        Ok(self.tick)
    }

    /// Current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Current hour of day, 0--23.
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// Force the hour of day (tests and scenario setup).
    pub const fn set_hour(&mut self, hour: u32) {
        self.hour = hour % HOURS_PER_DAY;
    }

    /// Whether the current hour falls in the night window.
    pub const fn is_night(&self) -> bool {
        if self.night_start <= self.night_end {
            self.hour >= self.night_start && self.hour < self.night_end
        } else {
            self.hour >= self.night_start || self.hour < self.night_end
        }
    }
}
