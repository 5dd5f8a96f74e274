//! Tick callback that reports the world through `tracing`.
//!
//! Every tick with a birth, death, or monster spawn is logged at `info`.
//! Every `snapshot_every` ticks the full world snapshot is serialized and
//! logged at `debug`, along with the newest broadcast line.

use mimesis_core::runner::TickCallback;
use mimesis_core::{Engine, TickSummary};
use mimesis_types::WorldState;
use tracing::{debug, info, warn};

/// Callback that logs tick summaries and periodic snapshots.
pub struct LogCallback {
    snapshot_every: u64,
    peak_population: usize,
    births: u64,
    deaths: u64,
}

impl LogCallback {
    /// Create a callback that snapshots every `snapshot_every` ticks.
    ///
    /// Zero disables periodic snapshots.
    pub const fn new(snapshot_every: u64) -> Self {
        Self {
            snapshot_every,
            peak_population: 0,
            births: 0,
            deaths: 0,
        }
    }

    /// Highest living count seen so far.
    pub const fn peak_population(&self) -> usize {
        self.peak_population
    }

    /// Births and deaths seen so far.
    pub const fn totals(&self) -> (u64, u64) {
        (self.births, self.deaths)
    }

    fn should_snapshot(&self, tick: u64) -> bool {
        self.snapshot_every > 0 && tick % self.snapshot_every == 0
    }
}

impl TickCallback for LogCallback {
    fn on_tick(&mut self, summary: &TickSummary, engine: &Engine) {
        self.peak_population = self.peak_population.max(summary.living);
        self.births = self.births.saturating_add(u64::from(summary.births));
        self.deaths = self.deaths.saturating_add(u64::from(summary.deaths));

        if summary.births > 0 || summary.deaths > 0 || summary.monsters_spawned > 0 {
            info!(
                tick = summary.tick,
                hour = summary.hour,
                living = summary.living,
                births = summary.births,
                deaths = summary.deaths,
                monsters = summary.monsters,
                "Population changed"
            );
        }
        if summary.failures > 0 {
            warn!(tick = summary.tick, failures = summary.failures, "Some agents skipped their turn");
        }

        if self.should_snapshot(summary.tick) {
            let snapshot: WorldState = engine.get_state();
            match serde_json::to_string(&snapshot) {
                Ok(json) => debug!(
                    tick = summary.tick,
                    bytes = json.len(),
                    latest_event = snapshot.events.last().map(|e| e.text.as_str()),
                    snapshot = %json,
                    "World snapshot"
                ),
                Err(e) => warn!(tick = summary.tick, error = %e, "Snapshot serialization failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mimesis_core::SimulationConfig;

    use super::*;

    fn engine() -> Engine {
        let mut config = SimulationConfig::default();
        config.world.width = 16;
        config.world.height = 16;
        match Engine::new(config) {
            Ok(e) => e,
            Err(e) => panic!("config is valid: {e}"),
        }
    }

    #[test]
    fn totals_balance_by_day() {
        let mut engine = engine();
        let mut cb = LogCallback::new(10);
        for _ in 0..25 {
            let summary = match engine.update_with_summary() {
                Ok(s) => s,
                Err(e) => panic!("tick failed: {e}"),
            };
            cb.on_tick(&summary, &engine);
        }
        assert!(cb.peak_population() >= 1);
        let (births, deaths) = cb.totals();
        let alive = u64::try_from(engine.population()).unwrap_or(0);
        assert_eq!(alive + deaths, 11 + births);
    }

    #[test]
    fn snapshot_cadence() {
        let cb = LogCallback::new(10);
        assert!(cb.should_snapshot(20));
        assert!(!cb.should_snapshot(21));
        assert!(!LogCallback::new(0).should_snapshot(10));
    }
}
