//! Paced, stoppable driver for an [`Engine`].
//!
//! [`run_simulation`] ticks the engine until its budget in
//! `simulation.max_ticks` runs out (0 means no limit) or the population dies
//! out. A raised stop flag also ends the run. The flag is read before every
//! tick, so no tick is cut short. Between ticks the loop waits
//! `world.tick_interval_ms`.

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::engine::Engine;
use crate::error::TickError;
use crate::tick::TickSummary;

/// Failure that aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The engine could not complete a tick.
    #[error("tick error: {source}")]
    Tick {
        /// What went wrong inside the tick.
        #[from]
        source: TickError,
    },
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationEndReason {
    /// The configured tick limit was reached.
    MaxTicksReached,
    /// No living agent remains.
    Extinction,
    /// The operator asked the run to stop.
    OperatorStop,
}

/// How a run finished.
#[derive(Debug)]
pub struct SimulationResult {
    /// Which stop condition fired.
    pub end_reason: SimulationEndReason,
    /// Summary of the last completed tick, `None` if none ran.
    pub final_summary: Option<TickSummary>,
    /// Ticks completed by this run.
    pub total_ticks: u64,
}

/// Observer handed every tick summary during a run.
pub trait TickCallback: Send {
    /// Sees `summary` with the engine already advanced past it.
    fn on_tick(&mut self, summary: &TickSummary, engine: &Engine);
}

/// Observer that ignores every tick.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _engine: &Engine) {}
}

/// Tick `engine` until one of the [`SimulationEndReason`]s applies.
///
/// # Errors
///
/// Returns [`RunnerError`] when the engine fails a tick.
pub async fn run_simulation(
    engine: &mut Engine,
    callback: &mut dyn TickCallback,
    stop: &watch::Receiver<bool>,
) -> Result<SimulationResult, RunnerError> {
    let max_ticks = engine.state().config().simulation.max_ticks;
    let interval_ms = engine.state().config().world.tick_interval_ms;
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks,
        tick_interval_ms = interval_ms,
        population = engine.population(),
        "Run started"
    );

    loop {
        if *stop.borrow() {
            info!(completed = total_ticks, "Stop flag raised");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::OperatorStop,
                final_summary: last_summary,
                total_ticks,
            });
        }

        let summary = engine.update_with_summary()?;
        total_ticks = total_ticks.saturating_add(1);

        callback.on_tick(&summary, engine);

        if summary.living == 0 {
            info!(tick = summary.tick, "Population died out");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::Extinction,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        // 0 means unbounded.
        if max_ticks > 0 && summary.tick >= max_ticks {
            info!(tick = summary.tick, max_ticks, "Tick budget spent");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        last_summary = Some(summary);

        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

/// Report how a run finished.
pub fn log_simulation_end(result: &SimulationResult) {
    let Some(last) = &result.final_summary else {
        warn!(why = ?result.end_reason, "Run ended before its first tick");
        return;
    };
    info!(
        why = ?result.end_reason,
        ticks_run = result.total_ticks,
        hour = last.hour,
        survivors = last.living,
        monsters = last.monsters,
        "Run finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::state::testing::grass_state;

    fn fast_engine(max_ticks: u64) -> Engine {
        let mut config = SimulationConfig::default();
        config.world.width = 20;
        config.world.height = 20;
        config.world.tick_interval_ms = 0;
        config.simulation.max_ticks = max_ticks;
        match Engine::new(config) {
            Ok(e) => e,
            Err(e) => panic!("config is valid: {e}"),
        }
    }

    struct Counting {
        ticks: Vec<u64>,
    }

    impl TickCallback for Counting {
        fn on_tick(&mut self, summary: &TickSummary, _engine: &Engine) {
            self.ticks.push(summary.tick);
        }
    }

    #[tokio::test]
    async fn stops_once_the_tick_budget_is_spent() {
        let mut engine = fast_engine(5);
        let (_tx, rx) = watch::channel(false);
        let mut cb = Counting { ticks: Vec::new() };

        let result = match run_simulation(&mut engine, &mut cb, &rx).await {
            Ok(r) => r,
            Err(e) => panic!("run failed: {e}"),
        };

        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(cb.ticks, vec![1, 2, 3, 4, 5]);
        assert_eq!(engine.tick(), 5);
    }

    #[tokio::test]
    async fn raised_stop_flag_prevents_any_tick() {
        let mut engine = fast_engine(0);
        let (tx, rx) = watch::channel(false);
        let _ = tx.send(true);
        let mut cb = NoOpCallback;

        let result = match run_simulation(&mut engine, &mut cb, &rx).await {
            Ok(r) => r,
            Err(e) => panic!("run failed: {e}"),
        };

        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test]
    async fn empty_world_ends_in_extinction() {
        let mut state = grass_state(1);
        state.config.world.tick_interval_ms = 0;
        let mut engine = Engine::from_state(state);
        let (_tx, rx) = watch::channel(false);
        let mut cb = NoOpCallback;

        let result = match run_simulation(&mut engine, &mut cb, &rx).await {
            Ok(r) => r,
            Err(e) => panic!("run failed: {e}"),
        };

        assert_eq!(result.end_reason, SimulationEndReason::Extinction);
        assert_eq!(result.total_ticks, 1);
    }
}
