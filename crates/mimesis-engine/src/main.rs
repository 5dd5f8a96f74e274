//! Host binary for the Mimesis simulation.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `mimesis-config.yaml` (or `$MIMESIS_CONFIG`)
//! 3. Build the engine: terrain, trader, seed citizens
//! 4. Wire Ctrl-C to the runner's stop signal
//! 5. Run the tick loop
//! 6. Log the result and print the final world snapshot as JSON

mod error;
mod log_callback;

use std::path::{Path, PathBuf};

use mimesis_core::config::SimulationConfig;
use mimesis_core::{Engine, runner};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::HostError;
use crate::log_callback::LogCallback;

/// Default configuration file, relative to the working directory.
const CONFIG_FILE: &str = "mimesis-config.yaml";

/// Environment variable that overrides [`CONFIG_FILE`].
const CONFIG_ENV: &str = "MIMESIS_CONFIG";

/// Ticks between debug-level world snapshots.
const SNAPSHOT_EVERY: u64 = 100;

#[tokio::main]
async fn main() -> Result<(), HostError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("mimesis-engine starting");

    // 2. Load configuration.
    let config = load_config(&config_path())?;
    info!(
        width = config.world.width,
        height = config.world.height,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.simulation.max_ticks,
        "Configuration loaded"
    );

    // 3. Build the engine.
    let mut engine = Engine::new(config)?;
    info!(population = engine.population(), "World created");

    // 4. Stop on Ctrl-C.
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping after the current tick");
                let _ = stop_tx.send(true);
            }
            Err(e) => warn!(error = %e, "Could not listen for Ctrl-C"),
        }
    });

    // 5. Run the simulation.
    let mut callback = LogCallback::new(SNAPSHOT_EVERY);
    let result = runner::run_simulation(&mut engine, &mut callback, &stop_rx).await?;

    // 6. Log results.
    runner::log_simulation_end(&result);
    let (births, deaths) = callback.totals();
    info!(
        peak_population = callback.peak_population(),
        births,
        deaths,
        "mimesis-engine shutdown complete"
    );
    println!("{}", serde_json::to_string_pretty(&engine.get_state())?);

    Ok(())
}

/// The configuration path: `$MIMESIS_CONFIG` if set, else [`CONFIG_FILE`].
fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from)
}

/// Load the simulation configuration, falling back to defaults when the
/// file does not exist.
fn load_config(path: &Path) -> Result<SimulationConfig, HostError> {
    if path.exists() {
        let config = SimulationConfig::from_file(path)?;
        Ok(config)
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
