//! Error types for the host binary.
//!
//! [`HostError`] wraps every failure `main` can propagate with `?`.

/// Top-level error for the host binary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: mimesis_core::config::ConfigError,
    },

    /// The engine could not be built.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying construction error.
        #[from]
        source: mimesis_core::EngineError,
    },

    /// The tick loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: mimesis_core::runner::RunnerError,
    },

    /// The final snapshot could not be serialized.
    #[error("snapshot error: {source}")]
    Snapshot {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
