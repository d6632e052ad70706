//! Errors the headless engine can stop on.

/// Everything that can end a scripted run early.
///
/// One variant per layer the engine talks to, so `run` can use `?` on
/// config, game and save calls alike.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ferryman_core::config::ConfigError,
    },

    /// A game operation failed.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: ferryman_core::GameError,
    },

    /// Writing the final save failed.
    #[error("save error: {source}")]
    Save {
        /// The underlying save error.
        #[from]
        source: ferryman_core::save::SaveError,
    },
}
