//! Shades: the souls that wash up at the riverbank each dawn.
//!
//! A shade is an immutable classification record. Its correct afterlife is
//! derived once, at construction, from its two life actions; the only thing
//! the player ever changes is the afterlife it gets assigned to.
//!
//! # Modules
//!
//! - [`catalog`] -- Trait pools the spawner draws from, including the fixed
//!   set of good actions that drives classification.
//! - [`shade`] -- The [`Shade`] record and the pure [`classify`] function.
//! - [`spawner`] -- Random batch generation with [`ShadeSpawner`].
//! - [`roster`] -- The pending pool and hired list ([`ShadeRoster`]).

pub mod catalog;
pub mod roster;
pub mod shade;
pub mod spawner;

pub use roster::{HiredSummary, ShadeRoster};
pub use shade::{Shade, ShadeTraits, classify};
pub use spawner::{ShadeSpawner, SpawnerConfig};

use ferryman_types::ShadeId;

/// Errors that can occur when creating or moving shades.
#[derive(Debug, thiserror::Error)]
pub enum ShadeError {
    /// Shade levels start at 1.
    #[error("shade level must be at least 1, got {level}")]
    InvalidLevel {
        /// The rejected level.
        level: u32,
    },

    /// The shade already carries a player decision.
    #[error("shade {shade_id} is already assigned to {afterlife}")]
    AlreadyAssigned {
        /// The shade that was already assigned.
        shade_id: ShadeId,
        /// The afterlife it was assigned to.
        afterlife: ferryman_types::Afterlife,
    },

    /// No pending shade has this identifier.
    #[error("shade {shade_id} is not in the pending pool")]
    NotPending {
        /// The identifier that was looked up.
        shade_id: ShadeId,
    },

    /// Spawner settings are unusable.
    #[error("invalid spawner configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}
