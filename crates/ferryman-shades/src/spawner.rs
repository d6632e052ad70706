//! Random shade generation.
//!
//! Each spawn call draws a batch of shades from the trait pools in
//! [`catalog`](crate::catalog). Every life action is a coin flip between a
//! random good deed and a random bad one, so all three afterlives come up
//! regularly.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use tracing::{debug, info};

use crate::ShadeError;
use crate::catalog::{BAD_ACTIONS, GOOD_ACTIONS, LIFE_SUMMARIES, NAMES, OCCUPATIONS, ORIGINS};
use crate::shade::{Shade, ShadeTraits};

// -----------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------

/// Spawner settings, loaded from the `spawner` section of the game config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpawnerConfig {
    /// Shades produced per spawn call.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Exclusive upper bound of the level draw. Values of 1 or less pin
    /// every shade at level 1.
    #[serde(default = "default_max_spawnable_level")]
    pub max_spawnable_level: u32,

    /// Optional RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_spawnable_level: default_max_spawnable_level(),
            seed: None,
        }
    }
}

const fn default_batch_size() -> u32 {
    5
}

const fn default_max_spawnable_level() -> u32 {
    1
}

// -----------------------------------------------------------------------
// Spawner
// -----------------------------------------------------------------------

/// Generates batches of freshly classified shades.
#[derive(Debug, Clone)]
pub struct ShadeSpawner {
    batch_size: u32,
    max_spawnable_level: u32,
}

impl ShadeSpawner {
    /// Create a spawner from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ShadeError::InvalidConfig`] if `batch_size` is 0.
    pub fn new(config: &SpawnerConfig) -> Result<Self, ShadeError> {
        if config.batch_size == 0 {
            return Err(ShadeError::InvalidConfig {
                reason: "batch_size must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            batch_size: config.batch_size,
            max_spawnable_level: config.max_spawnable_level,
        })
    }

    /// Return the number of shades produced per batch.
    pub const fn batch_size(&self) -> u32 {
        self.batch_size
    }

    /// Spawn one batch of shades.
    ///
    /// # Errors
    ///
    /// Propagates [`ShadeError`] from shade construction.
    pub fn spawn_batch<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Shade>, ShadeError> {
        let mut shades = Vec::with_capacity(usize::try_from(self.batch_size).unwrap_or(0));
        for _ in 0..self.batch_size {
            let shade = self.spawn_one(rng)?;
            debug!(
                shade_id = %shade.id(),
                name = shade.name(),
                correct_afterlife = %shade.correct_afterlife(),
                "Shade spawned"
            );
            shades.push(shade);
        }
        info!(count = shades.len(), "Shade batch spawned");
        Ok(shades)
    }

    /// Spawn a single shade.
    ///
    /// # Errors
    ///
    /// Propagates [`ShadeError`] from shade construction.
    pub fn spawn_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Shade, ShadeError> {
        let traits = ShadeTraits {
            name: pick(rng, NAMES).to_owned(),
            origin: pick(rng, ORIGINS).to_owned(),
            occupation: pick(rng, OCCUPATIONS).to_owned(),
            life_summary: pick(rng, LIFE_SUMMARIES).to_owned(),
            life_actions: [draw_action(rng), draw_action(rng)],
            level: self.draw_level(rng),
        };
        Shade::new(traits)
    }

    /// Draw a level from `[1, max_spawnable_level)`, or 1 if that range
    /// is empty.
    fn draw_level<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.max_spawnable_level > 1 {
            rng.random_range(1..self.max_spawnable_level)
        } else {
            1
        }
    }
}

/// Flip a coin between a good and a bad deed, then pick one from that pool.
fn draw_action<R: Rng + ?Sized>(rng: &mut R) -> String {
    let pool = if rng.random_bool(0.5) {
        GOOD_ACTIONS
    } else {
        BAD_ACTIONS
    };
    pick(rng, pool).to_owned()
}

/// Pick a random entry from a pool. Empty pools yield an empty string.
fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}
