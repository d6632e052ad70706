//! Headless engine binary for the Ferryman game.
//!
//! Plays one complete run with a scripted player and writes the final
//! snapshot to disk. It exercises the whole core the way an interactive
//! front end would: through [`Game`] calls and bus subscriptions only.
//!
//! # Run Sequence
//!
//! 1. Load configuration from `ferryman-config.yaml` (or `FERRYMAN_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the [`Game`] and subscribe the verdict tally
//! 4. Loop over phases until the end-of-game signal:
//!    - Dawn: a fresh batch of shades arrives
//!    - Day: hire a few, sort the rest with the scripted policy
//!    - Evening: the Docks ferry the day's quota
//! 5. Log the tally and write the save JSON

mod error;
mod policy;
mod tally;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ferryman_core::Game;
use ferryman_core::config::GameConfig;
use ferryman_core::save;
use ferryman_events::EventKind;
use ferryman_shades::Shade;
use ferryman_types::{Phase, ShadeId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::policy::SortingPolicy;
use crate::tally::SortingTally;

/// Environment variable that points at an alternative config file.
const CONFIG_PATH_ENV: &str = "FERRYMAN_CONFIG";

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "ferryman-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration is invalid, a game operation fails,
/// or the final save cannot be written.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so this comes first.
    let config_path = config_path();
    let config = load_config(&config_path)?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("ferryman-engine starting");
    info!(
        path = %config_path.display(),
        found = config_path.exists(),
        max_days = config.clock.max_days,
        daily_processing_limit = config.docks.daily_processing_limit,
        batch_size = config.spawner.batch_size,
        sort_accuracy = config.engine.sort_accuracy,
        "Configuration loaded"
    );

    let tally = run(config)?;

    info!(
        correct = tally.correct,
        incorrect = tally.incorrect,
        accuracy = tally.accuracy().unwrap_or(0.0),
        "ferryman-engine shutdown complete"
    );
    Ok(())
}

/// Play one full run and write the final save.
fn run(config: GameConfig) -> Result<SortingTally, EngineError> {
    let policy = SortingPolicy::new(config.engine.sort_accuracy);
    let hires_per_day = usize::try_from(config.engine.hires_per_day).unwrap_or(usize::MAX);
    let save_path = PathBuf::from(&config.engine.save_path);
    let mut rng = match config.spawner.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };

    // 3. Build the game and wire the tally.
    let mut game = Game::new(config)?;
    let tally = Rc::new(RefCell::new(SortingTally::default()));
    let recorder = Rc::clone(&tally);
    game.subscribe(EventKind::ShadeProcessed, move |event| {
        recorder.borrow_mut().record(event);
    });

    // 4. Play until the end-of-game signal.
    loop {
        match game.phase() {
            Phase::Dawn => {
                game.spawn_shades()?;
            }
            Phase::Day => play_day(&mut game, policy, hires_per_day, &mut rng)?,
            Phase::Evening => {
                game.end_of_day();
            }
        }

        if game.advance_phase()?.game_ended {
            break;
        }
    }

    // 5. Persist.
    let state = game.export_state();
    save::write_to_file(&state, &save_path)?;

    let result = *tally.borrow();
    info!(
        day = game.day(),
        hired = game.hired_shades().len(),
        left_at_docks = game.queue_length(),
        ferried = result.total(),
        "Run finished"
    );
    Ok(result)
}

/// Hire the first few pending shades and sort everyone else.
fn play_day(
    game: &mut Game,
    policy: SortingPolicy,
    hires_per_day: usize,
    rng: &mut StdRng,
) -> Result<(), EngineError> {
    let pending: Vec<ShadeId> = game.pending_shades().iter().map(Shade::id).collect();

    for &id in pending.iter().take(hires_per_day) {
        game.hire_shade(id)?;
    }

    for &id in pending.iter().skip(hires_per_day) {
        let Some(shade) = game.pending_shades().iter().find(|s| s.id() == id) else {
            continue;
        };
        let afterlife = policy.choose(shade, rng);
        game.assign_afterlife(id, afterlife)?;
    }
    Ok(())
}

/// Resolve the config file path from the environment or the default.
fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load the game configuration, falling back to defaults if the file is
/// missing.
fn load_config(path: &Path) -> Result<GameConfig, EngineError> {
    if path.exists() {
        Ok(GameConfig::from_file(path)?)
    } else {
        Ok(GameConfig::parse("")?)
    }
}
