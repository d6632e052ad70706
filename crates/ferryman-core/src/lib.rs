//! Daily simulation core for the Ferryman game.
//!
//! The game is call-driven: a host (the engine binary, a UI, a test)
//! advances the clock, relays player decisions, and asks the Docks to ferry
//! shades at the end of each day. Every call completes synchronously and
//! notifies subscribers in-line.
//!
//! # Modules
//!
//! - [`clock`] -- The Dawn/Day/Evening [`PhaseClock`] and the end-of-game
//!   signal.
//! - [`config`] -- Configuration loading from `ferryman-config.yaml` into
//!   strongly-typed structs.
//! - [`docks`] -- The bounded-throughput [`Docks`] processing queue.
//! - [`game`] -- The [`Game`] composition root that owns every component.
//! - [`save`] -- Snapshot export, validation, and restore.
//!
//! [`PhaseClock`]: clock::PhaseClock
//! [`Docks`]: docks::Docks
//! [`Game`]: game::Game

pub mod clock;
pub mod config;
pub mod docks;
pub mod game;
pub mod save;

pub use game::{Game, GameError};
