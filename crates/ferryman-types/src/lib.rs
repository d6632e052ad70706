//! Shared type definitions for the Ferryman game.
//!
//! This crate is the single source of truth for the small vocabulary every
//! other crate speaks: day phases, resource kinds, afterlives, shade
//! identifiers, the Olympian cast, and the persisted save layout. Types
//! defined here flow to `TypeScript` via `ts-rs` so a presentation layer can
//! render them without re-declaring the shapes.
//!
//! # Modules
//!
//! - [`cast`] -- The fixed list of Olympians the player can build rapport with
//! - [`enums`] -- Closed enumerations (phases, resources, afterlives)
//! - [`ids`] -- Type-safe UUID wrapper for shade identity
//! - [`structs`] -- The persisted [`SaveState`] snapshot

pub mod cast;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use cast::OLYMPIANS;
pub use enums::{Afterlife, Phase, ResourceKind};
pub use ids::ShadeId;
pub use structs::{SAVE_FORMAT_VERSION, SaveState};
