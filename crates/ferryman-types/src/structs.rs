//! Persisted state structures.
//!
//! The save layout is deliberately flat: one snapshot of the day clock and
//! the full ledger. Where the bytes end up (disk, browser storage, a cloud
//! slot) is the host's concern.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Phase, ResourceKind};

/// Current version of the [`SaveState`] layout.
///
/// Bump this whenever a field is added, removed, or changes meaning.
/// Saves written before versioning existed decode as version 0.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Immutable snapshot of the clock and ledger.
///
/// Produced by exporting a running game and consumed by importing it into
/// another (or the same) instance. Maps are ordered so two snapshots of the
/// same state serialize to identical bytes, `saved_at` aside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SaveState {
    /// Layout version; see [`SAVE_FORMAT_VERSION`].
    #[serde(default)]
    pub version: u32,
    /// Wall-clock time the snapshot was taken. Informational only.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    /// Current day number.
    pub day: u32,
    /// Current phase within the day.
    pub phase: Phase,
    /// Every resource counter.
    pub resources: BTreeMap<ResourceKind, i64>,
    /// Relationship value per cast member.
    pub relationships: BTreeMap<String, i64>,
    /// Story and dialogue flags that have been set.
    pub flags: BTreeMap<String, bool>,
}

impl SaveState {
    /// Encode this snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Decode a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if the text is not a
    /// valid save layout.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
