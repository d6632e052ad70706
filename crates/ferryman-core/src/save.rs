//! Snapshot export, validation, and restore.
//!
//! A [`SaveState`] captures the day clock and the whole ledger. Pending
//! shades, hired shades and the Docks queue are not part of it: a restored
//! game picks up at the recorded day and phase with empty queues.
//!
//! Restoring is all-or-nothing. [`validate`] checks every field before
//! anything is written, so a rejected snapshot leaves the running game
//! exactly as it was. Any day is accepted: the clock keeps counting after
//! the end signal, and a snapshot past `max_days` restores as an ended game.

use std::path::Path;

use chrono::Utc;
use ferryman_ledger::{Ledger, LedgerError};
use ferryman_types::{SAVE_FORMAT_VERSION, SaveState};
use tracing::{debug, info};

use crate::clock::PhaseClock;

/// Errors that can occur when saving or restoring.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The snapshot was written by a newer build.
    #[error("save format version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version recorded in the snapshot.
        found: u32,
        /// Highest version this build reads.
        supported: u32,
    },

    /// The recorded ledger is invalid.
    #[error("invalid ledger in save: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("save JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The snapshot file could not be read or written.
    #[error("save file I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// Capture the clock and ledger as a new snapshot.
pub fn export(clock: &PhaseClock, ledger: &Ledger) -> SaveState {
    let save = SaveState {
        version: SAVE_FORMAT_VERSION,
        saved_at: Some(Utc::now()),
        day: clock.day(),
        phase: clock.phase(),
        resources: ledger.resources().clone(),
        relationships: ledger.relationships().clone(),
        flags: ledger.flags().clone(),
    };
    debug!(day = save.day, phase = %save.phase, "State exported");
    save
}

/// Check that `save` can be restored.
///
/// # Errors
///
/// Returns [`SaveError::UnsupportedVersion`] for snapshots from a newer
/// build, or [`SaveError::Ledger`] if any resource is negative.
pub fn validate(save: &SaveState) -> Result<(), SaveError> {
    if save.version > SAVE_FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion {
            found: save.version,
            supported: SAVE_FORMAT_VERSION,
        });
    }

    Ledger::check_balances(&save.resources)?;
    Ok(())
}

/// Write `save` to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SaveError::Json`] if encoding fails or [`SaveError::Io`] if the
/// file cannot be written.
pub fn write_to_file(save: &SaveState, path: &Path) -> Result<(), SaveError> {
    let json = save.to_json()?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), day = save.day, "Save written");
    Ok(())
}

/// Read a snapshot from a JSON file.
///
/// The snapshot is decoded but not validated; pass it to [`validate`] (or
/// straight to `Game::import_state`, which validates) before trusting it.
///
/// # Errors
///
/// Returns [`SaveError::Io`] if the file cannot be read or
/// [`SaveError::Json`] if it is not a valid save layout.
pub fn read_from_file(path: &Path) -> Result<SaveState, SaveError> {
    let json = std::fs::read_to_string(path)?;
    let save = SaveState::from_json(&json)?;
    debug!(path = %path.display(), day = save.day, version = save.version, "Save read");
    Ok(save)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use ferryman_events::Discard;
    use ferryman_types::{Phase, ResourceKind};

    use super::*;

    fn snapshot(day: u32) -> SaveState {
        SaveState {
            version: SAVE_FORMAT_VERSION,
            saved_at: None,
            day,
            phase: Phase::Day,
            resources: BTreeMap::from([(ResourceKind::Obols, 12)]),
            relationships: BTreeMap::new(),
            flags: BTreeMap::new(),
        }
    }

    #[test]
    fn export_captures_clock_and_ledger() {
        let clock = PhaseClock::from_parts(4, Phase::Evening, 30).unwrap();
        let mut ledger = Ledger::new();
        ledger.modify_resource(ResourceKind::Herbs, 7, &mut Discard);
        ledger.modify_relationship("Hermes", 3, &mut Discard);
        ledger.set_flag("met_cerberus", true, &mut Discard);

        let save = export(&clock, &ledger);
        assert_eq!(save.version, SAVE_FORMAT_VERSION);
        assert!(save.saved_at.is_some());
        assert_eq!(save.day, 4);
        assert_eq!(save.phase, Phase::Evening);
        assert_eq!(save.resources.get(&ResourceKind::Herbs), Some(&7));
        assert_eq!(save.resources.len(), ResourceKind::ALL.len());
        assert_eq!(save.relationships.get("Hermes"), Some(&3));
        assert_eq!(save.flags.get("met_cerberus"), Some(&true));
    }

    #[test]
    fn valid_snapshot_passes() {
        assert!(validate(&snapshot(3)).is_ok());
        assert!(validate(&snapshot(31)).is_ok());
    }

    #[test]
    fn legacy_unversioned_snapshot_passes() {
        let mut save = snapshot(3);
        save.version = 0;
        assert!(validate(&save).is_ok());
    }

    #[test]
    fn newer_version_is_rejected() {
        let mut save = snapshot(3);
        save.version = SAVE_FORMAT_VERSION.saturating_add(1);
        assert!(matches!(
            validate(&save),
            Err(SaveError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn day_long_past_the_end_passes() {
        assert!(validate(&snapshot(32)).is_ok());
        assert!(validate(&snapshot(u32::MAX)).is_ok());
    }

    #[test]
    fn negative_resource_is_rejected() {
        let mut save = snapshot(3);
        save.resources.insert(ResourceKind::Gemstones, -4);
        assert!(matches!(validate(&save), Err(SaveError::Ledger { .. })));
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "ferryman-save-test-{}.json",
            std::process::id()
        ));
        let save = snapshot(9);
        write_to_file(&save, &path).unwrap();
        let loaded = read_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, save);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("/nonexistent/ferryman/save.json");
        assert!(matches!(read_from_file(path), Err(SaveError::Io { .. })));
    }
}
