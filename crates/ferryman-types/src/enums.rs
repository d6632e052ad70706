//! Enumeration types for the Ferryman game.
//!
//! Every enumeration here is closed: the key sets of the ledger and the
//! phase cycle of the clock are fixed at compile time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Day phases
// ---------------------------------------------------------------------------

/// A sub-division of a game day.
///
/// Phases cycle `Dawn -> Day -> Evening -> Dawn`. The wrap from `Evening`
/// back to `Dawn` is the day boundary.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum Phase {
    /// Start of the day; new shades arrive at the riverbank.
    #[default]
    Dawn,
    /// Working hours; the player sorts and hires shades.
    Day,
    /// End of the day; the Docks ferry the queued shades.
    Evening,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Self; 3] = [Self::Dawn, Self::Day, Self::Evening];

    /// Return the phase that follows this one in the cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::Dawn => Self::Day,
            Self::Day => Self::Evening,
            Self::Evening => Self::Dawn,
        }
    }

    /// Return whether leaving this phase crosses a day boundary.
    pub const fn ends_day(self) -> bool {
        matches!(self, Self::Evening)
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Dawn => "Dawn",
            Self::Day => "Day",
            Self::Evening => "Evening",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A resource tracked by the ledger.
///
/// The ledger holds exactly one counter per variant, initialized to zero
/// and never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Coins paid for passage across the river.
    Obols,
    /// Medicinal and ritual herbs.
    Herbs,
    /// Precious stones mined from the underworld.
    Gemstones,
    /// Entertainment drawn from athletic contests.
    EntertainmentSporting,
    /// Entertainment drawn from the arts.
    EntertainmentCreativity,
    /// Entertainment drawn from debate and learning.
    EntertainmentIntellectual,
}

impl ResourceKind {
    /// Every resource kind, in ledger order.
    pub const ALL: [Self; 6] = [
        Self::Obols,
        Self::Herbs,
        Self::Gemstones,
        Self::EntertainmentSporting,
        Self::EntertainmentCreativity,
        Self::EntertainmentIntellectual,
    ];
}

// ---------------------------------------------------------------------------
// Afterlives
// ---------------------------------------------------------------------------

/// A destination a shade can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Afterlife {
    /// Paradise, for shades whose deeds were all good.
    Elysium,
    /// The meadows, for shades with a mixed record.
    Asphodel,
    /// The abyss, for shades with no good deeds.
    Tartarus,
}

impl Afterlife {
    /// Every afterlife, in the order the sorting menu offers them.
    pub const ALL: [Self; 3] = [Self::Elysium, Self::Asphodel, Self::Tartarus];
}

impl core::fmt::Display for Afterlife {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Elysium => "Elysium",
            Self::Asphodel => "Asphodel",
            Self::Tartarus => "Tartarus",
        };
        f.write_str(label)
    }
}
