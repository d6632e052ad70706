//! Event types emitted by the game core.

use std::collections::BTreeMap;

use ferryman_shades::Shade;
use ferryman_types::{Phase, ResourceKind};

/// A state change observers may react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The clock moved to a new phase.
    PhaseChanged {
        /// The phase just entered.
        phase: Phase,
    },
    /// A new day began.
    DayChanged {
        /// The new day number.
        day: u32,
    },
    /// A resource counter changed.
    ResourceChanged {
        /// Which resource.
        kind: ResourceKind,
        /// Its value after the change.
        value: i64,
    },
    /// Rapport with a cast member changed.
    RelationshipChanged {
        /// The cast member.
        name: String,
        /// The relationship value after the change.
        value: i64,
    },
    /// A single flag was set or removed. Removal reports `false`.
    FlagChanged {
        /// The flag name.
        name: String,
        /// The flag value after the change.
        value: bool,
    },
    /// A batch of flags was written in one call.
    MultipleFlagsChanged {
        /// Exactly the entries that were written.
        flags: BTreeMap<String, bool>,
    },
    /// The Docks ferried a shade.
    ShadeProcessed {
        /// The shade, carrying both its correct and assigned afterlife.
        shade: Box<Shade>,
        /// Whether the player's decision was right.
        correct: bool,
    },
    /// The last day has passed.
    GameEnded {
        /// The day number that crossed the limit.
        day: u32,
    },
}

/// Discriminant of [`GameEvent`], used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// See [`GameEvent::PhaseChanged`].
    PhaseChanged,
    /// See [`GameEvent::DayChanged`].
    DayChanged,
    /// See [`GameEvent::ResourceChanged`].
    ResourceChanged,
    /// See [`GameEvent::RelationshipChanged`].
    RelationshipChanged,
    /// See [`GameEvent::FlagChanged`].
    FlagChanged,
    /// See [`GameEvent::MultipleFlagsChanged`].
    MultipleFlagsChanged,
    /// See [`GameEvent::ShadeProcessed`].
    ShadeProcessed,
    /// See [`GameEvent::GameEnded`].
    GameEnded,
}

impl GameEvent {
    /// Return this event's kind.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::PhaseChanged { .. } => EventKind::PhaseChanged,
            Self::DayChanged { .. } => EventKind::DayChanged,
            Self::ResourceChanged { .. } => EventKind::ResourceChanged,
            Self::RelationshipChanged { .. } => EventKind::RelationshipChanged,
            Self::FlagChanged { .. } => EventKind::FlagChanged,
            Self::MultipleFlagsChanged { .. } => EventKind::MultipleFlagsChanged,
            Self::ShadeProcessed { .. } => EventKind::ShadeProcessed,
            Self::GameEnded { .. } => EventKind::GameEnded,
        }
    }
}
