//! Resource, relationship, and flag ledger for the Ferryman game.
//!
//! The [`Ledger`] is three key-value stores behind one set of guarded
//! mutators:
//!
//! | Store | Keys | Missing key reads as | Notification |
//! |-------|------|----------------------|--------------|
//! | Resources | closed [`ResourceKind`] set | n/a (always present) | `ResourceChanged` |
//! | Relationships | fixed cast list | 0 | `RelationshipChanged` |
//! | Flags | any string | `false` | `FlagChanged` / `MultipleFlagsChanged` |
//!
//! A resource counter never goes negative: a debit that would overdraw it
//! is rejected whole and nothing is emitted. Every other mutator either
//! fully applies or is a documented no-op.
//!
//! # Usage
//!
//! ```
//! use ferryman_events::GameEvent;
//! use ferryman_ledger::Ledger;
//! use ferryman_types::ResourceKind;
//!
//! let mut ledger = Ledger::new();
//! let mut events: Vec<GameEvent> = Vec::new();
//!
//! assert!(!ledger.modify_resource(ResourceKind::Obols, -5, &mut events));
//! assert!(ledger.modify_resource(ResourceKind::Obols, 10, &mut events));
//! assert_eq!(ledger.resource(ResourceKind::Obols), 10);
//! assert_eq!(events.len(), 1);
//! ```
//!
//! [`ResourceKind`]: ferryman_types::ResourceKind

pub mod flags;
pub mod ledger;

pub use ledger::Ledger;

use ferryman_types::ResourceKind;

/// Errors that can occur when mutating the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A debit would drive the counter below zero.
    #[error("insufficient {kind:?}: have {available}, tried to apply {delta}")]
    InsufficientResource {
        /// The resource being debited.
        kind: ResourceKind,
        /// The counter before the attempted debit.
        available: i64,
        /// The rejected delta.
        delta: i64,
    },

    /// A resource counter would overflow `i64`.
    #[error("{kind:?} overflow: {available} + {delta}")]
    Overflow {
        /// The resource being credited.
        kind: ResourceKind,
        /// The counter before the attempted credit.
        available: i64,
        /// The rejected delta.
        delta: i64,
    },

    /// A starting or restored balance is negative.
    #[error("negative balance for {kind:?}: {value}")]
    NegativeBalance {
        /// The resource with the bad value.
        kind: ResourceKind,
        /// The rejected value.
        value: i64,
    },
}
