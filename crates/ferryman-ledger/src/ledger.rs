//! The ledger struct: resource counters and Olympian relationships.
//!
//! Flag operations live in [`crate::flags`].

use std::collections::BTreeMap;

use ferryman_events::{EventSink, GameEvent};
use ferryman_types::{OLYMPIANS, ResourceKind};
use tracing::{debug, warn};

use crate::LedgerError;

/// The combined resource, relationship, and flag store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    /// One counter per [`ResourceKind`], always present.
    pub(crate) resources: BTreeMap<ResourceKind, i64>,
    /// One value per registered cast member, always present.
    pub(crate) relationships: BTreeMap<String, i64>,
    /// Only flags that have been set; absence reads as `false`.
    pub(crate) flags: BTreeMap<String, bool>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create a ledger with all resources at zero and the Olympian cast
    /// registered at zero.
    pub fn new() -> Self {
        Self::with_cast(OLYMPIANS)
    }

    /// Create a ledger with all resources at zero and a custom cast.
    pub fn with_cast<I, S>(cast: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let resources = ResourceKind::ALL.iter().map(|&kind| (kind, 0)).collect();
        let relationships = cast.into_iter().map(|name| (name.into(), 0)).collect();
        Self {
            resources,
            relationships,
            flags: BTreeMap::new(),
        }
    }

    /// Seed resource counters with starting balances.
    ///
    /// Kinds not present in `starting` stay at zero. No events are emitted:
    /// this is construction, not play.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeBalance`] if any balance is negative.
    pub fn with_starting_resources(
        mut self,
        starting: &BTreeMap<ResourceKind, i64>,
    ) -> Result<Self, LedgerError> {
        Self::check_balances(starting)?;
        for (&kind, &value) in starting {
            self.resources.insert(kind, value);
        }
        Ok(self)
    }

    /// Check that no balance in `balances` is negative.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeBalance`] for the first offending kind.
    pub fn check_balances(balances: &BTreeMap<ResourceKind, i64>) -> Result<(), LedgerError> {
        match balances.iter().find(|&(_, &value)| value < 0) {
            Some((&kind, &value)) => Err(LedgerError::NegativeBalance { kind, value }),
            None => Ok(()),
        }
    }

    // -----------------------------------------------------------------------
    // Resources
    // -----------------------------------------------------------------------

    /// Return the current value of a resource counter.
    pub fn resource(&self, kind: ResourceKind) -> i64 {
        // Every kind is inserted at construction and never removed.
        self.resources.get(&kind).copied().unwrap_or_default()
    }

    /// Return every resource counter.
    pub const fn resources(&self) -> &BTreeMap<ResourceKind, i64> {
        &self.resources
    }

    /// Apply `delta` to a resource counter.
    ///
    /// This is the only place the non-negative invariant is enforced. On
    /// success the new value is returned and a `ResourceChanged` event is
    /// emitted; on failure nothing changes and nothing is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientResource`] if the result would be
    /// negative, or [`LedgerError::Overflow`] if it would not fit in `i64`.
    pub fn try_modify_resource(
        &mut self,
        kind: ResourceKind,
        delta: i64,
        sink: &mut impl EventSink,
    ) -> Result<i64, LedgerError> {
        let available = self.resource(kind);
        let value = available
            .checked_add(delta)
            .ok_or(LedgerError::Overflow {
                kind,
                available,
                delta,
            })?;

        if value < 0 {
            return Err(LedgerError::InsufficientResource {
                kind,
                available,
                delta,
            });
        }

        self.resources.insert(kind, value);
        debug!(?kind, delta, value, "Resource changed");
        sink.emit(GameEvent::ResourceChanged { kind, value });
        Ok(value)
    }

    /// Apply `delta` to a resource counter, reporting success as a bool.
    ///
    /// Returns `false` (and leaves the ledger untouched) when the change
    /// would overdraw or overflow the counter.
    pub fn modify_resource(
        &mut self,
        kind: ResourceKind,
        delta: i64,
        sink: &mut impl EventSink,
    ) -> bool {
        match self.try_modify_resource(kind, delta, sink) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Resource change rejected");
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Relationships
    // -----------------------------------------------------------------------

    /// Return the relationship value for `name`, or 0 if it is not a
    /// registered cast member.
    pub fn relationship(&self, name: &str) -> i64 {
        self.relationships.get(name).copied().unwrap_or(0)
    }

    /// Return every registered relationship.
    pub const fn relationships(&self) -> &BTreeMap<String, i64> {
        &self.relationships
    }

    /// Return whether `name` is a registered cast member.
    pub fn is_cast_member(&self, name: &str) -> bool {
        self.relationships.contains_key(name)
    }

    /// Apply `delta` to the relationship with `name`.
    ///
    /// Unregistered names are silently ignored and `None` is returned.
    /// Values saturate at the `i64` bounds; relationships may go negative.
    pub fn modify_relationship(
        &mut self,
        name: &str,
        delta: i64,
        sink: &mut impl EventSink,
    ) -> Option<i64> {
        let Some(entry) = self.relationships.get_mut(name) else {
            debug!(name, delta, "Relationship change for unknown cast member ignored");
            return None;
        };
        *entry = entry.saturating_add(delta);
        let value = *entry;
        debug!(name, delta, value, "Relationship changed");
        sink.emit(GameEvent::RelationshipChanged {
            name: name.to_owned(),
            value,
        });
        Some(value)
    }

    // -----------------------------------------------------------------------
    // Restore
    // -----------------------------------------------------------------------

    /// Replace all ledger state from a snapshot.
    ///
    /// Emits one `ResourceChanged` per resource kind, one
    /// `RelationshipChanged` per cast member, and one `FlagChanged` per
    /// restored flag, in that order. Resource kinds missing from the
    /// snapshot reset to zero. Relationship entries for names outside the
    /// cast are dropped; cast members missing from the snapshot reset to
    /// zero. Validation happens before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeBalance`] if any resource is negative.
    pub fn restore(
        &mut self,
        resources: &BTreeMap<ResourceKind, i64>,
        relationships: &BTreeMap<String, i64>,
        flags: &BTreeMap<String, bool>,
        sink: &mut impl EventSink,
    ) -> Result<(), LedgerError> {
        Self::check_balances(resources)?;

        let dropped = relationships
            .keys()
            .filter(|name| !self.relationships.contains_key(name.as_str()))
            .count();
        if dropped > 0 {
            warn!(dropped, "Restored relationships for unknown cast members ignored");
        }

        for kind in ResourceKind::ALL {
            let value = resources.get(&kind).copied().unwrap_or(0);
            self.resources.insert(kind, value);
        }
        for (name, value) in &mut self.relationships {
            *value = relationships.get(name).copied().unwrap_or(0);
        }
        self.flags.clone_from(flags);

        for (&kind, &value) in &self.resources {
            sink.emit(GameEvent::ResourceChanged { kind, value });
        }
        for (name, &value) in &self.relationships {
            sink.emit(GameEvent::RelationshipChanged {
                name: name.clone(),
                value,
            });
        }
        for (name, &value) in &self.flags {
            sink.emit(GameEvent::FlagChanged {
                name: name.clone(),
                value,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ferryman_events::{Discard, EventKind};

    use super::*;

    #[test]
    fn fresh_ledger_is_all_zero() {
        let ledger = Ledger::new();
        for kind in ResourceKind::ALL {
            assert_eq!(ledger.resource(kind), 0);
        }
        assert_eq!(ledger.relationships().len(), OLYMPIANS.len());
        assert!(ledger.relationships().values().all(|&v| v == 0));
    }

    #[test]
    fn overdraw_is_rejected_without_mutation_or_event() {
        let mut ledger = Ledger::new();
        let mut events = Vec::new();

        assert!(!ledger.modify_resource(ResourceKind::Obols, -5, &mut events));
        assert_eq!(ledger.resource(ResourceKind::Obols), 0);
        assert!(events.is_empty());

        assert!(ledger.modify_resource(ResourceKind::Obols, 10, &mut events));
        assert_eq!(ledger.resource(ResourceKind::Obols), 10);

        assert!(ledger.modify_resource(ResourceKind::Obols, -5, &mut events));
        assert_eq!(ledger.resource(ResourceKind::Obols), 5);

        assert_eq!(
            events,
            vec![
                GameEvent::ResourceChanged {
                    kind: ResourceKind::Obols,
                    value: 10
                },
                GameEvent::ResourceChanged {
                    kind: ResourceKind::Obols,
                    value: 5
                },
            ]
        );
    }

    #[test]
    fn debit_to_exactly_zero_is_allowed() {
        let mut ledger = Ledger::new();
        ledger.modify_resource(ResourceKind::Herbs, 3, &mut Discard);
        assert!(ledger.modify_resource(ResourceKind::Herbs, -3, &mut Discard));
        assert_eq!(ledger.resource(ResourceKind::Herbs), 0);
    }

    #[test]
    fn repeated_rejection_is_idempotent() {
        let mut ledger = Ledger::new();
        ledger.modify_resource(ResourceKind::Gemstones, 2, &mut Discard);
        for _ in 0..3 {
            let err = ledger.try_modify_resource(ResourceKind::Gemstones, -3, &mut Discard);
            assert_eq!(
                err,
                Err(LedgerError::InsufficientResource {
                    kind: ResourceKind::Gemstones,
                    available: 2,
                    delta: -3
                })
            );
            assert_eq!(ledger.resource(ResourceKind::Gemstones), 2);
        }
    }

    #[test]
    fn running_value_never_goes_negative() {
        let mut ledger = Ledger::new();
        let deltas = [4, -1, -7, 3, -6, -1, 12, -12, -1, 0];
        for delta in deltas {
            let before = ledger.resource(ResourceKind::Obols);
            let applied = ledger.modify_resource(ResourceKind::Obols, delta, &mut Discard);
            let after = ledger.resource(ResourceKind::Obols);
            assert!(after >= 0);
            if applied {
                assert_eq!(after, before + delta);
            } else {
                assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn overflow_is_rejected() {
        let mut ledger = Ledger::new();
        ledger.modify_resource(ResourceKind::Obols, i64::MAX, &mut Discard);
        let err = ledger.try_modify_resource(ResourceKind::Obols, 1, &mut Discard);
        assert!(matches!(err, Err(LedgerError::Overflow { .. })));
        assert_eq!(ledger.resource(ResourceKind::Obols), i64::MAX);
    }

    #[test]
    fn unknown_relationship_reads_zero_and_ignores_writes() {
        let mut ledger = Ledger::new();
        let mut events = Vec::new();
        assert_eq!(ledger.relationship("Charon"), 0);
        assert_eq!(ledger.modify_relationship("Charon", 5, &mut events), None);
        assert_eq!(ledger.relationship("Charon"), 0);
        assert!(!ledger.is_cast_member("Charon"));
        assert!(events.is_empty());
    }

    #[test]
    fn known_relationship_changes_and_notifies() {
        let mut ledger = Ledger::new();
        let mut events = Vec::new();
        assert_eq!(ledger.modify_relationship("Hades", 3, &mut events), Some(3));
        assert_eq!(ledger.modify_relationship("Hades", -5, &mut events), Some(-2));
        assert_eq!(ledger.relationship("Hades"), -2);
        assert_eq!(events.len(), 2);
        assert_eq!(
            events.last().unwrap(),
            &GameEvent::RelationshipChanged {
                name: "Hades".to_owned(),
                value: -2
            }
        );
    }

    #[test]
    fn custom_cast_replaces_olympians() {
        let ledger = Ledger::with_cast(["Charon", "Cerberus"]);
        assert!(ledger.is_cast_member("Charon"));
        assert!(!ledger.is_cast_member("Zeus"));
    }

    #[test]
    fn starting_resources_seed_counters() {
        let mut starting = BTreeMap::new();
        starting.insert(ResourceKind::Obols, 20);
        let ledger = Ledger::new().with_starting_resources(&starting).unwrap();
        assert_eq!(ledger.resource(ResourceKind::Obols), 20);
        assert_eq!(ledger.resource(ResourceKind::Herbs), 0);

        starting.insert(ResourceKind::Herbs, -1);
        assert!(Ledger::new().with_starting_resources(&starting).is_err());
    }

    #[test]
    fn restore_replaces_state_and_notifies_each_group() {
        let mut ledger = Ledger::new();
        ledger.set_flag("stale", true, &mut Discard);

        let mut resources = BTreeMap::new();
        resources.insert(ResourceKind::Obols, 7);
        let mut relationships = BTreeMap::new();
        relationships.insert("Zeus".to_owned(), 4);
        relationships.insert("Charon".to_owned(), 9);
        let mut flags = BTreeMap::new();
        flags.insert("met_hades".to_owned(), true);

        let mut events = Vec::new();
        ledger
            .restore(&resources, &relationships, &flags, &mut events)
            .unwrap();

        assert_eq!(ledger.resource(ResourceKind::Obols), 7);
        assert_eq!(ledger.resource(ResourceKind::Herbs), 0);
        assert_eq!(ledger.relationship("Zeus"), 4);
        assert_eq!(ledger.relationship("Charon"), 0);
        assert!(!ledger.has_flag("stale"));
        assert!(ledger.flag("met_hades"));

        let count = |kind| events.iter().filter(|e| e.kind() == kind).count();
        assert_eq!(count(EventKind::ResourceChanged), ResourceKind::ALL.len());
        assert_eq!(count(EventKind::RelationshipChanged), OLYMPIANS.len());
        assert_eq!(count(EventKind::FlagChanged), 1);
    }

    #[test]
    fn restore_rejects_negative_balances_untouched() {
        let mut ledger = Ledger::new();
        ledger.modify_resource(ResourceKind::Obols, 3, &mut Discard);
        let before = ledger.clone();

        let mut resources = BTreeMap::new();
        resources.insert(ResourceKind::Herbs, -2);
        let mut events = Vec::new();
        let result = ledger.restore(&resources, &BTreeMap::new(), &BTreeMap::new(), &mut events);

        assert!(matches!(result, Err(LedgerError::NegativeBalance { .. })));
        assert_eq!(ledger, before);
        assert!(events.is_empty());
    }
}
