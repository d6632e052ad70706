//! Story and dialogue flags.
//!
//! Flags are dynamically keyed. An absent flag reads as `false`, but
//! "never set" and "set to false" stay distinguishable through
//! [`Ledger::has_flag`].

use std::collections::BTreeMap;
use std::ops::Bound;

use ferryman_events::{EventSink, GameEvent};
use tracing::debug;

use crate::ledger::Ledger;

impl Ledger {
    /// Set a single flag and emit `FlagChanged`.
    pub fn set_flag(&mut self, name: &str, value: bool, sink: &mut impl EventSink) {
        self.flags.insert(name.to_owned(), value);
        debug!(name, value, "Flag set");
        sink.emit(GameEvent::FlagChanged {
            name: name.to_owned(),
            value,
        });
    }

    /// Return a flag's value; unset flags read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Return whether a flag exists, regardless of its value.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Return every flag that exists.
    pub const fn flags(&self) -> &BTreeMap<String, bool> {
        &self.flags
    }

    /// Remove a flag.
    ///
    /// Emits `FlagChanged(name, false)` only if the flag existed. Returns
    /// whether anything was removed.
    pub fn remove_flag(&mut self, name: &str, sink: &mut impl EventSink) -> bool {
        if self.flags.remove(name).is_none() {
            return false;
        }
        debug!(name, "Flag removed");
        sink.emit(GameEvent::FlagChanged {
            name: name.to_owned(),
            value: false,
        });
        true
    }

    /// Write a batch of flags, then emit exactly one `MultipleFlagsChanged`
    /// carrying the batch. No per-key `FlagChanged` is emitted.
    pub fn set_flags(&mut self, batch: &BTreeMap<String, bool>, sink: &mut impl EventSink) {
        for (name, &value) in batch {
            self.flags.insert(name.clone(), value);
        }
        debug!(count = batch.len(), "Flags set");
        sink.emit(GameEvent::MultipleFlagsChanged {
            flags: batch.clone(),
        });
    }

    /// Return every flag whose name starts with `prefix`.
    pub fn flags_with_prefix(&self, prefix: &str) -> BTreeMap<String, bool> {
        self.prefixed(prefix)
            .map(|(name, &value)| (name.clone(), value))
            .collect()
    }

    /// Return whether every named flag is set to `true`.
    ///
    /// An empty list is vacuously true.
    pub fn all_flags_set(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.flag(name))
    }

    /// Return whether at least one named flag is set to `true`.
    ///
    /// An empty list is false.
    pub fn any_flag_set(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.flag(name))
    }

    /// Remove every flag whose name starts with `prefix`.
    ///
    /// Each removal emits its own `FlagChanged(name, false)`, exactly as
    /// [`remove_flag`](Ledger::remove_flag) would. Returns how many were
    /// removed.
    pub fn remove_all_flags_with_prefix(&mut self, prefix: &str, sink: &mut impl EventSink) -> usize {
        let doomed: Vec<String> = self.prefixed(prefix).map(|(name, _)| name.clone()).collect();
        for name in &doomed {
            self.remove_flag(name, sink);
        }
        doomed.len()
    }

    /// Iterate over flags whose name starts with `prefix`, in key order.
    fn prefixed<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a String, &'a bool)> {
        self.flags
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(name, _)| name.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use ferryman_events::{Discard, EventKind};

    use super::*;

    fn batch(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
        entries
            .iter()
            .map(|&(name, value)| (name.to_owned(), value))
            .collect()
    }

    #[test]
    fn unset_flag_reads_false_and_does_not_exist() {
        let ledger = Ledger::new();
        assert!(!ledger.flag("intro_done"));
        assert!(!ledger.has_flag("intro_done"));
    }

    #[test]
    fn false_flag_exists_but_reads_false() {
        let mut ledger = Ledger::new();
        let mut events = Vec::new();
        ledger.set_flag("intro_done", false, &mut events);
        assert!(!ledger.flag("intro_done"));
        assert!(ledger.has_flag("intro_done"));
        assert_eq!(
            events,
            vec![GameEvent::FlagChanged {
                name: "intro_done".to_owned(),
                value: false
            }]
        );
    }

    #[test]
    fn remove_only_notifies_when_flag_existed() {
        let mut ledger = Ledger::new();
        let mut events = Vec::new();
        assert!(!ledger.remove_flag("ghost", &mut events));
        assert!(events.is_empty());

        ledger.set_flag("ghost", true, &mut Discard);
        assert!(ledger.remove_flag("ghost", &mut events));
        assert!(!ledger.has_flag("ghost"));
        assert_eq!(
            events,
            vec![GameEvent::FlagChanged {
                name: "ghost".to_owned(),
                value: false
            }]
        );
    }

    #[test]
    fn batch_set_emits_a_single_notification() {
        let mut ledger = Ledger::new();
        let mut events = Vec::new();
        let written = batch(&[("a", true), ("b", false)]);
        ledger.set_flags(&written, &mut events);

        assert_eq!(events.len(), 1);
        assert_eq!(
            events.first().map(GameEvent::kind),
            Some(EventKind::MultipleFlagsChanged)
        );
        assert_eq!(ledger.flags_with_prefix("a"), batch(&[("a", true)]));
    }

    #[test]
    fn empty_prefix_matches_every_flag() {
        let mut ledger = Ledger::new();
        ledger.set_flags(&batch(&[("b", false), ("a", true)]), &mut Discard);
        assert_eq!(ledger.flags_with_prefix(""), batch(&[("a", true), ("b", false)]));
        assert_eq!(ledger.remove_all_flags_with_prefix("", &mut Discard), 2);
        assert!(ledger.flags().is_empty());
    }

    #[test]
    fn prefix_query_matches_only_prefixed_names() {
        let mut ledger = Ledger::new();
        ledger.set_flags(
            &batch(&[
                ("quest_ares_started", true),
                ("quest_ares_done", false),
                ("quest_zeus_started", true),
                ("questionable", true),
                ("met_hades", true),
            ]),
            &mut Discard,
        );

        let ares = ledger.flags_with_prefix("quest_ares_");
        assert_eq!(
            ares,
            batch(&[("quest_ares_done", false), ("quest_ares_started", true)])
        );
        assert_eq!(ledger.flags_with_prefix("quest").len(), 4);
        assert!(ledger.flags_with_prefix("zzz").is_empty());
        assert_eq!(ledger.flags_with_prefix("").len(), 5);
    }

    #[test]
    fn all_and_any_read_flag_values() {
        let mut ledger = Ledger::new();
        ledger.set_flags(&batch(&[("a", true), ("b", true), ("c", false)]), &mut Discard);

        assert!(ledger.all_flags_set(&["a", "b"]));
        assert!(!ledger.all_flags_set(&["a", "c"]));
        assert!(!ledger.all_flags_set(&["a", "missing"]));
        assert!(ledger.all_flags_set(&[]));

        assert!(ledger.any_flag_set(&["c", "b"]));
        assert!(!ledger.any_flag_set(&["c", "missing"]));
        assert!(!ledger.any_flag_set(&[]));
    }

    #[test]
    fn prefix_removal_notifies_per_flag() {
        let mut ledger = Ledger::new();
        ledger.set_flags(
            &batch(&[("day1_a", true), ("day1_b", false), ("day2_a", true)]),
            &mut Discard,
        );

        let mut events = Vec::new();
        assert_eq!(ledger.remove_all_flags_with_prefix("day1_", &mut events), 2);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| matches!(
            e,
            GameEvent::FlagChanged { value: false, .. }
        )));
        assert!(ledger.has_flag("day2_a"));
        assert!(ledger.flags_with_prefix("day1_").is_empty());
    }
}
