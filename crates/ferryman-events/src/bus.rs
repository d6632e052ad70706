//! Synchronous observer bus.

use tracing::trace;

use crate::EventSink;
use crate::event::{EventKind, GameEvent};

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&GameEvent)>;

struct Subscriber {
    id: SubscriptionId,
    /// `None` receives every event.
    filter: Option<EventKind>,
    callback: Callback,
}

/// Ordered list of subscriber callbacks.
///
/// Delivery is synchronous and in registration order. A callback only
/// sees the event; it has no access to the bus, so it cannot subscribe or
/// unsubscribe anyone while a notification is in flight.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub const fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Subscribe to one kind of event.
    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.register(Some(kind), Box::new(callback))
    }

    /// Subscribe to every event.
    pub fn subscribe_all<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.register(None, Box::new(callback))
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Return the number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn register(&mut self, filter: Option<EventKind>, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers.push(Subscriber {
            id,
            filter,
            callback,
        });
        id
    }
}

impl EventSink for EventBus {
    fn emit(&mut self, event: GameEvent) {
        let kind = event.kind();
        trace!(?kind, "Dispatching event");
        for subscriber in &mut self.subscribers {
            if subscriber.filter.is_none_or(|k| k == kind) {
                (subscriber.callback)(&event);
            }
        }
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ferryman_types::{Phase, ResourceKind};

    use super::*;

    fn recorder(bus: &mut EventBus, kind: Option<EventKind>) -> Rc<RefCell<Vec<GameEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let callback = move |e: &GameEvent| sink.borrow_mut().push(e.clone());
        match kind {
            Some(k) => bus.subscribe(k, callback),
            None => bus.subscribe_all(callback),
        };
        log
    }

    #[test]
    fn filtered_subscribers_only_see_their_kind() {
        let mut bus = EventBus::new();
        let phases = recorder(&mut bus, Some(EventKind::PhaseChanged));
        let everything = recorder(&mut bus, None);

        bus.emit(GameEvent::PhaseChanged { phase: Phase::Day });
        bus.emit(GameEvent::DayChanged { day: 1 });

        assert_eq!(phases.borrow().len(), 1);
        assert_eq!(everything.borrow().len(), 2);
    }

    #[test]
    fn delivery_follows_registration_order() {
        let mut bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            bus.subscribe(EventKind::ResourceChanged, move |_| {
                order.borrow_mut().push(tag);
            });
        }

        bus.emit(GameEvent::ResourceChanged {
            kind: ResourceKind::Obols,
            value: 1,
        });

        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(0_u32));
        let counter = Rc::clone(&hits);
        let id = bus.subscribe_all(move |_| *counter.borrow_mut() += 1);

        bus.emit(GameEvent::DayChanged { day: 1 });
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(GameEvent::DayChanged { day: 2 });

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<GameEvent> = Vec::new();
        sink.emit(GameEvent::DayChanged { day: 3 });
        sink.emit(GameEvent::GameEnded { day: 3 });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.last().unwrap().kind(), EventKind::GameEnded);
    }
}
